use async_trait::async_trait;
use bahi_core::common::date;
use bahi_core::store::error::StoreError;
use bahi_core::store::port::{PurchaseFilter, PurchaseStore};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::query;

/// 采购集合名，与既有数据保持一致
const PURCHASE_COLLECTION: &str = "trading_purchase";

/// PurchaseStore 的 MongoDB 实现。
///
/// # Summary
/// 在 `trading_purchase` 集合上执行过滤查询与单文档写操作。
///
/// # Invariants
/// * 所有操作共享驱动内部的连接池，实例可安全跨请求复用。
/// * 写路径不做任何模式校验，文档形状完全由调用方决定。
pub struct MongoPurchaseStore {
    collection: Collection<Document>,
}

impl MongoPurchaseStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(PURCHASE_COLLECTION),
        }
    }
}

#[async_trait]
impl PurchaseStore for MongoPurchaseStore {
    /// # Summary
    /// 按条件列出采购记录，`date` 降序。
    ///
    /// # Logic
    /// 1. `businessNo` 转为大小写不敏感的字面子串正则。
    /// 2. `from` / `to` 经查询路径归一化后拼出 `$gte` / `$lte` 闭区间；
    ///    畸形边界以字符串字面值参与比较，受 BSON 类型分桶约束而匹配不到
    ///    真实日期。
    /// 3. 全量拉取游标，不分页。
    async fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Document>, StoreError> {
        let mut query = Document::new();

        if let Some(needle) = &filter.business_no {
            query.insert("businessNo", query::ci_substring(needle));
        }

        let mut range = Document::new();
        if let Some(from) = &filter.from {
            range.insert("$gte", date::normalize_for_filter(from));
        }
        if let Some(to) = &filter.to {
            range.insert("$lte", date::normalize_for_filter(to));
        }
        if !range.is_empty() {
            query.insert("date", range);
        }

        let cursor = self
            .collection
            .find(query)
            .sort(doc! { "date": -1 })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// # Summary
    /// 插入采购记录，返回服务端生成的标识符。
    async fn insert_purchase(&self, doc: Document) -> Result<ObjectId, StoreError> {
        let result = self
            .collection
            .insert_one(doc)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unknown("inserted _id is not an ObjectId".to_string()))
    }

    /// # Summary
    /// `$set` 合并给定字段；标识符无匹配时不报错。
    async fn update_purchase(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Ok(());
        }
        self.collection
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    /// # Summary
    /// 删除指定记录；无匹配时同样静默成功。
    async fn delete_purchase(&self, id: &ObjectId) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
