use async_trait::async_trait;
use bahi_core::store::error::StoreError;
use bahi_core::store::port::ExpenseStore;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::query;

/// 费用集合名，与既有数据保持一致
const EXPENSE_COLLECTION: &str = "trading_expense";

/// ExpenseStore 的 MongoDB 实现。
///
/// # Summary
/// 在 `trading_expense` 集合上执行过滤查询、重复检查与单文档写操作。
///
/// # Invariants
/// * 集合上没有 `jobNo` 唯一索引，重复检查由资源层在插入前完成。
pub struct MongoExpenseStore {
    collection: Collection<Document>,
}

impl MongoExpenseStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(EXPENSE_COLLECTION),
        }
    }
}

#[async_trait]
impl ExpenseStore for MongoExpenseStore {
    /// # Summary
    /// 列出费用记录，`_id` 降序（最新插入在前）。
    async fn list_expenses(&self, job_no: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let mut query = Document::new();
        if let Some(needle) = job_no {
            query.insert("jobNo", query::ci_substring(needle));
        }

        let cursor = self
            .collection
            .find(query)
            .sort(doc! { "_id": -1 })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// # Summary
    /// `jobNo` 精确匹配查找，供插入前的重复检查使用。
    async fn find_by_job_no(&self, job_no: &str) -> Result<Option<Document>, StoreError> {
        self.collection
            .find_one(doc! { "jobNo": job_no })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// # Summary
    /// 插入费用记录，返回服务端生成的标识符。
    async fn insert_expense(&self, doc: Document) -> Result<ObjectId, StoreError> {
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
    /// `$set` 合并给定字段；不校验 `jobNo` 唯一性，无匹配时不报错。
    async fn update_expense(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError> {
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
    async fn delete_expense(&self, id: &ObjectId) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
