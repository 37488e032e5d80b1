//! # 内存版存储实现 (test-utils)
//!
//! 与 MongoDB 适配器语义对齐的进程内实现，供 API 集成测试在无外部
//! 数据库的环境下运行。过滤、排序与类型分桶行为刻意模仿 BSON 比较规则。

use std::cmp::Ordering;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use dashmap::DashMap;

use super::error::StoreError;
use super::port::{ExpenseStore, PurchaseFilter, PurchaseStore};
use crate::common::date;

/// 大小写不敏感的字面子串匹配
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 仅在同类型时比较，模仿 BSON 的类型分桶：
/// 类型不同的值不参与区间匹配。
fn cmp_same_type(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn within_lower(stored: &Bson, bound: &Bson) -> bool {
    matches!(cmp_same_type(stored, bound), Some(o) if o != Ordering::Less)
}

fn within_upper(stored: &Bson, bound: &Bson) -> bool {
    matches!(cmp_same_type(stored, bound), Some(o) if o != Ordering::Greater)
}

/// `date` 字段的降序排序键，类型秩参考 BSON 排序规则（日期高于字符串）。
fn date_sort_key(doc: &Document) -> (u8, i64, String) {
    match doc.get("date") {
        Some(Bson::DateTime(dt)) => (3, dt.timestamp_millis(), String::new()),
        Some(Bson::String(s)) => (1, 0, s.clone()),
        _ => (0, 0, String::new()),
    }
}

/// # Summary
/// 采购集合的内存实现。
#[derive(Default)]
pub struct MemoryPurchaseStore {
    docs: DashMap<ObjectId, Document>,
}

impl MemoryPurchaseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Document>, StoreError> {
        let from = filter.from.as_deref().map(date::normalize_for_filter);
        let to = filter.to.as_deref().map(date::normalize_for_filter);

        let mut matched: Vec<Document> = self
            .docs
            .iter()
            .filter(|entry| {
                let doc = entry.value();
                if let Some(needle) = &filter.business_no {
                    let hit = doc
                        .get_str("businessNo")
                        .map(|s| contains_ci(s, needle))
                        .unwrap_or(false);
                    if !hit {
                        return false;
                    }
                }
                if from.is_some() || to.is_some() {
                    let stored = match doc.get("date") {
                        Some(value) => value,
                        None => return false,
                    };
                    if let Some(bound) = &from {
                        if !within_lower(stored, bound) {
                            return false;
                        }
                    }
                    if let Some(bound) = &to {
                        if !within_upper(stored, bound) {
                            return false;
                        }
                    }
                }
                true
            })
            .map(|entry| entry.value().clone())
            .collect();

        matched.sort_by(|a, b| date_sort_key(b).cmp(&date_sort_key(a)));
        Ok(matched)
    }

    async fn insert_purchase(&self, mut doc: Document) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        doc.insert("_id", id);
        self.docs.insert(id, doc);
        Ok(id)
    }

    async fn update_purchase(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError> {
        if let Some(mut existing) = self.docs.get_mut(id) {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete_purchase(&self, id: &ObjectId) -> Result<(), StoreError> {
        self.docs.remove(id);
        Ok(())
    }
}

/// # Summary
/// 费用集合的内存实现。
#[derive(Default)]
pub struct MemoryExpenseStore {
    docs: DashMap<ObjectId, Document>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn list_expenses(&self, job_no: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let mut matched: Vec<(ObjectId, Document)> = self
            .docs
            .iter()
            .filter(|entry| match job_no {
                Some(needle) => entry
                    .value()
                    .get_str("jobNo")
                    .map(|s| contains_ci(s, needle))
                    .unwrap_or(false),
                None => true,
            })
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        // _id 降序：最近插入的在前
        matched.sort_by(|a, b| b.0.bytes().cmp(&a.0.bytes()));
        Ok(matched.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn find_by_job_no(&self, job_no: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .docs
            .iter()
            .find(|entry| {
                entry
                    .value()
                    .get_str("jobNo")
                    .map(|s| s == job_no)
                    .unwrap_or(false)
            })
            .map(|entry| entry.value().clone()))
    }

    async fn insert_expense(&self, mut doc: Document) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        doc.insert("_id", id);
        self.docs.insert(id, doc);
        Ok(id)
    }

    async fn update_expense(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError> {
        if let Some(mut existing) = self.docs.get_mut(id) {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete_expense(&self, id: &ObjectId) -> Result<(), StoreError> {
        self.docs.remove(id);
        Ok(())
    }
}
