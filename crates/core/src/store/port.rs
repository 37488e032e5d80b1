use super::error::StoreError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;

/// # Summary
/// 采购列表的查询条件，全部字段可选。
///
/// # Invariants
/// - `from` / `to` 为闭区间边界，各自独立生效。
/// - 空字符串视同未提供，由上层在构造前过滤。
#[derive(Debug, Clone, Default)]
pub struct PurchaseFilter {
    // 单号的大小写不敏感子串匹配
    pub business_no: Option<String>,
    // 日期下界 (含)，格式 YYYY-MM-DD
    pub from: Option<String>,
    // 日期上界 (含)，格式 YYYY-MM-DD
    pub to: Option<String>,
}

/// # Summary
/// 采购集合存储接口。记录为自由结构文档，系统只对
/// `businessNo` 与 `date` 两个字段赋予语义。
///
/// # Invariants
/// - 标识符由存储端在插入时生成，调用方视其为不透明值。
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// # Summary
    /// 按条件列出采购记录。
    ///
    /// # Logic
    /// 1. `businessNo` 做大小写不敏感的字面子串匹配。
    /// 2. `from` / `to` 经写查分离的日期归一化后构成闭区间；
    ///    畸形边界按字面值参与比较（见 `common::date`）。
    /// 3. 结果按 `date` 降序排列，全量返回。
    ///
    /// # Arguments
    /// * `filter`: 查询条件。
    ///
    /// # Returns
    /// 匹配的文档列表或 `StoreError`。
    async fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Document>, StoreError>;

    /// # Summary
    /// 插入一条采购记录并返回新生成的标识符。
    async fn insert_purchase(&self, doc: Document) -> Result<ObjectId, StoreError>;

    /// # Summary
    /// 将给定字段合并进指定记录 (`$set` 语义)。
    ///
    /// # Logic
    /// 未提供的字段保持原值；标识符无匹配时静默成功，不报告未找到。
    async fn update_purchase(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError>;

    /// # Summary
    /// 删除指定记录。标识符无匹配时同样视为成功。
    async fn delete_purchase(&self, id: &ObjectId) -> Result<(), StoreError>;
}

/// # Summary
/// 费用集合存储接口，业务键为 `jobNo`。
///
/// # Invariants
/// - `jobNo` 的唯一性由资源层在插入前检查，存储层本身不设唯一索引。
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// # Summary
    /// 列出费用记录，可按 `jobNo` 做大小写不敏感子串过滤。
    ///
    /// # Logic
    /// 按 `_id` 降序排列（近似插入序倒序，最新在前）。
    async fn list_expenses(&self, job_no: Option<&str>) -> Result<Vec<Document>, StoreError>;

    /// # Summary
    /// 按 `jobNo` 精确查找一条费用记录，用于插入前的重复检查。
    async fn find_by_job_no(&self, job_no: &str) -> Result<Option<Document>, StoreError>;

    /// # Summary
    /// 插入一条费用记录并返回新生成的标识符。
    async fn insert_expense(&self, doc: Document) -> Result<ObjectId, StoreError>;

    /// # Summary
    /// 将给定字段合并进指定记录 (`$set` 语义)，无匹配时静默成功。
    /// 不重新校验 `jobNo` 唯一性。
    async fn update_expense(&self, id: &ObjectId, fields: Document) -> Result<(), StoreError>;

    /// # Summary
    /// 删除指定记录，无匹配时同样视为成功。
    async fn delete_expense(&self, id: &ObjectId) -> Result<(), StoreError>;
}
