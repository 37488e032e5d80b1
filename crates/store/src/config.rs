use bahi_core::config::DatabaseConfig;
use bahi_core::store::error::StoreError;
use mongodb::{Client, Database};

/// # Summary
/// 根据配置建立 MongoDB 连接并返回数据库句柄。
///
/// # Logic
/// 1. 由 URI 构建客户端（驱动内部维护连接池，句柄可廉价克隆）。
/// 2. 返回配置指定的数据库。
///
/// # Arguments
/// * `config` - 数据库连接参数。
///
/// # Returns
/// * `Result<Database, StoreError>` - 数据库句柄 or 初始化错误。
pub async fn connect(config: &DatabaseConfig) -> Result<Database, StoreError> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;
    tracing::info!("MongoDB client ready: database={}", config.database);
    Ok(client.database(&config.database))
}
