use std::sync::Arc;

use bahi_api::server::{start_server, AppState};
use bahi_core::config::AppConfig;
use bahi_core::rates::port::RateProvider;
use bahi_core::store::port::{ExpenseStore, PurchaseStore};
use bahi_rates::exchangeratesapi::ExchangeRatesApiProvider;
use bahi_store::expense::MongoExpenseStore;
use bahi_store::purchase::MongoPurchaseStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以内置默认值打底。
/// 2. 叠加可选的 `config.toml`。
/// 3. 最后叠加 `BAHI_` 前缀的环境变量（如 `BAHI_DATABASE__URI`）。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    let defaults = config::Config::try_from(&AppConfig::default())?;
    config::Config::builder()
        .add_source(defaults)
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("BAHI").separator("__"))
        .build()?
        .try_deserialize()
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 网关。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载配置并建立 MongoDB 连接。
/// 3. 实例化基础设施层（Store、Rates）。
/// 4. 注入共享状态并启动 HTTP 服务。
/// 5. 收到外部退出信号时结束进程。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Bahi backend starting...");

    // 2. 加载配置并连接文档数据库
    let config = load_config()?;
    let db = bahi_store::config::connect(&config.database).await?;

    // 3. 实例化基础设施层
    let purchase_store: Arc<dyn PurchaseStore> = Arc::new(MongoPurchaseStore::new(&db));
    let expense_store: Arc<dyn ExpenseStore> = Arc::new(MongoExpenseStore::new(&db));
    let rate_provider: Arc<dyn RateProvider> =
        Arc::new(ExchangeRatesApiProvider::new(config.rates.clone()));

    // 4. 注入共享状态并启动 HTTP 服务
    let state = AppState {
        purchase_store,
        expense_store,
        rate_provider,
    };
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tokio::select! {
        result = start_server(state, &bind_addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
