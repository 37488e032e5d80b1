//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use bahi_core::rates::port::RateProvider;
use bahi_core::store::port::{ExpenseStore, PurchaseStore};

use crate::routes::{expense, purchase, rates};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 三个端口在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 请求之间不共享任何其他可变状态。
#[derive(Clone)]
pub struct AppState {
    /// 采购集合存储端口
    pub purchase_store: Arc<dyn PurchaseStore>,
    /// 费用集合存储端口
    pub expense_store: Arc<dyn ExpenseStore>,
    /// 汇率数据端口
    pub rate_provider: Arc<dyn RateProvider>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bahi 贸易台账 API",
        version = "0.1.0",
        description = "采购与费用两套台账的 CRUD / 查询接口，外加 USD→INR 汇率透传。",
        contact(name = "Bahi Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "采购 (Purchases)", description = "采购台账的过滤查询与增删改"),
        (name = "费用 (Expenses)", description = "费用台账的过滤查询、增删改与汇总"),
        (name = "汇率 (Exchange Rate)", description = "第三方汇率透传")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 组装完整的 axum 应用路由树（业务路由 + Swagger UI + CORS）。
///
/// 独立于 [`start_server`]，方便测试用自备的监听器挂载同一棵路由树。
pub fn build_router(state: AppState) -> Router {
    let api_router = OpenApiRouter::new()
        .routes(routes!(rates::get_exchange_rate))
        .routes(routes!(purchase::list_purchases))
        .routes(routes!(purchase::create_purchase))
        .routes(routes!(purchase::update_purchase))
        .routes(routes!(purchase::delete_purchase))
        .routes(routes!(expense::list_expenses))
        .routes(routes!(expense::create_expense))
        .routes(routes!(expense::update_expense))
        .routes(routes!(expense::delete_expense))
        .routes(routes!(expense::expense_summary));

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(api_router)
        .with_state(state)
        .split_for_parts();

    // 配置 CORS (前端直连，允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// # Summary
/// 绑定 TCP 端口并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:5000"`
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Bahi API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
