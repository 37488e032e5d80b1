//! # `bahi-api` - HTTP API 网关
//!
//! 本 crate 是 Bahi 贸易台账系统的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端或浏览器的 HTTP 请求
//! - 调用注入的存储与汇率端口完成业务操作
//! - 将存储文档渲染为 JSON 安全的 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
