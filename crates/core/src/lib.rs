//! # `bahi-core` - 领域端口与公共组件
//!
//! 本 crate 定义贸易台账系统的核心抽象：文档存储端口、汇率数据端口、
//! 统一配置结构，以及日期归一化 / 响应格式化两个叶子组件。
//! 不包含任何具体的数据库或 HTTP 实现，上层 crate 通过 `Arc<dyn Trait>` 注入。

pub mod common;
pub mod config;
pub mod rates;
pub mod store;
