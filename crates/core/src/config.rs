use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub rates: RatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 文档数据库连接参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

/// 第三方汇率接口参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "hemraj_group".to_string(),
            },
            rates: RatesConfig {
                endpoint: "https://api.exchangeratesapi.io/v1/latest".to_string(),
                access_key: String::new(), // Must be provided via config file or env
            },
        }
    }
}
