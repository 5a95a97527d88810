//! 环境变量驱动的运行配置

use std::env;

pub const DEFAULT_POOL_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// 生成链接时使用的部署源，例如 https://guides.example.com
    pub base_url: String,
    /// 存储后端名称: file / memory
    pub storage_backend: String,
    /// file 后端使用的数据文件路径
    pub storage_file: String,
    /// 每个项目初始化的链接池大小
    pub pool_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        // 去掉尾部斜杠，链接模板里自己拼
        let base_url = base_url.trim_end_matches('/').to_string();

        AppConfig {
            base_url,
            storage_backend: env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".to_string()),
            storage_file: env::var("STORAGE_FILE")
                .unwrap_or_else(|_| "linkrotator.json".to_string()),
            pool_size: env::var("POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_POOL_SIZE),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_url: "http://localhost:3000".to_string(),
            storage_backend: "file".to_string(),
            storage_file: "linkrotator.json".to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}
