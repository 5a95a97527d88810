//! 键值存储抽象
//!
//! 池文档和游标各占一个槽位，键名按项目 ID 派生，
//! 写入一律整体覆盖（last-writer-wins）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;

pub mod file;
pub mod memory;

/// 项目链接池的存储键
pub fn pool_key(project_id: &str) -> String {
    format!("backup_links_{}", project_id)
}

/// 项目轮换游标的存储键
pub fn cursor_key(project_id: &str) -> String {
    format!("current_link_index_{}", project_id)
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// 读取一个槽位，不存在时返回 None
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 无条件覆盖写入一个槽位
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// 删除一个槽位，不存在时静默成功
    async fn remove(&self, key: &str) -> Result<()>;

    async fn get_backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &AppConfig) -> Result<Arc<dyn Storage>> {
        let boxed: Box<dyn Storage> = match config.storage_backend.as_str() {
            "memory" => Box::new(memory::MemoryStorage::new()),
            _ => Box::new(file::FileStorage::new(&config.storage_file)?),
        };

        Ok(Arc::from(boxed))
    }
}
