//! 单文件 JSON 存储后端
//!
//! 所有槽位放在同一个 JSON 对象里，启动时整体读入内存，
//! 每次写入后整体落盘。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{error, info};

use super::Storage;
use crate::errors::{LinkRotatorError, Result};

#[derive(Debug)]
pub struct FileStorage {
    file_path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let storage = FileStorage {
            file_path: file_path.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        };

        // 初始化时加载数据到缓存
        let slots = storage.load_from_file()?;
        {
            let mut cache_guard = storage.cache.write().unwrap();
            *cache_guard = slots;
            info!(
                "FileStorage 初始化完成，已加载 {} 个槽位",
                cache_guard.len()
            );
        }

        Ok(storage)
    }

    fn load_from_file(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(slots) => Ok(slots),
                Err(e) => {
                    error!("解析存储文件失败: {}", e);
                    Err(LinkRotatorError::serialization(format!(
                        "解析存储文件失败: {}",
                        e
                    )))
                }
            },
            Err(_) => {
                info!("存储文件不存在，创建空的存储");
                if let Err(e) = fs::write(&self.file_path, "{}") {
                    error!("创建存储文件失败: {}", e);
                    return Err(LinkRotatorError::file_operation(format!(
                        "创建存储文件失败: {}",
                        e
                    )));
                }
                Ok(HashMap::new())
            }
        }
    }

    fn save_to_file(&self, slots: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(slots)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache_guard = self
            .cache
            .read()
            .map_err(|e| LinkRotatorError::storage_unavailable(e.to_string()))?;
        Ok(cache_guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        // 更新缓存
        {
            let mut cache_guard = self
                .cache
                .write()
                .map_err(|e| LinkRotatorError::storage_unavailable(e.to_string()))?;
            cache_guard.insert(key.to_string(), value);
        }

        // 保存到文件
        let cache_guard = self
            .cache
            .read()
            .map_err(|e| LinkRotatorError::storage_unavailable(e.to_string()))?;
        self.save_to_file(&cache_guard)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        {
            let mut cache_guard = self
                .cache
                .write()
                .map_err(|e| LinkRotatorError::storage_unavailable(e.to_string()))?;
            cache_guard.remove(key);
        }

        let cache_guard = self
            .cache
            .read()
            .map_err(|e| LinkRotatorError::storage_unavailable(e.to_string()))?;
        self.save_to_file(&cache_guard)?;

        Ok(())
    }

    async fn get_backend_name(&self) -> String {
        "file".to_string()
    }
}
