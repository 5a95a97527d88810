pub use serde::{Deserialize, Serialize};

use crate::errors::{LinkRotatorError, Result};

/// 池中的一条备用链接
#[derive(Debug, Clone, PartialEq)]
pub struct BackupLink {
    pub id: String,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub last_used: Option<chrono::DateTime<chrono::Utc>>,
    pub use_count: usize,
}

/// 持久化 / 导出用的链接表示，字段名与原始池文档保持一致
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SerializableBackupLink {
    pub id: String,
    pub url: String,
    pub created_at: String,
    #[serde(default)]
    pub last_used: Option<String>,

    #[serde(default)]
    pub use_count: usize,
}

impl From<&BackupLink> for SerializableBackupLink {
    fn from(link: &BackupLink) -> Self {
        Self {
            id: link.id.clone(),
            url: link.url.clone(),
            created_at: link.created_at.to_rfc3339(),
            last_used: link.last_used.map(|dt| dt.to_rfc3339()),
            use_count: link.use_count,
        }
    }
}

impl SerializableBackupLink {
    /// 转换为 BackupLink，时间戳解析失败时整体拒绝
    pub fn into_backup_link(self) -> Result<BackupLink> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| {
                LinkRotatorError::invalid_pool_format(format!(
                    "链接 {} 的 createdAt 无法解析: {}",
                    self.id, e
                ))
            })?
            .with_timezone(&chrono::Utc);

        let last_used = match self.last_used {
            Some(raw) => Some(
                chrono::DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| {
                        LinkRotatorError::invalid_pool_format(format!(
                            "链接 {} 的 lastUsed 无法解析: {}",
                            self.id, e
                        ))
                    })?
                    .with_timezone(&chrono::Utc),
            ),
            None => None,
        };

        Ok(BackupLink {
            id: self.id,
            url: self.url,
            created_at,
            last_used,
            use_count: self.use_count,
        })
    }
}

/// 单个项目链接池的统计信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PoolStats {
    pub project_id: String,
    pub pool_size: usize,
    pub total_use_count: usize,
    pub used_entries: usize,
    pub unused_entries: usize,
    pub cursor: u64,
    pub last_used: Option<chrono::DateTime<chrono::Utc>>,
}
