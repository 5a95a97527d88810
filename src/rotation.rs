//! 链接轮换服务
//!
//! 负责池的懒初始化、游标推进、使用统计维护以及导入导出。
//! 池和游标是两个独立槽位，读-改-写序列用每项目互斥锁保护，
//! 但两个槽位之间没有事务保证。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::{LinkRotatorError, Result};
use crate::generator::{Clock, LinkGenerator, RandomSource, SystemClock, ThreadRandom};
use crate::storages::{Storage, cursor_key, pool_key};
use crate::structs::{BackupLink, PoolStats, SerializableBackupLink};

/// 把池序列化成导出 / 落盘共用的 JSON 文档
pub fn serialize_pool(pool: &[BackupLink]) -> Result<String> {
    let rows: Vec<SerializableBackupLink> =
        pool.iter().map(SerializableBackupLink::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// 解析池文档并做结构校验
///
/// 要求每个条目的时间戳可解析、url 非空、id 在池内唯一。
/// 长度不做限制，空池在选取阶段才报 EmptyPool。
pub fn parse_pool_document(document: &str) -> Result<Vec<BackupLink>> {
    let rows: Vec<SerializableBackupLink> = serde_json::from_str(document)
        .map_err(|e| LinkRotatorError::invalid_pool_format(format!("池文档解析失败: {}", e)))?;

    let mut pool = Vec::with_capacity(rows.len());
    let mut seen = std::collections::HashSet::with_capacity(rows.len());
    for row in rows {
        if row.url.is_empty() {
            return Err(LinkRotatorError::invalid_pool_format(format!(
                "链接 {} 缺少 url",
                row.id
            )));
        }
        if !seen.insert(row.id.clone()) {
            return Err(LinkRotatorError::invalid_pool_format(format!(
                "链接 id 重复: {}",
                row.id
            )));
        }
        pool.push(row.into_backup_link()?);
    }

    Ok(pool)
}

pub struct RotationService {
    storage: Arc<dyn Storage>,
    generator: LinkGenerator,
    clock: Arc<dyn Clock>,
    pool_size: usize,
    // 每项目一把锁，保护池 / 游标的读-改-写
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RotationService {
    pub fn new(
        storage: Arc<dyn Storage>,
        base_url: String,
        pool_size: usize,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let generator = LinkGenerator::new(base_url, clock.clone(), random);
        Self {
            storage,
            generator,
            clock,
            pool_size,
            locks: DashMap::new(),
        }
    }

    /// 使用系统时钟和默认随机源的便捷构造
    pub fn with_defaults(storage: Arc<dyn Storage>, config: &AppConfig) -> Self {
        Self::new(
            storage,
            config.base_url.clone(),
            config.pool_size,
            Arc::new(SystemClock),
            Arc::new(ThreadRandom),
        )
    }

    fn project_lock(&self, project_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(project_id.to_string())
            .or_default()
            .clone()
    }

    /// 取下一条备用链接
    ///
    /// 池不存在时先合成 `pool_size` 条并落盘，再按
    /// `cursor % len` 选取，更新使用统计后推进游标。
    pub async fn get_next_link(&self, project_id: &str) -> Result<String> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        let mut pool = match self.read_pool(project_id).await? {
            Some(pool) => pool,
            None => self.build_pool(project_id).await?,
        };

        if pool.is_empty() {
            return Err(LinkRotatorError::empty_pool(format!(
                "项目 {} 的链接池为空，无法选取",
                project_id
            )));
        }

        let cursor = self.read_cursor(project_id).await?;
        let index = (cursor % pool.len() as u64) as usize;

        let now = self.clock.now();
        pool[index].last_used = Some(now);
        pool[index].use_count += 1;
        let url = pool[index].url.clone();

        self.write_pool(project_id, &pool).await?;
        self.storage
            .set(&cursor_key(project_id), (cursor + 1).to_string())
            .await?;

        debug!(
            project_id = project_id,
            index = index,
            cursor = cursor,
            "已选取备用链接"
        );
        Ok(url)
    }

    /// 强制重建链接池并把游标归零
    pub async fn regenerate_pool(&self, project_id: &str) -> Result<Vec<BackupLink>> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        let pool = self.build_pool(project_id).await?;
        self.storage
            .set(&cursor_key(project_id), "0".to_string())
            .await?;
        Ok(pool)
    }

    /// 只读取池，不存在时返回 None
    pub async fn load_pool(&self, project_id: &str) -> Result<Option<Vec<BackupLink>>> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;
        self.read_pool(project_id).await
    }

    /// 汇总单个项目的使用统计
    pub async fn pool_stats(&self, project_id: &str) -> Result<PoolStats> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        let pool = self.read_pool(project_id).await?.ok_or_else(|| {
            LinkRotatorError::not_found(format!("项目 {} 没有链接池", project_id))
        })?;
        let cursor = self.read_cursor(project_id).await?;

        let used_entries = pool.iter().filter(|link| link.use_count > 0).count();
        Ok(PoolStats {
            project_id: project_id.to_string(),
            pool_size: pool.len(),
            total_use_count: pool.iter().map(|link| link.use_count).sum(),
            used_entries,
            unused_entries: pool.len() - used_entries,
            cursor,
            last_used: pool.iter().filter_map(|link| link.last_used).max(),
        })
    }

    /// 导出池文档
    ///
    /// 以存储中的最新状态为准，而不是调用方手里的内存副本。
    pub async fn export_pool(&self, project_id: &str) -> Result<String> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        let pool = self.read_pool(project_id).await?.ok_or_else(|| {
            LinkRotatorError::not_found(format!("项目 {} 没有可导出的链接池", project_id))
        })?;
        serialize_pool(&pool)
    }

    /// 导入池文档，校验失败时整体拒绝
    ///
    /// 接受长度不等于默认池大小的文档，轮换通过取模保持有效；
    /// 游标不重置。
    pub async fn import_pool(&self, project_id: &str, document: &str) -> Result<usize> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        let pool = parse_pool_document(document)?;
        if pool.is_empty() {
            return Err(LinkRotatorError::invalid_pool_format(
                "拒绝导入空的链接池".to_string(),
            ));
        }
        if pool.len() != self.pool_size {
            warn!(
                project_id = project_id,
                imported = pool.len(),
                expected = self.pool_size,
                "导入的池大小与默认值不同"
            );
        }

        self.write_pool(project_id, &pool).await?;
        info!(
            project_id = project_id,
            entries = pool.len(),
            "已导入链接池"
        );
        Ok(pool.len())
    }

    /// 删除项目的池和游标
    pub async fn clear(&self, project_id: &str) -> Result<()> {
        let lock = self.project_lock(project_id);
        let _guard = lock.lock().await;

        self.storage.remove(&pool_key(project_id)).await?;
        self.storage.remove(&cursor_key(project_id)).await?;
        info!(project_id = project_id, "已清除链接池与游标");
        Ok(())
    }

    async fn read_pool(&self, project_id: &str) -> Result<Option<Vec<BackupLink>>> {
        match self.storage.get(&pool_key(project_id)).await? {
            Some(document) => Ok(Some(parse_pool_document(&document)?)),
            None => Ok(None),
        }
    }

    async fn write_pool(&self, project_id: &str, pool: &[BackupLink]) -> Result<()> {
        let document = serialize_pool(pool)?;
        self.storage.set(&pool_key(project_id), document).await
    }

    async fn read_cursor(&self, project_id: &str) -> Result<u64> {
        match self.storage.get(&cursor_key(project_id)).await? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                warn!(project_id = project_id, raw = raw.as_str(), "游标槽位损坏");
                LinkRotatorError::validation(format!("游标值无法解析: {}", e))
            }),
            None => Ok(0),
        }
    }

    /// 合成一个全新的链接池并落盘
    async fn build_pool(&self, project_id: &str) -> Result<Vec<BackupLink>> {
        let now = self.clock.now();
        let now_millis = self.clock.now_millis();

        let mut pool = Vec::with_capacity(self.pool_size);
        for i in 0..self.pool_size {
            let link_id = format!("link_{}_{}", i, now_millis);
            let url = self.generator.generate(project_id, &link_id);
            pool.push(BackupLink {
                id: link_id,
                url,
                created_at: now,
                last_used: None,
                use_count: 0,
            });
        }

        self.write_pool(project_id, &pool).await?;
        info!(
            project_id = project_id,
            entries = pool.len(),
            "已生成新的链接池"
        );
        Ok(pool)
    }
}
