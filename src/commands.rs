//! CLI 命令实现

use std::fmt;
use std::fs;

use colored::Colorize;

use crate::errors::LinkRotatorError;
use crate::rotation::RotationService;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            CliError::CommandError(msg) => write!(f, "Command error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<LinkRotatorError> for CliError {
    fn from(err: LinkRotatorError) -> Self {
        match err {
            LinkRotatorError::StorageUnavailable(_) | LinkRotatorError::FileOperation(_) => {
                CliError::StorageError(err.format_simple())
            }
            _ => CliError::CommandError(err.format_simple()),
        }
    }
}

pub async fn next_link(service: &RotationService, project_id: &str) -> Result<(), CliError> {
    let url = service.get_next_link(project_id).await?;
    println!("{}", url);
    Ok(())
}

pub async fn init_pool(
    service: &RotationService,
    project_id: &str,
    force: bool,
) -> Result<(), CliError> {
    if !force && service.load_pool(project_id).await?.is_some() {
        return Err(CliError::CommandError(format!(
            "项目 {} 已有链接池，重建请加 --force",
            project_id
        )));
    }

    let pool = service.regenerate_pool(project_id).await?;
    println!(
        "{} 已为项目 {} 生成 {} 条备用链接",
        "✓".bold().green(),
        project_id.cyan(),
        pool.len().to_string().green()
    );
    Ok(())
}

pub async fn list_pool(service: &RotationService, project_id: &str) -> Result<(), CliError> {
    let Some(pool) = service.load_pool(project_id).await? else {
        println!("{} 项目 {} 还没有链接池", "ℹ".bold().blue(), project_id);
        return Ok(());
    };

    for link in &pool {
        let last_used = link
            .last_used
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| "未使用".to_string());
        println!(
            "{}  使用 {} 次  最近 {}\n    {}",
            link.id.cyan(),
            link.use_count.to_string().green(),
            last_used.dimmed(),
            link.url
        );
    }
    println!("共 {} 条", pool.len().to_string().bold());
    Ok(())
}

pub async fn show_stats(service: &RotationService, project_id: &str) -> Result<(), CliError> {
    let stats = service.pool_stats(project_id).await?;
    println!("项目: {}", stats.project_id.cyan());
    println!("池大小: {}", stats.pool_size);
    println!("累计使用: {}", stats.total_use_count);
    println!("已用 / 未用: {} / {}", stats.used_entries, stats.unused_entries);
    println!("游标: {}", stats.cursor);
    match stats.last_used {
        Some(dt) => println!("最近使用: {}", dt.to_rfc3339()),
        None => println!("最近使用: -"),
    }
    Ok(())
}

pub async fn export_pool(
    service: &RotationService,
    project_id: &str,
    file_path: Option<String>,
) -> Result<(), CliError> {
    let document = service.export_pool(project_id).await?;

    match file_path {
        Some(path) => {
            fs::write(&path, document).map_err(|e| {
                CliError::CommandError(format!("写入导出文件 '{}' 失败: {}", path, e))
            })?;
            println!(
                "{} 已导出项目 {} 的链接池到: {}",
                "✓".bold().green(),
                project_id.cyan(),
                path.cyan()
            );
        }
        None => println!("{}", document),
    }
    Ok(())
}

pub async fn import_pool(
    service: &RotationService,
    project_id: &str,
    file_path: &str,
) -> Result<(), CliError> {
    let document = fs::read_to_string(file_path)
        .map_err(|e| CliError::CommandError(format!("读取导入文件 '{}' 失败: {}", file_path, e)))?;

    let count = service.import_pool(project_id, &document).await?;
    println!(
        "{} 已导入 {} 条备用链接到项目 {}",
        "✓".bold().green(),
        count.to_string().green(),
        project_id.cyan()
    );
    Ok(())
}

pub async fn clear_pool(service: &RotationService, project_id: &str) -> Result<(), CliError> {
    service.clear(project_id).await?;
    println!(
        "{} 已清除项目 {} 的链接池与游标",
        "✓".bold().green(),
        project_id.cyan()
    );
    Ok(())
}
