use std::process;

use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;

use linkrotator::cli::{Cli, Commands};
use linkrotator::commands;
use linkrotator::config::AppConfig;
use linkrotator::logging::init_logging;
use linkrotator::rotation::RotationService;
use linkrotator::storages::StorageFactory;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    debug!(
        backend = config.storage_backend.as_str(),
        pool_size = config.pool_size,
        "配置加载完成"
    );

    let storage = match StorageFactory::create(&config) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            process::exit(1);
        }
    };
    let service = RotationService::with_defaults(storage, &config);

    let result = match cli.command {
        Commands::Next { project_id } => commands::next_link(&service, &project_id).await,
        Commands::Init { project_id, force } => {
            commands::init_pool(&service, &project_id, force).await
        }
        Commands::List { project_id } => commands::list_pool(&service, &project_id).await,
        Commands::Stats { project_id } => commands::show_stats(&service, &project_id).await,
        Commands::Export {
            project_id,
            file_path,
        } => commands::export_pool(&service, &project_id, file_path).await,
        Commands::Import {
            project_id,
            file_path,
        } => commands::import_pool(&service, &project_id, &file_path).await,
        Commands::Clear { project_id } => commands::clear_pool(&service, &project_id).await,
    };

    if let Err(e) = result {
        use colored::Colorize;
        eprintln!("{} {}", "✗".bold().red(), e);
        process::exit(1);
    }
}
