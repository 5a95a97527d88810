//! 日志初始化
//!
//! 过滤级别来自 RUST_LOG，格式由 LOG_FORMAT 控制（json / 文本）。
//! 只应在程序启动时调用一次。

use std::env;

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .with_target(false);

    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }
}
