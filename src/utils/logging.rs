//! 日志工具模块
//!
//! 提供 tracing 日志的初始化

use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认级别为 info，可以通过 RUST_LOG 环境变量覆盖。
/// 重复调用是安全的（测试中多个用例都会尝试初始化）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
