use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use rust_studio_schedule::config::AppConfig;
use rust_studio_schedule::runtime::{lifetime, logging};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 记录程序启动时间
    let start_datetime = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let _guard = logging::init_tracing(config);

    warn!(
        "Starting {}
        Project: {}
        Version: {}
        Authors: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    if let Err(e) = lifetime::startup::prepare_startup().await {
        #[cfg(debug_assertions)]
        eprintln!("{}", e.format_colored());
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }

    debug!(
        "Startup completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start_datetime)
            .num_milliseconds()
    );
}
