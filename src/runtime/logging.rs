use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;

/// 初始化日志
///
/// 开发环境输出文件名与行号，其余环境输出 JSON。返回的 guard 需要存活到进程结束。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    guard
}
