use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{format::FmtSpan, writer::MakeWriterExt},
    EnvFilter,
};

pub const CLI_PREFIX: &str = "cli";
pub const REMINDER_PREFIX: &str = "reminder";

const LOG_DIR: &str = "logs";
const KEPT_LOG_FILES: usize = 5;
const DEFAULT_LEVEL: &str = "debug";

/// Installs the global subscriber. Logs always go to daily files under `<app dir>/logs`, stdout
/// only receives them when `show_std` is set.
pub fn enable_logging(
    prefix: &str,
    application_data_path: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let files = daily_appender(prefix, application_data_path)?;
    let stdout = std::io::stdout.with_filter(move |_| show_std);

    let env_level = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(crate_directive(log_level, env_level.as_deref())))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(files))
        .pretty()
        .init();
    Ok(())
}

fn daily_appender(prefix: &str, application_data_path: &Path) -> Result<RollingFileAppender> {
    Ok(tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(KEPT_LOG_FILES)
        .filename_prefix(prefix)
        .build(application_data_path.join(LOG_DIR))?)
}

/// Filter that only lets through events of this crate. An explicit level wins over `RUST_LOG`.
fn crate_directive(log_level: Option<LevelFilter>, env_level: Option<&str>) -> String {
    let level = match (log_level, env_level) {
        (Some(level), _) => level.to_string(),
        (None, Some(level)) => level.to_string(),
        (None, None) => DEFAULT_LEVEL.to_string(),
    };
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
