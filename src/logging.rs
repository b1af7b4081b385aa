use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::environment::get_env_var_opt;

const DEFAULT_LOG_DIR: &str = "logs";

pub fn configure_logging() {
    // Console log configuration; RUST_LOG overrides the default filter.
    // Goes to stderr so tools can print JSON on stdout.
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,players=warn"));
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // File log configuration
    let log_dir = get_env_var_opt("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
    let file_appender = rolling::daily(log_dir, "matchpoint.log");
    let file_log = fmt::layer()
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(EnvFilter::new("info,merge=debug"));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
