//! Tracing subscriber setup driven by `--debug <level>`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// 0 warn, 1 info, 2 debug (URLs, status lines), 3+ trace (bodies).
pub fn level_filter(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber. `RUST_LOG`, when set, refines the level
/// chosen by `debug`. Later calls are no-ops.
pub fn init(debug: u8) {
    let filter = level_filter(debug);
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter);

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_ok() {
        tracing::debug!(level = %filter, "logging initialized");
    }
}
