//! Logging to the terminal
//!
//! Two kinds of lines: `log_event!` for traffic coming in from Discord and `log_internal!` for
//! things the bot does on its own.  Both go through `tracing` so the usual `RUST_LOG` filtering
//! applies.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "wardenbot=info,event=info,internal=info,serenity=warn";

pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[macro_export]
macro_rules! log_event {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        tracing::info!(target: "event", $fmtstr)
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        tracing::info!(target: "event", $fmtstr, $($args),*)
    }};
}

#[macro_export]
macro_rules! log_internal {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        tracing::info!(target: "internal", $fmtstr)
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        tracing::info!(target: "internal", $fmtstr, $($args),*)
    }};
}

/// Render an optional id for log lines
pub fn or_unknown<T: std::fmt::Display>(value: Option<T>, unknown: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => unknown.to_owned(),
    }
}
