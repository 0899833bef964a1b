use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets of the gateway's own crates. Events from other crates are dropped
/// by [`layer`].
pub const TARGET_PREFIXES: [&str; 3] = ["ask_gateway", "api", "ask_forwarder"];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// True when `target` is one of ours or a module below it.
fn is_gateway_target(target: &str) -> bool {
    TARGET_PREFIXES.iter().any(|prefix| {
        target
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// Compact formatting layer that renders only the gateway's own events.
///
/// - RFC3339 UTC timestamps
/// - `file:line` and target (module path)
/// - span close events, so `#[instrument]`ed calls report their duration
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_gateway = filter::filter_fn(|meta| is_gateway_target(meta.target()));

    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .event_format(format)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_filter(only_gateway)
}

/// `EnvFilter` from `RUST_LOG`. When unset, `default` applies globally and
/// `level` to every gateway crate.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        level_directives(level)
            .into_iter()
            .fold(EnvFilter::new(default), |filter, directive| {
                filter.add_directive(directive)
            })
    })
}

fn level_directives(level: Level) -> Vec<Directive> {
    let level = level.as_str().to_lowercase();
    TARGET_PREFIXES
        .iter()
        .filter_map(|prefix| format!("{prefix}={level}").parse().ok())
        .collect()
}
