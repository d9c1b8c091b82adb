//! Process log sink
//!
//! Every `tracing` event is appended to a single log file as one line:
//! `[yyyy-MM-dd HH:mm:ss] [LEVEL] message`. Optionally a second layer mirrors
//! events to stderr for interactive runs.

use chrono::Local;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Timestamp layout of every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats events as `[timestamp] [LEVEL] message`
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "[{}] [{}] ",
            Local::now().format(TIMESTAMP_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Opens the log file for appending, creating it and its parent if needed
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Chooses the level filter from CLI verbosity
pub fn level_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_signal=info,warn"),
            1 => EnvFilter::new("crawl_signal=debug,info"),
            2 => EnvFilter::new("crawl_signal=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Installs the global subscriber
///
/// Can be called once per process; later calls leave the first subscriber in
/// place and return `Ok(false)`.
///
/// # Arguments
///
/// * `path` - Log file path
/// * `verbose` - Verbosity level; anything above zero also logs to stderr
/// * `quiet` - Only record errors
pub fn init_logging(path: &Path, verbose: u8, quiet: bool) -> std::io::Result<bool> {
    let file = open_log_file(path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let stderr_layer = (verbose > 0).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    let installed = tracing_subscriber::registry()
        .with(level_filter(verbose, quiet))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    Ok(installed)
}
