//! Console and file layers behind the global `tracing` subscriber.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "pcm::stage";
/// Target used for dry-run actions.
pub(super) const DRY_RUN_TARGET: &str = "pcm::dry_run";

/// How an event is presented, from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Info,
    Warn,
    Error,
    Verbose,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Verbose,
        }
    }

    const fn file_tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Info => "    ",
            Self::Warn => "    [warn] ",
            Self::Error => "    [error] ",
            Self::Verbose => "    [debug] ",
        }
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

fn message(event: &tracing::Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.0
}

/// Appends every event to the per-command log file, without colour codes.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Start a fresh log at `path` for `command`.
    ///
    /// Returns `None` if the file cannot be opened.
    pub(super) fn open(path: &Path, command: &str) -> Option<Self> {
        let header = format!(
            "# pcm {} {command} {}\n",
            crate::commands::version::current(),
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let tag = Kind::of(event.metadata()).file_tag();
        let line = format!(
            "[{}] {tag}{}",
            format_utc_time(),
            strip_ansi(&message(event))
        );
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console formatter: coloured tags, no timestamps.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = message(event);
        match Kind::of(event.metadata()) {
            Kind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            Kind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            Kind::Stage => writeln!(writer, "\x1b[1;32m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Kind::Info => writeln!(writer, "  {msg}"),
            Kind::Verbose => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber for `command`.
///
/// The console shows `info` and up, plus `debug` when `verbose`, and honours
/// `RUST_LOG`. Warnings and errors go to stderr. The log file at
/// `$XDG_CACHE_HOME/pcm/<command>.log` always records `debug` and up.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(console_filter);

    let file_layer = log_file_path(command)
        .and_then(|path| FileLayer::open(&path, command))
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
