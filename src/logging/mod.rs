//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, TaskEntry, TaskStatus};

/// Install a thread-local subscriber that appends every event to a log file
/// inside a fresh temporary directory.
///
/// Returns the directory (keep it alive), the log file path and a guard that
/// restores the previous thread-local dispatcher when dropped.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_file_log() -> (
    tempfile::TempDir,
    std::path::PathBuf,
    tracing::dispatcher::DefaultGuard,
) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer = subscriber::FileLayer::open(&path, "test").expect("failed to create file layer");
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (tmp, path, guard)
}
