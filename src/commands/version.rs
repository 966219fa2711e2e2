//! Command: print version information.

/// Version string baked in at build time, falling back to the crate version.
#[must_use]
pub fn current() -> String {
    option_env!("PCM_VERSION").map_or_else(
        || format!("dev-{}", env!("CARGO_PKG_VERSION")),
        str::to_string,
    )
}

/// Print the pcm version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("pcm {}", current());
}
