//! Tracing setup for the CLI

/// Filter used when `RUST_LOG` is unset
///
/// Verbose runs also turn on the per-impact `trace` events from the resolver.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "damage_sim=debug,damage_core=trace"
    } else {
        "info"
    }
}

/// Install the subscriber. Call once at startup.
///
/// Events go to stderr so `--json` output on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_directive(verbose).to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
