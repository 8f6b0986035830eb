use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::GlobalOpts;

/// Level filter implied by `-q` / `-v` when `RUST_LOG` is unset.
pub fn default_directive(global: &GlobalOpts) -> &'static str {
    if global.quiet {
        return "error";
    }
    match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides the flags.
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));

    // A second init (tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(global.verbose >= 2),
        )
        .try_init();
}
