//! Tracing setup. Output goes to stderr so it never mixes with the tree
//! dumps, token listings or JSON written to stdout.
//!
//! ```bash
//! RUST_LOG=tern_parser=trace tern parse file.ts
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
/// level is `warn`, or `debug` with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in tests.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
