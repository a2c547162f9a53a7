// scaffold-e2e - helpers for end-to-end tests of scaffolded projects
// Edits generated files the way a user would fill in scaffold code

pub mod config;
pub mod error;
pub mod output;
pub mod splice;
pub mod suffix;
pub mod utils;
pub mod webhook;

pub use config::{ConfigLoader, SpliceConfig, DEFAULT_SCAFFOLD_BIN};
pub use error::{SpliceError, SpliceResult};
pub use output::non_empty_lines;
pub use splice::{
    apply_replacements, ensure_exist_and_replace, insert_after, insert_code, uncomment,
    uncomment_code, Replacement, Splicer,
};
pub use suffix::{random_suffix, random_suffix_with, SUFFIX_LEN};
pub use webhook::implement_webhooks;

use tracing::debug;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = std::env::var_os("NO_COLOR").is_none();

    let installed = fmt::Subscriber::builder()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        debug!("Initialized scaffold-e2e v{} logging", version());
    }
}
