use env_logger::Env;

/// Filter applied when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "hide_prefix_core=info,hide_prefix_plugin=info";

/// Install the global logger.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_target(true)
        .try_init();
}
