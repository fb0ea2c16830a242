use hide_prefix_core::ConfigError;
use thiserror::Error;

use crate::host::HostError;

/// Failures while reading or writing stored settings.
///
/// These never leave the config store; they are logged and the store falls
/// back to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
