//! CLI configuration.

use std::path::PathBuf;

use showcase_api_client::ClientConfig;
use showcase_core::session::store::default_data_dir;

/// Everything a command needs to reach the API and the saved session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub client: ClientConfig,
    /// Directory holding `session.json`.
    pub data_dir: PathBuf,
}

impl CliConfig {
    /// Reads configuration from environment variables (and `.env`, loaded in `main`).
    ///
    /// | Variable            | Default                         |
    /// |---------------------|---------------------------------|
    /// | `SHOWCASE_DATA_DIR` | `<platform data dir>/showcase`  |
    ///
    /// plus the variables of [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, url::ParseError> {
        let data_dir = std::env::var_os("SHOWCASE_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Ok(Self {
            client: ClientConfig::from_env()?,
            data_dir,
        })
    }
}
