use {
    alloy::primitives::Address,
    number::Bps,
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Address of the router account.
    pub router: Address,
    /// The chain's wrapped native currency.
    pub wrapped_native: Address,
    /// Conversion providers the router may call. Leave empty to accept any
    /// target.
    #[serde(default)]
    pub allowed_targets: Vec<Address>,
    /// Slippage applied to conversions when the caller doesn't specify one.
    #[serde(default = "default_slippage")]
    pub default_slippage: Bps,
    #[serde(default)]
    pub convergence: Convergence,
    #[serde(default)]
    pub logging: observe::Config,
}

/// Bounds of the caller side loop refining the price of a conversion.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Convergence {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    /// Relative change of the swap amount between two rounds below which the
    /// loop stops.
    #[serde(default = "default_tolerance")]
    pub tolerance: Bps,
}

impl Default for Convergence {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            timeout: default_timeout(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_slippage() -> Bps {
    Bps::try_from(100u16).unwrap_or_default()
}

fn default_max_iterations() -> usize {
    5
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_tolerance() -> Bps {
    Bps::try_from(10u16).unwrap_or_default()
}

/// Load the router configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    toml::de::from_str(&data)
        .unwrap_or_else(|err| panic!("TOML syntax error while reading {path:?}: {err}"))
}
