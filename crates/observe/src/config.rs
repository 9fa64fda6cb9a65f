use {serde::Deserialize, tracing::level_filters::LevelFilter};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    #[serde(default = "default_env_filter")]
    pub env_filter: String,
    /// Minimum level threshold for stderr output
    #[serde(default, with = "level")]
    pub stderr_threshold: Option<LevelFilter>,
    /// Output log events as JSON
    #[serde(default)]
    pub use_json_format: bool,
}

impl Config {
    pub fn new(env_filter: &str) -> Self {
        Self {
            env_filter: env_filter.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_json_format(mut self) -> Self {
        self.use_json_format = true;
        self
    }

    pub fn with_stderr_threshold(mut self, stderr_threshold: LevelFilter) -> Self {
        self.stderr_threshold = Some(stderr_threshold);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_filter: default_env_filter(),
            stderr_threshold: None,
            use_json_format: false,
        }
    }
}

fn default_env_filter() -> String {
    "info".to_owned()
}

mod level {
    use {
        serde::{Deserialize, Deserializer, de},
        tracing::level_filters::LevelFilter,
    };

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<LevelFilter>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|level| level.parse().map_err(de::Error::custom))
            .transpose()
    }
}
