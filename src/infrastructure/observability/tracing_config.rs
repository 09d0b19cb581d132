/// Runtime logging configuration shared by the API server and the batch
/// driver binaries.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter directive used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_env(default_filter: &str) -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| is_json_format(&v))
                .unwrap_or(false),
            default_filter: default_filter.to_string(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env("info,voxbatch=debug,tower_http=debug")
    }
}

fn is_json_format(value: &str) -> bool {
    value.eq_ignore_ascii_case("json")
}
