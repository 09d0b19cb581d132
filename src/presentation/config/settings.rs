/// Runtime settings for the transcription API, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub engine: EngineSettings,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8001),
            engine: EngineSettings::default(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            provider: std::env::var("ASR_PROVIDER").unwrap_or_else(|_| "stub".to_string()),
            model: std::env::var("ASR_MODEL").unwrap_or_else(|_| "whisper-1".to_string()),
            api_key: std::env::var("ASR_API_KEY").ok(),
            base_url: std::env::var("ASR_BASE_URL").ok(),
        }
    }
}
