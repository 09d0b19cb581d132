mod settings;

pub use settings::{EngineSettings, Settings};
