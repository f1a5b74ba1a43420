use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pagination::QUESTIONS_PER_PAGE;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_path: String,
    pub listen_addr: String,
    pub page_size: usize,
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Defaults, then `trivia.toml` if present, then `TRIVIA_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::with_name("trivia").required(false))
                .add_source(
                    Environment::with_prefix("TRIVIA")
                        .try_parsing(true)
                        .list_separator(",")
                        .with_list_parse_key("cors_origins"),
                ),
        )
    }

    fn from_config(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("database_path", "trivia.db")?
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("page_size", QUESTIONS_PER_PAGE as i64)?
            .set_default("cors_origins", vec!["*"])?
            .build()?
            .try_deserialize()?;

        if settings.page_size == 0 {
            return Err(ConfigError::Message(
                "page_size must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }
}
