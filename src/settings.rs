use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize)]
pub struct Settings {
    pub database_url: SecretString,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl Settings {
    /// Reads `TRIVIA_*` variables, with a `.env` file filling in whatever the
    /// environment leaves unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_builder(
            Self::defaults()?.add_source(Environment::with_prefix("TRIVIA").try_parsing(false)),
        )
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
