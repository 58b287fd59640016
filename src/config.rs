use config::Config;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3344;
const DEFAULT_DATA_PATH: &str = "data.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Path of the flat JSON record file.
    pub data_path: String,
    /// Port the submission server listens on.
    pub port: u16,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Configuration {
    /// Layered load: built-in defaults, then an optional
    /// `chromapoll.toml`, then `CHROMAPOLL_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Config::builder()
            .set_default("data_path", DEFAULT_DATA_PATH)?
            .set_default("port", DEFAULT_PORT as i64)?
            .add_source(config::File::with_name("chromapoll").required(false))
            .add_source(config::Environment::with_prefix("CHROMAPOLL"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let configuration = Configuration::default();
        assert_eq!(configuration.data_path, "data.json");
        assert_eq!(configuration.port, 3344);
    }
}
