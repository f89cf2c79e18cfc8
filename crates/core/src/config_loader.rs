use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Loads application configuration from a specific TOML file.
    ///
    /// Missing files are not an error: defaults and `DCA_PERF_`-prefixed
    /// environment variables still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DCA_PERF_").split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = ConfigLoader::load_from("/nonexistent/Config.toml").unwrap();
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn test_load_merges_toml_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nhost = \"db-1\"\nport = 5480\ndatabase = \"bots\"\nuser = \"reader\"\npassword = \"pw\"\nmax_connections = 4\n"
        )
        .unwrap();

        let config = ConfigLoader::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database.host, "db-1");
        assert_eq!(config.database.port, 5480);
        // Sections absent from the file keep their defaults
        assert_eq!(config.market_data.candles_per_page, 1500);
    }
}
