//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "compass";
const PROJECT_FILES: [&str; 2] = ["compass.toml", ".compass.toml"];
const ENV_PREFIX: &str = "COMPASS_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COMPASS_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./compass.toml` or `./.compass.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/compass/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Global config file path, whether or not it exists
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// The project-level config file, if one exists
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./compass.toml or ./.compass.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.assessment.min_answers, 5);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("compass"));
    }

    #[test]
    fn test_project_file_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "compass.toml",
                r#"
[server]
base_url = "https://project.example.edu"
request_timeout_secs = 5

[assessment]
min_answers = 7
"#,
            )?;
            jail.set_env("COMPASS_SERVER__BASE_URL", "https://env.example.edu");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.server.base_url, "https://env.example.edu");
            assert_eq!(config.server.request_timeout_secs, 5);
            assert_eq!(config.assessment.min_answers, 7);
            // Untouched sections keep defaults
            assert_eq!(config.endpoints.chat, "/ai-coach/api/chat/");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("compass.toml", "[output]\ncolor = false\n[assessment]\nmin_answers = 7\n")?;
            jail.create_file("custom.toml", "[assessment]\nmin_answers = 2\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.assessment.min_answers, 2);
            assert!(!config.output.color);
            Ok(())
        });
    }
}
