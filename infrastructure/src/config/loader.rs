//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["diag-chat.toml", ".diag-chat.toml"];

/// Environment variables understood without the `DIAG_CHAT_` prefix.
const ENDPOINT_VAR: &str = "GROQ_API_ENDPOINT";
const MODEL_VAR: &str = "MODEL_NAME";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GROQ_API_ENDPOINT` / `MODEL_NAME`, then `DIAG_CHAT_*` variables
    ///    (`__` separates sections: `DIAG_CHAT_LLM__TIMEOUT_SECONDS`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./diag-chat.toml` or `./.diag-chat.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/diag-chat/config.toml`
    /// 5. Default values
    ///
    /// The API key itself is read from the variable named by
    /// `llm.api_key_env` (default `GROQ_API_KEY`) when the gateway is built.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration plus environment (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed("DIAG_CHAT_").split("__"))
            .merge(Env::raw().only(&[ENDPOINT_VAR, MODEL_VAR]).map(|key| {
                if key.as_str().eq_ignore_ascii_case(ENDPOINT_VAR) {
                    "llm.endpoint".into()
                } else {
                    "llm.model".into()
                }
            }))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("diag-chat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!(
            "  [ENV  ] {}, {}, DIAG_CHAT_*",
            ENDPOINT_VAR, MODEL_VAR
        ));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./diag-chat.toml or ./.diag-chat.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}
