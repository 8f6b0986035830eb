use std::path::{Path, PathBuf};
use std::time::Duration;

use form_forge_ai::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use form_forge_ai::ChatSettings;
use serde::{Deserialize, Serialize};

use crate::cli::{AskArgs, Provider};
use crate::error::CliError;

/// CLI configuration loaded from config.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Defaults for `form-forge convert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_form_id")]
    pub form_id: String,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            form_id: default_form_id(),
            pretty: default_pretty(),
        }
    }
}

/// Assistant provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            context_chars: default_context_chars(),
        }
    }
}

fn default_form_id() -> String {
    "NEWFORM".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_context_chars() -> usize {
    1000
}

/// Resolved assistant parameters after merging config + CLI flags.
#[derive(Debug, Clone)]
pub struct AssistantParams {
    pub provider: Provider,
    pub settings: ChatSettings,
}

/// Discovery order for config file:
/// 1. `--config <path>` (explicit)
/// 2. `FORM_FORGE_CONFIG` env var
/// 3. `./config.toml` (project-local)
/// 4. `$XDG_CONFIG_HOME/form-forge/config.toml`
/// 5. `~/.config/form-forge/config.toml`
pub fn load_config(explicit_path: Option<&Path>) -> Result<CliConfig, CliError> {
    if let Some(path) = explicit_path {
        return load_config_from_path(path);
    }

    if let Ok(env_path) = std::env::var("FORM_FORGE_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    let local = PathBuf::from("config.toml");
    if local.exists() {
        return load_config_from_path(&local);
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg).join("form-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config/form-forge/config.toml");
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Ok(CliConfig::default())
}

fn load_config_from_path(path: &Path) -> Result<CliConfig, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| CliError::Config {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}

/// Resolve assistant parameters from config + `ask` overrides.
///
/// The API key is read from the environment variable named by
/// `api_key_env`; an unset or blank variable leaves it `None`.
pub fn resolve_assistant(config: &CliConfig, args: &AskArgs) -> AssistantParams {
    let assistant = &config.assistant;
    let api_key = std::env::var(&assistant.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty());

    AssistantParams {
        provider: args.provider.unwrap_or(assistant.provider),
        settings: ChatSettings {
            endpoint: assistant.endpoint.clone(),
            model: args
                .model
                .clone()
                .unwrap_or_else(|| assistant.model.clone()),
            api_key,
            timeout: Duration::from_secs(args.timeout.unwrap_or(assistant.timeout_secs)),
            max_tokens: assistant.max_tokens,
            temperature: assistant.temperature,
            context_chars: assistant.context_chars,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask_args() -> AskArgs {
        AskArgs {
            question: None,
            context: None,
            metadata: None,
            provider: None,
            model: None,
            timeout: None,
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = CliConfig::default();
        assert_eq!(config.convert.form_id, "NEWFORM");
        assert!(config.convert.pretty);
        assert_eq!(config.assistant.provider, Provider::Openai);
        assert_eq!(config.assistant.model, "gpt-4");
        assert_eq!(config.assistant.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.assistant.timeout_secs, 30);
        assert_eq!(config.assistant.max_tokens, 500);
        assert_eq!(config.assistant.context_chars, 1000);
    }

    #[test]
    fn parse_minimal_toml() {
        let toml_str = r#"
[convert]
form_id = "BUYTYP"
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.convert.form_id, "BUYTYP");
        // Defaults for missing fields
        assert!(config.convert.pretty);
        assert_eq!(config.assistant.timeout_secs, 30);
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[convert]
form_id = "SELLTYP"
pretty = false

[assistant]
provider = "offline"
endpoint = "http://localhost:8080/v1/chat/completions"
model = "local-model"
api_key_env = "LOCAL_KEY"
timeout_secs = 5
max_tokens = 200
temperature = 0.2
context_chars = 400
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.convert.form_id, "SELLTYP");
        assert!(!config.convert.pretty);
        assert_eq!(config.assistant.provider, Provider::Offline);
        assert_eq!(
            config.assistant.endpoint,
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.assistant.model, "local-model");
        assert_eq!(config.assistant.api_key_env, "LOCAL_KEY");
        assert_eq!(config.assistant.timeout_secs, 5);
        assert_eq!(config.assistant.max_tokens, 200);
        assert_eq!(config.assistant.context_chars, 400);
    }

    #[test]
    fn unknown_provider_is_a_parse_error() {
        let toml_str = r#"
[assistant]
provider = "gemini"
"#;
        assert!(toml::from_str::<CliConfig>(toml_str).is_err());
    }

    #[test]
    fn resolve_assistant_uses_config_defaults() {
        let config = CliConfig::default();
        let params = resolve_assistant(&config, &ask_args());
        assert_eq!(params.provider, Provider::Openai);
        assert_eq!(params.settings.model, "gpt-4");
        assert_eq!(params.settings.timeout, Duration::from_secs(30));
        assert_eq!(params.settings.max_tokens, 500);
    }

    #[test]
    fn resolve_assistant_cli_overrides() {
        let config = CliConfig::default();
        let args = AskArgs {
            provider: Some(Provider::Offline),
            model: Some("gpt-4o-mini".into()),
            timeout: Some(3),
            ..ask_args()
        };
        let params = resolve_assistant(&config, &args);
        assert_eq!(params.provider, Provider::Offline);
        assert_eq!(params.settings.model, "gpt-4o-mini");
        assert_eq!(params.settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn resolve_assistant_without_key_variable() {
        let mut config = CliConfig::default();
        config.assistant.api_key_env = "FORM_FORGE_TEST_KEY_THAT_IS_NEVER_SET".into();
        let params = resolve_assistant(&config, &ask_args());
        assert!(params.settings.api_key.is_none());
    }

    #[test]
    fn load_config_from_explicit_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }

    #[test]
    fn load_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[convert]\nform_id = \"FROMFILE\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.convert.form_id, "FROMFILE");
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[convert\nform_id = ").unwrap();
        let result = load_config(Some(&path));
        assert!(matches!(result, Err(CliError::Config { .. })));
    }
}
