use crate::models::{ConversionPrompt, PromptPreset};
use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DEPLOYMENT: &str = "gpt-image-1";
pub const DEFAULT_API_VERSION: &str = "2025-04-01-preview";

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone)]
pub struct PixelateConfig {
    pub common: core_config::Config,
    pub gateway: GatewayConfig,
    pub prompt: ConversionPrompt,
    pub upload: UploadConfig,
    pub static_dir: PathBuf,
}

/// Upstream connection settings. Endpoint and credential may be absent;
/// the gateway then refuses every conversion instead of failing startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<Secret<String>>,
    pub deployment: String,
    pub api_version: String,
    /// Upper bound on simultaneous upstream calls. `None` means unbounded.
    pub max_concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub field_name: String,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            field_name: "image".to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl GatewayConfig {
    pub fn new(endpoint: Option<&str>, api_key: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.map(str::to_string),
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_concurrent_requests: None,
        }
    }

    /// Endpoint and credential, when both are present and non-empty.
    pub fn target(&self) -> Option<(&str, &Secret<String>)> {
        let endpoint = self.endpoint.as_deref().filter(|e| !e.trim().is_empty())?;
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())?;
        Some((endpoint, api_key))
    }

    pub fn is_configured(&self) -> bool {
        self.target().is_some()
    }
}

impl PixelateConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let prompt = match optional_env("PIXELATE_PROMPT") {
            Some(text) => ConversionPrompt::custom(text),
            None => {
                let preset = match optional_env("PIXELATE_PROMPT_PRESET") {
                    Some(name) => name
                        .parse::<PromptPreset>()
                        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
                    None => PromptPreset::default(),
                };
                ConversionPrompt::preset(preset)
            }
        };

        Ok(PixelateConfig {
            common,
            gateway: GatewayConfig {
                endpoint: optional_env("AZURE_ENDPOINT"),
                api_key: optional_env("AZURE_API_KEY").map(Secret::new),
                deployment: optional_env("AZURE_DEPLOYMENT_NAME")
                    .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string()),
                api_version: optional_env("AZURE_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                max_concurrent_requests: parse_env("PIXELATE_MAX_CONCURRENT_UPSTREAM")?,
            },
            prompt,
            upload: UploadConfig {
                max_bytes: parse_env("PIXELATE_MAX_UPLOAD_BYTES")?
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
                ..UploadConfig::default()
            },
            static_dir: optional_env("PIXELATE_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
        })
    }
}

/// Empty values are treated as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env(key: &str) -> Result<Option<usize>, AppError> {
    optional_env(key)
        .map(|raw| {
            raw.trim().parse::<usize>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("{} must be a positive integer: {}", key, e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoint_or_key_is_unconfigured() {
        assert!(!GatewayConfig::new(None, Some("key")).is_configured());
        assert!(!GatewayConfig::new(Some("https://example.openai.azure.com"), None).is_configured());
        assert!(!GatewayConfig::new(Some(""), Some("key")).is_configured());
        assert!(!GatewayConfig::new(Some("https://example.openai.azure.com"), Some("")).is_configured());
        assert!(GatewayConfig::new(Some("https://example.openai.azure.com"), Some("key")).is_configured());
    }

    #[test]
    fn defaults_match_azure_image_deployment() {
        let config = GatewayConfig::new(None, None);
        assert_eq!(config.deployment, "gpt-image-1");
        assert_eq!(config.api_version, "2025-04-01-preview");
        assert_eq!(config.max_concurrent_requests, None);
        assert_eq!(UploadConfig::default().max_bytes, 10_485_760);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = GatewayConfig::new(Some("https://example.openai.azure.com"), Some("sk-very-secret"));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-very-secret"));
    }
}
