//! Runtime configuration for mimic

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use mimic_constant::{defaults, markers};
use mimic_core::{ExtractorConfig, PromptTemplate};
use mimic_dataset::{DatasetConfig, DatasetStore};
use mimic_llms::providers::ollama::OllamaConfig;
use mimic_llms::providers::openai_compat::OpenAICompatConfig;
use mimic_llms::{DecodingParams, OllamaProvider, OpenAICompatProvider, Provider, ProviderRegistry};

use crate::error::{Result, RuntimeError};
use crate::generator::GeneratorConfig;
use crate::trainer::{TrainingArguments, TrainingJob};

/// Inference backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Any server exposing the OpenAI `/completions` API (vLLM, TGI, llama.cpp).
    #[default]
    OpenAI,
    Ollama,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAI => "openai",
            Backend::Ollama => "ollama",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Backend::OpenAI => defaults::BASE_URL,
            Backend::Ollama => defaults::OLLAMA_BASE_URL,
        }
    }
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "vllm" | "tgi" => Ok(Backend::OpenAI),
            "ollama" => Ok(Backend::Ollama),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Environment keys understood by [`RuntimeConfig::from_env`].
pub const ENV_KEYS: &[&str] = &[
    "MIMIC_OWNER",
    "MIMIC_INPUT_DIR",
    "MIMIC_DATASET_FILE",
    "MIMIC_STATS_FILE",
    "MIMIC_WINDOW",
    "MIMIC_BACKEND",
    "MIMIC_BASE_URL",
    "MIMIC_API_KEY",
    "MIMIC_MODEL",
    "MIMIC_TRAIN_COMMAND",
    "MIMIC_CHECKPOINT_DIR",
    "MIMIC_TEMPERATURE",
    "MIMIC_MAX_NEW_TOKENS",
];

/// Runtime configuration
///
/// Relative paths are resolved against `workdir`.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub workdir: PathBuf,
    /// Sender name of the person being imitated. Required to build a dataset.
    pub owner: Option<String>,
    pub input_dir: PathBuf,
    pub dataset_file: PathBuf,
    pub stats_file: PathBuf,
    pub window: usize,
    pub backend: Backend,
    /// `None` means the backend's default URL.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Model name as served by the backend.
    pub model: String,
    /// Fine-tuning executable and its leading arguments, whitespace separated.
    pub train_command: Option<String>,
    pub checkpoint_dir: PathBuf,
    pub temperature: f32,
    pub max_new_tokens: u32,
}

impl RuntimeConfig {
    pub fn new(workdir: PathBuf) -> Self {
        Self {
            workdir,
            owner: None,
            input_dir: PathBuf::from(defaults::INPUT_DIR),
            dataset_file: PathBuf::from(defaults::DATASET_FILE),
            stats_file: PathBuf::from(defaults::STATS_FILE),
            window: markers::WINDOW_CAPACITY,
            backend: Backend::default(),
            base_url: None,
            api_key: None,
            model: defaults::CHECKPOINT_DIR.to_string(),
            train_command: None,
            checkpoint_dir: PathBuf::from(defaults::CHECKPOINT_DIR),
            temperature: defaults::TEMPERATURE,
            max_new_tokens: defaults::MAX_NEW_TOKENS,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_train_command(mut self, command: impl Into<String>) -> Self {
        self.train_command = Some(command.into());
        self
    }

    /// Load configuration from environment variables
    pub fn from_env(workdir: PathBuf) -> Result<Self> {
        Self::from_lookup(workdir, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    /// Empty values count as unset.
    pub fn from_lookup(workdir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::new(workdir);

        if let Some(owner) = get("MIMIC_OWNER") {
            config.owner = Some(owner);
        }
        if let Some(dir) = get("MIMIC_INPUT_DIR") {
            config.input_dir = dir.into();
        }
        if let Some(file) = get("MIMIC_DATASET_FILE") {
            config.dataset_file = file.into();
        }
        if let Some(file) = get("MIMIC_STATS_FILE") {
            config.stats_file = file.into();
        }
        if let Some(window) = get("MIMIC_WINDOW") {
            config.window = parse_value("MIMIC_WINDOW", &window)?;
            if config.window == 0 {
                return Err(RuntimeError::Config(
                    "MIMIC_WINDOW must be at least 1".to_string(),
                ));
            }
        }
        if let Some(backend) = get("MIMIC_BACKEND") {
            config.backend = backend.parse().map_err(|_| {
                RuntimeError::Config(format!(
                    "MIMIC_BACKEND must be 'openai' or 'ollama', got '{backend}'"
                ))
            })?;
        }
        config.base_url = get("MIMIC_BASE_URL");
        config.api_key = get("MIMIC_API_KEY");
        if let Some(model) = get("MIMIC_MODEL") {
            config.model = model;
        }
        config.train_command = get("MIMIC_TRAIN_COMMAND");
        if let Some(dir) = get("MIMIC_CHECKPOINT_DIR") {
            config.checkpoint_dir = dir.into();
        }
        if let Some(temperature) = get("MIMIC_TEMPERATURE") {
            config.temperature = parse_value("MIMIC_TEMPERATURE", &temperature)?;
        }
        if let Some(max) = get("MIMIC_MAX_NEW_TOKENS") {
            config.max_new_tokens = parse_value("MIMIC_MAX_NEW_TOKENS", &max)?;
        }

        Ok(config)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.backend.default_base_url())
    }

    pub fn owner(&self) -> Result<&str> {
        self.owner.as_deref().ok_or_else(|| {
            RuntimeError::Config(
                "owner is not set: pass --owner or set MIMIC_OWNER to your name as it appears in the chat export"
                    .to_string(),
            )
        })
    }

    pub fn extractor_config(&self) -> Result<ExtractorConfig> {
        Ok(ExtractorConfig::new(self.owner()?).with_window_capacity(self.window))
    }

    pub fn dataset_store(&self) -> DatasetStore {
        DatasetStore::new(
            self.resolve(&self.dataset_file),
            self.resolve(&self.stats_file),
        )
    }

    pub fn dataset_config(&self) -> Result<DatasetConfig> {
        Ok(DatasetConfig {
            input_dir: self.resolve(&self.input_dir),
            store: self.dataset_store(),
            extractor: self.extractor_config()?,
        })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let template = PromptTemplate::default();
        let params = DecodingParams::default()
            .with_temperature(self.temperature)
            .with_max_new_tokens(self.max_new_tokens)
            .with_stop([
                template.end_of_turn.clone(),
                format!("\n{}", template.interlocutor_marker.trim_end()),
            ]);
        GeneratorConfig {
            model: self.model.clone(),
            base_url: self.effective_base_url().to_string(),
            template,
            params,
        }
    }

    /// Training split and checkpoint locations.
    pub fn training_job(&self) -> TrainingJob {
        TrainingJob {
            train_file: self.resolve(Path::new(defaults::TRAIN_FILE)),
            eval_file: self.resolve(Path::new(defaults::EVAL_FILE)),
            config_file: self.resolve(Path::new(defaults::TRAINING_CONFIG_FILE)),
            output_dir: self.resolve(&self.checkpoint_dir),
            arguments: TrainingArguments::default(),
        }
    }

    /// Every backend, with the configured URL and key applied to the selected one.
    pub fn provider_registry(&self) -> ProviderRegistry {
        let mut openai = OpenAICompatConfig::default();
        let mut ollama = OllamaConfig::default();
        match self.backend {
            Backend::OpenAI => {
                openai = OpenAICompatConfig::new(self.effective_base_url());
                if let Some(key) = &self.api_key {
                    openai = openai.with_api_key(key.clone());
                }
            }
            Backend::Ollama => ollama = OllamaConfig::new(self.effective_base_url()),
        }
        ProviderRegistry::new()
            .register(Backend::OpenAI.as_str(), OpenAICompatProvider::new(openai))
            .register(Backend::Ollama.as_str(), OllamaProvider::new(ollama))
    }

    pub fn provider(&self) -> Result<Arc<dyn Provider>> {
        self.provider_registry()
            .get_provider(self.backend.as_str())
            .map_err(|e| RuntimeError::Config(e.to_string()))
    }

    /// Effective settings as `(ENV_KEY, value)` rows; the API key is masked.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path = |p: &Path| self.resolve(p).display().to_string();
        vec![
            ("MIMIC_OWNER", self.owner.clone().unwrap_or_default()),
            ("MIMIC_INPUT_DIR", path(&self.input_dir)),
            ("MIMIC_DATASET_FILE", path(&self.dataset_file)),
            ("MIMIC_STATS_FILE", path(&self.stats_file)),
            ("MIMIC_WINDOW", self.window.to_string()),
            ("MIMIC_BACKEND", self.backend.to_string()),
            ("MIMIC_BASE_URL", self.effective_base_url().to_string()),
            (
                "MIMIC_API_KEY",
                self.api_key.as_deref().map(mask).unwrap_or_default(),
            ),
            ("MIMIC_MODEL", self.model.clone()),
            (
                "MIMIC_TRAIN_COMMAND",
                self.train_command.clone().unwrap_or_default(),
            ),
            ("MIMIC_CHECKPOINT_DIR", path(&self.checkpoint_dir)),
            ("MIMIC_TEMPERATURE", self.temperature.to_string()),
            ("MIMIC_MAX_NEW_TOKENS", self.max_new_tokens.to_string()),
        ]
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| RuntimeError::Config(format!("{key}: invalid value '{raw}'")))
}

fn mask(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}
