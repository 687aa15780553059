//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys are addressed with `__` in env vars, e.g. `APP_PIPELINE__WORKERS=8`.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_WORKERS: usize = 16;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment);
        config.pipeline()?;
        Ok(config)
    }

    /// Wrap an already assembled figment, e.g. one built from inline TOML.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[pipeline]` section, defaulted when absent and always validated.
    pub fn pipeline(&self) -> anyhow::Result<PipelineConfig> {
        let pipeline = if self.figment.contains("pipeline") {
            self.get::<PipelineConfig>("pipeline")?
        } else {
            PipelineConfig::default()
        };
        pipeline.validate()?;
        Ok(pipeline)
    }
}

/// File locations and worker settings for one preprocessing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: String,
    pub output_dir: String,
    pub question_file: String,
    pub answer_file: String,
    pub train_file: String,
    pub validation_file: String,
    pub test_file: String,
    pub delimiter: String,
    pub workers: usize,
    pub progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: "./cMedQA2".to_string(),
            output_dir: "./data".to_string(),
            question_file: "question.csv".to_string(),
            answer_file: "answer.csv".to_string(),
            train_file: "train_candidates.txt".to_string(),
            validation_file: "dev_candidates.txt".to_string(),
            test_file: "test_candidates.txt".to_string(),
            delimiter: ",".to_string(),
            workers: DEFAULT_WORKERS,
            progress: true,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".to_string()));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(Error::InvalidConfig(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }

    pub fn output_root(&self) -> PathBuf {
        expand_path(&self.output_dir)
    }

    /// Input table locations, with relative file names resolved against `data_dir`.
    pub fn dataset_paths(&self) -> DatasetPaths {
        let base = expand_path(&self.data_dir);
        DatasetPaths {
            questions: resolve_with_base(&base, &self.question_file),
            answers: resolve_with_base(&base, &self.answer_file),
            train: resolve_with_base(&base, &self.train_file),
            validation: resolve_with_base(&base, &self.validation_file),
            test: resolve_with_base(&base, &self.test_file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub questions: PathBuf,
    pub answers: PathBuf,
    pub train: PathBuf,
    pub validation: PathBuf,
    pub test: PathBuf,
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
