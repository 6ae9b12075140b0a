use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use awal_core::Language;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AWAL_CONFIG";
/// Environment variable naming the corpus file.
pub const CORPUS_ENV: &str = "AWAL_CORPUS";

/// Optional `config.toml` contents.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Corpus JSON path, relative to the config file's directory.
    pub corpus: Option<PathBuf>,
    pub language: Option<Language>,
    pub seed: Option<u64>,
}

/// Where the corpus comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusSource {
    Bundled,
    File(PathBuf),
}

/// Effective settings after merging flags, environment and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub corpus: CorpusSource,
    pub language: Language,
    pub seed: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
    pub language: Option<Language>,
    pub seed: Option<u64>,
}

fn dirs_home() -> Option<PathBuf> {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .ok()
        .map(PathBuf::from)
}

fn default_config_path() -> Option<PathBuf> {
    dirs_home().map(|home| home.join(".config").join("awal").join("config.toml"))
}

/// Parse config file contents.
pub fn parse_config(content: &str) -> Result<FileConfig> {
    toml::from_str(content).context("invalid config file")
}

fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config =
        parse_config(&content).with_context(|| format!("in {}", path.display()))?;

    if let Some(corpus) = config.corpus.take() {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.corpus = Some(base.join(corpus));
    }
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Locate and load the config file. An explicitly named file must exist;
/// the default location is optional.
fn find_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    if let Ok(path) = env::var(CONFIG_ENV) {
        if path.is_empty() {
            bail!("{CONFIG_ENV} is set but empty");
        }
        return load_config(Path::new(&path));
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config(&path),
        _ => Ok(FileConfig::default()),
    }
}

/// Merge precedence: command line > environment > config file > defaults.
pub fn resolve(overrides: Overrides) -> Result<Settings> {
    let env_corpus = env::var(CORPUS_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    resolve_with(overrides, env_corpus)
}

/// `resolve` with the `$AWAL_CORPUS` value passed in.
fn resolve_with(overrides: Overrides, env_corpus: Option<PathBuf>) -> Result<Settings> {
    let file = find_config(overrides.config.as_deref())?;

    let corpus = overrides
        .corpus
        .or(env_corpus)
        .or(file.corpus)
        .map_or(CorpusSource::Bundled, CorpusSource::File);

    Ok(Settings {
        corpus,
        language: overrides.language.or(file.language).unwrap_or_default(),
        seed: overrides.seed.or(file.seed),
    })
}
