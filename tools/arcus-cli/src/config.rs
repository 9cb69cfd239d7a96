use std::fs;
use std::path::Path;

use anyhow::Context;
use arcus_eval::EvalConfig;
use arcus_parser::{DriverConfig, SystemKind};
use serde::Deserialize;

/// Contents of an `arcus.toml` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub eval: EvalSection,
    #[serde(default)]
    pub driver: DriverConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalSection {
    pub system: Option<SystemKind>,
    pub show: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Flags win over the file, the file wins over defaults.
pub fn resolve(
    file: Option<FileConfig>,
    system: Option<SystemKind>,
    show: Option<usize>,
) -> EvalConfig {
    let file = file.unwrap_or_default();
    let defaults = EvalConfig::default();
    EvalConfig {
        system: system.or(file.eval.system).unwrap_or(defaults.system),
        show: show.or(file.eval.show).unwrap_or(defaults.show),
        driver: file.driver,
    }
}
