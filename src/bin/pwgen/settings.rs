//! Layering of the generation settings: built-in defaults, then the YAML preset file, then
//! environment variables and flags (clap merges those two before we get here).

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;
use serde::Deserialize;

use pwgen::{GenerationConfig, PasswordGenerator};

use crate::{ProgError, ShapeArgs};

/// A preset file. Every field is optional; missing fields fall back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Preset {
    length: Option<i64>,
    #[serde(alias = "include_digits")]
    digits: Option<bool>,
    #[serde(alias = "include_symbols")]
    symbols: Option<bool>,
    symbol_set: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) config: GenerationConfig,
    pub(crate) generator: PasswordGenerator,
}

pub(crate) fn read_preset(path: &Path) -> anyhow::Result<Preset> {
    debug!("reading preset at {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read preset file {}", path.display()))?;
    // An empty document deserializes as unit, not as an empty map.
    if data.trim().is_empty() {
        return Ok(Preset::default());
    }
    serde_yaml::from_str(&data)
        .with_context(|| format!("failed to parse preset file {}", path.display()))
}

pub(crate) fn resolve(shape: &ShapeArgs, length: Option<i64>) -> Result<Settings, ProgError> {
    let preset = match shape.config.as_deref() {
        Some(path) => read_preset(path)?,
        None => Preset::default(),
    };
    Ok(merge(preset, shape, length)?)
}

fn merge(
    preset: Preset,
    shape: &ShapeArgs,
    length: Option<i64>,
) -> Result<Settings, pwgen::InvalidConfig> {
    let defaults = GenerationConfig::default();
    let config = GenerationConfig {
        length: length.or(preset.length).unwrap_or(defaults.length),
        include_digits: shape
            .digits
            .or(preset.digits)
            .unwrap_or(defaults.include_digits),
        include_symbols: shape
            .symbols
            .or(preset.symbols)
            .unwrap_or(defaults.include_symbols),
    };
    let generator = match shape.symbol_set.as_deref().or(preset.symbol_set.as_deref()) {
        Some(symbols) => PasswordGenerator::with_symbols(symbols)?,
        None => PasswordGenerator::default(),
    };
    debug!("resolved generation config: {:?}", config);
    Ok(Settings { config, generator })
}
