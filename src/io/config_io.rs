use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

use crate::model::config::{FlowConfig, LinkConfig};
use crate::ops::link::StyleUnit;

/// Default config file name
pub const CONFIG_FILE: &str = "flowgrid.toml";

/// Error type for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid color for {key}: {value:?} (expected #RRGGBB)")]
    InvalidColor { key: String, value: String },
}

/// Parse config text. Missing tables and keys fall back to defaults.
pub fn parse_config(text: &str) -> Result<FlowConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<FlowConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text)
}

/// Load `flowgrid.toml` from `dir`, or defaults if the file does not exist.
pub fn load_config_or_default(dir: &Path) -> Result<FlowConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FlowConfig::default());
    }
    load_config(&path)
}

/// Resolve the palette into style units for the link pool.
pub fn palette_units(links: &LinkConfig) -> Result<Vec<StyleUnit>, ConfigError> {
    links
        .palette
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let text = resolve_color(&format!("links.palette[{i}].text"), &entry.text)?;
            let background = resolve_color(&format!("links.palette[{i}].background"), &entry.background)?;
            Ok(StyleUnit::new(text, background))
        })
        .collect()
}

fn resolve_color(key: &str, value: &str) -> Result<Color, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Parse `#RRGGBB` into an RGB color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
