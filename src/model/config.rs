use serde::{Deserialize, Serialize};

/// Configuration from flowgrid.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub regions: RegionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One entry of the link style pool, as `#RRGGBB` hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub text: String,
    pub background: String,
}

impl PaletteEntry {
    pub fn new(text: &str, background: &str) -> Self {
        PaletteEntry {
            text: text.to_string(),
            background: background.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// The finite pool of link styles. Its length is the number of
    /// concurrently distinguishable links.
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteEntry>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry::new("#FFFFFF", "#C0392B"),
        PaletteEntry::new("#FFFFFF", "#2471A3"),
        PaletteEntry::new("#000000", "#F4D03F"),
        PaletteEntry::new("#FFFFFF", "#1E8449"),
        PaletteEntry::new("#FFFFFF", "#7D3C98"),
        PaletteEntry::new("#000000", "#EB984E"),
    ]
}

/// How region summaries are shortened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthLimitType {
    #[default]
    Word,
    Char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default = "default_length_limit")]
    pub length_limit: usize,
    #[serde(default)]
    pub length_limit_type: LengthLimitType,
    /// Joins region texts when merging
    #[serde(default = "default_merge_separator")]
    pub merge_separator: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            length_limit: default_length_limit(),
            length_limit_type: LengthLimitType::Word,
            merge_separator: default_merge_separator(),
        }
    }
}

fn default_length_limit() -> usize {
    12
}

fn default_merge_separator() -> String {
    "\n".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: FlowConfig = toml::from_str("").unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.links.palette.len(), 6);
        assert_eq!(config.regions.length_limit, 12);
        assert_eq!(config.regions.merge_separator, "\n");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_tables() {
        let config: FlowConfig = toml::from_str(
            r##"
[links]
palette = [{ text = "#000000", background = "#FFFFFF" }]

[regions]
length_limit_type = "char"
"##,
        )
        .unwrap();
        assert_eq!(config.links.palette.len(), 1);
        assert_eq!(config.regions.length_limit_type, LengthLimitType::Char);
        assert_eq!(config.regions.length_limit, 12);
    }
}
