//! `[layout]` section configuration.

use super::defaults;
use crate::sidebar::ScrollLayout;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[layout]` section in tocbar.toml - sidebar geometry used to center the
/// active entry.
///
/// # Example
/// ```toml
/// [layout]
/// row_height = 28.0
/// viewport_height = 720.0
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of one entry, in pixels.
    #[serde(default = "defaults::layout::row_height")]
    #[educe(Default = defaults::layout::row_height())]
    pub row_height: f64,

    /// Visible height of the scrollable sidebar, in pixels.
    #[serde(default = "defaults::layout::viewport_height")]
    #[educe(Default = defaults::layout::viewport_height())]
    pub viewport_height: f64,
}

impl From<&LayoutConfig> for ScrollLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            row_height: config.row_height,
            viewport_height: config.viewport_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::TocbarConfig;

    #[test]
    fn test_layout_config() {
        let config = r#"
            [layout]
            row_height = 28.0
            viewport_height = 720.0
        "#;
        let config: TocbarConfig = toml::from_str(config).unwrap();

        assert_eq!(config.layout.row_height, 28.0);
        assert_eq!(config.layout.viewport_height, 720.0);
    }

    #[test]
    fn test_layout_config_defaults() {
        let config: TocbarConfig = toml::from_str("").unwrap();

        assert_eq!(config.layout.row_height, 24.0);
        assert_eq!(config.layout.viewport_height, 600.0);
    }
}
