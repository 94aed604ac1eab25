use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::layout_engine::{BorderPolicy, Orientation, Origin, SplitOrientation};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub distribution: DistributionSettings,
    #[serde(default)]
    pub split: SplitSettings,
    #[serde(default)]
    pub border: BorderSettings,
    #[serde(default)]
    pub repeater: RepeaterSettings,
    #[serde(default)]
    pub tooltip: TooltipSettings,
}

/// Shared parameters for adaption, lineup and weighted layouts.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct DistributionSettings {
    /// Outer margin around all elements
    #[serde(default)]
    pub border: f64,
    /// Space between adjacent elements
    #[serde(default)]
    pub gap: f64,
    /// Extent reserved for each separator element
    #[serde(default)]
    pub separator_width: f64,
    /// Lower bound for an adaption element's share
    #[serde(default)]
    pub min: f64,
    /// Upper bound for an adaption element's share; unbounded when absent
    #[serde(default)]
    pub max: Option<f64>,
    /// Fixed element extent used by lineup layouts
    #[serde(default = "default_dimension")]
    pub dimension: f64,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub origin: Origin,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct SplitSettings {
    #[serde(default = "default_splitter_width")]
    pub splitter_width: f64,
    /// Initial split position in [0, 1]
    #[serde(default = "default_split_position")]
    pub position: f64,
    #[serde(default)]
    pub orientation: SplitOrientation,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct BorderSettings {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub policy: BorderPolicy,
    /// Header strip height for header layouts
    #[serde(default = "default_header_height")]
    pub header_height: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct RepeaterSettings {
    #[serde(default = "default_repeater_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct TooltipSettings {
    /// Hover time before a tooltip is shown
    #[serde(default = "default_tooltip_delay_ms")]
    pub delay_ms: u64,
}

fn default_dimension() -> f64 { 24.0 }

fn default_splitter_width() -> f64 { 4.0 }

fn default_split_position() -> f64 { 0.5 }

fn default_header_height() -> f64 { 24.0 }

fn default_repeater_interval_ms() -> u64 { 16 }

fn default_tooltip_delay_ms() -> u64 { 500 }

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            border: 0.0,
            gap: 0.0,
            separator_width: 0.0,
            min: 0.0,
            max: None,
            dimension: default_dimension(),
            orientation: Orientation::default(),
            origin: Origin::default(),
        }
    }
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            splitter_width: default_splitter_width(),
            position: default_split_position(),
            orientation: SplitOrientation::default(),
        }
    }
}

impl Default for BorderSettings {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            policy: BorderPolicy::default(),
            header_height: default_header_height(),
        }
    }
}

impl Default for RepeaterSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_repeater_interval_ms(),
        }
    }
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_tooltip_delay_ms(),
        }
    }
}

impl DistributionSettings {
    pub fn max_extent(&self) -> f64 { self.max.unwrap_or(f64::INFINITY) }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("border", self.border),
            ("gap", self.gap),
            ("separator_width", self.separator_width),
            ("min", self.min),
            ("dimension", self.dimension),
        ] {
            if value < 0.0 {
                issues.push(format!("distribution.{name} must be non-negative, got {value}"));
            }
        }

        if let Some(max) = self.max {
            if max < self.min {
                issues.push(format!(
                    "distribution.max ({max}) must not be less than distribution.min ({})",
                    self.min
                ));
            }
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        for value in [
            &mut self.border,
            &mut self.gap,
            &mut self.separator_width,
            &mut self.min,
        ] {
            if *value < 0.0 {
                *value = 0.0;
                fixes += 1;
            }
        }

        if self.dimension < 0.0 {
            self.dimension = default_dimension();
            fixes += 1;
        }

        if let Some(max) = self.max {
            if max < self.min {
                self.max = Some(self.min);
                fixes += 1;
            }
        }

        fixes
    }
}

impl SplitSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.splitter_width < 0.0 {
            issues.push(format!(
                "split.splitter_width must be non-negative, got {}",
                self.splitter_width
            ));
        }

        if !(0.0..=1.0).contains(&self.position) {
            issues.push(format!("split.position must be within [0, 1], got {}", self.position));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.splitter_width < 0.0 {
            self.splitter_width = default_splitter_width();
            fixes += 1;
        }

        if !(0.0..=1.0).contains(&self.position) {
            self.position = self.position.max(0.0).min(1.0);
            fixes += 1;
        }

        fixes
    }
}

impl BorderSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
            ("header_height", self.header_height),
        ] {
            if value < 0.0 {
                issues.push(format!("border.{name} must be non-negative, got {value}"));
            }
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        for value in [&mut self.top, &mut self.bottom, &mut self.left, &mut self.right] {
            if *value < 0.0 {
                *value = 0.0;
                fixes += 1;
            }
        }

        if self.header_height < 0.0 {
            self.header_height = default_header_height();
            fixes += 1;
        }

        fixes
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn default() -> Config {
        Self::parse_or_builtin(include_str!("../../panekit.default.toml"))
    }

    fn parse_or_builtin(buf: &str) -> Config {
        Self::parse(buf).unwrap_or_else(|err| {
            error!("embedded default config is invalid, using built-in values: {err:#}");
            Self::builtin()
        })
    }

    fn builtin() -> Config {
        Config {
            distribution: Default::default(),
            split: Default::default(),
            border: Default::default(),
            repeater: Default::default(),
            tooltip: Default::default(),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        issues.extend(self.distribution.validate());
        issues.extend(self.split.validate());
        issues.extend(self.border.validate());

        if self.repeater.interval_ms == 0 {
            issues.push("repeater.interval_ms must be at least 1".to_string());
        }

        issues
    }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        fixes += self.distribution.auto_fix_values();
        fixes += self.split.auto_fix_values();
        fixes += self.border.auto_fix_values();

        if self.repeater.interval_ms == 0 {
            self.repeater.interval_ms = default_repeater_interval_ms();
            fixes += 1;
        }

        fixes
    }

    pub(crate) fn parse(buf: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(buf)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(include_str!("../../panekit.default.toml")).unwrap();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn empty_config_uses_field_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::builtin());
        assert_eq!(config.split.splitter_width, 4.0);
        assert_eq!(config.distribution.max_extent(), f64::INFINITY);
    }

    #[test]
    fn parses_sections() {
        let config = Config::parse(
            r#"
            [distribution]
            border = 10
            gap = 5
            dimension = 50
            orientation = "vertical"
            origin = "end"

            [border]
            top = 20
            policy = "top_left_maximize"
        "#,
        )
        .unwrap();

        assert_eq!(config.distribution.border, 10.0);
        assert_eq!(config.distribution.orientation, Orientation::Vertical);
        assert_eq!(config.distribution.origin, Origin::End);
        assert_eq!(config.border.policy, BorderPolicy::TopLeftMaximize);
        assert_eq!(config.border.top, 20.0);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::parse("[split]\nwidth = 3").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_empty());

        config.distribution.gap = -1.0;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("distribution.gap must be non-negative"));

        config.split.position = 1.5;
        config.distribution.min = 10.0;
        config.distribution.max = Some(5.0);
        assert_eq!(config.validate().len(), 3);

        let fixes = config.auto_fix_values();
        assert_eq!(fixes, 3);
        assert_eq!(config.distribution.gap, 0.0);
        assert_eq!(config.split.position, 1.0);
        assert_eq!(config.distribution.max, Some(10.0));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn broken_default_falls_back_to_builtin() {
        assert_eq!(Config::parse_or_builtin("[split\nposition = "), Config::builtin());
        assert_eq!(
            Config::parse_or_builtin("[split]\nposition = 0.25").split.position,
            0.25
        );
    }

    #[test]
    fn save_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("panekit.toml");

        let mut config = Config::default();
        config.distribution.max = Some(80.0);
        config.distribution.origin = Origin::End;
        config.border.policy = BorderPolicy::LeftRightMaximize;
        config.split.orientation = SplitOrientation::Horizontal;
        config.tooltip.delay_ms = 250;

        config.save(&path).unwrap();
        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::read(&dir.path().join("absent.toml")).is_err());
    }
}
