use crate::render::{ResultRenderer, TEASER_LENGTH};
use crate::translation::Translations;
use crate::truncate::WordBoundaryTruncator;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Renderer settings, read from a JSON file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum teaser length in characters
    pub teaser_length: usize,
    /// Score below which sections are collapsed; absent means infinity
    pub threshold: Option<f64>,
    /// JSON table of localized labels
    pub translations: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            teaser_length: TEASER_LENGTH,
            threshold: None,
            translations: None,
        }
    }
}

/// Reject thresholds that no score can be compared against.
///
/// `+inf` is allowed and collapses every section.
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_nan() || threshold == f64::NEG_INFINITY {
        bail!("Invalid threshold {}: must be a number or +inf", threshold);
    }
    Ok(threshold)
}

/// Parse a threshold given on the command line
pub fn parse_threshold(value: &str) -> Result<f64> {
    let threshold: f64 = value
        .parse()
        .with_context(|| format!("Invalid threshold '{}'", value))?;
    validate_threshold(threshold)
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Build a renderer with the configured labels, teaser length and threshold
    pub fn build_renderer(&self) -> Result<ResultRenderer> {
        let threshold = self.threshold.map(validate_threshold).transpose()?;

        let translations = match &self.translations {
            Some(path) => Translations::load(path)?,
            None => Translations::new(),
        };

        Ok(ResultRenderer::new(translations, WordBoundaryTruncator::new())
            .with_teaser_length(self.teaser_length)
            .with_threshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config: RenderConfig = serde_json::from_str(r#"{"threshold": 0.75}"#)?;
        assert_eq!(config.teaser_length, 320);
        assert_eq!(config.threshold, Some(0.75));
        assert!(config.translations.is_none());

        Ok(())
    }

    #[test]
    fn test_build_renderer_carries_threshold() -> Result<()> {
        let config: RenderConfig = serde_json::from_str(r#"{"threshold": 0.6}"#)?;
        assert_eq!(config.build_renderer()?.threshold(), Some(0.6));
        assert_eq!(RenderConfig::default().build_renderer()?.threshold(), None);

        Ok(())
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = RenderConfig {
            threshold: Some(f64::NAN),
            ..Default::default()
        };
        assert!(config.build_renderer().is_err());

        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("-inf").is_err());
        assert!(parse_threshold("abc").is_err());
        assert_eq!(parse_threshold("0.6").ok(), Some(0.6));
        assert_eq!(parse_threshold("inf").ok(), Some(f64::INFINITY));
    }

    #[test]
    fn test_build_renderer_with_missing_translations_fails() {
        let config = RenderConfig {
            translations: Some(PathBuf::from("/nonexistent/docsearch/fr.json")),
            ..Default::default()
        };
        assert!(config.build_renderer().is_err());
    }
}
