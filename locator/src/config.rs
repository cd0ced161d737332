use crate::error::Result;
use crate::matcher::MatcherConfig;
use crate::palette;
use serde::Deserialize;

fn default_fuzzy_tolerance() -> f64 {
    0.3
}

fn default_min_overlap_chars() -> usize {
    5
}

fn default_color() -> String {
    palette::DEFAULT_COLOR.into()
}

fn default_http_port() -> u16 {
    8086
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_fuzzy_tolerance")]
    pub fuzzy_tolerance: f64,
    #[serde(default = "default_min_overlap_chars")]
    pub min_overlap_chars: usize,
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Matcher tolerances, tolerance clamped into `[0, 1]`.
    pub fn matcher_config(&self) -> MatcherConfig {
        let tolerance = if self.fuzzy_tolerance.is_finite() {
            self.fuzzy_tolerance.clamp(0.0, 1.0)
        } else {
            default_fuzzy_tolerance()
        };
        MatcherConfig {
            tolerance,
            min_overlap_chars: self.min_overlap_chars,
        }
    }
}
