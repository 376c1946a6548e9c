use portfolio_engine::{
    ActivationPolicy, DEFAULT_SECTIONS, ObservationError, RegionId, SectionTracker, SiteContent,
    Threshold,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read content file at {content_path}: {source}")]
    ContentReadError {
        content_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse content file at {content_path}: {source}")]
    ContentParseError {
        content_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid [tracking] settings: {0}")]
    InvalidTracking(#[from] ObservationError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub sections: Vec<String>,
    pub default_section: String,
    pub threshold: Threshold,
    pub policy: ActivationPolicy,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.iter().map(|id| id.to_string()).collect(),
            default_section: DEFAULT_SECTIONS[0].to_string(),
            threshold: Threshold::SECTION,
            policy: ActivationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub tick_ms: u64,
    pub reveal_threshold: Threshold,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 70,
            reveal_threshold: Threshold::REVEAL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site content TOML; the built-in portfolio when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<PathBuf>,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the content path
        config.content_path = config
            .content_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/portfolio");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn with_content_path(mut self, content_path: PathBuf) -> Self {
        self.content_path = Some(Self::expand_path(&content_path).unwrap_or(content_path));
        self
    }

    /// Section tracker for the configured sections, not yet started
    pub fn tracker(&self) -> Result<SectionTracker, ConfigError> {
        let tracker = SectionTracker::new(
            self.tracking.sections.iter().map(|id| RegionId::from(id.as_str())),
            RegionId::from(self.tracking.default_section.as_str()),
            self.tracking.threshold,
        )?;
        Ok(tracker.with_policy(self.tracking.policy))
    }

    /// Typewriter cadence
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.animation.tick_ms.max(1))
    }

    pub fn reveal_threshold(&self) -> Threshold {
        self.animation.reveal_threshold
    }

    /// Site content from `content_path`, or the built-in content
    pub fn load_content(&self) -> Result<SiteContent, ConfigError> {
        let Some(content_path) = &self.content_path else {
            return Ok(SiteContent::default());
        };

        let raw = std::fs::read_to_string(content_path).map_err(|source| {
            ConfigError::ContentReadError {
                content_path: content_path.clone(),
                source,
            }
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::ContentParseError {
            content_path: content_path.clone(),
            source,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
