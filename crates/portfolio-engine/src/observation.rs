use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ObservationError {
    #[error("Invalid visibility threshold: {0} (must be between 0 and 1)")]
    InvalidThreshold(f64),
    #[error("No sections configured")]
    NoSections,
    #[error("Section listed twice: {0}")]
    DuplicateSection(RegionId),
    #[error("Unknown section: {0}")]
    UnknownSection(RegionId),
    #[error("Section tracker has been torn down")]
    TornDown,
}

/// Identifier of a page region: a tracked section or a reveal-animated block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for RegionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RegionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Fraction of a region's area that must be visible before it counts as seen
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Navigation highlighting: 30% of a section in view
    pub const SECTION: Threshold = Threshold(0.3);
    /// Fade-in blocks: 10% of a block in view
    pub const REVEAL: Threshold = Threshold(0.1);

    pub fn new(fraction: f64) -> Result<Self, ObservationError> {
        if fraction.is_nan() || !(0.0..=1.0).contains(&fraction) {
            return Err(ObservationError::InvalidThreshold(fraction));
        }
        Ok(Self(fraction))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// A ratio is on the visible side of the threshold
    pub fn is_met(self, ratio: f64, is_intersecting: bool) -> bool {
        is_intersecting && ratio >= self.0
    }

    pub fn is_met_by(self, observation: &VisibilityObservation) -> bool {
        self.is_met(observation.ratio, observation.is_intersecting)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ObservationError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        Self::new(fraction)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// One entry of an intersection batch. Consumed and discarded per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityObservation {
    pub target: RegionId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl VisibilityObservation {
    pub fn new(target: impl Into<RegionId>, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            target: target.into(),
            ratio,
            is_intersecting,
        }
    }
}

/// Source of visibility observations for a set of regions.
///
/// Implemented by the simulated viewport and by the browser script bridges.
pub trait RegionObserver {
    /// Start delivering observations for `region`.
    ///
    /// Returns `false` when the region is not present on the page; the caller
    /// skips it rather than failing.
    fn observe(&mut self, region: &RegionId) -> bool;

    /// Stop delivering observations for `region`. Unknown regions are ignored.
    fn unobserve(&mut self, region: &RegionId);
}
