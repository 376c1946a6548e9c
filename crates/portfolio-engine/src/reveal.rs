use crate::observation::{RegionId, RegionObserver, Threshold, VisibilityObservation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Keyframe animation played when a block is revealed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    #[serde(rename = "fadeInUp")]
    FadeInUp,
    #[serde(rename = "fadeInLeft")]
    FadeInLeft,
    #[serde(rename = "fadeInRight")]
    FadeInRight,
}

impl Animation {
    /// CSS `@keyframes` name
    pub fn keyframes(self) -> &'static str {
        match self {
            Animation::FadeInUp => "fadeInUp",
            Animation::FadeInLeft => "fadeInLeft",
            Animation::FadeInRight => "fadeInRight",
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyframes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Per-block reveal settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    pub animation: Animation,
    pub delay: Duration,
    pub threshold: Threshold,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            animation: Animation::default(),
            delay: Duration::ZERO,
            threshold: Threshold::REVEAL,
        }
    }
}

impl RevealConfig {
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Inline animation properties for a block in its current state
#[derive(Debug, Clone, PartialEq)]
pub struct RevealStyle {
    pub animation_name: Option<&'static str>,
    pub delay: Duration,
    pub duration: Duration,
    pub timing_function: &'static str,
    pub fill_mode: &'static str,
}

impl RevealStyle {
    pub const DURATION: Duration = Duration::from_millis(800);

    pub fn to_css(&self) -> String {
        format!(
            "animation-delay: {}ms; animation-name: {}; animation-duration: {}s; \
             animation-timing-function: {}; animation-fill-mode: {};",
            self.delay.as_millis(),
            self.animation_name.unwrap_or("none"),
            self.duration.as_secs_f64(),
            self.timing_function,
            self.fill_mode,
        )
    }
}

/// One-shot visibility watcher for a single content block.
///
/// Hidden until the first observation that meets its threshold, then
/// revealed for good. The watcher unobserves itself on that first trigger
/// and ignores everything after it.
#[derive(Debug, Clone)]
pub struct RevealWatcher {
    region: RegionId,
    config: RevealConfig,
    state: RevealState,
    watching: bool,
}

impl RevealWatcher {
    pub fn new(region: impl Into<RegionId>, config: RevealConfig) -> Self {
        Self {
            region: region.into(),
            config,
            state: RevealState::Hidden,
            watching: false,
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Start watching. A block missing from the page stays hidden; not an error.
    pub fn attach(&mut self, observer: &mut impl RegionObserver) -> bool {
        if self.watching || self.is_revealed() {
            return self.watching;
        }
        self.watching = observer.observe(&self.region);
        if !self.watching {
            log::debug!("Reveal block '{}' is not on the page", self.region);
        }
        self.watching
    }

    /// Feed one observation. Returns `true` only on the hidden -> revealed transition.
    pub fn handle(
        &mut self,
        observation: &VisibilityObservation,
        observer: &mut impl RegionObserver,
    ) -> bool {
        if !self.watching || observation.target != self.region {
            return false;
        }
        if !self.config.threshold.is_met_by(observation) {
            return false;
        }

        self.state = RevealState::Revealed;
        self.cancel(observer);
        true
    }

    /// Stop watching. Safe at any time, including before `attach`.
    pub fn cancel(&mut self, observer: &mut impl RegionObserver) {
        if self.watching {
            observer.unobserve(&self.region);
            self.watching = false;
        }
    }

    pub fn style(&self) -> RevealStyle {
        RevealStyle {
            animation_name: self
                .is_revealed()
                .then_some(self.config.animation.keyframes()),
            delay: self.config.delay,
            duration: RevealStyle::DURATION,
            timing_function: "ease-out",
            fill_mode: "both",
        }
    }

    pub fn opacity_class(&self) -> &'static str {
        if self.is_revealed() {
            "opacity-100"
        } else {
            "opacity-0 transition-opacity duration-300"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{PageLayout, Span, ViewportObserver};
    use insta::assert_snapshot;

    fn block_layout() -> PageLayout {
        PageLayout::stack([
            (RegionId::from("spacer"), 200.0),
            (RegionId::from("about-intro"), 100.0),
        ])
    }

    #[test]
    fn test_reveals_once_past_threshold_and_never_reverts() {
        let layout = block_layout();
        let mut observer = ViewportObserver::new(Threshold::REVEAL, &layout);
        let mut watcher = RevealWatcher::new("about-intro", RevealConfig::default());
        assert!(watcher.attach(&mut observer));

        let feed = |offset: f64, watcher: &mut RevealWatcher, observer: &mut ViewportObserver| {
            let batch = observer.sample(&layout, Span::new(offset, 200.0));
            batch
                .iter()
                .filter(|observation| watcher.handle(observation, observer))
                .count()
        };

        // 5% visible: below the 10% threshold
        assert_eq!(feed(5.0, &mut watcher, &mut observer), 0);
        assert!(!watcher.is_revealed());

        assert_eq!(feed(20.0, &mut watcher, &mut observer), 1);
        assert!(watcher.is_revealed());
        assert!(!watcher.is_watching());
        assert!(!observer.is_observing(&"about-intro".into()));

        // Leave and re-enter view
        assert_eq!(feed(0.0, &mut watcher, &mut observer), 0);
        assert_eq!(feed(150.0, &mut watcher, &mut observer), 0);
        assert_eq!(watcher.state(), RevealState::Revealed);
    }

    #[test]
    fn test_other_blocks_do_not_trigger() {
        let layout = block_layout();
        let mut observer = ViewportObserver::new(Threshold::REVEAL, &layout);
        let mut watcher = RevealWatcher::new("about-intro", RevealConfig::default());
        watcher.attach(&mut observer);

        let foreign = VisibilityObservation::new("spacer", 1.0, true);
        assert!(!watcher.handle(&foreign, &mut observer));
        assert!(!watcher.is_revealed());
    }

    #[test]
    fn test_missing_block_stays_hidden_without_error() {
        let layout = block_layout();
        let mut observer = ViewportObserver::new(Threshold::REVEAL, &layout);
        let mut watcher = RevealWatcher::new("never-mounted", RevealConfig::default());

        assert!(!watcher.attach(&mut observer));
        watcher.cancel(&mut observer);

        let observation = VisibilityObservation::new("never-mounted", 1.0, true);
        assert!(!watcher.handle(&observation, &mut observer));
        assert!(!watcher.is_revealed());
    }

    #[test]
    fn test_cancel_before_trigger_stops_observation() {
        let layout = block_layout();
        let mut observer = ViewportObserver::new(Threshold::REVEAL, &layout);
        let mut watcher = RevealWatcher::new("about-intro", RevealConfig::default());
        watcher.attach(&mut observer);

        watcher.cancel(&mut observer);
        watcher.cancel(&mut observer);

        assert_eq!(observer.observed_count(), 0);
        let observation = VisibilityObservation::new("about-intro", 1.0, true);
        assert!(!watcher.handle(&observation, &mut observer));
    }

    #[test]
    fn test_style_before_and_after_reveal() {
        let layout = block_layout();
        let mut observer = ViewportObserver::new(Threshold::REVEAL, &layout);
        let config = RevealConfig::new(Animation::FadeInLeft).with_delay(Duration::from_millis(200));
        let mut watcher = RevealWatcher::new("about-intro", config);

        assert_snapshot!(
            watcher.style().to_css(),
            @"animation-delay: 200ms; animation-name: none; animation-duration: 0.8s; animation-timing-function: ease-out; animation-fill-mode: both;"
        );
        assert_eq!(watcher.opacity_class(), "opacity-0 transition-opacity duration-300");

        watcher.attach(&mut observer);
        watcher.handle(&VisibilityObservation::new("about-intro", 0.5, true), &mut observer);

        assert_snapshot!(
            watcher.style().to_css(),
            @"animation-delay: 200ms; animation-name: fadeInLeft; animation-duration: 0.8s; animation-timing-function: ease-out; animation-fill-mode: both;"
        );
        assert_eq!(watcher.opacity_class(), "opacity-100");
    }

    #[test]
    fn test_animation_names_match_keyframes() {
        assert_eq!(Animation::FadeInUp.to_string(), "fadeInUp");
        assert_eq!(Animation::FadeInRight.keyframes(), "fadeInRight");
    }
}
