//! Simulated viewport geometry.
//!
//! Pages are modelled as regions stacked vertically. A [`ViewportObserver`]
//! turns a scroll position into batches of [`VisibilityObservation`]s the same
//! way a browser intersection observer does: one initial entry per newly
//! observed region, then an entry whenever a region crosses the threshold.

use crate::observation::{RegionId, RegionObserver, Threshold, VisibilityObservation};
use std::collections::HashSet;
use std::time::Duration;

/// Vertical extent in page units (terminal rows, CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub len: f64,
}

impl Span {
    pub fn new(start: f64, len: f64) -> Self {
        Self {
            start,
            len: len.max(0.0),
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.len
    }
}

/// Visible share of `region` inside `viewport`, and whether they touch at all.
///
/// A zero-length region that sits inside the viewport counts as fully visible.
pub fn intersection_ratio(region: Span, viewport: Span) -> (f64, bool) {
    let top = region.start.max(viewport.start);
    let bottom = region.end().min(viewport.end());

    if region.len == 0.0 {
        let inside = region.start >= viewport.start && region.start <= viewport.end();
        return if inside { (1.0, true) } else { (0.0, false) };
    }

    if bottom <= top {
        return (0.0, false);
    }

    ((bottom - top) / region.len, true)
}

/// Regions stacked top to bottom in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    regions: Vec<(RegionId, Span)>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack regions one after another starting at offset zero
    pub fn stack(heights: impl IntoIterator<Item = (RegionId, f64)>) -> Self {
        let mut layout = Self::new();
        let mut offset = 0.0;
        for (id, height) in heights {
            let span = Span::new(offset, height);
            offset = span.end();
            layout.regions.push((id, span));
        }
        layout
    }

    /// Place a region at an explicit position, e.g. a block nested inside a section
    pub fn place(&mut self, id: RegionId, span: Span) {
        match self.regions.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = span,
            None => self.regions.push((id, span)),
        }
    }

    pub fn span_of(&self, id: &RegionId) -> Option<Span> {
        self.regions
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, span)| *span)
    }

    pub fn contains(&self, id: &RegionId) -> bool {
        self.span_of(id).is_some()
    }

    pub fn regions(&self) -> impl Iterator<Item = (&RegionId, Span)> {
        self.regions.iter().map(|(id, span)| (id, *span))
    }

    /// Bottom edge of the lowest region
    pub fn height(&self) -> f64 {
        self.regions
            .iter()
            .map(|(_, span)| span.end())
            .fold(0.0, f64::max)
    }

    /// Largest scroll offset that still keeps the viewport on the page
    pub fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.height() - viewport_height).max(0.0)
    }

    pub fn clamp_scroll(&self, offset: f64, viewport_height: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll(viewport_height))
    }

    /// Scroll offset that brings the top of `id` to the top of the viewport
    pub fn scroll_offset_for(&self, id: &RegionId, viewport_height: f64) -> Option<f64> {
        self.span_of(id)
            .map(|span| self.clamp_scroll(span.start, viewport_height))
    }
}

#[derive(Debug)]
struct Target {
    id: RegionId,
    /// Which side of the threshold the last delivered entry reported
    reported: Option<bool>,
}

/// Intersection observer over a simulated viewport with a single threshold
#[derive(Debug)]
pub struct ViewportObserver {
    threshold: Threshold,
    mounted: HashSet<RegionId>,
    targets: Vec<Target>,
}

impl ViewportObserver {
    /// Observer that can watch any region present in `layout` at creation time
    pub fn new(threshold: Threshold, layout: &PageLayout) -> Self {
        Self {
            threshold,
            mounted: layout.regions().map(|(id, _)| id.clone()).collect(),
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn is_observing(&self, id: &RegionId) -> bool {
        self.targets.iter().any(|target| target.id == *id)
    }

    pub fn observed_count(&self) -> usize {
        self.targets.len()
    }

    /// Drop every target
    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    /// Batch of entries for the given viewport, in observe order.
    ///
    /// Targets that have disappeared from `layout` produce nothing.
    pub fn sample(&mut self, layout: &PageLayout, viewport: Span) -> Vec<VisibilityObservation> {
        let threshold = self.threshold;
        let mut batch = Vec::new();

        for target in &mut self.targets {
            let Some(span) = layout.span_of(&target.id) else {
                continue;
            };
            let (ratio, is_intersecting) = intersection_ratio(span, viewport);
            let above = threshold.is_met(ratio, is_intersecting);

            if target.reported != Some(above) {
                target.reported = Some(above);
                batch.push(VisibilityObservation {
                    target: target.id.clone(),
                    ratio,
                    is_intersecting,
                });
            }
        }

        batch
    }
}

impl RegionObserver for ViewportObserver {
    fn observe(&mut self, region: &RegionId) -> bool {
        if !self.mounted.contains(region) {
            return false;
        }
        if !self.is_observing(region) {
            self.targets.push(Target {
                id: region.clone(),
                reported: None,
            });
        }
        true
    }

    fn unobserve(&mut self, region: &RegionId) {
        self.targets.retain(|target| target.id != *region);
    }
}

/// Eased transition of a scroll offset, used for "navigate to section"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl SmoothScroll {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(400);

    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` and return the new offset
    pub fn step(&mut self, dt: Duration) -> f64 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.position()
    }

    pub fn position(&self) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn four_sections() -> PageLayout {
        PageLayout::stack([
            (RegionId::from("home"), 100.0),
            (RegionId::from("about"), 100.0),
            (RegionId::from("projects"), 100.0),
            (RegionId::from("contact"), 100.0),
        ])
    }

    #[rstest]
    #[case(Span::new(0.0, 100.0), Span::new(0.0, 50.0), 0.5, true)]
    #[case(Span::new(0.0, 100.0), Span::new(0.0, 200.0), 1.0, true)]
    #[case(Span::new(100.0, 100.0), Span::new(0.0, 100.0), 0.0, false)]
    #[case(Span::new(150.0, 100.0), Span::new(100.0, 100.0), 0.5, true)]
    #[case(Span::new(50.0, 0.0), Span::new(0.0, 100.0), 1.0, true)]
    #[case(Span::new(150.0, 0.0), Span::new(0.0, 100.0), 0.0, false)]
    fn test_intersection_ratio(
        #[case] region: Span,
        #[case] viewport: Span,
        #[case] ratio: f64,
        #[case] intersecting: bool,
    ) {
        assert_eq!(intersection_ratio(region, viewport), (ratio, intersecting));
    }

    #[test]
    fn test_stack_places_regions_consecutively() {
        let layout = four_sections();

        assert_eq!(
            layout.span_of(&"projects".into()),
            Some(Span::new(200.0, 100.0))
        );
        assert_eq!(layout.height(), 400.0);
        assert_eq!(layout.scroll_offset_for(&"contact".into(), 150.0), Some(250.0));
        assert_eq!(layout.scroll_offset_for(&"missing".into(), 150.0), None);
    }

    #[test]
    fn test_observe_skips_regions_not_on_page() {
        let layout = four_sections();
        let mut observer = ViewportObserver::new(Threshold::SECTION, &layout);

        assert!(observer.observe(&"about".into()));
        assert!(!observer.observe(&"blog".into()));
        assert_eq!(observer.observed_count(), 1);
    }

    #[test]
    fn test_sample_reports_initial_state_then_only_crossings() {
        let layout = four_sections();
        let mut observer = ViewportObserver::new(Threshold::SECTION, &layout);
        for id in ["home", "about"] {
            observer.observe(&id.into());
        }

        let initial = observer.sample(&layout, Span::new(0.0, 100.0));
        assert_eq!(
            initial,
            vec![
                VisibilityObservation::new("home", 1.0, true),
                VisibilityObservation::new("about", 0.0, false),
            ]
        );

        // Small scroll: neither region crosses 30%
        assert!(observer.sample(&layout, Span::new(10.0, 100.0)).is_empty());

        let crossed = observer.sample(&layout, Span::new(40.0, 100.0));
        assert_eq!(crossed, vec![VisibilityObservation::new("about", 0.4, true)]);
    }

    #[test]
    fn test_unobserved_regions_stop_reporting() {
        let layout = four_sections();
        let mut observer = ViewportObserver::new(Threshold::SECTION, &layout);
        observer.observe(&"home".into());
        observer.unobserve(&"home".into());

        assert!(observer.sample(&layout, Span::new(0.0, 100.0)).is_empty());
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let mut scroll = SmoothScroll::new(0.0, 300.0, Duration::from_millis(400));

        let midway = scroll.step(Duration::from_millis(200));
        assert!((midway - 150.0).abs() < 1e-9);
        assert!(!scroll.is_finished());

        assert_eq!(scroll.step(Duration::from_millis(500)), 300.0);
        assert!(scroll.is_finished());
    }
}
