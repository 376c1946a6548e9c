use crate::page::Page;
use portfolio_config::{Config, ConfigError};
use portfolio_engine::{
    RegionId, RevealWatcher, SectionTracker, SiteContent, SmoothScroll, Span,
    TypewriterDriver, TypewriterView, ViewportObserver, VirtualClock,
};
use std::time::Duration;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 24.0;

/// Terminal preview state: one scrolled viewport over the page, with the
/// same tracking and reveal machinery the desktop page uses.
pub struct App {
    page: Page,
    tracker: SectionTracker,
    section_observer: ViewportObserver,
    reveals: Vec<(RevealWatcher, ViewportObserver)>,
    clock: VirtualClock,
    typewriters: Vec<TypewriterDriver>,
    scroll: f64,
    smooth: Option<SmoothScroll>,
    viewport_height: f64,
}

impl App {
    pub fn new(config: &Config, content: &SiteContent) -> Result<Self, ConfigError> {
        let page = Page::build(content, config.reveal_threshold());

        let mut tracker = config.tracker()?;
        let mut section_observer = ViewportObserver::new(tracker.threshold(), &page.layout);
        tracker.start(&mut section_observer);

        let reveals = page
            .blocks()
            .filter_map(|block| {
                let reveal = block.reveal?;
                let mut observer = ViewportObserver::new(reveal.threshold, &page.layout);
                let mut watcher = RevealWatcher::new(block.id.clone(), reveal);
                watcher.attach(&mut observer);
                Some((watcher, observer))
            })
            .collect();

        let clock = VirtualClock::new();
        let typewriters = content
            .hero
            .iter()
            .map(|line| {
                TypewriterDriver::with_tick(&clock, line.text.clone(), line.delay(), config.tick())
            })
            .collect();

        Ok(Self {
            page,
            tracker,
            section_observer,
            reveals,
            clock,
            typewriters,
            scroll: 0.0,
            smooth: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn sections(&self) -> &[RegionId] {
        self.tracker.sections()
    }

    pub fn active(&self) -> RegionId {
        self.tracker.active()
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(1.0);
        self.scroll = self
            .page
            .layout
            .clamp_scroll(self.scroll, self.viewport_height);
    }

    /// Blocks without a reveal animation are always visible
    pub fn is_revealed(&self, block: &RegionId) -> bool {
        self.reveals
            .iter()
            .find(|(watcher, _)| watcher.region() == block)
            .is_none_or(|(watcher, _)| watcher.is_revealed())
    }

    pub fn typewriter_views(&self) -> Vec<TypewriterView> {
        self.typewriters.iter().map(TypewriterDriver::view).collect()
    }

    /// Manual scroll; cancels any navigation scroll in flight
    pub fn scroll_by(&mut self, rows: f64) {
        self.smooth = None;
        self.scroll = self
            .page
            .layout
            .clamp_scroll(self.scroll + rows, self.viewport_height);
    }

    pub fn navigate_to_index(&mut self, index: usize) {
        if let Some(section) = self.tracker.sections().get(index).cloned() {
            self.navigate(&section);
        }
    }

    /// Navigate to the section after the active one, wrapping around
    pub fn navigate_next(&mut self) {
        let sections = self.tracker.sections();
        let active = self.tracker.active();
        let next = sections
            .iter()
            .position(|section| *section == active)
            .map_or(0, |index| (index + 1) % sections.len());
        self.navigate_to_index(next);
    }

    pub fn navigate(&mut self, section: &RegionId) {
        let request = match self.tracker.navigate_to(section) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("Cannot navigate to '{section}': {e}");
                return;
            }
        };

        let Some(target) = self
            .page
            .layout
            .scroll_offset_for(&request.target, self.viewport_height)
        else {
            log::debug!("Section '{}' has no place on the page", request.target);
            return;
        };

        self.smooth = Some(SmoothScroll::new(
            self.scroll,
            target,
            SmoothScroll::DEFAULT_DURATION,
        ));
    }

    /// Advance timers and scrolling by `dt`, then deliver observations
    pub fn update(&mut self, dt: Duration) {
        self.clock.advance(dt);

        if let Some(smooth) = &mut self.smooth {
            self.scroll = smooth.step(dt);
            if smooth.is_finished() {
                self.smooth = None;
            }
        }

        self.observe();
    }

    fn observe(&mut self) {
        let viewport = Span::new(self.scroll, self.viewport_height);

        let batch = self.section_observer.sample(&self.page.layout, viewport);
        if let Some(section) = self.tracker.handle_batch(&batch) {
            log::debug!("Active section is now '{section}'");
        }

        for (watcher, observer) in &mut self.reveals {
            for observation in observer.sample(&self.page.layout, viewport) {
                watcher.handle(&observation, observer);
            }
        }
    }

    /// Stop every observer and timer
    pub fn shutdown(&mut self) {
        self.tracker.teardown(&mut self.section_observer);
        for (watcher, observer) in &mut self.reveals {
            watcher.cancel(observer);
        }
        for typewriter in &mut self.typewriters {
            typewriter.cancel();
        }
        self.smooth = None;
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.clock.pending()
    }
}
