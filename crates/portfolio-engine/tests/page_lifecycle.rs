//! Whole-page behaviour: section tracking, reveal blocks and typewriters
//! driven together from one simulated viewport and one virtual clock.

use portfolio_engine::{
    Animation, DEFAULT_TICK, PageLayout, RegionId, RegionObserver, RevealConfig, RevealWatcher,
    SectionTracker, SiteContent, Span, Threshold, TypewriterDriver, ViewportObserver,
    VirtualClock, VisibilityObservation,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

const VIEWPORT: f64 = 100.0;

fn page_layout() -> PageLayout {
    let mut layout = PageLayout::stack([
        (RegionId::from("home"), 120.0),
        (RegionId::from("about"), 120.0),
        (RegionId::from("projects"), 120.0),
        (RegionId::from("contact"), 120.0),
    ]);
    // Blocks nested inside the about section
    layout.place("about-heading".into(), Span::new(120.0, 20.0));
    layout.place("about-skills".into(), Span::new(180.0, 60.0));
    layout
}

struct Page {
    layout: PageLayout,
    sections: ViewportObserver,
    tracker: SectionTracker,
    reveals: Vec<(RevealWatcher, ViewportObserver)>,
}

impl Page {
    fn mount() -> Self {
        let layout = page_layout();
        let mut sections = ViewportObserver::new(Threshold::SECTION, &layout);
        let mut tracker = SectionTracker::portfolio();
        tracker.start(&mut sections);

        let reveals = [
            ("about-heading", RevealConfig::new(Animation::FadeInUp)),
            (
                "about-skills",
                RevealConfig::new(Animation::FadeInRight).with_delay(Duration::from_millis(400)),
            ),
        ]
        .into_iter()
        .map(|(id, config)| {
            let mut observer = ViewportObserver::new(config.threshold, &layout);
            let mut watcher = RevealWatcher::new(id, config);
            watcher.attach(&mut observer);
            (watcher, observer)
        })
        .collect();

        Self {
            layout,
            sections,
            tracker,
            reveals,
        }
    }

    fn scroll_to(&mut self, offset: f64) {
        let viewport = Span::new(offset, VIEWPORT);
        let batch = self.sections.sample(&self.layout, viewport);
        self.tracker.handle_batch(&batch);

        for (watcher, observer) in &mut self.reveals {
            for observation in observer.sample(&self.layout, viewport) {
                watcher.handle(&observation, observer);
            }
        }
    }

    fn revealed(&self) -> Vec<bool> {
        self.reveals
            .iter()
            .map(|(watcher, _)| watcher.is_revealed())
            .collect()
    }

    fn unmount(&mut self) {
        self.tracker.teardown(&mut self.sections);
        for (watcher, observer) in &mut self.reveals {
            watcher.cancel(observer);
        }
    }
}

#[test]
fn test_scrolling_updates_nav_and_reveals_blocks_once() {
    let mut page = Page::mount();
    page.scroll_to(0.0);
    assert_eq!(page.tracker.active(), "home");
    assert_eq!(page.revealed(), vec![false, false]);

    page.scroll_to(70.0);
    assert_eq!(page.tracker.active(), "about");
    assert_eq!(page.revealed(), vec![true, false]);

    page.scroll_to(150.0);
    assert_eq!(page.revealed(), vec![true, true]);

    // Back to the top: navigation follows, reveals stay
    page.scroll_to(0.0);
    assert_eq!(page.tracker.active(), "home");
    assert_eq!(page.revealed(), vec![true, true]);
}

#[test]
fn test_manual_navigation_wins_until_next_qualifying_batch() {
    let mut page = Page::mount();
    page.scroll_to(0.0);

    let request = page.tracker.navigate_to(&"contact".into()).unwrap();
    assert_eq!(page.tracker.active(), "contact");

    // Host performs the scroll; observations then agree with the click
    let offset = page
        .layout
        .scroll_offset_for(&request.target, VIEWPORT)
        .unwrap();
    page.scroll_to(offset);
    assert_eq!(page.tracker.active(), "contact");
}

#[test]
fn test_nothing_changes_after_unmount() {
    let mut page = Page::mount();
    page.scroll_to(0.0);
    page.unmount();

    page.scroll_to(150.0);

    assert_eq!(page.tracker.active(), "home");
    assert_eq!(page.revealed(), vec![false, false]);
    assert_eq!(page.sections.observed_count(), 0);
}

#[test]
fn test_batch_order_decides_overlapping_sections() {
    let mut tracker = SectionTracker::portfolio();
    let mut observer = ViewportObserver::new(Threshold::SECTION, &page_layout());
    tracker.start(&mut observer);

    tracker.handle_batch(&[
        VisibilityObservation::new("home", 0.5, true),
        VisibilityObservation::new("about", 0.35, true),
    ]);

    assert_eq!(tracker.active(), "about");
}

#[test]
fn test_hero_lines_type_in_stages() {
    let clock = VirtualClock::new();
    let content = SiteContent::default();
    let drivers: Vec<TypewriterDriver> = content
        .hero
        .iter()
        .map(|line| TypewriterDriver::new(&clock, line.text.clone(), line.delay()))
        .collect();

    let revealed = |drivers: &[TypewriterDriver]| -> Vec<String> {
        drivers.iter().map(TypewriterDriver::revealed).collect()
    };

    clock.advance(Duration::from_millis(499));
    assert_eq!(revealed(&drivers)[1], "");

    // Long enough for every line to finish
    let longest = content
        .hero
        .iter()
        .map(|line| line.delay() + DEFAULT_TICK * line.text.chars().count() as u32)
        .max()
        .unwrap();
    clock.advance(longest);

    let texts: Vec<String> = content.hero.iter().map(|line| line.text.clone()).collect();
    assert_eq!(revealed(&drivers), texts);
    assert!(drivers.iter().all(|driver| !driver.is_typing()));
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_missing_regions_are_skipped_not_fatal() {
    let layout = PageLayout::stack([(RegionId::from("home"), 100.0)]);
    let mut observer = ViewportObserver::new(Threshold::SECTION, &layout);
    let mut tracker = SectionTracker::portfolio();

    let observed = tracker.start(&mut observer).to_vec();

    assert_eq!(observed, vec![RegionId::from("home")]);
    assert!(!observer.observe(&"projects".into()));
}
