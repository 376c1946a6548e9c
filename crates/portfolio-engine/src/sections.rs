//! Viewport section tracking for navigation highlighting.
//!
//! A [`SectionTracker`] watches an ordered set of sections through a
//! [`RegionObserver`] and keeps exactly one of them active. Observations are
//! applied in delivery order: with the default [`ActivationPolicy`] the last
//! qualifying entry of a batch wins, even if an earlier entry in the same
//! batch is more visible. Manual navigation bypasses the observer entirely and
//! takes effect synchronously.

use crate::observation::{
    ObservationError, RegionId, RegionObserver, Threshold, VisibilityObservation,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Sections of the portfolio page, top to bottom
pub const DEFAULT_SECTIONS: [&str; 4] = ["home", "about", "projects", "contact"];

type Listener = Box<dyn FnMut(&RegionId)>;

struct ActiveInner {
    current: RegionId,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
    notifying: bool,
    /// Listeners dropped while `listeners` was lent out for notification
    removed: Vec<u64>,
}

/// Shared cell holding the active section.
///
/// Clones share the same value. Listeners run after each change, in
/// subscription order. A write made from inside a listener is stored but is
/// not broadcast again.
#[derive(Clone)]
pub struct ActiveSection {
    inner: Rc<RefCell<ActiveInner>>,
}

impl ActiveSection {
    pub fn new(initial: RegionId) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ActiveInner {
                current: initial,
                listeners: Vec::new(),
                next_listener: 0,
                notifying: false,
                removed: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> RegionId {
        self.inner.borrow().current.clone()
    }

    pub fn is(&self, id: &str) -> bool {
        self.inner.borrow().current == id
    }

    /// Store `id` and notify listeners. Returns `false` if it was already active.
    pub fn set(&self, id: RegionId) -> bool {
        let mut listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == id {
                return false;
            }
            inner.current = id.clone();
            if inner.notifying {
                return true;
            }
            inner.notifying = true;
            std::mem::take(&mut inner.listeners)
        };

        for (listener_id, listener) in listeners.iter_mut() {
            if self.inner.borrow().removed.contains(listener_id) {
                continue;
            }
            listener(&id);
        }

        // Keep anything subscribed while we were notifying
        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed);
        listeners.retain(|(listener_id, _)| !removed.contains(listener_id));
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
        inner.notifying = false;
        true
    }

    pub fn subscribe(&self, listener: impl FnMut(&RegionId) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            cell: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for ActiveSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSection")
            .field("current", &self.inner.borrow().current)
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`ActiveSection::subscribe`].
///
/// Dropping the handle removes the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    cell: std::rc::Weak<RefCell<ActiveInner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.detach();
    }

    fn detach(&self) {
        let Some(inner) = self.cell.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        inner.listeners.retain(|(listener, _)| *listener != self.id);
        if inner.notifying && !inner.removed.contains(&self.id) {
            inner.removed.push(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

/// How overlapping qualifying observations in one batch are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationPolicy {
    /// The last qualifying entry in delivery order wins
    #[default]
    LastQualifying,
    /// The qualifying entry with the highest ratio wins; ties go to the later entry
    MostVisible,
}

/// Smooth scroll the host should perform after a manual navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: RegionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerState {
    Created,
    Tracking,
    TornDown,
}

#[derive(Debug)]
pub struct SectionTracker {
    sections: Vec<RegionId>,
    observed: Vec<RegionId>,
    active: ActiveSection,
    threshold: Threshold,
    policy: ActivationPolicy,
    state: TrackerState,
}

impl SectionTracker {
    pub fn new(
        sections: impl IntoIterator<Item = RegionId>,
        default_section: RegionId,
        threshold: Threshold,
    ) -> Result<Self, ObservationError> {
        let sections: Vec<RegionId> = sections.into_iter().collect();
        if sections.is_empty() {
            return Err(ObservationError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section) {
                return Err(ObservationError::DuplicateSection(section.clone()));
            }
        }

        if !sections.contains(&default_section) {
            return Err(ObservationError::UnknownSection(default_section));
        }

        Ok(Self {
            sections,
            observed: Vec::new(),
            active: ActiveSection::new(default_section),
            threshold,
            policy: ActivationPolicy::default(),
            state: TrackerState::Created,
        })
    }

    /// Tracker over [`DEFAULT_SECTIONS`] with `home` active and a 30% threshold
    pub fn portfolio() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.iter().map(|id| RegionId::from(*id)).collect(),
            observed: Vec::new(),
            active: ActiveSection::new(RegionId::from(DEFAULT_SECTIONS[0])),
            threshold: Threshold::SECTION,
            policy: ActivationPolicy::default(),
            state: TrackerState::Created,
        }
    }

    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sections(&self) -> &[RegionId] {
        &self.sections
    }

    pub fn observed(&self) -> &[RegionId] {
        &self.observed
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    pub fn active(&self) -> RegionId {
        self.active.get()
    }

    /// Shared cell for navigation components to read or subscribe to
    pub fn active_cell(&self) -> ActiveSection {
        self.active.clone()
    }

    pub fn is_tracking(&self) -> bool {
        self.state == TrackerState::Tracking
    }

    /// Observe every section. Sections missing from the page are skipped.
    pub fn start(&mut self, observer: &mut impl RegionObserver) -> &[RegionId] {
        if self.state != TrackerState::Created {
            return &self.observed;
        }

        for section in &self.sections {
            if observer.observe(section) {
                self.observed.push(section.clone());
            } else {
                log::debug!("Section '{section}' is not on the page, skipping");
            }
        }

        self.state = TrackerState::Tracking;
        &self.observed
    }

    /// Apply a batch of observations in delivery order.
    ///
    /// Returns the newly active section when the batch changed it.
    pub fn handle_batch(&mut self, batch: &[VisibilityObservation]) -> Option<RegionId> {
        if self.state != TrackerState::Tracking {
            log::debug!("Ignoring {} observations while not tracking", batch.len());
            return None;
        }

        let qualifying = batch.iter().filter(|observation| {
            self.threshold.is_met_by(observation) && self.observed.contains(&observation.target)
        });

        let winner = match self.policy {
            ActivationPolicy::LastQualifying => qualifying.last(),
            // max_by keeps the later entry on ties
            ActivationPolicy::MostVisible => qualifying.max_by(|a, b| a.ratio.total_cmp(&b.ratio)),
        }?;

        let target = winner.target.clone();
        self.active.set(target.clone()).then_some(target)
    }

    /// Activate `section` immediately and ask the host to scroll to it
    pub fn navigate_to(&mut self, section: &RegionId) -> Result<ScrollRequest, ObservationError> {
        if self.state == TrackerState::TornDown {
            return Err(ObservationError::TornDown);
        }
        if !self.sections.contains(section) {
            return Err(ObservationError::UnknownSection(section.clone()));
        }

        log::info!("Navigating to section '{section}'");
        self.active.set(section.clone());
        Ok(ScrollRequest {
            target: section.clone(),
        })
    }

    /// Cancel every observation. Safe to call more than once.
    pub fn teardown(&mut self, observer: &mut impl RegionObserver) {
        for section in self.observed.drain(..) {
            observer.unobserve(&section);
        }
        self.state = TrackerState::TornDown;
    }
}
