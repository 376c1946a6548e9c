//! Webview side of viewport observation and scrolling.
//!
//! [`ScriptObserver`] runs one browser `IntersectionObserver` per instance
//! through `document::eval` and exposes it to the engine as a
//! [`RegionObserver`]. Observe and unobserve calls become messages to the
//! script; entry batches come back in delivery order.

use dioxus::document::{self, Eval, EvalError};
use portfolio_engine::{RegionId, RegionObserver, ScrollRequest, Threshold, VisibilityObservation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;

const OBSERVER_JS: &str = include_str!("../assets/observer.js");
const SCROLL_JS: &str = include_str!("../assets/scroll.js");

/// Two-way message channel to a running page script
pub trait ScriptChannel {
    fn send<T: Serialize>(&self, message: T) -> Result<(), EvalError>;
    fn recv<T: DeserializeOwned>(&mut self) -> impl Future<Output = Result<T, EvalError>>;
}

impl ScriptChannel for Eval {
    fn send<T: Serialize>(&self, message: T) -> Result<(), EvalError> {
        Eval::send(self, message)
    }

    fn recv<T: DeserializeOwned>(&mut self) -> impl Future<Output = Result<T, EvalError>> {
        Eval::recv(self)
    }
}

#[derive(Serialize)]
struct ObserverSetup<'a> {
    threshold: f64,
    ids: &'a [RegionId],
}

#[derive(Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ObserverCommand<'a> {
    Observe { id: &'a RegionId },
    Unobserve { id: &'a RegionId },
    Disconnect,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ObserverEvent {
    Mounted { ids: Vec<RegionId> },
    Batch { entries: Vec<VisibilityObservation> },
}

#[derive(Serialize)]
struct ScrollCommand<'a> {
    target: &'a RegionId,
    behavior: &'static str,
}

/// Handle to a script-side intersection observer. Clones share the script.
///
/// The script is live from [`ScriptObserver::open`] on, so owners must call
/// [`ScriptObserver::disconnect`] even if the mounted reply never arrived.
#[derive(Clone)]
pub struct ScriptObserver<C = Eval> {
    channel: C,
    mounted: Rc<RefCell<HashSet<RegionId>>>,
    connected: Rc<Cell<bool>>,
}

impl ScriptObserver {
    /// Start the script in the page and ask which of `candidates` exist
    pub fn open(threshold: Threshold, candidates: &[RegionId]) -> Result<Self, EvalError> {
        Self::over(document::eval(OBSERVER_JS), threshold, candidates)
    }
}

impl<C: ScriptChannel> ScriptObserver<C> {
    fn over(channel: C, threshold: Threshold, candidates: &[RegionId]) -> Result<Self, EvalError> {
        channel.send(ObserverSetup {
            threshold: threshold.fraction(),
            ids: candidates,
        })?;

        Ok(Self {
            channel,
            mounted: Rc::new(RefCell::new(HashSet::new())),
            connected: Rc::new(Cell::new(true)),
        })
    }

    /// Wait for the script to report which candidates are on the page.
    /// Until then every region counts as missing.
    pub async fn wait_mounted(&mut self) -> Result<usize, EvalError> {
        loop {
            if let ObserverEvent::Mounted { ids } = self.channel.recv::<ObserverEvent>().await? {
                let mut mounted = self.mounted.borrow_mut();
                mounted.extend(ids);
                return Ok(mounted.len());
            }
        }
    }

    /// Wait for the next batch of entries
    pub async fn next_batch(&mut self) -> Result<Vec<VisibilityObservation>, EvalError> {
        loop {
            if let ObserverEvent::Batch { entries } = self.channel.recv::<ObserverEvent>().await? {
                return Ok(entries);
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Stop the script observer. Later calls do nothing.
    pub fn disconnect(&self) {
        if self.connected.replace(false) {
            self.command(ObserverCommand::Disconnect);
        }
    }

    fn command(&self, command: ObserverCommand<'_>) {
        if let Err(e) = self.channel.send(command) {
            log::warn!("Observer script unreachable: {e}");
        }
    }
}

impl<C: ScriptChannel> RegionObserver for ScriptObserver<C> {
    fn observe(&mut self, region: &RegionId) -> bool {
        if !self.connected.get() || !self.mounted.borrow().contains(region) {
            return false;
        }
        self.command(ObserverCommand::Observe { id: region });
        true
    }

    fn unobserve(&mut self, region: &RegionId) {
        if self.connected.get() {
            self.command(ObserverCommand::Unobserve { id: region });
        }
    }
}

/// Ask the webview to smooth-scroll the requested section into view
pub fn scroll_into_view(request: &ScrollRequest) {
    let eval = document::eval(SCROLL_JS);
    let command = ScrollCommand {
        target: &request.target,
        behavior: "smooth",
    };
    if let Err(e) = eval.send(command) {
        log::warn!("Could not scroll to '{}': {e}", request.target);
    }
}
