//! Single-threaded cooperative timers.
//!
//! [`VirtualClock`] is an explicit timer queue: nothing fires until the owner
//! calls [`VirtualClock::advance`]. Tests advance it by hand; the terminal
//! preview advances it by elapsed wall time every frame.

use crate::typewriter::{DEFAULT_TICK, Tick, Typewriter, TypewriterView};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};
use std::time::Duration;

type Callback = Rc<RefCell<dyn FnMut()>>;

struct Timer {
    period: Option<Duration>,
    callback: Callback,
}

#[derive(Default)]
struct ClockInner {
    now: Duration,
    next_id: u64,
    /// Ordered by deadline, then by scheduling order
    queue: BTreeMap<(Duration, u64), Timer>,
    deadlines: HashMap<u64, Duration>,
}

impl ClockInner {
    fn schedule(&mut self, delay: Duration, period: Option<Duration>, callback: Callback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, id), Timer { period, callback });
        self.deadlines.insert(id, deadline);
        id
    }

    fn cancel(&mut self, id: u64) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Pop the earliest timer due at or before `until`, rescheduling intervals
    fn pop_due(&mut self, until: Duration) -> Option<Callback> {
        let (&(deadline, id), _) = self.queue.iter().next()?;
        if deadline > until {
            return None;
        }

        let timer = self.queue.remove(&(deadline, id))?;
        self.now = deadline;

        match timer.period {
            Some(period) => {
                let next = deadline + period;
                let callback = timer.callback.clone();
                self.queue.insert((next, id), timer);
                self.deadlines.insert(id, next);
                Some(callback)
            }
            None => {
                self.deadlines.remove(&id);
                Some(timer.callback)
            }
        }
    }
}

/// Cooperative timer queue on a single thread. Clones share the same queue.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl VirtualClock {
    /// Shortest interval period; zero would never let `advance` return
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    pub fn set_timeout(&self, delay: Duration, callback: impl FnMut() + 'static) -> TimerHandle {
        let id = self
            .inner
            .borrow_mut()
            .schedule(delay, None, Rc::new(RefCell::new(callback)));
        self.handle(id)
    }

    pub fn set_interval(&self, period: Duration, callback: impl FnMut() + 'static) -> TimerHandle {
        let period = period.max(Self::MIN_PERIOD);
        let id = self
            .inner
            .borrow_mut()
            .schedule(period, Some(period), Rc::new(RefCell::new(callback)));
        self.handle(id)
    }

    fn handle(&self, id: u64) -> TimerHandle {
        TimerHandle {
            id,
            clock: Rc::downgrade(&self.inner),
        }
    }

    /// Move time forward by `by`, firing every timer that comes due on the way.
    ///
    /// Callbacks run with the queue unlocked, so they may schedule or cancel
    /// timers, including their own.
    pub fn advance(&self, by: Duration) {
        let until = self.inner.borrow().now + by;

        loop {
            let due = self.inner.borrow_mut().pop_due(until);
            let Some(callback) = due else { break };
            (&mut *callback.borrow_mut())();
        }

        self.inner.borrow_mut().now = until;
    }
}

impl std::fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualClock")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

/// Cancellation handle for a timer on a [`VirtualClock`]
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    clock: Weak<RefCell<ClockInner>>,
}

impl TimerHandle {
    /// Remove the timer. Returns `true` if it was still scheduled.
    pub fn cancel(&self) -> bool {
        self.clock
            .upgrade()
            .is_some_and(|inner| inner.borrow_mut().cancel(self.id))
    }

    pub fn is_pending(&self) -> bool {
        self.clock
            .upgrade()
            .is_some_and(|inner| inner.borrow().deadlines.contains_key(&self.id))
    }
}

/// Runs a [`Typewriter`] on a [`VirtualClock`]: a start-delay timeout followed
/// by a per-character interval.
///
/// Reconfiguring, [`cancel`](Self::cancel) and dropping the driver all cancel
/// both timers, so no callback reaches a stale or torn-down machine.
#[derive(Debug)]
pub struct TypewriterDriver {
    clock: VirtualClock,
    tick: Duration,
    machine: Rc<RefCell<Typewriter>>,
    start_timer: Option<TimerHandle>,
    tick_timer: Rc<RefCell<Option<TimerHandle>>>,
}

impl TypewriterDriver {
    pub fn new(clock: &VirtualClock, text: impl Into<String>, delay: Duration) -> Self {
        Self::with_tick(clock, text, delay, DEFAULT_TICK)
    }

    pub fn with_tick(
        clock: &VirtualClock,
        text: impl Into<String>,
        delay: Duration,
        tick: Duration,
    ) -> Self {
        let mut driver = Self {
            clock: clock.clone(),
            tick,
            machine: Rc::new(RefCell::new(Typewriter::new(text, delay))),
            start_timer: None,
            tick_timer: Rc::new(RefCell::new(None)),
        };
        driver.schedule();
        driver
    }

    fn schedule(&mut self) {
        let (needs_timers, delay) = {
            let machine = self.machine.borrow();
            (machine.needs_timers(), machine.delay())
        };
        if !needs_timers {
            return;
        }

        let clock = self.clock.clone();
        let tick = self.tick;
        let machine = Rc::downgrade(&self.machine);
        let tick_timer = self.tick_timer.clone();

        let handle = self.clock.set_timeout(delay, move || {
            let Some(state) = machine.upgrade() else {
                return;
            };
            if !state.borrow_mut().start() {
                return;
            }

            let ticking = machine.clone();
            let own_timer = tick_timer.clone();
            let interval = clock.set_interval(tick, move || {
                let Some(state) = ticking.upgrade() else {
                    return;
                };
                let outcome = state.borrow_mut().tick();
                if outcome != Tick::Advanced
                    && let Some(timer) = own_timer.borrow_mut().take()
                {
                    timer.cancel();
                }
            });
            *tick_timer.borrow_mut() = Some(interval);
        });

        self.start_timer = Some(handle);
    }

    /// Cancel the start-delay timeout and the per-character interval
    pub fn cancel(&mut self) {
        let mut cancelled = 0;
        if let Some(timer) = self.start_timer.take()
            && timer.cancel()
        {
            cancelled += 1;
        }
        if let Some(timer) = self.tick_timer.borrow_mut().take()
            && timer.cancel()
        {
            cancelled += 1;
        }
        if cancelled > 0 {
            log::debug!("Cancelled {cancelled} typewriter timer(s)");
        }
    }

    /// Point the driver at new text or delay, restarting from scratch on change
    pub fn configure(&mut self, text: &str, delay: Duration) -> bool {
        if !self.machine.borrow_mut().reconfigure(text, delay) {
            return false;
        }
        self.cancel();
        self.schedule();
        true
    }

    pub fn view(&self) -> TypewriterView {
        self.machine.borrow().view()
    }

    pub fn is_typing(&self) -> bool {
        self.machine.borrow().is_typing()
    }

    pub fn revealed(&self) -> String {
        self.machine.borrow().revealed().to_string()
    }

    /// Number of this driver's timers still on the clock
    pub fn live_timers(&self) -> usize {
        let start = self
            .start_timer
            .as_ref()
            .is_some_and(TimerHandle::is_pending);
        let tick = self
            .tick_timer
            .borrow()
            .as_ref()
            .is_some_and(TimerHandle::is_pending);
        usize::from(start) + usize::from(tick)
    }
}

impl Drop for TypewriterDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}
