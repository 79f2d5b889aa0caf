//! Virtual time for timeouts and intervals.

use std::cell::Cell;
use std::cell::RefCell;
use std::time::Duration;

use scopeguard::guard;
use tracing::trace;

/// Browsers don't run intervals more often than this.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Default)]
pub(super) struct VirtualClock {
    now: Cell<Duration>,
    next_id: Cell<i32>,
    timers: RefCell<Vec<Timer>>,
}

struct Timer {
    id: i32,
    due: Duration,
    period: Option<Duration>,

    /// Taken out while the timer runs.
    callback: Option<TimerCallback>,
}

enum TimerCallback {
    Once(Box<dyn FnOnce()>),
    Repeat(Box<dyn FnMut()>),
}

impl VirtualClock {
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> i32 {
        self.schedule(delay, None, TimerCallback::Once(callback))
    }

    pub fn schedule_repeat(&self, period: Duration, callback: Box<dyn FnMut()>) -> i32 {
        let period = period.max(MIN_PERIOD);
        self.schedule(period, Some(period), TimerCallback::Repeat(callback))
    }

    pub fn cancel(&self, id: i32) {
        self.timers.borrow_mut().retain(|timer| timer.id != id);
    }

    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Moves time forward, running every timer that falls due on the way.
    ///
    /// Timers run in due order, ties in scheduling order. Callbacks may
    /// schedule or cancel timers, including their own.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now.get() + by;
        while let Some((id, due, period, callback)) = self.take_next(deadline) {
            self.now.set(due);
            trace!(id, ?due, "Run timer");
            match callback {
                TimerCallback::Once(callback) => callback(),
                TimerCallback::Repeat(callback) => {
                    let mut callback = guard(callback, |callback| {
                        self.restore(id, period.unwrap_or(MIN_PERIOD), callback)
                    });
                    (&mut *callback)();
                }
            }
        }
        self.now.set(deadline);
    }

    fn schedule(&self, delay: Duration, period: Option<Duration>, callback: TimerCallback) -> i32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.timers.borrow_mut().push(Timer {
            id,
            due: self.now.get() + delay,
            period,
            callback: Some(callback),
        });
        id
    }

    fn take_next(
        &self,
        deadline: Duration,
    ) -> Option<(i32, Duration, Option<Duration>, TimerCallback)> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.callback.is_some() && timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        let timer = &mut timers[index];
        let (id, due, period) = (timer.id, timer.due, timer.period);
        let callback = if period.is_some() {
            timer.callback.take()
        } else {
            timers.remove(index).callback
        };
        Some((id, due, period, callback?))
    }

    /// Puts a repeating callback back, unless it was cancelled while running.
    fn restore(&self, id: i32, period: Duration, callback: Box<dyn FnMut()>) {
        let mut timers = self.timers.borrow_mut();
        if let Some(timer) = timers.iter_mut().find(|timer| timer.id == id) {
            timer.due += period;
            timer.callback = Some(TimerCallback::Repeat(callback));
        }
    }
}
