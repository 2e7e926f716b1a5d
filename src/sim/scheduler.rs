//! Deterministic timer scheduler
//!
//! Replaces the ambient `setInterval`/`setTimeout` callbacks of a browser
//! shell with an explicit abstraction the sim owns. Timers are advanced by
//! the run loop once per frame; firings come back in deadline order so the
//! two producers (frame tick, spawn timer) stay a single-writer system.

use serde::{Deserialize, Serialize};

/// What a timer firing means to the run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Continuous obstacle spawner tick
    SpawnTick,
    /// Auto-hide the currently visible checkpoint panel
    HidePanel,
    /// Present the post-contact continuation prompt
    ContinuePrompt,
    /// Dismiss the startup instructional banner
    DismissBanner,
}

/// Opaque handle for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    deadline: f64,
    /// Some(period) for repeating timers, None for one-shots
    period: Option<f64>,
}

/// Explicit timer scheduler, advanced once per rendered frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: f64,
    next_handle: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the scheduler was created
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule a one-shot timer `delay` seconds from now
    pub fn schedule_once(&mut self, kind: TimerKind, delay: f64) -> TimerHandle {
        self.push(kind, delay, None)
    }

    /// Schedule a repeating timer with the given period
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: f64) -> TimerHandle {
        self.push(kind, period, Some(period))
    }

    fn push(&mut self, kind: TimerKind, delay: f64, period: Option<f64>) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.timers.push(Timer {
            handle,
            kind,
            deadline: self.now + delay,
            period,
        });
        handle
    }

    /// Cancel a pending timer; canceling an already-fired one-shot is a no-op
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Advance time by `dt` seconds and collect due firings in deadline order.
    ///
    /// A repeating timer that fell several periods behind (a slow frame)
    /// fires once per elapsed period, matching interval-timer semantics.
    pub fn advance(&mut self, dt: f64) -> Vec<TimerKind> {
        self.now += dt;
        let now = self.now;

        let mut fired: Vec<(f64, u64, TimerKind)> = Vec::new();
        for timer in &mut self.timers {
            match timer.period {
                Some(period) => {
                    while timer.deadline <= now {
                        fired.push((timer.deadline, timer.handle.0, timer.kind));
                        timer.deadline += period;
                    }
                }
                None => {
                    if timer.deadline <= now {
                        fired.push((timer.deadline, timer.handle.0, timer.kind));
                    }
                }
            }
        }
        self.timers
            .retain(|t| t.period.is_some() || t.deadline > now);

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        fired.into_iter().map(|(_, _, kind)| kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = Scheduler::new();
        sched.schedule_once(TimerKind::HidePanel, 5.0);

        assert!(sched.advance(4.9).is_empty());
        assert_eq!(sched.advance(0.2), vec![TimerKind::HidePanel]);
        assert!(sched.advance(10.0).is_empty());
    }

    #[test]
    fn test_repeating_fires_per_period() {
        let mut sched = Scheduler::new();
        sched.schedule_repeating(TimerKind::SpawnTick, 1.0);

        assert_eq!(sched.advance(1.0), vec![TimerKind::SpawnTick]);
        assert!(sched.advance(0.5).is_empty());
        assert_eq!(sched.advance(0.5), vec![TimerKind::SpawnTick]);

        // A 3-second stall yields one firing per elapsed period
        let fired = sched.advance(3.0);
        assert_eq!(fired.len(), 3);
        assert!(fired.iter().all(|k| *k == TimerKind::SpawnTick));
    }

    #[test]
    fn test_cancel_pending_one_shot() {
        let mut sched = Scheduler::new();
        let old_hide = sched.schedule_once(TimerKind::HidePanel, 5.0);

        // A new panel replaces the old one and cancels its hide timer
        sched.cancel(old_hide);
        sched.schedule_once(TimerKind::HidePanel, 5.0);

        assert!(sched.advance(4.0).is_empty());
        assert_eq!(sched.advance(1.0), vec![TimerKind::HidePanel]);
    }

    #[test]
    fn test_firing_order_is_deadline_order() {
        let mut sched = Scheduler::new();
        sched.schedule_once(TimerKind::ContinuePrompt, 2.0);
        sched.schedule_once(TimerKind::HidePanel, 1.0);
        sched.schedule_repeating(TimerKind::SpawnTick, 1.5);

        let fired = sched.advance(2.0);
        assert_eq!(
            fired,
            vec![
                TimerKind::HidePanel,
                TimerKind::SpawnTick,
                TimerKind::ContinuePrompt
            ]
        );
    }

    #[test]
    fn test_cancel_all() {
        let mut sched = Scheduler::new();
        sched.schedule_repeating(TimerKind::SpawnTick, 1.0);
        sched.schedule_once(TimerKind::DismissBanner, 3.0);
        sched.cancel_all();
        assert!(sched.advance(10.0).is_empty());
    }
}
