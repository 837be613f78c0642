// scheduler.rs - Playback timing: continuous run, stop, finite step chains
//
// The scheduler never reads a clock. Every call takes the caller's `now`,
// and the host (egui frame loop, tokio sleep loop, or a test) polls it.
// It only decides *when* a generation is due; the simulation performs it.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::PlaybackConfig;

const MIN_DELAY: Duration = Duration::from_millis(1);

/// Identifies one armed task. A re-armed task gets a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    handle: TaskHandle,
    due: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepChain {
    next: Scheduled,
    /// Steps still to fire, including `next`.
    remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
}

/// What a [`PlaybackScheduler::poll`] call found due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub repeat: bool,
    pub step: bool,
}

impl Fired {
    /// Generations the caller should now perform.
    pub fn transitions(self) -> u32 {
        u32::from(self.repeat) + u32::from(self.step)
    }

    pub fn any(self) -> bool {
        self.repeat || self.step
    }
}

#[derive(Debug)]
pub struct PlaybackScheduler {
    speed: Duration,
    step_delay: Duration,
    /// The single repeat slot; `Some` exactly while running.
    repeat: Option<Scheduled>,
    steps: Option<StepChain>,
    next_handle: u64,
}

impl PlaybackScheduler {
    pub fn new(speed: Duration, step_delay: Duration) -> Self {
        Self {
            speed: speed.max(MIN_DELAY),
            step_delay: step_delay.max(MIN_DELAY),
            repeat: None,
            steps: None,
            next_handle: 0,
        }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(
            Duration::from_millis(config.speed_ms),
            Duration::from_millis(config.step_delay_ms),
        )
    }

    fn arm(&mut self, due: Instant) -> Scheduled {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        Scheduled { handle, due }
    }

    pub fn state(&self) -> PlaybackState {
        if self.repeat.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn is_stepping(&self) -> bool {
        self.steps.is_some()
    }

    /// Steps of the finite chain that have not fired yet.
    pub fn pending_steps(&self) -> u32 {
        self.steps.map_or(0, |chain| chain.remaining)
    }

    pub fn repeat_handle(&self) -> Option<TaskHandle> {
        self.repeat.map(|task| task.handle)
    }

    pub const fn speed(&self) -> Duration {
        self.speed
    }

    pub const fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Idle -> Running. Returns `true` when the caller must perform the
    /// first generation right away; the next one is armed `speed` later.
    /// Already running: nothing changes and `false` is returned.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.repeat.is_some() {
            debug!("start ignored, already running");
            return false;
        }
        let task = self.arm(now + self.speed);
        self.repeat = Some(task);
        info!(speed_ms = self.speed.as_millis() as u64, "playback started");
        true
    }

    /// Cancel the pending repeat. Returns whether one existed.
    /// The finite step chain is left alone; see [`Self::cancel_steps`].
    pub fn stop(&mut self) -> bool {
        let cancelled = self.repeat.take().is_some();
        if cancelled {
            info!("playback stopped");
        }
        cancelled
    }

    /// Takes effect the next time the repeat is armed.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed.max(MIN_DELAY);
        debug!(speed_ms = self.speed.as_millis() as u64, "speed changed");
    }

    /// Queue `n` generations spaced by the step delay, independent of the
    /// running state. Returns `true` when the first one must be performed
    /// now. `n <= 0` does nothing. While a chain is still pending the new
    /// steps are appended to it instead of starting a second chain, and no
    /// step is performed immediately for the appended request.
    pub fn advance_steps(&mut self, n: i64, now: Instant) -> bool {
        if n <= 0 {
            debug!(n, "step request ignored");
            return false;
        }
        let n = u32::try_from(n).unwrap_or(u32::MAX);

        if let Some(chain) = self.steps.as_mut() {
            chain.remaining = chain.remaining.saturating_add(n);
            debug!(remaining = chain.remaining, "steps appended to pending chain");
            return false;
        }

        let rest = n - 1;
        if rest > 0 {
            let next = self.arm(now + self.step_delay);
            self.steps = Some(StepChain {
                next,
                remaining: rest,
            });
        }
        debug!(steps = n, "step chain started");
        true
    }

    /// Drop the rest of the step chain. Returns how many steps were dropped.
    pub fn cancel_steps(&mut self) -> u32 {
        let dropped = self.steps.take().map_or(0, |chain| chain.remaining);
        if dropped > 0 {
            debug!(dropped, "step chain cancelled");
        }
        dropped
    }

    /// Fire whatever is due at `now`. A fired task is re-armed relative to
    /// `now`, so a late poll never produces a burst of catch-up generations.
    pub fn poll(&mut self, now: Instant) -> Fired {
        let mut fired = Fired::default();

        if self.repeat.is_some_and(|task| task.due <= now) {
            let task = self.arm(now + self.speed);
            self.repeat = Some(task);
            fired.repeat = true;
        }

        if let Some(chain) = self.steps {
            if chain.next.due <= now {
                fired.step = true;
                let remaining = chain.remaining - 1;
                self.steps = if remaining == 0 {
                    None
                } else {
                    let next = self.arm(now + self.step_delay);
                    Some(StepChain { next, remaining })
                };
            }
        }

        fired
    }

    /// Earliest instant at which [`Self::poll`] will fire something.
    pub fn next_deadline(&self) -> Option<Instant> {
        let repeat = self.repeat.map(|task| task.due);
        let step = self.steps.map(|chain| chain.next.due);
        match (repeat, step) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Read a step count the way a number field is read: optional leading
/// whitespace and sign, then digits; anything after the digits is ignored.
/// Missing digits or zero default to 1. Negative counts are kept (and later
/// ignored by [`PlaybackScheduler::advance_steps`]).
pub fn parse_step_count(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 1;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    if value == 0 { 1 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: Duration = Duration::from_millis(200);
    const DELAY: Duration = Duration::from_millis(100);

    fn scheduler() -> PlaybackScheduler {
        PlaybackScheduler::new(SPEED, DELAY)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn start_runs_immediately_then_repeats() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert_eq!(s.state(), PlaybackState::Idle);

        assert!(s.start(t0));
        assert_eq!(s.state(), PlaybackState::Running);
        assert_eq!(s.next_deadline(), Some(t0 + SPEED));

        assert!(!s.poll(t0 + ms(199)).any());
        assert_eq!(s.poll(t0 + ms(200)), Fired { repeat: true, step: false });
        assert_eq!(s.next_deadline(), Some(t0 + ms(400)));
    }

    #[test]
    fn second_start_keeps_the_single_chain() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert!(s.start(t0));
        let handle = s.repeat_handle();

        assert!(!s.start(t0 + ms(50)));
        assert_eq!(s.repeat_handle(), handle);
        assert_eq!(s.next_deadline(), Some(t0 + SPEED));

        // Only one repeat fires per deadline.
        assert_eq!(s.poll(t0 + SPEED).transitions(), 1);

        // One stop cancels everything; a second has nothing left to cancel.
        assert!(s.stop());
        assert!(!s.stop());
        assert!(!s.poll(t0 + ms(10_000)).any());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn stop_while_idle_is_a_noop() {
        let mut s = scheduler();
        assert!(!s.stop());
        assert_eq!(s.state(), PlaybackState::Idle);
    }

    #[test]
    fn restart_after_stop_arms_a_new_handle() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.start(t0);
        let first = s.repeat_handle();
        s.stop();
        assert!(s.start(t0 + ms(10)));
        assert_ne!(s.repeat_handle(), first);
    }

    #[test]
    fn speed_change_does_not_touch_pending_wait() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.start(t0);
        s.set_speed(ms(1_000));
        assert_eq!(s.next_deadline(), Some(t0 + SPEED));

        assert!(s.poll(t0 + SPEED).repeat);
        assert_eq!(s.next_deadline(), Some(t0 + SPEED + ms(1_000)));
    }

    #[test]
    fn zero_speed_is_clamped() {
        let mut s = scheduler();
        s.set_speed(Duration::ZERO);
        assert_eq!(s.speed(), ms(1));
    }

    #[test]
    fn late_poll_fires_once_and_rearms_from_now() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.start(t0);
        let late = t0 + ms(5_000);
        assert_eq!(s.poll(late).transitions(), 1);
        assert_eq!(s.next_deadline(), Some(late + SPEED));
    }

    #[test]
    fn step_chain_fires_n_times_spaced_by_delay() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert!(s.advance_steps(3, t0));
        assert!(s.is_stepping());
        assert_eq!(s.pending_steps(), 2);
        assert_eq!(s.state(), PlaybackState::Idle);

        assert!(!s.poll(t0 + ms(99)).any());
        assert_eq!(s.poll(t0 + DELAY), Fired { repeat: false, step: true });
        assert_eq!(s.poll(t0 + ms(200)), Fired { repeat: false, step: true });
        assert!(!s.is_stepping());
        assert!(!s.poll(t0 + ms(10_000)).any());
    }

    #[test]
    fn single_step_needs_no_chain() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert!(s.advance_steps(1, t0));
        assert!(!s.is_stepping());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn non_positive_step_counts_do_nothing() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert!(!s.advance_steps(0, t0));
        assert!(!s.advance_steps(-5, t0));
        assert!(!s.is_stepping());
    }

    #[test]
    fn steps_requested_mid_chain_are_appended() {
        let t0 = Instant::now();
        let mut s = scheduler();
        assert!(s.advance_steps(2, t0));
        assert!(!s.advance_steps(3, t0 + ms(10)));
        assert_eq!(s.pending_steps(), 4);
        assert_eq!(s.next_deadline(), Some(t0 + DELAY));
    }

    #[test]
    fn stop_leaves_step_chain_running() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.start(t0);
        s.advance_steps(3, t0);
        assert!(s.stop());
        assert_eq!(s.pending_steps(), 2);
        assert_eq!(s.poll(t0 + DELAY), Fired { repeat: false, step: true });
    }

    #[test]
    fn cancel_steps_reports_dropped_count() {
        let t0 = Instant::now();
        let mut s = scheduler();
        s.advance_steps(5, t0);
        assert_eq!(s.cancel_steps(), 4);
        assert_eq!(s.cancel_steps(), 0);
        assert!(!s.poll(t0 + ms(1_000)).any());
    }

    #[test]
    fn running_and_stepping_fire_together() {
        let t0 = Instant::now();
        let mut s = PlaybackScheduler::new(DELAY, DELAY);
        s.start(t0);
        s.advance_steps(2, t0);
        assert_eq!(s.poll(t0 + DELAY).transitions(), 2);
    }

    #[test]
    fn step_count_parsing() {
        assert_eq!(parse_step_count("5"), 5);
        assert_eq!(parse_step_count("  12"), 12);
        assert_eq!(parse_step_count("7 steps"), 7);
        assert_eq!(parse_step_count("+3"), 3);
        assert_eq!(parse_step_count("-5"), -5);
        assert_eq!(parse_step_count(""), 1);
        assert_eq!(parse_step_count("abc"), 1);
        assert_eq!(parse_step_count("-"), 1);
        assert_eq!(parse_step_count("0"), 1);
        assert_eq!(parse_step_count("-0"), 1);
        assert_eq!(parse_step_count("99999999999999999999999"), i64::MAX);
    }
}
