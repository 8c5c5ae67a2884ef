//! Countdown timer for recipe steps.
//!
//! A [`CookingTimer`] owns at most one live countdown. Starting a new one
//! silently replaces whatever is running and discards the replaced
//! countdown's completion callback. Ticks arrive once per second from a
//! background task; all state transitions are serialized behind a mutex, so
//! cancellation is only observable at tick boundaries.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Grace period the "done" indication stays up before reverting to idle
pub const DEFAULT_GRACE: Duration = Duration::from_secs(3);

/// Remaining seconds at which the display switches to the warning state
pub const DEFAULT_WARNING_THRESHOLD: u64 = 10;

/// Visual state a display sink can be put into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Normal,
    Warning,
    Done,
}

/// Rendering sink for the timer.
///
/// The timer only ever calls these two operations on every tick; what the
/// sink does with them (and whether it still has somewhere to render) is
/// its own business.
pub trait TimerDisplay: Send + Sync {
    fn set_text(&self, text: &str);
    fn set_state(&self, state: DisplayState);
}

/// Completion callback, invoked exactly once per countdown that reaches zero
pub type OnComplete = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

struct TimerState {
    phase: Phase,
    seconds_remaining: u64,
    /// Identifies the live countdown; a stale tick task sees a mismatch
    /// and exits without touching anything
    generation: u64,
    display: Option<Arc<dyn TimerDisplay>>,
    on_complete: Option<OnComplete>,
    tick_task: Option<JoinHandle<()>>,
}

enum TickOutcome {
    Continue,
    Stale,
    Completed(Option<OnComplete>),
}

/// A countdown timer driving a [`TimerDisplay`].
///
/// Handles are cheap to clone and share the same countdown; pass a clone to
/// whatever component needs to start, pause or stop it.
#[derive(Clone)]
pub struct CookingTimer {
    state: Arc<Mutex<TimerState>>,
    grace: Duration,
    warning_threshold: u64,
}

impl Default for CookingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CookingTimer {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_GRACE, DEFAULT_WARNING_THRESHOLD)
    }

    /// A timer with a custom grace period and warning threshold
    pub fn with_settings(grace: Duration, warning_threshold: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState {
                phase: Phase::Idle,
                seconds_remaining: 0,
                generation: 0,
                display: None,
                on_complete: None,
                tick_task: None,
            })),
            grace,
            warning_threshold,
        }
    }

    /// Start a countdown of `total_seconds`, replacing any countdown that
    /// is already live. The replaced countdown's callback never fires.
    ///
    /// A countdown started at zero completes on its first tick.
    pub fn start(
        &self,
        total_seconds: u64,
        display: Arc<dyn TimerDisplay>,
        on_complete: Option<OnComplete>,
    ) {
        let mut state = self.lock();
        cancel_tick(&mut state);
        state.generation += 1;
        state.phase = Phase::Running;
        state.seconds_remaining = total_seconds;
        state.on_complete = on_complete;
        display.set_state(DisplayState::Normal);
        display.set_text(&format_clock(total_seconds));
        state.display = Some(display);
        let generation = state.generation;
        state.tick_task = Some(self.spawn_tick(generation));
        debug!("timer started: {}s", total_seconds);
    }

    /// Pause a running countdown, keeping the remaining time.
    ///
    /// No-op in any other phase.
    pub fn pause(&self) {
        let mut state = self.lock();
        if state.phase != Phase::Running {
            return;
        }
        cancel_tick(&mut state);
        state.generation += 1;
        state.phase = Phase::Paused;
        debug!("timer paused at {}s", state.seconds_remaining);
    }

    /// Resume a paused countdown.
    ///
    /// No-op while running, idle or completed, and when no time remains.
    pub fn resume(&self) {
        let mut state = self.lock();
        if state.phase != Phase::Paused || state.seconds_remaining == 0 {
            return;
        }
        state.generation += 1;
        state.phase = Phase::Running;
        let generation = state.generation;
        state.tick_task = Some(self.spawn_tick(generation));
        debug!("timer resumed at {}s", state.seconds_remaining);
    }

    /// Cancel whatever the timer is doing and return to idle.
    ///
    /// The completion callback is dropped without being invoked.
    pub fn stop(&self) {
        let mut state = self.lock();
        cancel_tick(&mut state);
        state.generation += 1;
        state.phase = Phase::Idle;
        state.seconds_remaining = 0;
        state.on_complete = None;
        if let Some(display) = &state.display {
            display.set_text(&format_clock(0));
            display.set_state(DisplayState::Idle);
        }
        debug!("timer stopped");
    }

    /// True iff a countdown is ticking; paused countdowns are not running
    pub fn is_running(&self) -> bool {
        self.lock().phase == Phase::Running
    }

    /// Seconds left on the current countdown, zero when idle
    pub fn seconds_remaining(&self) -> u64 {
        self.lock().seconds_remaining
    }

    fn lock(&self) -> MutexGuard<'_, TimerState> {
        // a panicked tick task must not wedge the timer
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn spawn_tick(&self, generation: u64) -> JoinHandle<()> {
        let timer = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first interval tick resolves immediately; the countdown
            // starts one second in
            interval.tick().await;
            loop {
                interval.tick().await;
                match timer.on_tick(generation) {
                    TickOutcome::Continue => {}
                    TickOutcome::Stale => return,
                    TickOutcome::Completed(callback) => {
                        if let Some(callback) = callback {
                            callback();
                        }
                        timer.revert_after_grace(generation).await;
                        return;
                    }
                }
            }
        })
    }

    fn on_tick(&self, generation: u64) -> TickOutcome {
        let mut state = self.lock();
        if state.generation != generation || state.phase != Phase::Running {
            return TickOutcome::Stale;
        }

        state.seconds_remaining = state.seconds_remaining.saturating_sub(1);
        let remaining = state.seconds_remaining;
        if let Some(display) = &state.display {
            display.set_text(&format_clock(remaining));
        }

        if remaining > 0 {
            if remaining <= self.warning_threshold {
                if let Some(display) = &state.display {
                    display.set_state(DisplayState::Warning);
                }
            }
            TickOutcome::Continue
        } else {
            state.phase = Phase::Completed;
            if let Some(display) = &state.display {
                display.set_state(DisplayState::Done);
            }
            debug!("timer completed");
            // the callback runs outside the lock
            TickOutcome::Completed(state.on_complete.take())
        }
    }

    /// Keep the done indication up for the grace period, then revert to
    /// idle unless the countdown was replaced or stopped in the meantime
    async fn revert_after_grace(&self, generation: u64) {
        tokio::time::sleep(self.grace).await;
        let mut state = self.lock();
        if state.generation != generation || state.phase != Phase::Completed {
            return;
        }
        state.phase = Phase::Idle;
        state.seconds_remaining = 0;
        state.tick_task = None;
        if let Some(display) = &state.display {
            display.set_text(&format_clock(0));
            display.set_state(DisplayState::Idle);
        }
    }
}

fn cancel_tick(state: &mut TimerState) {
    if let Some(task) = state.tick_task.take() {
        task.abort();
    }
}

/// Zero-padded `MM:SS`
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Display sink that records every call for later assertions
    #[derive(Default)]
    struct RecordingDisplay {
        texts: Mutex<Vec<String>>,
        states: Mutex<Vec<DisplayState>>,
    }

    impl RecordingDisplay {
        fn texts(&self) -> Vec<String> {
            self.texts.lock().unwrap().clone()
        }

        fn states(&self) -> Vec<DisplayState> {
            self.states.lock().unwrap().clone()
        }
    }

    impl TimerDisplay for RecordingDisplay {
        fn set_text(&self, text: &str) {
            self.texts.lock().unwrap().push(text.to_string());
        }

        fn set_state(&self, state: DisplayState) {
            self.states.lock().unwrap().push(state);
        }
    }

    fn counting_callback() -> (Arc<AtomicUsize>, OnComplete) {
        let counter = Arc::new(AtomicUsize::new(0));
        let clone = Arc::clone(&counter);
        (counter, Box::new(move || {
            clone.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_scenario() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());
        let (fired, callback) = counting_callback();

        timer.start(3, display.clone(), Some(callback));
        assert!(timer.is_running());
        assert_eq!(display.texts(), vec!["00:03"]);

        tokio::time::sleep(Duration::from_millis(3100)).await;

        assert_eq!(display.texts(), vec!["00:03", "00:02", "00:01", "00:00"]);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_running());
        assert_eq!(timer.seconds_remaining(), 0);
        assert_eq!(display.states().last(), Some(&DisplayState::Done));

        // grace period elapses, display reverts to idle
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            display.texts(),
            vec!["00:03", "00:02", "00:01", "00:00", "00:00"]
        );
        assert_eq!(display.states().last(), Some(&DisplayState::Idle));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_replaces_running_countdown() {
        let timer = CookingTimer::new();
        let first_display = Arc::new(RecordingDisplay::default());
        let second_display = Arc::new(RecordingDisplay::default());
        let (first_fired, first_callback) = counting_callback();
        let (second_fired, second_callback) = counting_callback();

        timer.start(100, first_display.clone(), Some(first_callback));
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(timer.seconds_remaining(), 99);

        timer.start(3, second_display.clone(), Some(second_callback));
        let first_texts = first_display.texts().len();

        tokio::time::sleep(Duration::from_secs(10)).await;

        // the replaced countdown never completes and never renders again
        assert_eq!(first_fired.load(Ordering::SeqCst), 0);
        assert_eq!(first_display.texts().len(), first_texts);
        assert_eq!(second_fired.load(Ordering::SeqCst), 1);
        assert_eq!(
            second_display.texts(),
            vec!["00:03", "00:02", "00:01", "00:00", "00:00"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume_continue_from_remaining() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());

        timer.start(10, display.clone(), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(timer.seconds_remaining(), 8);

        timer.pause();
        assert!(!timer.is_running());

        // no ticks while paused
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.seconds_remaining(), 8);

        timer.resume();
        assert!(timer.is_running());
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(timer.seconds_remaining(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_never_invokes_callback() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());
        let (fired, callback) = counting_callback();

        timer.start(5, display.clone(), Some(callback));
        tokio::time::sleep(Duration::from_millis(1100)).await;

        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.seconds_remaining(), 0);
        assert_eq!(display.texts().last(), Some(&"00:00".to_string()));
        assert_eq!(display.states().last(), Some(&DisplayState::Idle));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_at_zero_completes_on_first_tick() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());
        let (fired, callback) = counting_callback();

        timer.start(0, display.clone(), Some(callback));
        assert_eq!(display.texts(), vec!["00:00"]);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(display.states().last(), Some(&DisplayState::Done));
    }

    #[tokio::test(start_paused = true)]
    async fn test_undefined_transitions_are_noops() {
        let timer = CookingTimer::new();

        // nothing started yet
        timer.pause();
        timer.resume();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.seconds_remaining(), 0);

        let display = Arc::new(RecordingDisplay::default());
        timer.start(5, display.clone(), None);
        tokio::time::sleep(Duration::from_millis(1100)).await;

        // resume while running does not restart the countdown
        timer.resume();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(timer.seconds_remaining(), 3);

        // pause while paused stays paused
        timer.pause();
        timer.pause();
        assert!(!timer.is_running());
        assert_eq!(timer.seconds_remaining(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_state_near_zero() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());

        timer.start(12, display.clone(), None);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        // remaining 11, still above the threshold
        assert!(!display.states().contains(&DisplayState::Warning));

        tokio::time::sleep(Duration::from_secs(1)).await;
        // remaining 10, warning kicks in
        assert!(display.states().contains(&DisplayState::Warning));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_grace_reverts_immediately() {
        let timer = CookingTimer::new();
        let display = Arc::new(RecordingDisplay::default());
        let (fired, callback) = counting_callback();

        timer.start(1, display.clone(), Some(callback));
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(display.states().last(), Some(&DisplayState::Done));

        timer.stop();
        assert_eq!(display.states().last(), Some(&DisplayState::Idle));

        // the aborted grace revert must not render again
        let texts = display.texts().len();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(display.texts().len(), texts);
    }
}
