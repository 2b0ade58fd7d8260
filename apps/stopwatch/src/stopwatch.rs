//! Stopwatch state machine.

use crate::clock::Clock;
use crate::ticker::Ticker;
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};
use tui_keybinds::{KeyBinding, WidgetInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Stopped,
    Running,
}

/// Clickable stopwatch controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    StartStop,
    Reset,
}

pub struct Stopwatch {
    clock: Box<dyn Clock>,
    ticker: Ticker,
    state: State,
    /// `now - elapsed` at the last start, so resumed runs keep accumulating
    reference: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    pub fn new(clock: Box<dyn Clock>, tick: Duration) -> Self {
        Self {
            clock,
            ticker: Ticker::new(tick),
            state: State::Stopped,
            reference: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Elapsed time as of the last tick or stop.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The Reset control is only live while stopped.
    pub fn can_reset(&self) -> bool {
        !self.is_running()
    }

    pub fn display(&self) -> String {
        format_time(self.elapsed)
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let now = self.clock.now();
        self.reference = Some(now.checked_sub(self.elapsed).unwrap_or(now));
        self.ticker.arm(now);
        self.state = State::Running;
        tracing::debug!(elapsed_ms = self.elapsed.as_millis() as u64, "stopwatch started");
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.ticker.cancel();
        self.snapshot();
        self.state = State::Stopped;
        tracing::debug!(elapsed_ms = self.elapsed.as_millis() as u64, "stopwatch stopped");
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.reference = None;
        self.elapsed = Duration::ZERO;
        tracing::debug!("stopwatch reset");
    }

    /// Advance the display if a tick period has passed. Returns whether it did.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() || !self.ticker.poll(self.clock.now()) {
            return false;
        }
        self.snapshot();
        true
    }

    /// How long the event loop may block before the next tick.
    pub fn timeout(&self, idle: Duration) -> Duration {
        self.ticker.timeout(self.clock.now(), idle)
    }

    fn snapshot(&mut self) {
        if let Some(reference) = self.reference {
            self.elapsed = self.clock.now().saturating_duration_since(reference);
        }
    }
}

impl WidgetInput for Stopwatch {
    type Target = Control;

    fn on_key(&mut self, key: &KeyBinding) -> bool {
        match key.key {
            KeyCode::Char(' ') | KeyCode::Char('s') if key.modifiers.is_empty() => self.toggle(),
            KeyCode::Char('r') if key.modifiers.is_empty() && self.can_reset() => self.reset(),
            _ => return false,
        }
        true
    }

    fn on_click(&mut self, target: Control) -> bool {
        match target {
            Control::StartStop => self.toggle(),
            Control::Reset if self.can_reset() => self.reset(),
            Control::Reset => return false,
        }
        true
    }
}

/// `HH:MM:SS.CC` with unbounded hours.
pub fn format_time(elapsed: Duration) -> String {
    let centis = elapsed.as_millis() / 10;
    let hours = centis / 360_000;
    let minutes = centis / 6_000 % 60;
    let seconds = centis / 100 % 60;
    format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use proptest::prelude::*;
    use tui_keybinds::plain;

    const TICK: Duration = Duration::from_millis(10);

    fn stopwatch() -> (Stopwatch, ManualClock) {
        let clock = ManualClock::new();
        (Stopwatch::new(Box::new(clock.clone()), TICK), clock)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_state() {
        let (sw, _) = stopwatch();
        assert_eq!(sw.state(), State::Stopped);
        assert_eq!(sw.display(), "00:00:00.00");
    }

    #[test]
    fn test_start_advance_stop() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(500));
        sw.stop();
        assert_eq!(sw.elapsed(), ms(500));
        assert_eq!(sw.display(), "00:00:00.50");
    }

    #[test]
    fn test_ticks_update_display() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(5));
        assert!(!sw.tick());
        assert_eq!(sw.elapsed(), Duration::ZERO);
        clock.advance(ms(7));
        assert!(sw.tick());
        assert_eq!(sw.elapsed(), ms(12));
    }

    #[test]
    fn test_elapsed_does_not_drift() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        for _ in 0..1000 {
            clock.advance(ms(13));
            sw.tick();
        }
        assert_eq!(sw.elapsed(), ms(13_000));
    }

    #[test]
    fn test_pause_resume_accumulates() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(1_000));
        sw.stop();
        clock.advance(ms(60_000));
        sw.start();
        clock.advance(ms(250));
        sw.stop();
        assert_eq!(sw.elapsed(), ms(1_250));
    }

    #[test]
    fn test_start_twice_is_start_once() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(300));
        sw.start();
        clock.advance(ms(200));
        sw.stop();
        assert_eq!(sw.elapsed(), ms(500));
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(100));
        sw.stop();
        clock.advance(ms(100));
        sw.stop();
        assert_eq!(sw.elapsed(), ms(100));
        assert!(!sw.tick());
    }

    #[test]
    fn test_reset_after_stop() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(4_321));
        sw.stop();
        sw.reset();
        assert_eq!(sw.elapsed(), Duration::ZERO);
        assert_eq!(sw.state(), State::Stopped);
    }

    #[test]
    fn test_reset_while_running_stops() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(50));
        sw.reset();
        assert!(!sw.is_running());
        clock.advance(ms(50));
        assert!(!sw.tick());
        assert_eq!(sw.display(), "00:00:00.00");
    }

    #[test]
    fn test_reset_control_ignored_while_running() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(ms(70));
        assert!(!sw.can_reset());
        assert!(!sw.on_click(Control::Reset));
        assert!(!sw.on_key(&plain('r')));
        assert!(sw.is_running());
        assert!(sw.tick());
        assert_eq!(sw.elapsed(), ms(70));

        sw.stop();
        assert!(sw.can_reset());
        assert!(sw.on_key(&plain('r')));
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_timeout_follows_ticker() {
        let (mut sw, clock) = stopwatch();
        assert_eq!(sw.timeout(ms(250)), ms(250));
        sw.start();
        clock.advance(ms(3));
        assert_eq!(sw.timeout(ms(250)), ms(7));
    }

    #[test]
    fn test_keys_and_clicks() {
        let (mut sw, clock) = stopwatch();
        assert!(sw.on_key(&plain(' ')));
        assert!(sw.is_running());
        clock.advance(ms(40));
        assert!(sw.on_key(&plain('s')));
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(), ms(40));
        assert!(sw.on_click(Control::Reset));
        assert_eq!(sw.elapsed(), Duration::ZERO);
        assert!(sw.on_click(Control::StartStop));
        assert!(sw.is_running());
        assert!(!sw.on_key(&plain('x')));
    }

    #[test]
    fn test_format_time_fields() {
        assert_eq!(format_time(ms(9)), "00:00:00.00");
        assert_eq!(format_time(ms(61_230)), "00:01:01.23");
        assert_eq!(format_time(ms(3_599_999)), "00:59:59.99");
        assert_eq!(format_time(ms(3_600_000)), "01:00:00.00");
        assert_eq!(format_time(Duration::from_secs(100 * 3600)), "100:00:00.00");
    }

    #[test]
    fn test_format_time_samples() {
        let samples: Vec<String> = [0u64, 10, 999, 59_990, 754_321, 86_399_990]
            .iter()
            .map(|&n| format!("{} ms -> {}", n, format_time(ms(n))))
            .collect();
        insta::assert_snapshot!(samples.join("\n"), @r"
        0 ms -> 00:00:00.00
        10 ms -> 00:00:00.01
        999 ms -> 00:00:00.99
        59990 ms -> 00:00:59.99
        754321 ms -> 00:12:34.32
        86399990 ms -> 23:59:59.99
        ");
    }

    proptest! {
        #[test]
        fn prop_format_time_round_trips_centis(millis in 0u64..1_000_000_000) {
            let text = format_time(ms(millis));
            let (clock, centis) = text.split_once('.').unwrap();
            let parts: Vec<u64> = clock.split(':').map(|p| p.parse().unwrap()).collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[1] < 60 && parts[2] < 60);
            prop_assert_eq!(centis.len(), 2);
            let total = ((parts[0] * 60 + parts[1]) * 60 + parts[2]) * 100 + centis.parse::<u64>().unwrap();
            prop_assert_eq!(total, millis / 10);
        }
    }
}
