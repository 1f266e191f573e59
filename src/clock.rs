//! Deferred completions driven by the simulation clock.
//!
//! Nothing here reads wall-clock time. Callers advance each value with the
//! delta of the schedule they run in, so dropping a value cancels it.

use std::time::Duration;

use bevy::time::{Stopwatch, Timer, TimerMode};

/// A one-shot delay that completes once after its duration has elapsed.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use redlight::clock::Delay;
///
/// let mut delay = Delay::new(Duration::from_millis(150));
/// assert!(!delay.tick(Duration::from_millis(100)));
/// assert!(delay.tick(Duration::from_millis(100)));
/// assert!(!delay.tick(Duration::from_millis(100)));
/// ```
#[derive(Debug, Clone)]
pub struct Delay {
    timer: Timer,
}

impl Delay {
    /// Creates a delay that completes after `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
        }
    }

    /// Advances the delay, returning `true` on the tick it completes.
    ///
    /// Later ticks return `false`, so a completed delay fires exactly once.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta).just_finished()
    }

    /// Total length of the delay.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }

    /// Time left before completion; zero once complete.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Fraction of the delay still to run, from `1.0` down to `0.0`.
    #[must_use]
    pub fn fraction_remaining(&self) -> f32 {
        self.timer.fraction_remaining()
    }
}

/// A sequence of timed messages measured from a single cumulative clock.
///
/// Each step is scheduled relative to the previous one, but offsets are
/// summed up front so uneven tick sizes never accumulate drift.
#[derive(Debug, Clone)]
pub struct Countdown {
    steps: Vec<(Duration, String)>,
    clock: Stopwatch,
    next: usize,
}

impl Countdown {
    /// Builds a countdown from `(gap, message)` pairs.
    #[must_use]
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = (Duration, S)>,
        S: Into<String>,
    {
        let mut at = Duration::ZERO;
        let steps = steps
            .into_iter()
            .map(|(gap, message)| {
                at += gap;
                (at, message.into())
            })
            .collect();
        Self {
            steps,
            clock: Stopwatch::new(),
            next: 0,
        }
    }

    /// Advances the clock and returns the latest message reached this tick.
    ///
    /// When a large delta crosses several steps only the last one is
    /// returned; the skipped messages would have been overwritten anyway.
    pub fn tick(&mut self, delta: Duration) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.clock.tick(delta);
        let elapsed = self.clock.elapsed();
        let mut reached = None;
        while let Some((at, _)) = self.steps.get(self.next) {
            if *at > elapsed {
                break;
            }
            reached = Some(self.next);
            self.next += 1;
        }
        reached
            .and_then(|index| self.steps.get(index))
            .map(|(_, message)| message.as_str())
    }

    /// Whether every step has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    /// Offset of the final step from the start of the countdown.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, |(at, _)| *at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn standard() -> Countdown {
        Countdown::new([
            (ms(500), "three"),
            (ms(1000), "two"),
            (ms(1000), "one"),
            (ms(1000), "go"),
        ])
    }

    #[test]
    fn delay_fires_exactly_once() {
        let mut delay = Delay::new(ms(450));
        let fired = (0..10).filter(|_| delay.tick(ms(100))).count();
        assert_eq!(fired, 1);
        assert_eq!(delay.remaining(), Duration::ZERO);
    }

    #[test]
    fn zero_delay_fires_on_first_tick() {
        let mut delay = Delay::new(Duration::ZERO);
        assert!(delay.tick(Duration::ZERO));
    }

    #[test]
    fn countdown_total_sums_gaps() {
        assert_eq!(standard().total(), ms(3500));
    }

    #[rstest]
    #[case::first(ms(500), Some("three"))]
    #[case::before_first(ms(499), None)]
    #[case::second(ms(1500), Some("two"))]
    #[case::skips_to_latest(ms(2600), Some("one"))]
    #[case::everything(ms(10_000), Some("go"))]
    fn countdown_reports_latest_message(
        #[case] delta: Duration,
        #[case] expected: Option<&str>,
    ) {
        let mut countdown = standard();
        assert_eq!(countdown.tick(delta), expected);
    }

    #[test]
    fn countdown_finishes_after_total_and_not_before() {
        let mut countdown = standard();
        for _ in 0..34 {
            countdown.tick(ms(100));
        }
        assert!(!countdown.is_finished());
        assert_eq!(countdown.tick(ms(100)), Some("go"));
        assert!(countdown.is_finished());
        assert_eq!(countdown.tick(ms(100)), None);
    }
}
