use std::cell::Cell;

use chrono::{
  DateTime,
  Duration,
  Utc
};

/// Source of task ids and creation times.
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Deterministic clock: returns `start`, then
/// advances by `step` on every read.
#[derive(Debug, Clone)]
pub struct SteppingClock {
  next: Cell<DateTime<Utc>>,
  step: Duration
}

impl SteppingClock {
  pub fn new(
    start: DateTime<Utc>,
    step: Duration
  ) -> Self {
    Self {
      next: Cell::new(start),
      step
    }
  }

  /// A clock that never advances; every add
  /// gets the same id.
  pub fn frozen(at: DateTime<Utc>) -> Self {
    Self::new(at, Duration::zero())
  }

  pub fn peek(&self) -> DateTime<Utc> {
    self.next.get()
  }
}

impl Clock for SteppingClock {
  fn now(&self) -> DateTime<Utc> {
    let current = self.next.get();
    self.next.set(current + self.step);
    current
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    TimeZone,
    Utc
  };

  use super::{
    Clock,
    SteppingClock
  };

  #[test]
  fn stepping_clock_advances_per_read() {
    let start = Utc
      .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
      .single()
      .expect("valid timestamp");
    let clock = SteppingClock::new(
      start,
      Duration::milliseconds(10)
    );

    assert_eq!(clock.now(), start);
    assert_eq!(
      clock.now(),
      start + Duration::milliseconds(10)
    );
    assert_eq!(
      clock.peek(),
      start + Duration::milliseconds(20)
    );
  }

  #[test]
  fn frozen_clock_repeats() {
    let at = Utc::now();
    let clock = SteppingClock::frozen(at);
    assert_eq!(clock.now(), clock.now());
  }
}
