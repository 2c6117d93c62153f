//! The playback clock and its state machine.
//!
//! `Idle → Playing ⇄ Paused → Ended`, transitioning on key events and on
//! the clock reaching the clip duration. While `Playing`, elapsed wall time
//! × fps yields the current frame index, which is monotonically
//! non-decreasing: seeking backwards does not exist here.
//!
//! All methods take `now` explicitly so the machine is testable without
//! sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Playing,
  Paused,
  Ended,
}

pub struct Playback {
  phase:      Phase,
  fps:        f64,
  duration:   Option<Duration>,
  /// Time accumulated across previous play stretches.
  elapsed:    Duration,
  /// Start of the current play stretch; `Some` iff `Playing`.
  resumed_at: Option<Instant>,
  /// Highest frame index handed out so far.
  last_frame: u64,
}

impl Playback {
  pub fn new(fps: f64, duration_secs: Option<f64>) -> Self {
    // Degenerate fps would stall the frame index forever; fall back the
    // same way the metadata parser does.
    let fps = if fps.is_finite() && fps > 0.0 { fps } else { 30.0 };
    Self {
      phase: Phase::Idle,
      fps,
      duration: duration_secs
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(Duration::from_secs_f64),
      elapsed: Duration::ZERO,
      resumed_at: None,
      last_frame: 0,
    }
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn fps(&self) -> f64 {
    self.fps
  }

  /// Total play time, including the in-flight stretch.
  pub fn elapsed(&self, now: Instant) -> Duration {
    match self.resumed_at {
      Some(at) => self.elapsed + now.duration_since(at),
      None => self.elapsed,
    }
  }

  pub fn current_frame(&self) -> u64 {
    self.last_frame
  }

  /// Toggle between playing and paused; `Idle` and `Ended` both start (or
  /// restart) playback.
  pub fn toggle(&mut self, now: Instant) {
    match self.phase {
      Phase::Idle => {
        self.phase = Phase::Playing;
        self.resumed_at = Some(now);
      }
      Phase::Playing => {
        self.elapsed += now.duration_since(self.resumed_at.take().unwrap_or(now));
        self.phase = Phase::Paused;
      }
      Phase::Paused => {
        self.phase = Phase::Playing;
        self.resumed_at = Some(now);
      }
      Phase::Ended => self.restart(now),
    }
  }

  /// Rewind to zero and start playing.
  pub fn restart(&mut self, now: Instant) {
    self.elapsed = Duration::ZERO;
    self.last_frame = 0;
    self.resumed_at = Some(now);
    self.phase = Phase::Playing;
  }

  /// Advance the clock. Returns `Some(frame)` when the current frame index
  /// moved forward, which is the trigger for a sync step.
  pub fn tick(&mut self, now: Instant) -> Option<u64> {
    if self.phase != Phase::Playing {
      return None;
    }

    let elapsed = self.elapsed(now);
    if let Some(duration) = self.duration
      && elapsed >= duration
    {
      self.elapsed = duration;
      self.resumed_at = None;
      self.phase = Phase::Ended;
    }

    let frame = (elapsed.as_secs_f64() * self.fps).floor() as u64;
    if frame > self.last_frame {
      self.last_frame = frame;
      Some(frame)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn at(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
  }

  #[test]
  fn starts_idle_and_toggles_through_phases() {
    let t0 = Instant::now();
    let mut p = Playback::new(30.0, Some(10.0));
    assert_eq!(p.phase(), Phase::Idle);

    p.toggle(t0);
    assert_eq!(p.phase(), Phase::Playing);

    p.toggle(at(t0, 500));
    assert_eq!(p.phase(), Phase::Paused);
    assert_eq!(p.elapsed(at(t0, 9000)), Duration::from_millis(500));

    p.toggle(at(t0, 9000));
    assert_eq!(p.phase(), Phase::Playing);
  }

  #[test]
  fn frame_index_tracks_elapsed_times_fps() {
    let t0 = Instant::now();
    let mut p = Playback::new(30.0, None);
    p.toggle(t0);

    assert_eq!(p.tick(at(t0, 10)), None); // frame 0 is where we started
    assert_eq!(p.tick(at(t0, 40)), Some(1));
    assert_eq!(p.tick(at(t0, 50)), None); // still frame 1
    assert_eq!(p.tick(at(t0, 1000)), Some(30));
    assert_eq!(p.current_frame(), 30);
  }

  #[test]
  fn frame_index_is_monotonic_across_pauses() {
    let t0 = Instant::now();
    let mut p = Playback::new(30.0, None);
    p.toggle(t0);
    assert_eq!(p.tick(at(t0, 500)), Some(15));

    p.toggle(at(t0, 500)); // pause
    assert_eq!(p.tick(at(t0, 2000)), None);

    p.toggle(at(t0, 2000)); // resume; clock continues from 500ms
    assert_eq!(p.tick(at(t0, 2100)), Some(18));
    assert!(p.current_frame() >= 15);
  }

  #[test]
  fn reaching_duration_ends_playback() {
    let t0 = Instant::now();
    let mut p = Playback::new(30.0, Some(1.0));
    p.toggle(t0);

    p.tick(at(t0, 1500));
    assert_eq!(p.phase(), Phase::Ended);
    // Clock is clamped to the duration.
    assert_eq!(p.elapsed(at(t0, 9999)), Duration::from_secs(1));
  }

  #[test]
  fn toggle_after_end_restarts_from_zero() {
    let t0 = Instant::now();
    let mut p = Playback::new(30.0, Some(1.0));
    p.toggle(t0);
    p.tick(at(t0, 1500));
    assert_eq!(p.phase(), Phase::Ended);

    p.toggle(at(t0, 2000));
    assert_eq!(p.phase(), Phase::Playing);
    assert_eq!(p.tick(at(t0, 2040)), Some(1));
  }

  #[test]
  fn degenerate_fps_falls_back() {
    let p = Playback::new(0.0, None);
    assert_eq!(p.fps(), 30.0);
    let p = Playback::new(f64::NAN, None);
    assert_eq!(p.fps(), 30.0);
  }
}
