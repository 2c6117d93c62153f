//! Parsing helpers for the free-text media properties reported at upload
//! time ("1920x1080", "30 fps").
//!
//! These mirror the upload client's behaviour: malformed input degrades to a
//! sentinel value rather than an error, so a video with unreadable metadata
//! can still be uploaded and processed.

/// Parse a `WIDTHxHEIGHT` string. Returns `(0, 0)` when the string is
/// missing, malformed, or non-positive.
pub fn parse_resolution(resolution: &str) -> (u32, u32) {
  if resolution.is_empty() || resolution.eq_ignore_ascii_case("unknown") {
    return (0, 0);
  }

  let mut parts = resolution.splitn(2, 'x');
  let (Some(w), Some(h)) = (parts.next(), parts.next()) else {
    return (0, 0);
  };

  match (w.trim().parse::<u32>(), h.trim().parse::<u32>()) {
    (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
    _ => (0, 0),
  }
}

/// Extract the leading integer from an fps string like `"30 fps"`.
/// Falls back to 30 when no digits are present.
pub fn parse_fps(fps: &str) -> f64 {
  let digits: String = fps
    .chars()
    .skip_while(|c| !c.is_ascii_digit())
    .take_while(|c| c.is_ascii_digit())
    .collect();

  digits.parse().unwrap_or(30.0)
}

/// Estimated total frame count for a clip: `floor(duration × fps)`.
pub fn estimated_frame_count(duration_secs: f64, fps: f64) -> u32 {
  if !duration_secs.is_finite() || !fps.is_finite() || duration_secs <= 0.0 || fps <= 0.0 {
    return 0;
  }
  (duration_secs * fps).floor() as u32
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolution_happy_path() {
    assert_eq!(parse_resolution("1920x1080"), (1920, 1080));
    assert_eq!(parse_resolution("640x480"), (640, 480));
  }

  #[test]
  fn resolution_degrades_to_zero() {
    assert_eq!(parse_resolution(""), (0, 0));
    assert_eq!(parse_resolution("Unknown"), (0, 0));
    assert_eq!(parse_resolution("1920"), (0, 0));
    assert_eq!(parse_resolution("axb"), (0, 0));
    assert_eq!(parse_resolution("0x1080"), (0, 0));
  }

  #[test]
  fn fps_extracts_leading_integer() {
    assert_eq!(parse_fps("30 fps"), 30.0);
    assert_eq!(parse_fps("24"), 24.0);
    assert_eq!(parse_fps("~60fps"), 60.0);
  }

  #[test]
  fn fps_falls_back_to_thirty() {
    assert_eq!(parse_fps("Unknown"), 30.0);
    assert_eq!(parse_fps(""), 30.0);
  }

  #[test]
  fn frame_count_floors() {
    assert_eq!(estimated_frame_count(2.5, 30.0), 75);
    assert_eq!(estimated_frame_count(1.99, 30.0), 59);
    assert_eq!(estimated_frame_count(0.0, 30.0), 0);
    assert_eq!(estimated_frame_count(10.0, 0.0), 0);
  }
}
