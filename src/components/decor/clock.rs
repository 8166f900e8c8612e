/// Elapsed time for one mounted layer, fed by scheduler timestamps.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
	origin: Option<f64>,
	elapsed: f64,
}

impl AnimationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Moves the clock to `timestamp_ms` and returns the seconds advanced.
	/// The first finite call only sets the origin. Never moves backwards.
	pub fn advance(&mut self, timestamp_ms: f64) -> f64 {
		if !timestamp_ms.is_finite() {
			return 0.0;
		}
		let origin = *self.origin.get_or_insert(timestamp_ms);
		let now = ((timestamp_ms - origin) / 1000.0).max(self.elapsed);
		let delta = now - self.elapsed;
		self.elapsed = now;
		delta
	}

	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_at_zero_on_first_tick() {
		let mut clock = AnimationClock::new();
		assert_eq!(clock.advance(123_456.0), 0.0);
		assert_eq!(clock.elapsed(), 0.0);
		clock.advance(124_456.0);
		assert!((clock.elapsed() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn never_decreases() {
		let mut clock = AnimationClock::new();
		let mut last = 0.0;
		for ts in [0.0, 16.0, 33.0, 20.0, 5.0, f64::NAN, 50.0, 49.0, 1_000.0] {
			let delta = clock.advance(ts);
			assert!(clock.elapsed() >= last);
			assert!(delta >= 0.0);
			last = clock.elapsed();
		}
		assert!((clock.elapsed() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn non_finite_first_timestamp_does_not_become_the_origin() {
		let mut clock = AnimationClock::new();
		assert_eq!(clock.advance(f64::NAN), 0.0);
		assert_eq!(clock.advance(f64::INFINITY), 0.0);
		clock.advance(1_000.0);
		clock.advance(5_000.0);
		assert!((clock.elapsed() - 4.0).abs() < 1e-9);
	}

	#[test]
	fn stall_resumes_from_wall_time() {
		let mut clock = AnimationClock::new();
		clock.advance(0.0);
		clock.advance(100.0);
		let delta = clock.advance(5_100.0);
		assert!((delta - 5.0).abs() < 1e-9);
	}
}
