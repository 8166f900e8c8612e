//! Container-relative pointer tracking and the effects it drives.

/// A container's bounding box in client (viewport) px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub left: f64,
	pub top: f64,
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.left
			&& x <= self.left + self.width
			&& y >= self.top
			&& y <= self.top + self.height
	}

	pub fn center_x(&self) -> f64 {
		self.left + self.width / 2.0
	}
}

impl From<&web_sys::DomRect> for Bounds {
	fn from(rect: &web_sys::DomRect) -> Self {
		Self {
			left: rect.left(),
			top: rect.top(),
			width: rect.width(),
			height: rect.height(),
		}
	}
}

/// Last known pointer position, relative to the tracked container.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
	position: Option<(f64, f64)>,
	size: (f64, f64),
}

impl PointerTracker {
	pub fn update(&mut self, bounds: Bounds, client_x: f64, client_y: f64) {
		self.size = (bounds.width, bounds.height);
		self.position = bounds
			.contains(client_x, client_y)
			.then(|| (client_x - bounds.left, client_y - bounds.top));
	}

	pub fn clear(&mut self) {
		self.position = None;
	}

	pub fn position(&self) -> Option<(f64, f64)> {
		self.position
	}

	/// Normalised device coordinates (y up), `(0, 0)` without a pointer.
	pub fn normalized(&self) -> (f64, f64) {
		match self.position {
			Some((x, y)) if self.size.0 > 0.0 && self.size.1 > 0.0 => {
				((x / self.size.0) * 2.0 - 1.0, 1.0 - (y / self.size.1) * 2.0)
			}
			_ => (0.0, 0.0),
		}
	}
}

/// Displacement pulling `point` toward the pointer. Fades to zero at
/// `max_distance` and never overshoots the pointer.
pub fn attraction(
	point: (f64, f64),
	pointer: Option<(f64, f64)>,
	max_distance: f64,
	max_pull: f64,
) -> (f64, f64) {
	let Some((px, py)) = pointer else {
		return (0.0, 0.0);
	};
	let (dx, dy) = (px - point.0, py - point.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 1e-6 || dist >= max_distance {
		return (0.0, 0.0);
	}
	let pull = (max_pull * (1.0 - dist / max_distance)).min(dist);
	(dx / dist * pull, dy / dist * pull)
}

/// Critically damped spring, stepped exactly so large frames stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spring {
	pub value: f64,
	pub velocity: f64,
}

impl Spring {
	pub fn step(&mut self, target: f64, omega: f64, dt: f64) {
		if dt <= 0.0 {
			return;
		}
		let delta = self.value - target;
		let temp = (self.velocity + omega * delta) * dt;
		let decay = (-omega * dt).exp();
		self.velocity = (self.velocity - omega * temp) * decay;
		self.value = target + (delta + temp) * decay;
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringPoint {
	pub x: Spring,
	pub y: Spring,
}

impl SpringPoint {
	pub fn step(&mut self, target: (f64, f64), omega: f64, dt: f64) {
		self.x.step(target.0, omega, dt);
		self.y.step(target.1, omega, dt);
	}

	pub fn value(&self) -> (f64, f64) {
		(self.x.value, self.y.value)
	}
}

/// Horizontal offset for an element following the pointer across a hover target.
pub fn follow_offset(pointer_x: f64, center_x: f64, fraction: f64) -> f64 {
	(pointer_x - center_x) * fraction
}

#[cfg(test)]
mod tests {
	use super::*;

	const BOX: Bounds = Bounds {
		left: 100.0,
		top: 50.0,
		width: 400.0,
		height: 200.0,
	};

	fn magnitude((x, y): (f64, f64)) -> f64 {
		(x * x + y * y).sqrt()
	}

	#[test]
	fn tracks_relative_to_container() {
		let mut tracker = PointerTracker::default();
		tracker.update(BOX, 300.0, 150.0);
		assert_eq!(tracker.position(), Some((200.0, 100.0)));
		assert_eq!(tracker.normalized(), (0.0, 0.0));

		tracker.update(BOX, 500.0, 50.0);
		assert_eq!(tracker.normalized(), (1.0, 1.0));
	}

	#[test]
	fn outside_the_container_means_no_pointer() {
		let mut tracker = PointerTracker::default();
		tracker.update(BOX, 300.0, 150.0);
		tracker.update(BOX, 20.0, 150.0);
		assert_eq!(tracker.position(), None);
		assert_eq!(tracker.normalized(), (0.0, 0.0));
		assert_eq!(attraction((0.0, 0.0), tracker.position(), 100.0, 20.0), (0.0, 0.0));
	}

	#[test]
	fn attraction_fades_out_at_the_influence_radius() {
		let max = 160.0;
		let mut last = f64::INFINITY;
		for d in [40.0, 80.0, 120.0, 150.0, 159.0, 159.9] {
			let m = magnitude(attraction((0.0, 0.0), Some((d, 0.0)), max, 18.0));
			assert!(m <= last);
			last = m;
		}
		assert!(last < 0.02);
		assert_eq!(attraction((0.0, 0.0), Some((max, 0.0)), max, 18.0), (0.0, 0.0));
		assert_eq!(attraction((0.0, 0.0), Some((500.0, 0.0)), max, 18.0), (0.0, 0.0));
	}

	#[test]
	fn attraction_points_toward_pointer_without_overshoot() {
		let (dx, dy) = attraction((10.0, 10.0), Some((10.0, 40.0)), 160.0, 18.0);
		assert_eq!(dx, 0.0);
		assert!(dy > 0.0);
		let near = attraction((0.0, 0.0), Some((2.0, 0.0)), 160.0, 18.0);
		assert!(near.0 <= 2.0);
	}

	#[test]
	fn spring_settles_without_overshoot() {
		let mut spring = Spring::default();
		let mut last = 0.0;
		for _ in 0..240 {
			spring.step(10.0, 8.0, 1.0 / 60.0);
			assert!(spring.value <= 10.0 + 1e-9);
			assert!(spring.value >= last - 1e-9);
			last = spring.value;
		}
		assert!((spring.value - 10.0).abs() < 0.01);
	}

	#[test]
	fn spring_survives_huge_steps() {
		let mut spring = Spring::default();
		spring.step(5.0, 8.0, 30.0);
		assert!((spring.value - 5.0).abs() < 1e-6);
		assert!(spring.velocity.is_finite());
	}

	#[test]
	fn follow_tracks_a_fraction_of_the_offset() {
		assert_eq!(follow_offset(150.0, 100.0, 0.2), 10.0);
		assert_eq!(follow_offset(100.0, 100.0, 0.2), 0.0);
		assert_eq!(BOX.center_x(), 300.0);
	}
}
