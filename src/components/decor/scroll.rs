//! Scroll-linked progress for elements moving through the viewport.

use super::animation::{Entrance, entrance, interpolate};

/// A point where an edge of the element meets an edge of the viewport.
/// Both fields are fractions: 0 is the start (top), 1 the end (bottom).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
	pub element: f64,
	pub viewport: f64,
}

impl Intersection {
	pub const START_END: Self = Self { element: 0.0, viewport: 1.0 };
	pub const CENTER_CENTER: Self = Self { element: 0.5, viewport: 0.5 };
	pub const END_START: Self = Self { element: 1.0, viewport: 0.0 };

	/// Scroll position (negated element top) at which this intersection happens.
	fn scroll_position(self, element_height: f64, viewport_height: f64) -> f64 {
		self.element * element_height - self.viewport * viewport_height
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
	pub start: Intersection,
	pub end: Intersection,
}

impl ScrollRange {
	/// From the element peeking in at the bottom to it leaving at the top.
	pub const ENTER_EXIT: Self = Self {
		start: Intersection::START_END,
		end: Intersection::END_START,
	};
	/// From the element peeking in to it being centred.
	pub const ENTER_CENTER: Self = Self {
		start: Intersection::START_END,
		end: Intersection::CENTER_CENTER,
	};

	/// `element_top` is the element's top relative to the viewport top, as
	/// reported by a bounding client rect. The result is clamped to `[0, 1]`.
	pub fn progress(&self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
		let position = -element_top;
		let start = self.start.scroll_position(element_height, viewport_height);
		let end = self.end.scroll_position(element_height, viewport_height);
		let span = end - start;
		if span == 0.0 || !span.is_finite() {
			return if position >= end { 1.0 } else { 0.0 };
		}
		let progress = ((position - start) / span).clamp(0.0, 1.0);
		// NaN geometry (detached element) reads as "not reached".
		if progress.is_nan() { 0.0 } else { progress }
	}
}

/// Progress of one tracked element, recomputed on scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTracker {
	range: ScrollRange,
	progress: f64,
}

impl ScrollTracker {
	pub fn new(range: ScrollRange) -> Self {
		Self { range, progress: 0.0 }
	}

	pub fn update(&mut self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
		self.progress = self.range.progress(element_top, element_height, viewport_height);
		self.progress
	}

	pub fn progress(&self) -> f64 {
		self.progress
	}
}

/// One-shot visibility latch. Set the first time the element overlaps the
/// viewport shrunk by `inset` px on each side, then never cleared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InView {
	inset: f64,
	entered_at: Option<f64>,
}

impl InView {
	/// Section headers wait until they are 100 px inside the viewport.
	pub const HEADER_INSET: f64 = 100.0;

	pub fn new(inset: f64) -> Self {
		Self {
			inset,
			entered_at: None,
		}
	}

	/// Records `now` as the entry time on the first overlapping measurement.
	/// Returns whether the element has ever been in view.
	pub fn update(
		&mut self,
		now: f64,
		element_top: f64,
		element_height: f64,
		viewport_height: f64,
	) -> bool {
		if self.entered_at.is_none() {
			let bottom = element_top + element_height;
			// NaN geometry fails both comparisons
			if element_top < viewport_height - self.inset && bottom > self.inset {
				self.entered_at = Some(now);
			}
		}
		self.entered_at.is_some()
	}

	pub fn entered_at(&self) -> Option<f64> {
		self.entered_at
	}

	/// Fade-and-rise measured from the entry time; held at the start
	/// (transparent, `distance` px down) until then.
	pub fn entrance(&self, now: f64, delay: f64, duration: f64, distance: f64) -> Entrance {
		match self.entered_at {
			Some(at) => entrance(now - at, delay, duration, distance),
			None => Entrance {
				opacity: 0.0,
				offset_y: distance,
			},
		}
	}
}

/// Vertical layer offset: `+distance` at progress 0, `-distance` at 1.
pub fn parallax_offset(progress: f64, distance: f64) -> f64 {
	interpolate(progress, (0.0, 1.0), (distance, -distance))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
	pub opacity: f64,
	pub scale: f64,
}

/// Cards brighten and grow to full size over the first half of their range.
pub fn reveal(progress: f64) -> Reveal {
	Reveal {
		opacity: interpolate(progress, (0.0, 0.5), (0.3, 1.0)),
		scale: interpolate(progress, (0.0, 0.5), (0.95, 1.0)),
	}
}
