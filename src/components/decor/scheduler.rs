//! Display-refresh loop with an explicit start/stop handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::clock::AnimationClock;
use crate::error::DecorError;

/// One frame's worth of work, called with the frame timestamp in ms.
pub type FrameTick = Rc<dyn Fn(f64)>;

/// Where frames come from. The loop asks for one frame at a time and may
/// cancel the outstanding request.
pub trait FrameScheduler: 'static {
	/// Runs `tick` once on the next frame; returns an id for [`Self::cancel`].
	fn request(&self, tick: FrameTick) -> Result<i32, DecorError>;
	fn cancel(&self, id: i32);
}

/// `requestAnimationFrame` on the current window. A single JS closure is
/// reused for every request and forwards to the latest tick.
pub struct AnimationFrames {
	window: Window,
	tick: Rc<RefCell<Option<FrameTick>>>,
	callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrames {
	pub fn new() -> Result<Self, DecorError> {
		let window = web_sys::window().ok_or(DecorError::NoWindow)?;
		let tick: Rc<RefCell<Option<FrameTick>>> = Rc::new(RefCell::new(None));
		let slot = tick.clone();
		let callback = Closure::new(move |timestamp: f64| {
			// taken out so the tick can queue the next frame
			let current = slot.borrow_mut().take();
			if let Some(current) = current {
				current(timestamp);
			}
		});
		Ok(Self {
			window,
			tick,
			callback,
		})
	}
}

impl FrameScheduler for AnimationFrames {
	fn request(&self, tick: FrameTick) -> Result<i32, DecorError> {
		*self.tick.borrow_mut() = Some(tick);
		let id = self
			.window
			.request_animation_frame(self.callback.as_ref().unchecked_ref())?;
		Ok(id)
	}

	fn cancel(&self, id: i32) {
		let _ = self.window.cancel_animation_frame(id);
		self.tick.borrow_mut().take();
	}
}

struct FrameLoopInner<S> {
	scheduler: S,
	on_frame: RefCell<Box<dyn FnMut(f64)>>,
	pending: Cell<Option<i32>>,
	running: Cell<bool>,
}

impl<S: FrameScheduler> FrameLoopInner<S> {
	fn request_next(self: &Rc<Self>) -> Result<(), DecorError> {
		// Weak so a queued tick doesn't keep the loop alive.
		let weak = Rc::downgrade(self);
		let id = self.scheduler.request(Rc::new(move |timestamp| {
			if let Some(inner) = weak.upgrade() {
				inner.fire(timestamp);
			}
		}))?;
		self.pending.set(Some(id));
		Ok(())
	}

	fn fire(self: &Rc<Self>, timestamp: f64) {
		self.pending.set(None);
		if !self.running.get() {
			return;
		}
		(&mut *self.on_frame.borrow_mut())(timestamp);
		// on_frame may have stopped the loop
		if !self.running.get() {
			return;
		}
		if let Err(err) = self.request_next() {
			warn!("frame loop stopped: {err}");
			self.running.set(false);
		}
	}
}

/// Calls `on_frame` with the frame timestamp (ms) once per frame until
/// stopped or dropped.
pub struct FrameLoop<S: FrameScheduler = AnimationFrames> {
	inner: Rc<FrameLoopInner<S>>,
}

impl FrameLoop {
	/// Starts on the browser's display refresh.
	pub fn start(on_frame: impl FnMut(f64) + 'static) -> Result<Self, DecorError> {
		Self::with_scheduler(AnimationFrames::new()?, on_frame)
	}
}

impl<S: FrameScheduler> FrameLoop<S> {
	pub fn with_scheduler(
		scheduler: S,
		on_frame: impl FnMut(f64) + 'static,
	) -> Result<Self, DecorError> {
		let inner = Rc::new(FrameLoopInner {
			scheduler,
			on_frame: RefCell::new(Box::new(on_frame)),
			pending: Cell::new(None),
			running: Cell::new(true),
		});
		inner.request_next()?;
		Ok(Self { inner })
	}

	/// Cancels the pending frame. Idempotent.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(id) = self.inner.pending.take() {
			self.inner.scheduler.cancel(id);
		}
	}
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Seconds since the calling component mounted, updated every frame.
pub fn use_frame_clock() -> ReadSignal<f64> {
	let (elapsed, set_elapsed) = signal(0.0);
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);

	let mut clock = AnimationClock::new();
	match FrameLoop::start(move |timestamp| {
		clock.advance(timestamp);
		set_elapsed.set(clock.elapsed());
	}) {
		Ok(handle) => frame_loop.set_value(Some(handle)),
		Err(err) => warn!("frame clock unavailable: {err}"),
	}

	on_cleanup(move || {
		frame_loop.try_update_value(|handle| {
			if let Some(handle) = handle.take() {
				handle.stop();
			}
		});
	});
	elapsed
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Frames delivered by hand; records cancellations.
	#[derive(Default)]
	struct ManualFrames {
		queue: RefCell<Vec<(i32, FrameTick)>>,
		cancelled: RefCell<Vec<i32>>,
		next_id: Cell<i32>,
	}

	impl ManualFrames {
		fn run_frame(&self, timestamp: f64) {
			let due = std::mem::take(&mut *self.queue.borrow_mut());
			for (_, tick) in due {
				tick(timestamp);
			}
		}

		fn queued(&self) -> Vec<FrameTick> {
			self.queue.borrow().iter().map(|(_, t)| t.clone()).collect()
		}
	}

	impl FrameScheduler for Rc<ManualFrames> {
		fn request(&self, tick: FrameTick) -> Result<i32, DecorError> {
			let id = self.next_id.get() + 1;
			self.next_id.set(id);
			self.queue.borrow_mut().push((id, tick));
			Ok(id)
		}

		fn cancel(&self, id: i32) {
			self.cancelled.borrow_mut().push(id);
			self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
		}
	}

	fn counting_loop(frames: &Rc<ManualFrames>) -> (FrameLoop<Rc<ManualFrames>>, Rc<Cell<u32>>) {
		let calls = Rc::new(Cell::new(0));
		let seen = calls.clone();
		let handle = FrameLoop::with_scheduler(frames.clone(), move |_| seen.set(seen.get() + 1))
			.unwrap();
		(handle, calls)
	}

	#[test]
	fn runs_once_per_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (_handle, calls) = counting_loop(&frames);
		assert_eq!(calls.get(), 0);
		for i in 1..=3 {
			frames.run_frame(i as f64 * 16.0);
			assert_eq!(calls.get(), i);
		}
		assert_eq!(frames.queue.borrow().len(), 1);
	}

	#[test]
	fn stop_cancels_the_pending_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (handle, calls) = counting_loop(&frames);
		frames.run_frame(16.0);
		let pending = frames.queue.borrow()[0].0;

		handle.stop();
		assert_eq!(*frames.cancelled.borrow(), vec![pending]);
		assert!(frames.queue.borrow().is_empty());
		frames.run_frame(32.0);
		assert_eq!(calls.get(), 1);

		// second stop has nothing left to cancel
		handle.stop();
		assert_eq!(frames.cancelled.borrow().len(), 1);
	}

	#[test]
	fn drop_stops_and_stale_ticks_do_nothing() {
		let frames = Rc::new(ManualFrames::default());
		let (handle, calls) = counting_loop(&frames);
		// a tick the browser had already dequeued before the cancel landed
		let stale = frames.queued();

		drop(handle);
		assert_eq!(frames.cancelled.borrow().len(), 1);
		for tick in stale {
			tick(16.0);
		}
		frames.run_frame(32.0);
		assert_eq!(calls.get(), 0);
	}

	#[test]
	fn stopping_from_inside_a_frame_queues_nothing() {
		let frames = Rc::new(ManualFrames::default());
		let handle: Rc<RefCell<Option<FrameLoop<Rc<ManualFrames>>>>> = Rc::new(RefCell::new(None));
		let slot = handle.clone();
		let started = FrameLoop::with_scheduler(frames.clone(), move |_| {
			if let Some(h) = slot.borrow().as_ref() {
				h.stop();
			}
		})
		.unwrap();
		*handle.borrow_mut() = Some(started);

		frames.run_frame(16.0);
		assert!(frames.queue.borrow().is_empty());
		assert!(frames.cancelled.borrow().is_empty());
	}
}
