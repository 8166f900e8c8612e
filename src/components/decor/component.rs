use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::DecorConfig;
use super::pointer::Bounds;
use super::render;
use super::scheduler::FrameLoop;
use super::state::DecorState;
use crate::error::DecorError;

type SharedState = Rc<RefCell<Option<DecorState>>>;

const CANVAS_STYLE: &str = "position: absolute; inset: 0; width: 100%; height: 100%; \
	display: block; pointer-events: none;";

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, DecorError> {
	canvas
		.get_context("2d")?
		.ok_or(DecorError::NoContext)?
		.dyn_into()
		.map_err(|_| DecorError::NoContext)
}

fn start(
	canvas: &HtmlCanvasElement,
	config: DecorConfig,
	state: SharedState,
) -> Result<FrameLoop, DecorError> {
	let ctx = context_2d(canvas)?;
	let (w, h) = container_size(canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let seed = js_sys::Date::now() as u64;
	*state.borrow_mut() = Some(DecorState::new(config, w, h, seed));
	info!("decor layer started at {w}x{h}");

	FrameLoop::start(move |timestamp| {
		if let Some(ref mut s) = *state.borrow_mut() {
			s.tick(timestamp);
			render::render(s, &ctx);
		}
	})
}

/// Decorative constellation and floating shapes filling the parent element.
#[component]
pub fn DecorCanvas(#[prop(optional)] config: Option<DecorConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);
	let config = config.unwrap_or_default();

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		match start(&canvas, config.clone(), state_init.clone()) {
			Ok(handle) => frame_loop.set_value(Some(handle)),
			// Degrade to an empty canvas; the page still works.
			Err(err) => warn!("decor layer disabled: {err}"),
		}
	});

	let state_resize = state.clone();
	let resize_listener = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(w, h);
		}
	});

	// The canvas sits under the hero copy, so listen on the window and let
	// the tracker decide whether the pointer is inside.
	let state_pointer = state.clone();
	let pointer_listener = window_event_listener(ev::mousemove, move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		if let Some(ref mut s) = *state_pointer.borrow_mut() {
			let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
			s.pointer.update(Bounds::from(&rect), x, y);
		}
	});

	let state_leave = state.clone();
	let leave_listener = window_event_listener(ev::mouseout, move |ev: MouseEvent| {
		// relatedTarget is null when the pointer leaves the document
		if ev.related_target().is_none() {
			if let Some(ref mut s) = *state_leave.borrow_mut() {
				s.pointer.clear();
			}
		}
	});

	on_cleanup(move || {
		resize_listener.remove();
		pointer_listener.remove();
		leave_listener.remove();
		frame_loop.try_update_value(|handle| {
			if let Some(handle) = handle.take() {
				handle.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="decor-canvas"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
