use leptos::ev;
use leptos::prelude::*;

use super::decor::scroll::{InView, ScrollRange, ScrollTracker, parallax_offset, reveal};

type DivRef = NodeRef<leptos::html::Div>;

/// Calls `on_measure(top, height, viewport_height)` for the element behind
/// `node_ref` once it mounts and on every window scroll and resize.
/// Listeners are dropped with the calling component.
fn watch_viewport(node_ref: DivRef, on_measure: impl Fn(f64, f64, f64) + Copy + 'static) {
	let measure = move || {
		let (Some(el), Some(window)) = (node_ref.get_untracked(), web_sys::window()) else {
			return;
		};
		let rect = el.get_bounding_client_rect();
		let viewport = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
		on_measure(rect.top(), rect.height(), viewport);
	};

	Effect::new(move |_| {
		if node_ref.get().is_some() {
			measure();
		}
	});
	let scroll_listener = window_event_listener(ev::scroll, move |_| measure());
	let resize_listener = window_event_listener(ev::resize, move |_| measure());
	on_cleanup(move || {
		scroll_listener.remove();
		resize_listener.remove();
	});
}

fn use_scroll_progress(node_ref: DivRef, range: ScrollRange) -> Signal<f64> {
	let tracker = RwSignal::new(ScrollTracker::new(range));
	watch_viewport(node_ref, move |top, height, viewport| {
		tracker.update(|t| {
			t.update(top, height, viewport);
		});
	});
	Signal::derive(move || tracker.with(|t| t.progress()))
}

/// Fades and scales its children in as they scroll toward the viewport centre.
#[component]
pub fn ScrollReveal(
	children: Children,
	#[prop(default = ScrollRange::ENTER_CENTER)] range: ScrollRange,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let node_ref = DivRef::new();
	let progress = use_scroll_progress(node_ref, range);

	let style = move || {
		let r = reveal(progress.get());
		format!("opacity: {:.3}; transform: scale({:.4});", r.opacity, r.scale)
	};

	view! {
		<div node_ref=node_ref class=class style=style>
			{children()}
		</div>
	}
}

/// Drifts its children vertically against the scroll direction.
#[component]
pub fn ScrollParallax(
	children: Children,
	/// Offset in px at either end of the range.
	#[prop(default = 40.0)]
	distance: f64,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let node_ref = DivRef::new();
	let progress = use_scroll_progress(node_ref, ScrollRange::ENTER_EXIT);

	view! {
		<div
			node_ref=node_ref
			class=class
			style=move || {
				let offset = parallax_offset(progress.get(), distance);
				format!("transform: translateY({offset:.2}px);")
			}
		>
			{children()}
		</div>
	}
}

/// Fades its children up once, the first time they come 100 px into view.
/// `clock` supplies the current time in seconds.
#[component]
pub fn InViewEntrance(
	children: Children,
	#[prop(into)] clock: Signal<f64>,
	#[prop(default = 0.0)] delay: f64,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let node_ref = DivRef::new();
	let seen = RwSignal::new(InView::new(InView::HEADER_INSET));
	watch_viewport(node_ref, move |top, height, viewport| {
		if seen.with_untracked(|s| s.entered_at().is_none()) {
			let now = clock.get_untracked();
			seen.update(|s| {
				s.update(now, top, height, viewport);
			});
		}
	});

	let style = move || {
		let e = seen.with(|s| s.entrance(clock.get(), delay, 0.6, 50.0));
		format!("opacity: {:.3}; transform: translateY({:.2}px);", e.opacity, e.offset_y)
	};

	view! {
		<div node_ref=node_ref class=class style=style>
			{children()}
		</div>
	}
}
