use leptos::prelude::*;
use web_sys::MouseEvent;

use super::decor::pointer::{Bounds, follow_offset};

/// Shifts its children horizontally by `fraction` of the pointer's offset
/// from the wrapper's centre while hovered.
#[component]
pub fn HoverFollow(children: Children, #[prop(default = 0.15)] fraction: f64) -> impl IntoView {
	let node_ref = NodeRef::<leptos::html::Span>::new();
	let offset = RwSignal::new(0.0);

	let on_mousemove = move |ev: MouseEvent| {
		let Some(el) = node_ref.get_untracked() else {
			return;
		};
		let bounds = Bounds::from(&el.get_bounding_client_rect());
		offset.set(follow_offset(ev.client_x() as f64, bounds.center_x(), fraction));
	};
	let on_mouseleave = move |_: MouseEvent| offset.set(0.0);

	view! {
		<span
			node_ref=node_ref
			class="hover-follow"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style=move || {
				format!(
					"display: inline-block; transition: transform 120ms ease-out; \
					transform: translateX({:.2}px);",
					offset.get(),
				)
			}
		>
			{children()}
		</span>
	}
}
