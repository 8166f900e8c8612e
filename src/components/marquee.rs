use leptos::prelude::*;

use super::decor::animation::marquee_offset;
use super::decor::use_frame_clock;

const LOOP_DISTANCE: f64 = 960.0;
const LOOP_SECONDS: f64 = 15.0;

/// A strip of words sliding left forever.
#[component]
pub fn Marquee(words: &'static [&'static str]) -> impl IntoView {
	let elapsed = use_frame_clock();
	// Repeat enough copies that the strip never runs dry inside one loop.
	let strip: Vec<&'static str> = words.iter().copied().cycle().take(words.len() * 4).collect();

	view! {
		<section class="marquee">
			<div
				class="marquee-track"
				style=move || {
					format!(
						"display: flex; white-space: nowrap; transform: translateX({:.2}px);",
						marquee_offset(elapsed.get(), LOOP_DISTANCE, LOOP_SECONDS),
					)
				}
			>
				{strip
					.into_iter()
					.map(|word| view! { <span class="marquee-word">{word}</span> })
					.collect_view()}
			</div>
		</section>
	}
}
