use leptos::prelude::*;

use crate::components::decor::animation::{bob, entrance};
use crate::components::decor::{DecorCanvas, use_frame_clock};
use crate::components::{HoverFollow, InViewEntrance, Marquee, ScrollParallax, ScrollReveal};

const MARQUEE_WORDS: &[&str] = &["DESIGN", "●", "DEVELOP", "●", "DEPLOY", "●", "AUTOMATE", "●"];

const STEPS: &[(&str, &str)] = &[
	("01", "Discovery"),
	("02", "Strategy"),
	("03", "Build"),
	("04", "Optimize"),
];

/// Inline style for an element fading up into place after mount.
fn entrance_style(elapsed: f64, delay: f64) -> String {
	let e = entrance(elapsed, delay, 0.6, 30.0);
	format!("opacity: {:.3}; transform: translateY({:.2}px);", e.opacity, e.offset_y)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let elapsed = use_frame_clock();

	view! {
		<main class="landing">
			<section class="hero" style="position: relative; min-height: 100vh; overflow: hidden;">
				<DecorCanvas />
				<div class="hero-content" style="position: relative; z-index: 1;">
					<h1 style=move || entrance_style(elapsed.get(), 0.1)>
						"We build digital products that convert"
					</h1>
					<p class="subtitle" style=move || entrance_style(elapsed.get(), 0.2)>
						"Sharp design. Clean code. Real results."
					</p>
					<div style=move || entrance_style(elapsed.get(), 0.3)>
						<HoverFollow>
							<a href="#book" class="cta">"Book a call"</a>
						</HoverFollow>
					</div>
				</div>
				<div
					class="scroll-indicator"
					style=move || {
						let e = entrance(elapsed.get(), 0.8, 0.6, 0.0);
						format!(
							"opacity: {:.3}; transform: translateY({:.2}px);",
							e.opacity,
							bob(elapsed.get(), 10.0, 1.5),
						)
					}
				>
					"Scroll"
				</div>
			</section>

			<Marquee words=MARQUEE_WORDS />

			<section class="process">
				<ScrollParallax class="process-heading">
					<InViewEntrance clock=elapsed>
						<h2>"From chaos to clarity"</h2>
					</InViewEntrance>
				</ScrollParallax>
				{STEPS
					.iter()
					.map(|&(number, title)| {
						view! {
							<ScrollReveal class="step">
								<span class="step-number">{number}</span>
								<h3>{title}</h3>
							</ScrollReveal>
						}
					})
					.collect_view()}
			</section>

			<section id="book" class="book"></section>
		</main>
	}
}
