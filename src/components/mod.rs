//! Page building blocks: the decorative layer and its small scroll/hover helpers.

pub mod decor;
mod hover_follow;
mod marquee;
mod reveal;

pub use hover_follow::HoverFollow;
pub use marquee::Marquee;
pub use reveal::{InViewEntrance, ScrollParallax, ScrollReveal};
