//! Decorative animation layer: constellation geometry, time-derived motion,
//! pointer and scroll tracking, the floating-shape scene, and canvas rendering.

pub mod animation;
pub mod clock;
mod component;
pub mod config;
pub mod geometry;
pub mod pointer;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod scroll;
pub mod state;
pub mod types;

pub use component::DecorCanvas;
pub use scheduler::use_frame_clock;
