// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Two-ball loading animation engine.
//!
//! Two circles slide past each other, growing and shrinking along the way,
//! and the region where they overlap is painted in a third blend color.
//! The crate splits that into a pure frame calculator and a small timing
//! state machine, with the host owning the surface and the clock.
//!
//! # Key entry points
//!
//! - [`view::LoadingView`] - host-facing facade (start/stop, setters,
//!   measurement, per-frame descriptors)
//! - [`geometry::compute_frame`] - pure circle/overlap geometry for a given
//!   progress
//! - [`animation::TraversalClock`] - run / pause / reverse / repeat / cancel
//!   state machine
//! - [`options::Options`] - TOML-backed configuration
//! - [`gpu::BallRenderer`] - wgpu render adapter for the frame descriptors
//!
//! # Architecture
//!
//! The host calls [`view::LoadingView::on_frame`] once per drawing pass.
//! That advances the clock, and [`view::LoadingView::frame`] turns the
//! current progress into a [`render::FrameDescriptor`]. Any
//! [`render::RenderAdapter`] can paint it: two filled circles, then the
//! overlap on top.

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod options;
pub mod render;
pub mod sizing;
pub mod util;
pub mod view;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use color::Color;
pub use error::DuoballError;
pub use view::LoadingView;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
