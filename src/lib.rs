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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera control, fit-to-object framing and ray picking for 3D
//! molecular viewers.
//!
//! This crate is the layer between raw pointer input and a rendering
//! backend: it turns drags and wheel events into damped camera motion,
//! frames objects by their bounding volumes and resolves screen clicks into
//! ordered scene hits. It never draws; the backend is reached through
//! [`engine::RenderTarget`].
//!
//! # Key entry points
//!
//! - [`engine::ViewportEngine`] - controller, viewport, picker and frame
//!   loop wired to a renderer and a scene
//! - [`camera::OrbitController`] - orbit/pan/zoom with damping and fitting
//! - [`picking::Picker`] - screen rays and ordered intersections
//! - [`scene::SceneGraph`] - what the camera layer needs from a scene
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame loop
//!
//! Hosts provide a [`frame::FrameScheduler`] (their display refresh
//! signal) and call [`engine::ViewportEngine::frame`] whenever a requested
//! frame fires. Each frame ticks damping and renders only when needed.

pub mod camera;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod viewport;

pub use error::ViewportError;
