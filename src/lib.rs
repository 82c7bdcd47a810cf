//! Band-parallel recursive ray tracer.
//!
//! Casts camera rays into a scene of reflective shapes, shades each hit with
//! a stochastic reflection model, and renders frames as horizontal bands
//! spread across a worker thread pool. The display surface and scene
//! authoring live outside this crate; [`screen::Screen`] and
//! [`scene::SceneQuery`] are the contracts they plug into.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod geometry;
pub mod material;
pub mod parallel;
pub mod pool;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod screen;
