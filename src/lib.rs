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

//! Core of a 3D article-card browser.
//!
//! Every article becomes a textured card. Cards rest on a Fibonacci sphere
//! or in a centered grid; an orbit camera looks at them, a click focuses a
//! card (and a second click opens it), and animated transitions move cards
//! and camera between layouts. Nothing here talks to a GPU: each repaint
//! produces a [`viewer::RenderFrame`] with camera matrices and per-card
//! model matrices that any renderer can draw.
//!
//! # Key entry points
//!
//! - [`viewer::CardViewer`] - owns everything; `execute` commands, call
//!   `frame` per repaint
//! - [`controller::ViewController`] - sphere/grid switching, focus, reset
//! - [`animation::Animator`] - single-slot timed interpolation with an
//!   injected clock and frame scheduler
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Card textures are built on a background [`loader::CardLoader`] thread
//! and committed as a whole once every article has arrived. The rest of the
//! crate is single-threaded and frame-driven: input is translated by
//! [`input::InputProcessor`] into [`viewer::ViewerCommand`]s, and the view
//! controller is the only code that mutates mode, focus and camera pose.

pub mod animation;
pub mod article;
pub mod camera;
pub mod card;
pub mod controller;
pub mod error;
pub mod input;
pub mod layout;
pub mod loader;
pub mod options;
pub mod picking;
pub mod scene;
pub mod text;
pub mod texture;
pub mod util;
pub mod viewer;

pub use article::{Article, ArticleId};
pub use error::CardViewError;
pub use options::Options;
pub use viewer::{CardViewer, RenderFrame, ViewerCommand, ViewerEvent};
