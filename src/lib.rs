//! # stackui
//!
//! The core of an immediate-mode UI toolkit: a stacked context state machine
//! and a CSS-like cascading style resolver.
//!
//! Widget code calls into a [`Context`](context::Context) once per frame. The
//! context sequences window and draw scopes, layers one-shot and window-scoped
//! overrides, and answers hover and click queries. It drives host-supplied
//! [`Painter`](context::Painter) and [`Input`](context::Input) backends and
//! owns no rendering of its own. Widgets look up colors, images and fonts
//! through a [`Style`](style::Style), which resolves each selector against an
//! optional per-instance sheet and a process-wide default sheet.
//!
//! ## Core Systems
//!
//! - **[`style`]**: style-sheet tokenizer, parser, typed values, whitelists, tables, resolver
//! - **[`context`]**: window/draw scopes, override layers, hit-testing facade, configuration
//! - **[`widgets`]**: reference widgets: progress bar, sprite button
//! - **[`testing`]**: headless recording painter, scripted input, snapshot helpers
//! - **[`geometry`]**: Position and Rect primitives

// Foundation
pub mod geometry;

// Core systems
pub mod context;
pub mod style;

// Widgets
pub mod widgets;

// Headless collaborators
pub mod testing;
