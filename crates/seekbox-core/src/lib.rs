#![forbid(unsafe_code)]

//! Core: canonical input events, geometry, and terminal lifecycle.
//!
//! # Role in seekbox
//! `seekbox-core` is the input layer. Widgets consume [`event::Event`] values
//! and lay themselves out with [`geometry::Rect`]. The render kernel
//! (`seekbox-render`) depends on this crate only for geometry and text width.
//!
//! # Primary responsibilities
//! - **Event**: keys, mouse, paste, resize, focus, and tick.
//! - **Rect**: terminal-cell rectangles for layout and hit testing.
//! - **Text width**: grapheme-aware display width.
//! - **TerminalSession** (feature `crossterm`): RAII raw mode, alt-screen,
//!   mouse capture, and focus reporting.

pub mod event;
pub mod geometry;
pub mod text_width;

#[cfg(feature = "crossterm")]
pub mod terminal_session;
