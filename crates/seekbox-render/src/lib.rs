#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, and ANSI presentation.
//!
//! # Role in seekbox
//! Widgets draw into a [`frame::Frame`], which bundles the cell grid
//! ([`buffer::Buffer`]) with a cursor request and an optional hit grid for
//! mouse routing. The demo host hands finished frames to the
//! [`presenter::Presenter`], which writes only the cells that changed since
//! the previous frame.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;
pub mod style;
