#![forbid(unsafe_code)]

//! seekbox public facade crate.
//!
//! Re-exports the types an application needs to host autocomplete widgets:
//! events and the terminal session from `seekbox-core`, the frame and
//! presenter from `seekbox-render`, and the widgets themselves.

pub mod error;

pub use error::{Error, Result, TerminalError};

// --- Core re-exports -------------------------------------------------------

pub use seekbox_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    PasteEvent,
};
pub use seekbox_core::geometry::Rect;
#[cfg(feature = "crossterm")]
pub use seekbox_core::terminal_session::{SessionOptions, TerminalSession};

// --- Render re-exports -----------------------------------------------------

pub use seekbox_render::buffer::Buffer;
pub use seekbox_render::cell::{Cell, PackedRgba, StyleFlags};
pub use seekbox_render::frame::{Frame, HitData, HitId, HitRegion};
pub use seekbox_render::presenter::Presenter;
pub use seekbox_render::style::Style;

// --- Widget re-exports -----------------------------------------------------

pub use seekbox_widgets::autocomplete::{Autocomplete, MouseResult, Visibility};
pub use seekbox_widgets::config::AutocompleteConfig;
pub use seekbox_widgets::options::{SelectOption, Selection};
pub use seekbox_widgets::pointer::{PointerDown, PointerHub};
pub use seekbox_widgets::Widget;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Autocomplete, AutocompleteConfig, Error, Event, Frame, HitId, KeyCode, KeyEvent,
        MouseEvent, PointerDown, PointerHub, Rect, Result, SelectOption, Selection, Style, Widget,
    };

    pub use crate::{core, render, widgets};
}

pub use seekbox_core as core;
pub use seekbox_render as render;
pub use seekbox_widgets as widgets;
