#![forbid(unsafe_code)]

//! Anchored floating placement.
//!
//! [`Popover`] positions a panel relative to an anchor rectangle: on the
//! preferred side, start-aligned with the anchor's left edge, separated by
//! `gap` rows. When the preferred side lacks room and the opposite side has
//! more, the panel flips. With `shift` enabled the panel slides left so it
//! stays inside the viewport instead of being cut off.
//!
//! The result is a [`FloatingLayout`] carrying the area, the side actually
//! used, and a z-index so hosts can order overlay passes.
//!
//! # Example
//!
//! ```
//! use seekbox_core::geometry::Rect;
//! use seekbox_widgets::popover::{Placement, Popover};
//!
//! let anchor = Rect::new(10, 5, 20, 3);
//! let layout = Popover::new(anchor, Placement::Below)
//!     .max_height(4)
//!     .with_border(true)
//!     .compute(Rect::new(0, 0, 80, 24))
//!     .unwrap();
//! assert_eq!(layout.area, Rect::new(10, 8, 22, 6));
//! ```

use seekbox_core::geometry::Rect;

/// Default stacking order for floating panels.
pub const DEFAULT_Z_INDEX: u16 = 50;

/// Side of the anchor to place the panel on. Both are start-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Above the anchor.
    Above,
    /// Below the anchor.
    Below,
}

impl Placement {
    /// The opposite side.
    pub fn flip(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

/// Resolved position of a floating panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingLayout {
    /// Outer area, border included.
    pub area: Rect,
    /// Side actually used after flipping.
    pub placement: Placement,
    /// Stacking order.
    pub z_index: u16,
    /// Whether the area includes a one-cell border.
    pub bordered: bool,
}

impl FloatingLayout {
    /// Area inside the border.
    pub fn inner(&self) -> Rect {
        if self.bordered {
            self.area.inset(1)
        } else {
            self.area
        }
    }
}

/// Anchored floating panel configuration.
#[derive(Debug, Clone)]
pub struct Popover {
    /// The rectangle to position against.
    pub anchor: Rect,
    /// Preferred side.
    pub placement: Placement,
    /// Content width; `None` uses the anchor width.
    pub width: Option<u16>,
    /// Maximum content height; `None` fills the available space.
    pub max_height: Option<u16>,
    /// Draw a one-cell border.
    pub bordered: bool,
    /// Rows between anchor and panel.
    pub gap: u16,
    /// Flip to the opposite side when the preferred side is too small.
    pub auto_flip: bool,
    /// Slide horizontally to stay inside the viewport.
    pub shift: bool,
    /// Stacking order reported in the layout.
    pub z_index: u16,
}

impl Popover {
    /// Create a popover anchored to `anchor`.
    pub fn new(anchor: Rect, placement: Placement) -> Self {
        Self {
            anchor,
            placement,
            width: None,
            max_height: None,
            bordered: false,
            gap: 0,
            auto_flip: true,
            shift: true,
            z_index: DEFAULT_Z_INDEX,
        }
    }

    /// Set the content width.
    #[must_use]
    pub fn width(mut self, w: u16) -> Self {
        self.width = Some(w);
        self
    }

    /// Set the maximum content height.
    #[must_use]
    pub fn max_height(mut self, h: u16) -> Self {
        self.max_height = Some(h);
        self
    }

    /// Enable or disable the border.
    #[must_use]
    pub fn with_border(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Set the gap between anchor and panel.
    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Enable or disable flipping.
    #[must_use]
    pub fn auto_flip(mut self, flip: bool) -> Self {
        self.auto_flip = flip;
        self
    }

    /// Enable or disable horizontal shifting.
    #[must_use]
    pub fn shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn z_index(mut self, z: u16) -> Self {
        self.z_index = z;
        self
    }

    fn border_overhead(&self) -> u16 {
        if self.bordered { 2 } else { 0 }
    }

    /// Resolve the panel's position inside `viewport`.
    ///
    /// Returns `None` when nothing fits.
    pub fn compute(&self, viewport: Rect) -> Option<FloatingLayout> {
        let content_width = self.width.unwrap_or(self.anchor.width);
        if content_width == 0 || viewport.is_empty() {
            return None;
        }

        let placement = if self.auto_flip {
            self.resolve_placement(viewport)
        } else {
            self.placement
        };

        let total_width = content_width.saturating_add(self.border_overhead());
        let x = if self.shift {
            clamp_x(self.anchor.x, total_width, viewport)
        } else {
            self.anchor.x
        };
        let width = total_width.min(viewport.right().saturating_sub(x));

        let space = self.available_space(placement, viewport);
        let wanted = self
            .max_height
            .map_or(space, |h| h.saturating_add(self.border_overhead()));
        let height = wanted.min(space);

        let y = match placement {
            Placement::Below => self.anchor.bottom().saturating_add(self.gap),
            Placement::Above => self.anchor.y.saturating_sub(self.gap).saturating_sub(height),
        };

        if width == 0 || height == 0 || height < self.border_overhead() + 1 {
            return None;
        }
        Some(FloatingLayout {
            area: Rect::new(x, y, width, height),
            placement,
            z_index: self.z_index,
            bordered: self.bordered,
        })
    }

    fn resolve_placement(&self, viewport: Rect) -> Placement {
        let primary = self.placement;
        let needed = self.needed_space();
        let available = self.available_space(primary, viewport);
        if available >= needed {
            return primary;
        }

        let flipped = primary.flip();
        let flipped_available = self.available_space(flipped, viewport);
        if flipped_available > available {
            flipped
        } else {
            primary
        }
    }

    /// Rows available on `placement`'s side after the gap.
    fn available_space(&self, placement: Placement, viewport: Rect) -> u16 {
        match placement {
            Placement::Above => self.anchor.y.saturating_sub(viewport.y),
            Placement::Below => viewport.bottom().saturating_sub(self.anchor.bottom()),
        }
        .saturating_sub(self.gap)
    }

    fn needed_space(&self) -> u16 {
        self.max_height
            .unwrap_or(1)
            .saturating_add(self.border_overhead())
    }
}

/// Clamp x so a panel of `width` stays inside the viewport.
fn clamp_x(x: u16, width: u16, viewport: Rect) -> u16 {
    let right = viewport.right();
    if x.saturating_add(width) > right {
        right.saturating_sub(width).max(viewport.x)
    } else {
        x.max(viewport.x)
    }
}
