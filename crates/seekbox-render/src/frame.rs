#![forbid(unsafe_code)]

//! Frame: the render target handed to widgets.
//!
//! A [`Frame`] bundles the cell [`Buffer`] with the cursor request and an
//! optional [`HitGrid`]. Widgets register the rectangles they own while
//! rendering; the host later resolves mouse coordinates back to
//! `(HitId, HitRegion, HitData)` so each widget can tell whether a press
//! landed on it and on which part.

use seekbox_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier for a mouse-addressable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Widget-defined payload stored with a hit cell (e.g. a row index).
pub type HitData = u64;

/// Which part of a widget a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// Not interactive.
    #[default]
    None,
    /// Primary content (e.g. a text field).
    Content,
    /// Decoration around content.
    Border,
    /// One entry of a list; `HitData` carries its index.
    Item,
    /// A clickable control; `HitData` identifies which.
    Button,
}

/// One cell of the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Owning widget, if any.
    pub widget_id: Option<HitId>,
    /// Region within the widget.
    pub region: HitRegion,
    /// Widget payload.
    pub data: HitData,
}

impl HitCell {
    /// Populated hit cell.
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id: Some(widget_id),
            region,
            data,
        }
    }

    /// Whether no widget owns this cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.widget_id.is_none()
    }
}

/// Screen-sized map from cells to widget hit information.
///
/// Later registrations overwrite earlier ones, so overlays registered after
/// base content win.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty grid.
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![HitCell::default(); len],
        }
    }

    /// Grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Hit cell at `(x, y)`.
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mark every cell of `rect` (clipped) as belonging to `widget_id`.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let clipped = rect.intersection(&Rect::from_size(self.width, self.height));
        if clipped.is_empty() {
            return;
        }
        let hit = HitCell::new(widget_id, region, data);
        for y in clipped.y..clipped.bottom() {
            let start = usize::from(y) * usize::from(self.width) + usize::from(clipped.x);
            let end = start + usize::from(clipped.width);
            self.cells[start..end].fill(hit);
        }
    }

    /// Resolve `(x, y)` to its owner, if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        let cell = self.get(x, y)?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    /// Forget all registrations.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Render target for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Cell grid widgets draw into.
    pub buffer: Buffer,
    /// Hit grid, present when mouse routing is enabled.
    pub hit_grid: Option<HitGrid>,
    /// Requested hardware cursor position.
    pub cursor_position: Option<(u16, u16)>,
    /// Whether the cursor should be shown.
    pub cursor_visible: bool,
}

impl Frame {
    /// Frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
            cursor_position: None,
            cursor_visible: true,
        }
    }

    /// Frame with a hit grid of the same size.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            hit_grid: Some(HitGrid::new(width, height)),
            ..Self::new(width, height)
        }
    }

    /// Frame width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Full-frame rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Clear cells, hits, and the cursor request.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = &mut self.hit_grid {
            grid.clear();
        }
        self.cursor_position = None;
    }

    /// Request the hardware cursor at `position`.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    /// Show or hide the cursor.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Register a hit rectangle. Returns `false` when hit testing is off.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        match &mut self.hit_grid {
            Some(grid) => {
                grid.register(rect, id, region, data);
                true
            }
            None => false,
        }
    }

    /// Resolve a screen position against the hit grid.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref()?.hit_test(x, y)
    }
}
