#![forbid(unsafe_code)]

//! Searchable selection input.
//!
//! [`Autocomplete`] combines a text input with a floating list of options
//! filtered by what the user typed. It runs in single-select mode (choosing
//! an option fills the input and closes the list) or multi-select mode
//! (choosing toggles the option and the list stays open; selections show as
//! dismissible chips under the input).
//!
//! # Ownership
//!
//! The selection is owned by the host. The widget reports every change
//! through `on_change` with the fully computed new [`Selection`] and only
//! shows what the host hands back through [`Autocomplete::set_value`].
//!
//! # Time and outside clicks
//!
//! Input-change notification is debounced: the host passes `now` into the
//! event handlers and calls [`Autocomplete::tick`] periodically. Outside
//! clicks are observed through a [`PointerHub`] subscription taken in
//! [`Autocomplete::mount`] and released on unmount or drop.
//!
//! # Hit data convention
//!
//! | Region | Data | Meaning |
//! |--------|------|---------|
//! | `Content` | [`HIT_INPUT`] | the input box |
//! | `Content` | [`HIT_CHIP`] | a chip body |
//! | `Button` | chip index | a chip's dismiss mark |
//! | `Item` | filtered index | an option row |
//! | `Border` | 0 | list frame or the empty-list row |
//!
//! # Rendering
//!
//! [`Widget::render`] draws the base layer (label, input box, description,
//! chips). The list is drawn by [`Autocomplete::render_overlay`] in a second
//! pass so it sits above sibling widgets; its layout reports a z-index for
//! hosts that order several overlays.

use std::cell::Cell;
use std::fmt;

use seekbox_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use seekbox_core::geometry::Rect;
use seekbox_core::text_width::{display_width, truncate_to_width};
use seekbox_render::cell::PackedRgba;
use seekbox_render::frame::{Frame, HitData, HitId, HitRegion};
use seekbox_render::style::Style;
use web_time::Instant;

use crate::config::{AutocompleteConfig, DEFAULT_PLACEHOLDER};
use crate::debounce::Debouncer;
use crate::input::TextInput;
use crate::options::{OptionMatcher, SelectOption, Selection, filter_options};
use crate::pointer::{PointerHub, PointerSubscription};
use crate::popover::{FloatingLayout, Placement, Popover};
use crate::{Widget, clear_area, draw_border, draw_text};

/// Hit data for the input box.
pub const HIT_INPUT: HitData = 0;
/// Hit data for a chip body.
pub const HIT_CHIP: HitData = 1;

/// Rows taken by the bordered input box.
const INPUT_BOX_HEIGHT: u16 = 3;

/// Cells a chip adds around its label: ` label × `.
const CHIP_PADDING: usize = 4;

const ACCENT: PackedRgba = PackedRgba::rgb(0x3b, 0x82, 0xf6);

/// Receives every new selection.
pub type ChangeHandler = Box<dyn FnMut(Selection)>;
/// Receives the debounced input text.
pub type InputChangeHandler = Box<dyn FnMut(&str)>;
/// Produces the display text for an option row.
pub type OptionRenderer = Box<dyn Fn(&SelectOption) -> String>;

/// Whether the option list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// List hidden.
    #[default]
    Closed,
    /// List shown.
    Open,
}

/// Outcome of [`Autocomplete::handle_mouse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseResult {
    /// Not for this widget, or nothing to do.
    Ignored,
    /// The input was pressed; the widget is focused and open.
    Opened,
    /// The option at this filtered index was chosen.
    Activated(usize),
    /// The chip at this selection index was dismissed.
    Dismissed(usize),
    /// The highlighted row moved under the pointer.
    HoverChanged,
    /// The wheel moved the highlight.
    Scrolled,
}

/// Searchable single- or multi-select input.
pub struct Autocomplete {
    id: HitId,
    options: Vec<SelectOption>,
    value: Selection,
    multiple: bool,
    disabled: bool,
    focused: bool,
    label: Option<String>,
    description: Option<String>,
    placeholder: String,
    input: TextInput,
    visibility: Visibility,
    highlighted: usize,
    config: AutocompleteConfig,
    debounce: Debouncer<String>,
    on_change: ChangeHandler,
    on_input_change: Option<InputChangeHandler>,
    matcher: Option<Box<OptionMatcher>>,
    render_option: Option<OptionRenderer>,
    pointer: Option<PointerSubscription>,
    highlight_style: Style,
    chip_style: Style,
    /// Input box from the last render; the list anchors to it.
    anchor: Cell<Rect>,
    /// First visible list row from the last overlay render.
    list_offset: Cell<usize>,
}

impl fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .field("value", &self.value)
            .field("multiple", &self.multiple)
            .field("disabled", &self.disabled)
            .field("input", &self.input.value())
            .field("visibility", &self.visibility)
            .field("highlighted", &self.highlighted)
            .field("mounted", &self.pointer.is_some())
            .finish_non_exhaustive()
    }
}

impl Autocomplete {
    /// Create a single-select autocomplete over `options`.
    pub fn new(options: Vec<SelectOption>, on_change: impl FnMut(Selection) + 'static) -> Self {
        let config = AutocompleteConfig::default();
        let mut ac = Self {
            id: HitId::default(),
            options,
            value: Selection::empty(false),
            multiple: false,
            disabled: false,
            focused: false,
            label: None,
            description: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            input: TextInput::new(),
            visibility: Visibility::Closed,
            highlighted: 0,
            debounce: Debouncer::new(config.debounce),
            config,
            on_change: Box::new(on_change),
            on_input_change: None,
            matcher: None,
            render_option: None,
            pointer: None,
            highlight_style: Style::new().reverse(),
            chip_style: Style::new().fg(PackedRgba::WHITE).bg(ACCENT),
            anchor: Cell::new(Rect::default()),
            list_offset: Cell::new(0),
        };
        ac.sync_input();
        ac
    }

    // --- Builder methods ---

    /// Set the hit ID used for mouse routing (builder).
    #[must_use]
    pub fn with_hit_id(mut self, id: HitId) -> Self {
        self.id = id;
        self
    }

    /// Switch to multi-select mode (builder).
    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        if self.value.is_empty() {
            self.value = Selection::empty(multiple);
        }
        self
    }

    /// Set the initial selection (builder).
    #[must_use]
    pub fn with_value(mut self, value: Selection) -> Self {
        self.set_value(value);
        self
    }

    /// Disable the widget (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Caption above the input (builder).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Helper text under the input (builder).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Placeholder for the empty input (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self.sync_input();
        self
    }

    /// Debounced input-change handler (builder).
    #[must_use]
    pub fn with_on_input_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_input_change = Some(Box::new(handler));
        self
    }

    /// Custom match predicate replacing the label substring test (builder).
    #[must_use]
    pub fn with_filter(mut self, matcher: impl Fn(&SelectOption, &str) -> bool + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Custom row text (builder).
    #[must_use]
    pub fn with_render_option(mut self, render: impl Fn(&SelectOption) -> String + 'static) -> Self {
        self.render_option = Some(Box::new(render));
        self
    }

    /// Tunables (builder). Out-of-range values are clamped.
    #[must_use]
    pub fn with_config(mut self, config: AutocompleteConfig) -> Self {
        let config = config.validated();
        self.debounce.set_period(config.debounce);
        self.config = config;
        self.sync_input();
        self
    }

    /// Style for the highlighted row (builder).
    #[must_use]
    pub fn with_highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    /// Style for chips (builder).
    #[must_use]
    pub fn with_chip_style(mut self, style: Style) -> Self {
        self.chip_style = style;
        self
    }

    // --- Accessors ---

    /// Hit ID used for mouse routing.
    pub fn id(&self) -> HitId {
        self.id
    }

    /// All options, unfiltered.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace the options. The highlight is clamped to the new list.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.clamp_highlight();
    }

    /// The selection last handed in by the host.
    pub fn value(&self) -> &Selection {
        &self.value
    }

    /// Store the host's selection.
    pub fn set_value(&mut self, value: Selection) {
        self.value = value;
    }

    /// Current input text.
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// Whether multi-select mode is on.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the widget is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable. Disabling closes the list.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
        self.sync_input();
    }

    /// Whether the widget has keyboard focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Give or take keyboard focus. Gaining focus opens the list; losing it
    /// leaves the list as it was.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.sync_input();
        if focused {
            self.open();
        }
    }

    /// List visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the list is showing.
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Highlighted filtered index, or `None` when nothing matches.
    pub fn highlighted(&self) -> Option<usize> {
        (self.highlighted < self.filtered_len()).then_some(self.highlighted)
    }

    /// Options matching the current input, in original order.
    pub fn filtered(&self) -> Vec<&SelectOption> {
        filter_options(&self.options, self.input.value(), self.matcher.as_deref())
    }

    fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Whether an input-change notification is waiting.
    pub fn has_pending_input_change(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Input box from the last render.
    pub fn anchor(&self) -> Rect {
        self.anchor.get()
    }

    // --- Lifecycle ---

    /// Start listening for screen-wide pointer presses.
    pub fn mount(&mut self, hub: &PointerHub) {
        self.pointer = Some(hub.subscribe());
    }

    /// Stop listening and drop any pending input-change notification.
    pub fn unmount(&mut self) {
        self.pointer = None;
        self.debounce.cancel();
    }

    /// Whether a pointer subscription is held.
    pub fn is_mounted(&self) -> bool {
        self.pointer.is_some()
    }

    // --- Transitions ---

    /// Show the list. No effect while disabled.
    ///
    /// Presses queued while the list was closed are discarded.
    pub fn open(&mut self) {
        if self.disabled || self.is_open() {
            return;
        }
        if let Some(sub) = &self.pointer {
            sub.drain();
        }
        self.visibility = Visibility::Open;
        self.clamp_highlight();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "autocomplete.open", id = self.id.id());
    }

    /// Hide the list.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.visibility = Visibility::Closed;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "autocomplete.close", id = self.id.id());
    }

    fn sync_input(&mut self) {
        self.input.set_focused(self.focused && !self.disabled);
        let placeholder = if self.disabled {
            self.config.loading_text.clone()
        } else {
            self.placeholder.clone()
        };
        self.input.set_placeholder(placeholder);
        let style = if self.disabled { Style::new().dim() } else { Style::new() };
        self.input = std::mem::take(&mut self.input)
            .with_style(style)
            .with_placeholder_style(Style::new().dim());
    }

    fn clamp_highlight(&mut self) {
        let len = self.filtered_len();
        self.highlighted = self.highlighted.min(len.saturating_sub(1));
    }

    fn schedule_input_change(&mut self, now: Instant) {
        if self.on_input_change.is_some() {
            self.debounce.schedule(self.input.value().to_string(), now);
        }
    }

    #[cfg(feature = "tracing")]
    fn log_selection_change(&self, action: &str, next: &Selection) {
        tracing::debug!(
            message = "autocomplete.selection",
            action,
            id = self.id.id(),
            selected_count = next.len(),
            multiple = self.multiple
        );
    }

    fn emit_change(&mut self, next: Selection, _action: &str) {
        #[cfg(feature = "tracing")]
        self.log_selection_change(_action, &next);
        (self.on_change)(next);
    }

    /// Choose the option at `index` in the filtered list.
    fn activate(&mut self, index: usize, now: Instant) -> bool {
        let Some(option) = self.filtered().get(index).map(|o| (*o).clone()) else {
            return false;
        };
        if self.multiple {
            let next = self.value.toggled(&option);
            self.emit_change(next, "toggle");
        } else {
            self.emit_change(Selection::replaced(&option), "select");
            if self.input.value() != option.label {
                self.input.set_value(option.label);
                self.schedule_input_change(now);
            }
            self.close();
        }
        self.clamp_highlight();
        true
    }

    /// Deselect the chip at `index` in the current selection.
    fn dismiss(&mut self, index: usize) -> bool {
        let Some(option) = self.value.as_slice().get(index).cloned() else {
            return false;
        };
        let next = self.value.toggled(&option);
        self.emit_change(next, "dismiss");
        true
    }

    fn move_highlight(&mut self, forward: bool) -> bool {
        let len = self.filtered_len();
        if len == 0 {
            return false;
        }
        let current = self.highlighted.min(len - 1);
        self.highlighted = if forward {
            (current + 1) % len
        } else if current == 0 {
            len - 1
        } else {
            current - 1
        };
        true
    }

    // --- Input handling ---

    /// Close the list if a press landed outside this widget since the last poll.
    pub fn poll_pointer(&mut self) -> bool {
        let outside = match &self.pointer {
            Some(sub) => sub.drain().iter().any(|down| !down.hits(self.id)),
            None => return false,
        };
        if outside && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    /// Deliver a pending input-change notification whose quiet period has
    /// passed, and process outside presses. Returns whether anything happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        let closed = self.poll_pointer();
        let fired = match self.debounce.poll(now) {
            Some(text) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "autocomplete.input_change", id = self.id.id(), len = text.len());
                if let Some(handler) = self.on_input_change.as_mut() {
                    handler(&text);
                }
                true
            }
            None => false,
        };
        closed || fired
    }

    /// Handle a key, paste, or focus event. Keys are only handled while focused.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        self.poll_pointer();
        if self.disabled {
            return false;
        }
        match event {
            Event::Focus(true) if self.focused => {
                self.open();
                true
            }
            Event::Key(key) if key.is_actionable() && self.focused => self.handle_key(key, now),
            Event::Paste(_) if self.focused => self.edit(event, now),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if self.is_open() {
            match key.code {
                KeyCode::Down => return self.move_highlight(true),
                KeyCode::Up => return self.move_highlight(false),
                KeyCode::Enter => return self.activate(self.highlighted, now),
                KeyCode::Escape => {
                    self.close();
                    return true;
                }
                _ => {}
            }
        }
        self.edit(&Event::Key(*key), now)
    }

    fn edit(&mut self, event: &Event, now: Instant) -> bool {
        let before = self.input.value().to_string();
        if !self.input.handle_event(event) {
            return false;
        }
        if self.input.value() != before {
            self.open();
            self.schedule_input_change(now);
            self.clamp_highlight();
        }
        true
    }

    /// Handle a mouse event routed with its hit-test result.
    pub fn handle_mouse(
        &mut self,
        event: &MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
        now: Instant,
    ) -> MouseResult {
        self.poll_pointer();
        if self.disabled {
            return MouseResult::Ignored;
        }
        let ours = match hit {
            Some((id, region, data)) if id == self.id => Some((region, data)),
            _ => None,
        };
        let Some((region, data)) = ours else {
            return MouseResult::Ignored;
        };
        let index = usize::try_from(data).unwrap_or(usize::MAX);

        match (event.kind, region) {
            (MouseEventKind::Down(MouseButton::Left), HitRegion::Content) if data == HIT_INPUT => {
                self.set_focused(true);
                self.open();
                MouseResult::Opened
            }
            (MouseEventKind::Down(MouseButton::Left), HitRegion::Item) if self.is_open() => {
                if self.activate(index, now) {
                    MouseResult::Activated(index)
                } else {
                    MouseResult::Ignored
                }
            }
            (MouseEventKind::Down(MouseButton::Left), HitRegion::Button) => {
                if self.dismiss(index) {
                    MouseResult::Dismissed(index)
                } else {
                    MouseResult::Ignored
                }
            }
            (MouseEventKind::Moved, HitRegion::Item) if self.is_open() => {
                if index < self.filtered_len() && index != self.highlighted {
                    self.highlighted = index;
                    MouseResult::HoverChanged
                } else {
                    MouseResult::Ignored
                }
            }
            (MouseEventKind::ScrollDown, HitRegion::Item | HitRegion::Border) if self.is_open() => {
                if self.move_highlight(true) {
                    MouseResult::Scrolled
                } else {
                    MouseResult::Ignored
                }
            }
            (MouseEventKind::ScrollUp, HitRegion::Item | HitRegion::Border) if self.is_open() => {
                if self.move_highlight(false) {
                    MouseResult::Scrolled
                } else {
                    MouseResult::Ignored
                }
            }
            _ => MouseResult::Ignored,
        }
    }

    // --- Layout ---

    fn display_text(&self, option: &SelectOption) -> String {
        match &self.render_option {
            Some(render) => render(option),
            None => option.label.clone(),
        }
    }

    /// Chip rectangles and their dismiss marks, wrapped within `width` columns
    /// starting at `(x, y)`.
    fn chip_layout(&self, x: u16, y: u16, width: u16) -> Vec<(Rect, Rect)> {
        if !self.multiple || width == 0 {
            return Vec::new();
        }
        let right = x.saturating_add(width);
        let mut out = Vec::with_capacity(self.value.len());
        let (mut cx, mut cy) = (x, y);
        for option in self.value.iter() {
            // " label × "
            let w = (display_width(&option.label) + CHIP_PADDING).min(usize::from(width)) as u16;
            if cx > x && cx.saturating_add(w) > right {
                cx = x;
                cy = cy.saturating_add(1);
            }
            let chip = Rect::new(cx, cy, w, 1);
            let dismiss = Rect::new(chip.right().saturating_sub(2), cy, 2, 1);
            out.push((chip, dismiss));
            cx = cx.saturating_add(w).saturating_add(1);
        }
        out
    }

    /// Rows the base layer needs at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let mut h = INPUT_BOX_HEIGHT;
        if self.label.is_some() {
            h += 1;
        }
        if self.description.is_some() {
            h += 1;
        }
        let chip_rows = self
            .chip_layout(0, 0, width)
            .last()
            .map_or(0, |(chip, _)| chip.y + 1);
        h + chip_rows
    }

    /// Where the list would be drawn inside `viewport`, if open.
    pub fn list_layout(&self, viewport: Rect) -> Option<FloatingLayout> {
        if !self.is_open() || self.disabled {
            return None;
        }
        let anchor = self.anchor.get();
        if anchor.is_empty() {
            return None;
        }
        let rows = (self.filtered_len().min(usize::from(u16::MAX)) as u16)
            .clamp(1, self.config.max_visible);
        Popover::new(anchor, Placement::Below)
            .width(anchor.width.saturating_sub(2).max(1))
            .max_height(rows)
            .with_border(true)
            .gap(self.config.popover_gap)
            .compute(viewport)
    }

    /// First visible row so the highlight stays in view.
    fn scroll_offset(&self, visible: usize, len: usize) -> usize {
        let mut offset = self.list_offset.get();
        if self.highlighted < offset {
            offset = self.highlighted;
        }
        if visible > 0 && self.highlighted >= offset + visible {
            offset = self.highlighted + 1 - visible;
        }
        offset = offset.min(len.saturating_sub(visible));
        self.list_offset.set(offset);
        offset
    }

    /// Draw the floating list, if open. Call after every base layer is drawn.
    pub fn render_overlay(&self, viewport: Rect, frame: &mut Frame) {
        let Some(layout) = self.list_layout(viewport) else {
            return;
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "AutocompleteList",
            x = layout.area.x,
            y = layout.area.y,
            h = layout.area.height,
            z = layout.z_index
        )
        .entered();

        clear_area(frame, layout.area, Style::new());
        draw_border(frame, layout.area, Style::new().fg(ACCENT));
        frame.register_hit(layout.area, self.id, HitRegion::Border, 0);

        let inner = layout.inner();
        let filtered = self.filtered();
        if filtered.is_empty() {
            draw_text(frame, inner.row(0), &self.config.empty_text, Style::new().dim().italic());
            return;
        }

        let visible = usize::from(inner.height);
        let offset = self.scroll_offset(visible, filtered.len());
        for (row, (index, option)) in filtered
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let row_area = inner.row(row as u16);
            let style = if index == self.highlighted {
                self.highlight_style
            } else {
                Style::new()
            };
            clear_area(frame, row_area, style);
            draw_text(frame, row_area, &self.display_text(option), style);
            frame.register_hit(row_area, self.id, HitRegion::Item, index as HitData);
        }
    }
}

impl Widget for Autocomplete {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Autocomplete",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            self.anchor.set(Rect::default());
            return;
        }
        let mut y = area.y;

        if let Some(label) = &self.label {
            draw_text(frame, Rect::new(area.x, y, area.width, 1), label, Style::new().bold());
            y = y.saturating_add(1);
        }

        let input_box = Rect::new(area.x, y, area.width, INPUT_BOX_HEIGHT).intersection(&area);
        self.anchor.set(input_box);
        let border_style = if self.disabled {
            Style::new().dim()
        } else if self.focused {
            Style::new().fg(ACCENT)
        } else {
            Style::new()
        };
        draw_border(frame, input_box, border_style);
        self.input.render(input_box.inset(1), frame);
        frame.register_hit(input_box, self.id, HitRegion::Content, HIT_INPUT);
        y = y.saturating_add(INPUT_BOX_HEIGHT);

        if let Some(description) = &self.description {
            let row = Rect::new(area.x, y, area.width, 1).intersection(&area);
            draw_text(frame, row, description, Style::new().dim());
            y = y.saturating_add(1);
        }

        for (index, ((chip, dismiss), option)) in self
            .chip_layout(area.x, y, area.width)
            .into_iter()
            .zip(self.value.iter())
            .enumerate()
        {
            let chip = chip.intersection(&area);
            if chip.is_empty() {
                break;
            }
            clear_area(frame, chip, self.chip_style);
            // The dismiss mark always keeps its two cells.
            let room = usize::from(chip.width).saturating_sub(CHIP_PADDING);
            let text = format!(" {} ×", truncate_to_width(&option.label, room));
            draw_text(frame, chip, &text, self.chip_style);
            frame.register_hit(chip, self.id, HitRegion::Content, HIT_CHIP);
            frame.register_hit(dismiss.intersection(&area), self.id, HitRegion::Button, index as HitData);
        }
    }
}
