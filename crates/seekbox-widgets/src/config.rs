#![forbid(unsafe_code)]

//! Autocomplete tunables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Range | Meaning |
//! |----------|---------|-------|---------|
//! | `SEEKBOX_DEBOUNCE_MS` | 300 | 0-5000 | Quiet period before `on_input_change` fires |
//! | `SEEKBOX_MAX_VISIBLE` | 8 | 1-50 | Option rows shown before the list scrolls |
//! | `SEEKBOX_POPOVER_GAP` | 0 | 0-4 | Rows between the input box and the list |
//!
//! Out-of-range values are clamped; unparsable values are ignored.

use web_time::Duration;

/// Default debounce period for input-change notification.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Lower bound for the debounce period.
pub const MIN_DEBOUNCE_MS: u64 = 0;
/// Upper bound for the debounce period.
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Default number of visible option rows.
pub const DEFAULT_MAX_VISIBLE: u16 = 8;
/// Lower bound for visible option rows.
pub const MIN_MAX_VISIBLE: u16 = 1;
/// Upper bound for visible option rows.
pub const MAX_MAX_VISIBLE: u16 = 50;

/// Default gap between the input box and the floating list.
///
/// A terminal row is taller than a small pixel offset, and the input box's
/// bottom border already separates it from the list, so the list sits on the
/// next row. Raise it to detach the list further.
pub const DEFAULT_POPOVER_GAP: u16 = 0;
/// Upper bound for the popover gap.
pub const MAX_POPOVER_GAP: u16 = 4;

/// Placeholder shown in an empty, enabled input.
pub const DEFAULT_PLACEHOLDER: &str = "Search...";
/// Placeholder shown while disabled.
pub const LOADING_PLACEHOLDER: &str = "Loading...";
/// Row shown when nothing matches the input.
pub const EMPTY_MESSAGE: &str = "No matches found";

/// Tunables for [`crate::autocomplete::Autocomplete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// Quiet period before `on_input_change` fires.
    pub debounce: Duration,
    /// Option rows visible before scrolling.
    pub max_visible: u16,
    /// Rows between the input box and the list.
    pub popover_gap: u16,
    /// Placeholder while disabled.
    pub loading_text: String,
    /// Row text for an empty filtered list.
    pub empty_text: String,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            max_visible: DEFAULT_MAX_VISIBLE,
            popover_gap: DEFAULT_POPOVER_GAP,
            loading_text: LOADING_PLACEHOLDER.to_string(),
            empty_text: EMPTY_MESSAGE.to_string(),
        }
    }
}

impl AutocompleteConfig {
    /// Set the debounce period.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the number of visible rows.
    #[must_use]
    pub fn with_max_visible(mut self, rows: u16) -> Self {
        self.max_visible = rows;
        self
    }

    /// Set the gap between input and list.
    #[must_use]
    pub fn with_popover_gap(mut self, gap: u16) -> Self {
        self.popover_gap = gap;
        self
    }

    /// Set the disabled placeholder.
    #[must_use]
    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    /// Set the empty-list message.
    #[must_use]
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads `SEEKBOX_DEBOUNCE_MS`, `SEEKBOX_MAX_VISIBLE`, and
    /// `SEEKBOX_POPOVER_GAP`. Values are clamped to valid ranges.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("SEEKBOX_DEBOUNCE_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.debounce = Duration::from_millis(ms);
        }

        if let Some(val) = lookup("SEEKBOX_MAX_VISIBLE")
            && let Ok(rows) = val.trim().parse::<u16>()
        {
            config.max_visible = rows;
        }

        if let Some(val) = lookup("SEEKBOX_POPOVER_GAP")
            && let Ok(gap) = val.trim().parse::<u16>()
        {
            config.popover_gap = gap;
        }

        config.validated()
    }

    /// Clamp every value into its valid range.
    ///
    /// ```
    /// use seekbox_widgets::config::AutocompleteConfig;
    /// use web_time::Duration;
    ///
    /// let config = AutocompleteConfig::default()
    ///     .with_debounce(Duration::from_secs(60))
    ///     .with_max_visible(0)
    ///     .validated();
    /// assert_eq!(config.debounce.as_millis(), 5_000);
    /// assert_eq!(config.max_visible, 1);
    /// ```
    #[must_use]
    pub fn validated(mut self) -> Self {
        let debounce_ms = self.debounce.as_millis().min(u128::from(u64::MAX)) as u64;
        self.debounce = Duration::from_millis(debounce_ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS));
        self.max_visible = self.max_visible.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE);
        self.popover_gap = self.popover_gap.min(MAX_POPOVER_GAP);
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let debounce_ms = self.debounce.as_millis();
        (u128::from(MIN_DEBOUNCE_MS)..=u128::from(MAX_DEBOUNCE_MS)).contains(&debounce_ms)
            && (MIN_MAX_VISIBLE..=MAX_MAX_VISIBLE).contains(&self.max_visible)
            && self.popover_gap <= MAX_POPOVER_GAP
    }
}
