#![forbid(unsafe_code)]

//! Options, filtering, and selection values.
//!
//! Everything here is pure: filtering borrows the caller's options and
//! selection transitions return new values instead of mutating. The widget
//! hands the result to its owner, who decides whether to store it.

use std::fmt;

/// A selectable entry: `value` is the identity key, `label` the display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Display text.
    pub label: String,
    /// Identity key.
    pub value: String,
}

impl SelectOption {
    /// Create an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Custom match predicate: `(option, input) -> keep`.
pub type OptionMatcher = dyn Fn(&SelectOption, &str) -> bool;

/// Case-insensitive substring test of `input` within the option's label.
///
/// Empty input matches every option.
pub fn default_matches(option: &SelectOption, input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    option.label.to_lowercase().contains(&input.to_lowercase())
}

/// Options that match `input`, in their original order.
///
/// Uses `matcher` when provided, otherwise [`default_matches`].
pub fn filter_options<'a>(
    options: &'a [SelectOption],
    input: &str,
    matcher: Option<&OptionMatcher>,
) -> Vec<&'a SelectOption> {
    match matcher {
        Some(matches) => options.iter().filter(|o| matches(o, input)).collect(),
        None => options.iter().filter(|o| default_matches(o, input)).collect(),
    }
}

/// The chosen option(s), shaped by selection mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// At most one option.
    Single(Option<SelectOption>),
    /// Zero or more options, unique by value, in insertion order.
    Multiple(Vec<SelectOption>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl Selection {
    /// An empty selection for the given mode.
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Self::Multiple(Vec::new())
        } else {
            Self::Single(None)
        }
    }

    /// Multi-select transition: remove `option` if its value is present,
    /// otherwise append it.
    ///
    /// A `Single` selection starts a fresh multiple selection holding only
    /// `option`.
    #[must_use]
    pub fn toggled(&self, option: &SelectOption) -> Self {
        match self {
            Self::Multiple(items) => {
                if items.iter().any(|o| o.value == option.value) {
                    Self::Multiple(
                        items
                            .iter()
                            .filter(|o| o.value != option.value)
                            .cloned()
                            .collect(),
                    )
                } else {
                    let mut next = items.clone();
                    next.push(option.clone());
                    Self::Multiple(next)
                }
            }
            Self::Single(_) => Self::Multiple(vec![option.clone()]),
        }
    }

    /// Single-select transition: exactly `option`.
    #[must_use]
    pub fn replaced(option: &SelectOption) -> Self {
        Self::Single(Some(option.clone()))
    }

    /// Whether an option with `value` is selected.
    pub fn contains(&self, value: &str) -> bool {
        self.as_slice().iter().any(|o| o.value == value)
    }

    /// Number of selected options.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected options as a slice.
    pub fn as_slice(&self) -> &[SelectOption] {
        match self {
            Self::Single(Some(o)) => std::slice::from_ref(o),
            Self::Single(None) => &[],
            Self::Multiple(items) => items,
        }
    }

    /// Iterate selected options in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.as_slice().iter()
    }

    /// The single selected option, if this is a single selection.
    pub fn single(&self) -> Option<&SelectOption> {
        match self {
            Self::Single(o) => o.as_ref(),
            Self::Multiple(_) => None,
        }
    }

    /// Whether this selection is in multiple mode.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Apple", "apple"),
            SelectOption::new("Banana", "banana"),
            SelectOption::new("Cherry", "cherry"),
        ]
    }

    fn labels(list: &[&SelectOption]) -> Vec<String> {
        list.iter().map(|o| o.label.clone()).collect()
    }

    #[test]
    fn empty_input_keeps_everything() {
        let opts = fruits();
        assert_eq!(filter_options(&opts, "", None).len(), 3);
    }

    #[test]
    fn filter_is_case_insensitive_and_ordered() {
        let opts = fruits();
        assert_eq!(labels(&filter_options(&opts, "AN", None)), ["Banana"]);
        assert_eq!(labels(&filter_options(&opts, "e", None)), ["Apple", "Cherry"]);
        assert!(filter_options(&opts, "xyz", None).is_empty());
    }

    #[test]
    fn custom_matcher_replaces_default() {
        let opts = fruits();
        let starts_with = |o: &SelectOption, input: &str| o.value.starts_with(input);
        let result = filter_options(&opts, "ch", Some(&starts_with));
        assert_eq!(labels(&result), ["Cherry"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let opts = fruits();
        let s = Selection::empty(true).toggled(&opts[0]).toggled(&opts[1]);
        assert_eq!(s, Selection::Multiple(vec![opts[0].clone(), opts[1].clone()]));
        let s = s.toggled(&opts[0]);
        assert_eq!(s, Selection::Multiple(vec![opts[1].clone()]));
    }

    #[test]
    fn toggle_matches_by_value_only() {
        let a = SelectOption::new("Apple", "apple");
        let renamed = SelectOption::new("Green apple", "apple");
        let s = Selection::Multiple(vec![a]).toggled(&renamed);
        assert!(s.is_empty());
    }

    #[test]
    fn toggling_single_starts_multiple() {
        let opts = fruits();
        let s = Selection::Single(Some(opts[2].clone())).toggled(&opts[0]);
        assert_eq!(s, Selection::Multiple(vec![opts[0].clone()]));
    }

    #[test]
    fn replaced_is_exactly_one() {
        let opts = fruits();
        let s = Selection::replaced(&opts[1]);
        assert_eq!(s.single(), Some(&opts[1]));
        assert_eq!(s.len(), 1);
        assert!(!s.is_multiple());
    }

    #[test]
    fn accessors() {
        let opts = fruits();
        let s = Selection::Multiple(opts.clone());
        assert!(s.contains("cherry"));
        assert!(!s.contains("date"));
        assert_eq!(s.iter().count(), 3);
        assert_eq!((&s).into_iter().next(), Some(&opts[0]));
        assert!(Selection::default().is_empty());
        assert_eq!(Selection::empty(false), Selection::Single(None));
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(SelectOption::new("Date", "date").to_string(), "Date");
    }
}
