//! Ordered selector to callback mapping supplied by the caller.

use std::fmt;

use scraper::ElementRef;

use crate::error::Result;
use crate::sink::TagSink;

/// Replacement callback: writes the replacement for one matched element.
///
/// The callback receives the downstream sink, so whatever it emits goes
/// straight to the output. It should emit complete elements.
pub type ReplaceFn<'r> = dyn FnMut(&mut dyn TagSink, ElementRef<'_>) -> Result<()> + 'r;

/// Selectors and their replacement callbacks, in insertion order.
///
/// Order matters: when two selectors match the same element, the callback
/// of the selector inserted later is used.
#[derive(Default)]
pub struct Replacements<'r> {
    entries: Vec<(String, Box<ReplaceFn<'r>>)>,
}

impl<'r> Replacements<'r> {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selector and its callback.
    ///
    /// Inserting a selector that is already present replaces its callback
    /// but keeps the original position.
    pub fn insert<F>(&mut self, selector: impl Into<String>, replace: F)
    where
        F: FnMut(&mut dyn TagSink, ElementRef<'_>) -> Result<()> + 'r,
    {
        let selector = selector.into();
        let replace: Box<ReplaceFn<'r>> = Box::new(replace);
        match self.entries.iter_mut().find(|(existing, _)| *existing == selector) {
            Some(entry) => entry.1 = replace,
            None => self.entries.push((selector, replace)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<F>(mut self, selector: impl Into<String>, replace: F) -> Self
    where
        F: FnMut(&mut dyn TagSink, ElementRef<'_>) -> Result<()> + 'r,
    {
        self.insert(selector, replace);
        self
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no selector was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selectors in insertion order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(selector, _)| selector.as_str())
    }

    pub(crate) fn callback_mut(&mut self, index: usize) -> Option<&mut ReplaceFn<'r>> {
        self.entries
            .get_mut(index)
            .map(|(_, replace)| &mut **replace)
    }
}

impl fmt::Debug for Replacements<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.selectors()).finish()
    }
}
