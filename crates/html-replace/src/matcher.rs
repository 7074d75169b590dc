//! Match table: resolved selectors keyed by node identity.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

use crate::error::{ReplaceError, Result};

/// Maps matched elements to the index of their replacement callback.
///
/// Keys are arena node ids, so two structurally identical elements at
/// different positions are distinct entries. Only descendants of the
/// traversal scope are recorded.
#[derive(Debug, Default)]
pub struct MatchTable {
    targets: HashMap<NodeId, usize>,
    unmatched: Vec<String>,
}

impl MatchTable {
    /// Resolve `selectors` inside `scope`.
    ///
    /// Selectors are processed in order; an element matched by several
    /// selectors maps to the last one. A selector matching nothing is not an
    /// error and is listed in [`unmatched_selectors`](Self::unmatched_selectors).
    ///
    /// # Errors
    ///
    /// Returns `ReplaceError::InvalidSelector` for the first selector the
    /// selector engine rejects.
    pub fn build<'s>(
        scope: ElementRef<'_>,
        selectors: impl IntoIterator<Item = &'s str>,
    ) -> Result<Self> {
        let mut table = Self::default();

        for (index, source) in selectors.into_iter().enumerate() {
            let selector = parse_selector(source)?;
            let mut matched = 0_usize;

            for element in scope.select(&selector) {
                if element.id() == scope.id() {
                    continue;
                }
                if let Some(previous) = table.targets.insert(element.id(), index) {
                    tracing::trace!(
                        "Selector #{index} overrides selector #{previous} for <{}>",
                        element.value().name()
                    );
                }
                matched += 1;
            }

            tracing::debug!("Selector `{source}` matched {matched} element(s)");
            if matched == 0 {
                table.unmatched.push(source.to_owned());
            }
        }

        Ok(table)
    }

    /// Callback index for a node, if it was matched.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<usize> {
        self.targets.get(&node).copied()
    }

    /// Number of matched elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no element was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Selectors that matched no element inside the scope.
    #[must_use]
    pub fn unmatched_selectors(&self) -> &[String] {
        &self.unmatched
    }

    pub(crate) fn into_unmatched_selectors(self) -> Vec<String> {
        self.unmatched
    }
}

/// Parse a selector string, keeping the selector in the error.
fn parse_selector(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| ReplaceError::InvalidSelector {
        selector: source.to_owned(),
        message: e.to_string(),
    })
}
