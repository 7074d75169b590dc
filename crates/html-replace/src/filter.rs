//! Replacing sink: swaps matched subtrees for callback output.
//!
//! The filter sits between the emitter and the serializer. It counts depth
//! on every `open`/`close` and, once a matched element opens, runs that
//! element's callback against the downstream sink and swallows every event
//! until the element's own `close` arrives at the same depth. It needs no
//! lookahead and never changes the emitter's traversal.

use crate::error::{ReplaceError, Result};
use crate::matcher::MatchTable;
use crate::replacements::Replacements;
use crate::sink::{Tag, TagSink};

/// Whether events currently reach the downstream sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Passing,
    /// Inside a replaced element opened at depth `since`.
    Suppressing { since: usize },
}

/// Sink decorator that replaces matched elements.
///
/// One instance serves one top-to-bottom walk. A matched element nested in
/// an already replaced element is never passed to its callback.
pub struct ReplacingSink<'t, 'r, S> {
    downstream: S,
    table: &'t MatchTable,
    replacements: &'t mut Replacements<'r>,
    depth: usize,
    state: State,
    replaced: usize,
}

impl<'t, 'r, S: TagSink> ReplacingSink<'t, 'r, S> {
    /// Wrap `downstream`, replacing nodes listed in `table` with the
    /// callbacks of `replacements`.
    pub fn new(
        downstream: S,
        table: &'t MatchTable,
        replacements: &'t mut Replacements<'r>,
    ) -> Self {
        Self {
            downstream,
            table,
            replacements,
            depth: 0,
            state: State::Passing,
            replaced: 0,
        }
    }

    /// Number of callbacks invoked so far.
    #[must_use]
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// Whether a replaced element is currently open.
    #[must_use]
    pub fn is_suppressing(&self) -> bool {
        matches!(self.state, State::Suppressing { .. })
    }

    /// Consume the filter and return the downstream sink.
    pub fn into_inner(self) -> S {
        self.downstream
    }

    fn passing(&self) -> bool {
        self.state == State::Passing
    }
}

impl<S: TagSink> TagSink for ReplacingSink<'_, '_, S> {
    fn open(&mut self, tag: &Tag<'_>) -> Result<()> {
        self.depth += 1;
        if !self.passing() {
            return Ok(());
        }

        let target = tag
            .element()
            .and_then(|element| self.table.get(element.id()).map(|index| (element, index)));
        let Some((element, index)) = target else {
            return self.downstream.open(tag);
        };
        let Some(replace) = self.replacements.callback_mut(index) else {
            return self.downstream.open(tag);
        };

        tracing::trace!("Replacing <{}> at depth {}", tag.name(), self.depth);
        replace(&mut self.downstream, element)?;
        self.replaced += 1;
        self.state = State::Suppressing { since: self.depth };
        Ok(())
    }

    fn close(&mut self, tag: &Tag<'_>) -> Result<()> {
        if self.depth == 0 {
            return Err(ReplaceError::UnbalancedClose {
                tag: tag.name().to_owned(),
            });
        }

        match self.state {
            State::Passing => self.downstream.close(tag)?,
            State::Suppressing { since } if since == self.depth => self.state = State::Passing,
            State::Suppressing { .. } => {}
        }
        self.depth -= 1;
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<()> {
        if self.passing() {
            self.downstream.text(content)?;
        }
        Ok(())
    }

    fn comment(&mut self, content: &str) -> Result<()> {
        if self.passing() {
            self.downstream.comment(content)?;
        }
        Ok(())
    }

    fn raw(&mut self, html: &str) -> Result<()> {
        if self.passing() {
            self.downstream.raw(html)?;
        }
        Ok(())
    }

    fn set_attribute(&mut self, tag: &Tag<'_>, _name: &str, _value: Option<&str>) -> Result<()> {
        Err(ReplaceError::unsupported("set_attribute", tag.name()))
    }

    fn bind_event(&mut self, tag: &Tag<'_>, _event: &str, _handler: &str) -> Result<()> {
        Err(ReplaceError::unsupported("bind_event", tag.name()))
    }
}
