//! Error types for HTML replacement.

/// Result alias used by sinks, callbacks and the replacement entry points.
pub type Result<T> = std::result::Result<T, ReplaceError>;

/// Error during selector-driven replacement.
///
/// Every variant aborts the whole call: no partially replaced markup is
/// ever returned.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReplaceError {
    /// Selector string rejected by the selector engine.
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector {
        /// Selector as supplied by the caller.
        selector: String,
        /// Message reported by the selector parser.
        message: String,
    },

    /// Attribute change or event binding on a tag that was already opened.
    ///
    /// Sinks only accept attributes at open time. Hitting this is a bug in
    /// the calling code, not a property of the input document.
    #[error("unsupported mutation: {operation} on already opened <{tag}>")]
    UnsupportedMutation {
        /// Rejected operation (`set_attribute` or `bind_event`).
        operation: &'static str,
        /// Name of the tag the operation targeted.
        tag: String,
    },

    /// `close` arrived with no element open.
    #[error("close of <{tag}> without matching open")]
    UnbalancedClose {
        /// Name of the tag being closed.
        tag: String,
    },
}

impl ReplaceError {
    pub(crate) fn unsupported(operation: &'static str, tag: &str) -> Self {
        Self::UnsupportedMutation {
            operation,
            tag: tag.to_owned(),
        }
    }
}
