//! Selector-driven element replacement for HTML.
//!
//! Given markup and an ordered mapping from CSS selectors to callbacks, every
//! element matched by a selector is replaced, subtree included, by whatever
//! its callback emits. Everything else is re-serialized unchanged.
//!
//! # Architecture
//!
//! - [`MatchTable`]: resolves selectors to parsed nodes, keyed by node id
//! - [`emit`]: walks elements depth-first and produces [`TagSink`] events
//! - [`ReplacingSink`]: filter that runs callbacks for matched elements and
//!   suppresses their original subtree
//! - [`HtmlSerializer`]: sink that writes the final HTML text
//!
//! Parsing and selector matching are done by `scraper`.
//!
//! # Example
//!
//! ```
//! use html_replace::{Replacements, Tag, replace, write_element};
//!
//! let html = r#"<div><p class="a">old</p><span>keep</span></div>"#;
//! let replacements = Replacements::new().with(".a", |sink, _| {
//!     write_element(sink, &Tag::new("b"), |sink| sink.text("new"))
//! });
//!
//! let result = replace(html, replacements)?;
//! assert_eq!(result, "<div><b>new</b><span>keep</span></div>");
//! # Ok::<(), html_replace::ReplaceError>(())
//! ```

mod config;
pub mod emit;
mod error;
mod filter;
mod matcher;
mod replacements;
mod replacer;
mod serializer;
mod sink;

use scraper::ElementRef;

pub use config::{ConfigError, ParseMode, ReplaceConfig};
pub use error::{ReplaceError, Result};
pub use filter::ReplacingSink;
pub use matcher::MatchTable;
pub use replacements::{ReplaceFn, Replacements};
pub use replacer::{HtmlReplacer, ReplaceOutput};
pub use serializer::HtmlSerializer;
pub use sink::{Tag, TagSink, write_element};

/// Replace every element matched by a selector in `replacements`.
///
/// Uses the default [`ReplaceConfig`]: the input is parsed as a document,
/// the children of `<body>` are re-serialized and the result is trimmed.
///
/// # Errors
///
/// Returns `ReplaceError::InvalidSelector` for a selector the engine
/// rejects, or any error returned by a callback.
pub fn replace(html: &str, replacements: Replacements<'_>) -> Result<String> {
    HtmlReplacer::default().replace(html, replacements)
}

/// Replace every element matched by a single selector.
///
/// # Errors
///
/// Same as [`replace`].
pub fn replace_one<F>(html: &str, selector: &str, replace_with: F) -> Result<String>
where
    F: FnMut(&mut dyn TagSink, ElementRef<'_>) -> Result<()>,
{
    replace(html, Replacements::new().with(selector, replace_with))
}
