//! HTML text serializer sink.

use std::borrow::Cow;

use crate::error::{ReplaceError, Result};
use crate::sink::{Tag, TagSink};

/// Sink that turns emission events into HTML text.
///
/// Escaping follows the HTML fragment serialization rules: text escapes
/// `&`, `<`, `>` and no-break spaces, attribute values escape `&`, `"` and
/// no-break spaces. Void elements get no closing tag.
#[derive(Debug, Default)]
pub struct HtmlSerializer {
    out: String,
}

impl HtmlSerializer {
    /// Create an empty serializer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with preallocated output capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
        }
    }

    /// Markup written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the serializer and return the markup.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

impl TagSink for HtmlSerializer {
    fn open(&mut self, tag: &Tag<'_>) -> Result<()> {
        self.out.push('<');
        self.out.push_str(tag.name());
        for (name, value) in tag.attrs() {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attr(value));
            self.out.push('"');
        }
        self.out.push('>');
        Ok(())
    }

    fn close(&mut self, tag: &Tag<'_>) -> Result<()> {
        if !tag.is_void() {
            self.out.push_str("</");
            self.out.push_str(tag.name());
            self.out.push('>');
        }
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<()> {
        self.out.push_str(&escape_text(content));
        Ok(())
    }

    fn comment(&mut self, content: &str) -> Result<()> {
        self.out.push_str("<!--");
        self.out.push_str(content);
        self.out.push_str("-->");
        Ok(())
    }

    fn raw(&mut self, html: &str) -> Result<()> {
        self.out.push_str(html);
        Ok(())
    }

    fn set_attribute(&mut self, tag: &Tag<'_>, _name: &str, _value: Option<&str>) -> Result<()> {
        Err(ReplaceError::unsupported("set_attribute", tag.name()))
    }

    fn bind_event(&mut self, tag: &Tag<'_>, _event: &str, _handler: &str) -> Result<()> {
        Err(ReplaceError::unsupported("bind_event", tag.name()))
    }
}

/// Escape text content.
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape an attribute value for a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(input: &str, attr_mode: bool) -> Cow<'_, str> {
    let needs_escape = |ch: char| match ch {
        '&' | '\u{a0}' => true,
        '"' => attr_mode,
        '<' | '>' => !attr_mode,
        _ => false,
    };
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            '"' if attr_mode => result.push_str("&quot;"),
            '<' if !attr_mode => result.push_str("&lt;"),
            '>' if !attr_mode => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}
