//! Emission events and the sink abstraction they flow into.
//!
//! A [`TagSink`] receives a depth-first stream of events: `open`, nested
//! content, then the matching `close`. Attributes travel with the [`Tag`]
//! at open time; sinks in this crate reject later attribute changes.

use std::borrow::Cow;

use scraper::ElementRef;

use crate::error::Result;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Opening tag: name plus ordered attributes.
///
/// Tags built from parsed elements remember their source element so a
/// filter can recognize matched nodes by identity.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    name: Cow<'a, str>,
    attrs: Vec<(Cow<'a, str>, Cow<'a, str>)>,
    element: Option<ElementRef<'a>>,
}

impl<'a> Tag<'a> {
    /// Create a tag with no attributes.
    #[must_use]
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            element: None,
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Tag mirroring a parsed element: same name, same attributes in
    /// source order.
    #[must_use]
    pub fn from_element(element: ElementRef<'a>) -> Self {
        let value = element.value();
        Self {
            name: Cow::Borrowed(value.name()),
            attrs: value
                .attrs
                .iter()
                .map(|(name, value)| {
                    let name = match &name.prefix {
                        Some(prefix) => Cow::Owned(format!("{prefix}:{}", name.local)),
                        None => Cow::Borrowed(&*name.local),
                    };
                    (name, Cow::Borrowed(&**value))
                })
                .collect(),
            element: Some(element),
        }
    }

    /// Tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(name, value)| (name.as_ref(), value.as_ref()))
    }

    /// Parsed element this tag was built from, if any.
    #[must_use]
    pub fn element(&self) -> Option<ElementRef<'a>> {
        self.element
    }

    /// Whether this is an HTML void element (`br`, `img`, ...).
    #[must_use]
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_ref())
    }
}

/// Destination of emission events.
pub trait TagSink {
    /// Start an element.
    fn open(&mut self, tag: &Tag<'_>) -> Result<()>;

    /// End the element most recently opened.
    fn close(&mut self, tag: &Tag<'_>) -> Result<()>;

    /// Text content, escaped by the sink.
    fn text(&mut self, content: &str) -> Result<()>;

    /// Comment content (without the `<!--`/`-->` delimiters).
    fn comment(&mut self, content: &str) -> Result<()>;

    /// Markup written verbatim, without escaping.
    fn raw(&mut self, html: &str) -> Result<()>;

    /// Change an attribute of a tag that was already opened.
    fn set_attribute(&mut self, tag: &Tag<'_>, name: &str, value: Option<&str>) -> Result<()>;

    /// Bind an event handler on a tag that was already opened.
    fn bind_event(&mut self, tag: &Tag<'_>, event: &str, handler: &str) -> Result<()>;
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    fn open(&mut self, tag: &Tag<'_>) -> Result<()> {
        (**self).open(tag)
    }

    fn close(&mut self, tag: &Tag<'_>) -> Result<()> {
        (**self).close(tag)
    }

    fn text(&mut self, content: &str) -> Result<()> {
        (**self).text(content)
    }

    fn comment(&mut self, content: &str) -> Result<()> {
        (**self).comment(content)
    }

    fn raw(&mut self, html: &str) -> Result<()> {
        (**self).raw(html)
    }

    fn set_attribute(&mut self, tag: &Tag<'_>, name: &str, value: Option<&str>) -> Result<()> {
        (**self).set_attribute(tag, name, value)
    }

    fn bind_event(&mut self, tag: &Tag<'_>, event: &str, handler: &str) -> Result<()> {
        (**self).bind_event(tag, event, handler)
    }
}

/// Emit `tag`, whatever `body` writes, then the closing tag.
pub fn write_element<S, F>(sink: &mut S, tag: &Tag<'_>, body: F) -> Result<()>
where
    S: TagSink + ?Sized,
    F: FnOnce(&mut S) -> Result<()>,
{
    sink.open(tag)?;
    body(sink)?;
    sink.close(tag)
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn test_tag_keeps_attribute_order() {
        let tag = Tag::new("a")
            .with_attr("href", "/x")
            .with_attr("class", "link")
            .with_attr("id", "first");

        let attrs: Vec<_> = tag.attrs().collect();
        assert_eq!(attrs, vec![("href", "/x"), ("class", "link"), ("id", "first")]);
    }

    #[test]
    fn test_tag_from_element() {
        let html = scraper::Html::parse_fragment(r#"<p id="x" class="a">hi</p>"#);
        let selector = scraper::Selector::parse("p").unwrap();
        let element = html.select(&selector).next().unwrap();

        let tag = Tag::from_element(element);
        assert_eq!(tag.name(), "p");
        assert_eq!(tag.attrs().collect::<Vec<_>>(), vec![("id", "x"), ("class", "a")]);
        assert_eq!(tag.element().map(|el| el.id()), Some(element.id()));
    }

    #[test]
    fn test_tag_from_element_keeps_attribute_prefix() {
        let html = scraper::Html::parse_document(
            r##"<svg><use xlink:href="#icon" class="i"></use></svg>"##,
        );
        let selector = scraper::Selector::parse("use").unwrap();
        let element = html.select(&selector).next().unwrap();

        let tag = Tag::from_element(element);
        assert_eq!(
            tag.attrs().collect::<Vec<_>>(),
            vec![("xlink:href", "#icon"), ("class", "i")]
        );
    }

    #[test]
    fn test_is_void() {
        assert!(Tag::new("br").is_void());
        assert!(Tag::new("img").is_void());
        assert!(!Tag::new("p").is_void());
    }

    #[test]
    fn test_write_element() {
        let mut sink = RecordingSink::default();
        write_element(&mut sink, &Tag::new("b"), |sink| sink.text("new")).unwrap();

        assert_eq!(sink.events, vec!["open b", "text new", "close b"]);
    }
}
