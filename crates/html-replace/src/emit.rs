//! Per-node emission: parsed elements to sink events.

use scraper::{ElementRef, Node};

use crate::error::Result;
use crate::serializer::escape_text;
use crate::sink::{Tag, TagSink};

/// Elements whose text children are serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements whose first newline is dropped by the parser.
const NEWLINE_STRIPPING_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Emit `element` and its descendants in document order.
///
/// Elements become `open`/`close` pairs carrying their source element and
/// original attributes. Text and comment children go through
/// [`TagSink::raw`] in their serialized form so entities are not escaped a
/// second time.
pub fn emit_element<S: TagSink + ?Sized>(sink: &mut S, element: ElementRef<'_>) -> Result<()> {
    let tag = Tag::from_element(element);
    sink.open(&tag)?;
    emit_children(sink, element)?;
    sink.close(&tag)
}

/// Emit the children of `parent` without `parent` itself.
pub fn emit_children<S: TagSink + ?Sized>(sink: &mut S, parent: ElementRef<'_>) -> Result<()> {
    let name = parent.value().name();
    let raw_text = RAW_TEXT_ELEMENTS.contains(&name);

    if NEWLINE_STRIPPING_ELEMENTS.contains(&name)
        && let Some(Node::Text(text)) = parent.first_child().map(|child| child.value())
        && text.starts_with('\n')
    {
        sink.raw("\n")?;
    }

    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            emit_element(sink, element)?;
            continue;
        }
        match child.value() {
            Node::Text(text) if raw_text => sink.raw(text)?,
            Node::Text(text) => sink.raw(&escape_text(text))?,
            Node::Comment(comment) => sink.raw(&format!("<!--{}-->", &**comment))?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};

    use super::*;
    use crate::serializer::HtmlSerializer;
    use crate::sink::testing::RecordingSink;

    fn first<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector).next().unwrap()
    }

    #[test]
    fn test_event_order() {
        let html = Html::parse_fragment("<div><p>a</p><!--c--><span>b</span></div>");
        let mut sink = RecordingSink::default();

        emit_element(&mut sink, first(&html, "div")).unwrap();

        assert_eq!(
            sink.events,
            vec![
                "open div",
                "open p",
                "raw a",
                "close p",
                "raw <!--c-->",
                "open span",
                "raw b",
                "close span",
                "close div",
            ]
        );
    }

    #[test]
    fn test_text_entities_round_trip() {
        let html = Html::parse_fragment("<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
        let mut serializer = HtmlSerializer::new();

        emit_element(&mut serializer, first(&html, "p")).unwrap();

        assert_eq!(serializer.finish(), "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
    }

    #[test]
    fn test_script_text_not_escaped() {
        let html = Html::parse_document("<body><script>if (a < b && c) {}</script></body>");
        let mut serializer = HtmlSerializer::new();

        emit_element(&mut serializer, first(&html, "script")).unwrap();

        assert_eq!(serializer.finish(), "<script>if (a < b && c) {}</script>");
    }

    #[test]
    fn test_attributes_preserved() {
        let html = Html::parse_fragment(r#"<a href="/x" data-id="7" class="link">go</a>"#);
        let mut serializer = HtmlSerializer::new();

        emit_element(&mut serializer, first(&html, "a")).unwrap();

        assert_eq!(
            serializer.finish(),
            r#"<a href="/x" data-id="7" class="link">go</a>"#
        );
    }

    #[test]
    fn test_leading_newline_survives_reparse() {
        let html = Html::parse_fragment("<pre>\n\nindented</pre>");
        let mut serializer = HtmlSerializer::new();

        emit_element(&mut serializer, first(&html, "pre")).unwrap();

        assert_eq!(serializer.finish(), "<pre>\n\nindented</pre>");
    }

    #[test]
    fn test_single_leading_newline_not_added() {
        let html = Html::parse_fragment("<pre>code\n</pre>");
        let mut serializer = HtmlSerializer::new();

        emit_element(&mut serializer, first(&html, "pre")).unwrap();

        assert_eq!(serializer.finish(), "<pre>code\n</pre>");
    }

    #[test]
    fn test_emit_children_skips_parent() {
        let html = Html::parse_fragment("<ul><li>1</li><li>2</li></ul>");
        let mut serializer = HtmlSerializer::new();

        emit_children(&mut serializer, first(&html, "ul")).unwrap();

        assert_eq!(serializer.finish(), "<li>1</li><li>2</li>");
    }
}
