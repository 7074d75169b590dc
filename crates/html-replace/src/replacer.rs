//! Replacement pipeline: parse, resolve, emit through the filter, serialize.

use scraper::{ElementRef, Html};

use crate::config::{ParseMode, ReplaceConfig};
use crate::emit::emit_children;
use crate::error::Result;
use crate::filter::ReplacingSink;
use crate::matcher::MatchTable;
use crate::replacements::Replacements;
use crate::serializer::HtmlSerializer;

/// Result of a replacement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutput {
    /// Serialized markup.
    pub html: String,
    /// Number of callback invocations.
    pub replaced: usize,
    /// Selectors that matched no element in the traversed scope.
    pub unmatched_selectors: Vec<String>,
}

/// Runs selector-driven replacement with a fixed configuration.
///
/// Holds no state between calls; every call parses, resolves and
/// serializes on its own.
#[derive(Debug, Clone, Default)]
pub struct HtmlReplacer {
    config: ReplaceConfig,
}

impl HtmlReplacer {
    /// Create a replacer.
    #[must_use]
    pub fn new(config: ReplaceConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ReplaceConfig {
        &self.config
    }

    /// Replace matched elements and return the markup.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid selectors or when a callback fails.
    pub fn replace(&self, html: &str, replacements: Replacements<'_>) -> Result<String> {
        self.replace_with_report(html, replacements)
            .map(|output| output.html)
    }

    /// Replace matched elements and report what happened.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid selectors or when a callback fails. No
    /// markup is returned in that case.
    pub fn replace_with_report(
        &self,
        html: &str,
        mut replacements: Replacements<'_>,
    ) -> Result<ReplaceOutput> {
        tracing::info!(
            "Starting replacement with {} selector(s)",
            replacements.len()
        );
        tracing::debug!("Input HTML length: {}", html.len());

        let document = match self.config.mode {
            ParseMode::Document => Html::parse_document(html),
            ParseMode::Fragment => Html::parse_fragment(html),
        };
        let scope = traversal_scope(&document, self.config.mode);

        let table = MatchTable::build(scope, replacements.selectors())?;
        tracing::debug!("Match table holds {} element(s)", table.len());
        for selector in table.unmatched_selectors() {
            tracing::debug!("Selector `{selector}` matched nothing");
        }

        let serializer = HtmlSerializer::with_capacity(html.len());
        let mut filter = ReplacingSink::new(serializer, &table, &mut replacements);
        emit_children(&mut filter, scope)?;
        let replaced = filter.replaced();

        let mut output = filter.into_inner().finish();
        if self.config.trim {
            let trimmed = output.trim();
            if trimmed.len() != output.len() {
                output = trimmed.to_owned();
            }
        }

        tracing::info!("Replacement completed: {replaced} element(s) replaced");
        tracing::debug!("Result HTML length: {}", output.len());

        Ok(ReplaceOutput {
            html: output,
            replaced,
            unmatched_selectors: table.into_unmatched_selectors(),
        })
    }
}

/// Element whose children are walked: `<body>` for documents, the fragment
/// root for fragments.
fn traversal_scope(document: &Html, mode: ParseMode) -> ElementRef<'_> {
    let root = document.root_element();
    if mode == ParseMode::Fragment {
        return root;
    }
    root.children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
        .unwrap_or(root)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ReplaceError;
    use crate::sink::{Tag, TagSink, write_element};

    fn bold(sink: &mut dyn TagSink, _: ElementRef<'_>) -> Result<()> {
        write_element(sink, &Tag::new("b"), |sink| sink.text("new"))
    }

    #[test]
    fn test_report_counts() {
        let replacer = HtmlReplacer::default();
        let replacements = Replacements::new().with("p", bold).with(".missing", bold);

        let output = replacer
            .replace_with_report("<p>1</p><div><p>2</p></div>", replacements)
            .unwrap();

        assert_eq!(output.html, "<b>new</b><div><b>new</b></div>");
        assert_eq!(output.replaced, 2);
        assert_eq!(output.unmatched_selectors, vec![".missing".to_owned()]);
    }

    #[test]
    fn test_document_mode_skips_head() {
        let replacer = HtmlReplacer::default();
        let output = replacer
            .replace_with_report(
                "<html><head><title>t</title></head><body><p>x</p></body></html>",
                Replacements::new().with("title", bold),
            )
            .unwrap();

        assert_eq!(output.html, "<p>x</p>");
        assert_eq!(output.replaced, 0);
        assert_eq!(output.unmatched_selectors, vec!["title".to_owned()]);
    }

    #[test]
    fn test_fragment_mode() {
        let replacer = HtmlReplacer::new(ReplaceConfig {
            mode: ParseMode::Fragment,
            ..ReplaceConfig::default()
        });
        let html = replacer
            .replace("<td>cell</td><p>x</p>", Replacements::new().with("p", bold))
            .unwrap();

        assert_eq!(html, "cell<b>new</b>");
    }

    #[test]
    fn test_trim_disabled() {
        let replacer = HtmlReplacer::new(ReplaceConfig {
            trim: false,
            ..ReplaceConfig::default()
        });
        assert!(!replacer.config().trim);
        assert_eq!(replacer.config().mode, ParseMode::Document);
        let html = replacer
            .replace("<p>x</p>\n  ", Replacements::new())
            .unwrap();

        assert_eq!(html, "<p>x</p>\n  ");
    }

    #[test]
    fn test_trim_enabled() {
        let html = HtmlReplacer::default()
            .replace("\n  <p>x</p>\n  ", Replacements::new())
            .unwrap();

        assert_eq!(html, "<p>x</p>");
    }

    #[test]
    fn test_callback_error_aborts() {
        let replacements = Replacements::new().with("p", |sink, _| {
            let tag = Tag::new("b");
            sink.open(&tag)?;
            sink.set_attribute(&tag, "class", Some("late"))?;
            sink.close(&tag)
        });

        let err = HtmlReplacer::default()
            .replace("<p>x</p>", replacements)
            .unwrap_err();

        assert!(matches!(err, ReplaceError::UnsupportedMutation { .. }));
    }
}
