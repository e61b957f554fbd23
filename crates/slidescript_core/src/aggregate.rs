//! Slide aggregation: group extracted fragments by slide and render the grounding context.
//!
//! Slides appear in the order their first fragment was seen; fragments within a slide
//! keep their input order. Each body is trimmed once at render time, so leading and
//! trailing whitespace of the first and last fragment disappears while interior
//! spacing survives.

use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::context::ContextDocument;
use crate::element::{ExtractedElement, RawElement};
use crate::error::Result;

const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Strip Unicode whitespace and the ASCII separators `\x1c`..=`\x1f` from both ends.
fn strip_body(body: &str) -> &str {
    body.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Ordered association from slide number to accumulated body text.
#[derive(Debug, Clone, Default)]
pub struct SlideContext {
    slides: Vec<(NonZeroU32, String)>,
    positions: HashMap<NonZeroU32, usize>,
}

impl SlideContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw extractor output and group it. Fails on the first bad element.
    pub fn from_raw<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawElement>,
    {
        let mut slides = Self::new();
        for (index, raw) in elements.into_iter().enumerate() {
            slides.push(raw.validate(index)?);
        }
        Ok(slides)
    }

    /// Append one fragment to its slide, creating the slide entry on first sight.
    pub fn push(&mut self, element: ExtractedElement) {
        let ExtractedElement { page_number, text } = element;
        match self.positions.get(&page_number) {
            Some(&pos) => {
                let body = &mut self.slides[pos].1;
                body.push_str(FRAGMENT_SEPARATOR);
                body.push_str(&text);
            }
            None => {
                let mut body = String::with_capacity(FRAGMENT_SEPARATOR.len() + text.len());
                body.push_str(FRAGMENT_SEPARATOR);
                body.push_str(&text);
                self.positions.insert(page_number, self.slides.len());
                self.slides.push((page_number, body));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide numbers in first-occurrence order.
    pub fn pages(&self) -> impl Iterator<Item = NonZeroU32> + '_ {
        self.slides.iter().map(|(page, _)| *page)
    }

    /// Trimmed body of one slide.
    pub fn body(&self, page: NonZeroU32) -> Option<&str> {
        self.positions
            .get(&page)
            .map(|&pos| strip_body(&self.slides[pos].1))
    }

    pub fn render(&self) -> ContextDocument {
        let mut out = String::new();
        for (page, body) in &self.slides {
            out.push_str("### Slide ");
            out.push_str(&page.to_string());
            out.push_str(":\n\n");
            out.push_str(strip_body(body));
            out.push_str("\n\n");
        }
        ContextDocument::new(out)
    }
}

impl Extend<ExtractedElement> for SlideContext {
    fn extend<I: IntoIterator<Item = ExtractedElement>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl FromIterator<ExtractedElement> for SlideContext {
    fn from_iter<I: IntoIterator<Item = ExtractedElement>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

/// Aggregate validated elements into a context document. Empty input yields `""`.
pub fn aggregate<I>(elements: I) -> ContextDocument
where
    I: IntoIterator<Item = ExtractedElement>,
{
    let slides: SlideContext = elements.into_iter().collect();
    let document = slides.render();
    tracing::debug!(
        slides = slides.len(),
        context_len = document.len(),
        "Aggregated slide context"
    );
    document
}

/// Validate raw extractor output and aggregate it.
///
/// Fails on the first element without a usable `page_number`; nothing is rendered.
pub fn aggregate_raw<I>(elements: I) -> Result<ContextDocument>
where
    I: IntoIterator<Item = RawElement>,
{
    let slides = SlideContext::from_raw(elements)?;
    Ok(slides.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn el(page: u32, text: &str) -> ExtractedElement {
        ExtractedElement::on_page(page, text).unwrap()
    }

    #[test]
    fn test_groups_by_first_occurrence() {
        let doc = aggregate(vec![el(1, "Intro"), el(2, "Agenda"), el(1, "More intro")]);
        assert_eq!(
            doc.as_str(),
            "### Slide 1:\n\nIntro\n\nMore intro\n\n### Slide 2:\n\nAgenda\n\n"
        );
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        let doc = aggregate(Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.as_str(), "");
    }

    #[test]
    fn test_body_is_trimmed_at_edges_only() {
        let doc = aggregate(vec![el(3, "  Title  "), el(3, "line one\n\n  indented ")]);
        assert_eq!(
            doc.as_str(),
            "### Slide 3:\n\nTitle  \n\nline one\n\n  indented\n\n"
        );
    }

    #[test]
    fn test_slide_order_is_not_numeric() {
        let doc = aggregate(vec![el(5, "five"), el(2, "two"), el(5, "five again")]);
        assert_eq!(
            doc.as_str(),
            "### Slide 5:\n\nfive\n\nfive again\n\n### Slide 2:\n\ntwo\n\n"
        );
    }

    #[test]
    fn test_body_strips_ascii_separators() {
        let doc = aggregate(vec![el(1, "\u{1f}Title\u{1c}"), el(2, "\u{1d}\u{1e} x \u{1e}")]);
        assert_eq!(doc.as_str(), "### Slide 1:\n\nTitle\n\n### Slide 2:\n\nx\n\n");
    }

    #[test]
    fn test_from_raw_counts_slides_not_header_lookalikes() {
        let raw = vec![
            RawElement::new("### Slide 9:\nquoted header").with_page(1),
            RawElement::new("body").with_page(1),
        ];
        let slides = SlideContext::from_raw(raw).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides.render().as_str().matches("### Slide ").count(), 2);
    }

    #[test]
    fn test_whitespace_only_slide_keeps_header() {
        let doc = aggregate(vec![el(1, "   ")]);
        assert_eq!(doc.as_str(), "### Slide 1:\n\n\n\n");
    }

    #[test]
    fn test_template_like_text_passes_through() {
        let doc = aggregate(vec![el(1, "Use {context} and {{braces}}")]);
        assert_eq!(
            doc.as_str(),
            "### Slide 1:\n\nUse {context} and {{braces}}\n\n"
        );
    }

    #[test]
    fn test_slide_context_accessors() {
        let slides: SlideContext = vec![el(2, "b"), el(1, "a"), el(2, "c")].into_iter().collect();
        let pages: Vec<u32> = slides.pages().map(NonZeroU32::get).collect();
        assert_eq!(pages, vec![2, 1]);
        assert_eq!(slides.body(NonZeroU32::new(2).unwrap()), Some("b\n\nc"));
        assert_eq!(slides.body(NonZeroU32::new(9).unwrap()), None);
    }

    #[test]
    fn test_aggregate_raw_fails_on_missing_page() {
        let raw = vec![
            RawElement::new("ok").with_page(1),
            RawElement::new("orphan"),
        ];
        let err = aggregate_raw(raw).unwrap_err();
        assert!(matches!(err, PipelineError::MissingPageIdentifier { index: 1 }));
    }

    #[test]
    fn test_aggregate_raw_matches_validated_path() {
        let raw = vec![
            RawElement::new("Intro").with_page(1),
            RawElement::new("Agenda").with_page(2),
        ];
        let doc = aggregate_raw(raw).unwrap();
        assert_eq!(doc, aggregate(vec![el(1, "Intro"), el(2, "Agenda")]));
    }
}
