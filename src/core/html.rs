// src/core/html.rs
//! Label/value lookups over a parsed listing page.
//!
//! Listing pages render each field as `<strong>Label:</strong>` followed by a
//! sibling `<span>` or `<div>` holding the value. Lookups are by label text,
//! never by position, so fields can come and go between listings.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

static STRONG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("static selector"));
static SMALL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("small").expect("static selector"));

/// Whitespace-normalized text of an element and its descendants.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text of the first `<small>` element in document order.
pub fn first_small_text(doc: &Html) -> Option<String> {
    doc.select(&SMALL).next().map(element_text)
}

/// Value next to a label: the first `<strong>` whose text contains `label`,
/// then its first following sibling element named `sibling_tag`.
/// Empty values count as absent.
pub fn labelled_value(doc: &Html, label: &str, sibling_tag: &str) -> Option<String> {
    doc.select(&STRONG)
        .filter(|strong| strong.text().collect::<String>().contains(label))
        .find_map(|strong| {
            strong
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sib| sib.value().name().eq_ignore_ascii_case(sibling_tag))
        })
        .map(element_text)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <h3><small>Cajero - Sucursal Centro</small></h3>
          <p><strong>Salario neto mensual:</strong> <span> $8,000.00 </span></p>
          <p><strong>Ubicación:</strong><em>icon</em><span>Jalisco,   Zapopan</span></p>
          <div><strong>Idiomas:</strong><div>Inglés</div></div>
          <div><strong>Experiencia:</strong></div>
        </body></html>
    "#;

    #[test]
    fn finds_value_after_label() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(labelled_value(&doc, "Salario neto mensual:", "span").as_deref(), Some("$8,000.00"));
        assert_eq!(labelled_value(&doc, "Idiomas:", "div").as_deref(), Some("Inglés"));
    }

    #[test]
    fn skips_other_siblings_and_normalizes_whitespace() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(labelled_value(&doc, "Ubicación:", "span").as_deref(), Some("Jalisco, Zapopan"));
    }

    #[test]
    fn absent_label_or_value_is_none() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(labelled_value(&doc, "Tipo de contrato:", "span"), None);
        assert_eq!(labelled_value(&doc, "Experiencia:", "div"), None);
        // wrong sibling tag
        assert_eq!(labelled_value(&doc, "Idiomas:", "span"), None);
    }

    #[test]
    fn first_small_caption() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(first_small_text(&doc).as_deref(), Some("Cajero - Sucursal Centro"));
        assert_eq!(first_small_text(&Html::parse_document("<p>x</p>")), None);
    }
}
