//! HTML parser for catechism pages
//!
//! This module handles reading a parsed page to find:
//! - Numbered paragraphs (`<p>` elements whose text starts with digits)
//! - The link to the next page (an `<a>` labelled exactly "Next")

use scraper::{Html, Selector};

/// Visible label of the link to the following page
pub const NEXT_LABEL: &str = "Next";

/// Everything the crawl needs from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Candidate paragraphs in document order, duplicates included
    pub paragraphs: Vec<(u32, String)>,

    /// Raw `href` of the first "Next" link, if any
    pub next_link: Option<String>,
}

/// Parses HTML content and extracts paragraphs and the next link
///
/// # Example
///
/// ```
/// use catechism::crawler::parse_page;
///
/// let html = r#"<p>1 First</p><p>Preface</p><a href="__P3.HTM">Next</a>"#;
/// let page = parse_page(html);
/// assert_eq!(page.paragraphs, vec![(1, "1 First".to_string())]);
/// assert_eq!(page.next_link.as_deref(), Some("__P3.HTM"));
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        paragraphs: extract_paragraphs(&document),
        next_link: find_next_link(&document),
    }
}

/// Extracts numbered paragraphs from a parsed document
///
/// Every `<p>` is visited in document order. If its flattened text begins
/// with decimal digits, those digits are the paragraph number and the whole
/// text is the paragraph body. Other paragraphs are skipped.
pub fn extract_paragraphs(document: &Html) -> Vec<(u32, String)> {
    let mut paragraphs = Vec::new();

    if let Ok(p_selector) = Selector::parse("p") {
        for element in document.select(&p_selector) {
            let text: String = element.text().collect();
            if let Some(number) = leading_number(&text) {
                paragraphs.push((number, text));
            }
        }
    }

    paragraphs
}

/// Finds the target of the first link whose text is exactly "Next"
///
/// The comparison is case-sensitive and does not trim; links without an
/// `href` are ignored.
pub fn find_next_link(document: &Html) -> Option<String> {
    let a_selector = Selector::parse("a[href]").ok()?;

    document
        .select(&a_selector)
        .find(|element| element.text().collect::<String>() == NEXT_LABEL)
        .and_then(|element| element.value().attr("href"))
        .map(|href| href.to_string())
}

/// Parses the paragraph number at the very start of `text`
///
/// Returns `None` if `text` does not start with a digit, if the number does
/// not fit in a `u32`, or if it is zero.
pub fn leading_number(text: &str) -> Option<u32> {
    let digits = text.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    text[..digits].parse::<u32>().ok().filter(|number| *number > 0)
}
