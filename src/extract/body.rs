//! Noise-removal pass and last-resort body text: strip structural chrome
//! and cookie/menu/legal elements, then read whatever visible text is left.

use scraper::{ElementRef, Html, Node, Selector};

use crate::parsers::{clean_text, truncate_chars};

/// Character cap on the body-text fallback.
pub const BODY_TEXT_CAP: usize = 3_000;

const SKIP_TAGS: &[&str] = &[
    "nav", "header", "footer", "script", "style", "iframe", "svg", "noscript",
];

const NOISE_CLASS_TOKENS: &[&str] = &[
    "cookie", "consent", "banner", "menu", "nav", "footer", "header", "legal", "social",
];

/// Visible text of the document body with chrome subtrees skipped,
/// whitespace-normalized and capped.
pub fn visible_body_text(document: &Html) -> String {
    let mut collected = String::new();
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            collect_visible(body, &mut collected);
        }
    }
    truncate_chars(&clean_text(&collected), BODY_TEXT_CAP)
}

fn collect_visible(element: ElementRef<'_>, out: &mut String) {
    if is_noise(element) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(&text.text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_visible(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn is_noise(element: ElementRef<'_>) -> bool {
    if SKIP_TAGS.contains(&element.value().name()) {
        return true;
    }
    if let Some(class) = element.value().attr("class") {
        let class_lower = class.to_lowercase();
        if NOISE_CLASS_TOKENS
            .iter()
            .any(|token| class_lower.contains(token))
        {
            return true;
        }
    }
    false
}
