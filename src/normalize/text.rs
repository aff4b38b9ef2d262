use scraper::ElementRef;

/// Trim and collapse every whitespace run to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaned text content of an element. Text nodes are concatenated as they
/// render, so inline markup ("<a>UFC 310</a><b>:</b>") adds no spaces.
pub fn element_text(element: &ElementRef) -> String {
    clean_text(&element.text().collect::<String>())
}

/// `Some` only for non-empty cleaned text.
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  UFC 310:\n\t Pantoja   vs Asakura "), "UFC 310: Pantoja vs Asakura");
        assert_eq!(clean_text(" \n "), "");
    }

    #[test]
    fn test_element_text_keeps_inline_markup_tight() {
        let html = Html::parse_fragment("<h3><a>UFC 310</a><b>:</b> Pantoja\n  vs <i>Asakura</i></h3>");
        let h3 = Selector::parse("h3").unwrap();
        let element = html.select(&h3).next().unwrap();
        assert_eq!(element_text(&element), "UFC 310: Pantoja vs Asakura");
    }
}
