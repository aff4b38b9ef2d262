use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::normalize::text::{element_text, non_empty};

/// An ordered list of CSS selectors tried until one matches.
///
/// Steps run from most specific (current markup) to most generic (legacy
/// markup). A selector that fails to compile is dropped with a warning, so a
/// bad rule can only ever make a step miss.
#[derive(Debug)]
pub struct SelectorCascade {
    steps: Vec<Selector>,
}

impl SelectorCascade {
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Self {
        let steps = selectors
            .iter()
            .filter_map(|raw| {
                let raw: &str = raw.as_ref();
                match Selector::parse(raw) {
                    Ok(selector) => Some(selector),
                    Err(e) => {
                        warn!("Dropping invalid selector '{}': {:?}", raw, e);
                        None
                    }
                }
            })
            .collect();
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First non-empty match set, in document order.
    pub fn select<'a>(&self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.steps
            .iter()
            .map(|selector| node.select(selector).collect::<Vec<_>>())
            .find(|matches| !matches.is_empty())
            .unwrap_or_default()
    }

    pub fn first<'a>(&self, node: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.steps.iter().find_map(|selector| node.select(selector).next())
    }

    /// Cleaned text of the first match with any text in it.
    pub fn text(&self, node: ElementRef) -> Option<String> {
        self.steps.iter().find_map(|selector| {
            node.select(selector)
                .find_map(|element| non_empty(element_text(&element)))
        })
    }

    /// Matches of the first non-empty step with nested duplicates removed: an
    /// element is dropped when another match sits inside it.
    pub fn select_innermost<'a>(&self, node: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let matches = self.select(node);
        matches
            .iter()
            .filter(|candidate| {
                !matches
                    .iter()
                    .any(|other| other.id() != candidate.id() && other.ancestors().any(|a| a.id() == candidate.id()))
            })
            .copied()
            .collect()
    }

    /// First non-blank value of attribute `name` on a match.
    pub fn attr(&self, node: ElementRef, name: &str) -> Option<String> {
        self.steps.iter().find_map(|selector| {
            node.select(selector).find_map(|element| {
                element
                    .value()
                    .attr(name)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
        })
    }
}
