use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::cascade::SelectorCascade;
use crate::constants::{MAX_SIMPLE_FIGHTS, UNKNOWN_FIELD};
use crate::normalize::text::{element_text, non_empty};
use crate::types::{Fight, Fighter};

static RECORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+-\d+-\d+").expect("record pattern is valid"));

// Event detail page: one stable list-item class per bout.
const DETAIL_FIGHTS: &[&str] = &[".c-listing-fight"];
const DETAIL_WEIGHT_CLASS: &[&str] = &[".c-listing-fight__class-text"];
const DETAIL_RANKS: &[&str] = &[".js-listing-fight__corner-rank", ".c-listing-fight__corner-rank"];

// Older card markup.
const SIMPLE_FIGHTS: &[&str] = &[".fight", ".bout", ".matchup"];
const SIMPLE_FIGHTER_NAMES: &[&str] = &["[class*='fighter-name']", "span[class*='name']", "div[class*='athlete']"];
const SIMPLE_WEIGHT_CLASS: &[&str] = &["[class*='weight']", "[class*='division']"];

// Bare list of names.
const ROSTER: &[&str] = &["[class*='fighter']", "[class*='athlete']"];

const MAIN_EVENT: &str = "Main Event";
const UNNAMED_FIGHT: &str = "Fight";

/// Which markup a fight card was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightMode {
    Detail,
    Simple,
    Roster,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FightCard {
    pub mode: FightMode,
    /// Fight nodes found before dropping incomplete bouts
    pub nodes: usize,
    pub fights: Vec<Fight>,
}

impl FightCard {
    fn empty() -> Self {
        Self {
            mode: FightMode::None,
            nodes: 0,
            fights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    Red,
    Blue,
}

impl Corner {
    fn as_str(self) -> &'static str {
        match self {
            Corner::Red => "red",
            Corner::Blue => "blue",
        }
    }

    /// Position in the two-element rank list
    fn rank_index(self) -> usize {
        match self {
            Corner::Red => 0,
            Corner::Blue => 1,
        }
    }
}

/// Reads the bouts of one event.
///
/// Structured markup is tried first: the detail-page listing, then older card
/// markup. The first of these whose nodes exist decides the result, even if
/// every bout in it is incomplete. A bare list of fighter names is only
/// trusted inside a listing card, since a whole page carries navigation and
/// ranking widgets with the same class names.
#[derive(Debug, Default, Clone, Copy)]
pub struct FightExtractor;

impl FightExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Fights from a full detail page. Detail and card markup only.
    pub fn extract_document(&self, html: &str) -> FightCard {
        let document = Html::parse_document(html);
        self.structured(document.root_element()).unwrap_or_else(FightCard::empty)
    }

    /// Fights from a listing card's own markup, including a bare roster.
    pub fn extract_fragment(&self, html: &str) -> FightCard {
        let fragment = Html::parse_fragment(html);
        let root = fragment.root_element();
        self.structured(root).unwrap_or_else(|| self.roster_mode(root))
    }

    fn structured(&self, root: ElementRef) -> Option<FightCard> {
        let detail_nodes = SelectorCascade::new(DETAIL_FIGHTS).select(root);
        if !detail_nodes.is_empty() {
            return Some(self.detail_mode(&detail_nodes));
        }

        let simple_nodes = SelectorCascade::new(SIMPLE_FIGHTS).select(root);
        if !simple_nodes.is_empty() {
            let capped: Vec<_> = simple_nodes.into_iter().take(MAX_SIMPLE_FIGHTS).collect();
            return Some(self.simple_mode(&capped));
        }

        None
    }

    fn detail_mode(&self, nodes: &[ElementRef]) -> FightCard {
        let weight_class = SelectorCascade::new(DETAIL_WEIGHT_CLASS);
        let ranks = SelectorCascade::new(DETAIL_RANKS);
        let red = CornerFields::new(Corner::Red);
        let blue = CornerFields::new(Corner::Blue);

        let total = nodes.len();
        let fights = nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let order = broadcast_order(total, index);
                let rank_texts: Vec<String> = ranks.select(*node).iter().map(element_text).collect();

                let fighters: Vec<Fighter> = [&red, &blue]
                    .into_iter()
                    .filter_map(|corner| corner.fighter(*node, &rank_texts))
                    .collect();
                let class_text = weight_class.text(*node).unwrap_or_default();

                let fight = Fight::from_pair(class_text, order, fighters);
                if fight.is_none() {
                    debug!("Dropping incomplete bout at position {} (order {})", index, order);
                }
                fight
            })
            .collect();

        FightCard {
            mode: FightMode::Detail,
            nodes: total,
            fights,
        }
    }

    fn simple_mode(&self, nodes: &[ElementRef]) -> FightCard {
        let names = SelectorCascade::new(SIMPLE_FIGHTER_NAMES);
        let weight_class = SelectorCascade::new(SIMPLE_WEIGHT_CLASS);

        let total = nodes.len();
        let fights = nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let order = broadcast_order(total, index);
                let fighters = first_two_names(&names, *node);
                let class_text = weight_class.text(*node).unwrap_or_else(|| {
                    let default = if order == 1 { MAIN_EVENT } else { UNNAMED_FIGHT };
                    default.to_string()
                });
                Fight::from_pair(class_text, order, fighters)
            })
            .collect();

        FightCard {
            mode: FightMode::Simple,
            nodes: total,
            fights,
        }
    }

    fn roster_mode(&self, root: ElementRef) -> FightCard {
        let fighters = first_two_names(&SelectorCascade::new(ROSTER), root);
        if fighters.len() < 2 {
            return FightCard::empty();
        }

        FightCard {
            mode: FightMode::Roster,
            nodes: 1,
            fights: Fight::from_pair(MAIN_EVENT, 1, fighters).into_iter().collect(),
        }
    }
}

/// The page lists bouts main-event-first; order counts up to the main event.
fn broadcast_order(total: usize, index: usize) -> u32 {
    u32::try_from(total - index).unwrap_or(u32::MAX)
}

/// Up to two distinct, non-empty names as placeholder fighters.
fn first_two_names(cascade: &SelectorCascade, node: ElementRef) -> Vec<Fighter> {
    let mut names: Vec<String> = Vec::new();
    for element in cascade.select_innermost(node) {
        if names.len() == 2 {
            break;
        }
        if let Some(name) = non_empty(element_text(&element)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names.into_iter().map(Fighter::placeholder).collect()
}

/// `#3` -> 3. Anything else (including "C" for champions) is unranked.
pub fn parse_rank(text: &str) -> Option<u16> {
    let digits = text.trim().strip_prefix('#')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Per-corner cascades of the detail-page bout markup.
struct CornerFields {
    corner: Corner,
    given_name: SelectorCascade,
    family_name: SelectorCascade,
    full_name: SelectorCascade,
    country: SelectorCascade,
    record: SelectorCascade,
}

impl CornerFields {
    fn new(corner: Corner) -> Self {
        let c = corner.as_str();
        Self {
            corner,
            given_name: SelectorCascade::new(&[format!(
                ".c-listing-fight__corner-name--{c} .c-listing-fight__corner-given-name"
            )]),
            family_name: SelectorCascade::new(&[format!(
                ".c-listing-fight__corner-name--{c} .c-listing-fight__corner-family-name"
            )]),
            full_name: SelectorCascade::new(&[format!(".c-listing-fight__corner-name--{c}")]),
            country: SelectorCascade::new(&[
                format!(".c-listing-fight__country--{c} .c-listing-fight__country-text"),
                format!(".c-listing-fight__corner--{c} .c-listing-fight__country-text"),
            ]),
            record: SelectorCascade::new(&[format!(".c-listing-fight__corner-record--{c}")]),
        }
    }

    fn name(&self, node: ElementRef) -> Option<String> {
        match (self.given_name.text(node), self.family_name.text(node)) {
            (Some(given), Some(family)) => Some(format!("{} {}", given, family)),
            _ => self.full_name.text(node),
        }
    }

    fn fighter(&self, node: ElementRef, rank_texts: &[String]) -> Option<Fighter> {
        let name = self.name(node)?;
        let ranking = rank_texts
            .get(self.corner.rank_index())
            .and_then(|text| parse_rank(text));
        let country = self
            .country
            .text(node)
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        let record = self
            .record
            .text(node)
            .and_then(|text| RECORD.find(&text).map(|m| m.as_str().to_string()));

        Some(Fighter {
            name,
            country,
            ranking,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_bout(class: &str, red: (&str, &str, &str), blue: (&str, &str, &str)) -> String {
        format!(
            r#"<li class="l-listing__item"><div class="c-listing-fight">
                <div class="c-listing-fight__class-text">{class}</div>
                <div class="c-listing-fight__corner-name c-listing-fight__corner-name--red">
                  <span class="c-listing-fight__corner-given-name">{}</span>
                  <span class="c-listing-fight__corner-family-name">{}</span>
                </div>
                <div class="c-listing-fight__corner-name c-listing-fight__corner-name--blue">
                  <span class="c-listing-fight__corner-given-name">{}</span>
                  <span class="c-listing-fight__corner-family-name">{}</span>
                </div>
                <div class="js-listing-fight__corner-rank c-listing-fight__corner-rank--red"><span>{}</span></div>
                <div class="js-listing-fight__corner-rank c-listing-fight__corner-rank--blue"><span>{}</span></div>
                <div class="c-listing-fight__country c-listing-fight__country--red">
                  <div class="c-listing-fight__country-text">Kazakhstan</div></div>
                <div class="c-listing-fight__country c-listing-fight__country--blue">
                  <div class="c-listing-fight__country-text">Ireland</div></div>
            </div></li>"#,
            red.0, red.1, blue.0, blue.1, red.2, blue.2
        )
    }

    fn page(bouts: &[String]) -> String {
        format!("<html><body><ul class=\"l-listing__group\">{}</ul></body></html>", bouts.concat())
    }

    #[test]
    fn test_detail_mode_reads_corners_and_ranks() {
        let html = page(&[detail_bout(
            "Welterweight Bout",
            ("Shavkat", "Rakhmonov", "#3"),
            ("Ian", "Machado Garry", "#7"),
        )]);
        let card = FightExtractor::new().extract_document(&html);

        assert_eq!(card.mode, FightMode::Detail);
        assert_eq!(card.fights.len(), 1);
        let fight = &card.fights[0];
        assert_eq!(fight.weight_class, "Welterweight Bout");
        assert_eq!(fight.order, 1);
        assert_eq!(fight.fighters[0].name, "Shavkat Rakhmonov");
        assert_eq!(fight.fighters[0].ranking, Some(3));
        assert_eq!(fight.fighters[0].country, "Kazakhstan");
        assert_eq!(fight.fighters[1].name, "Ian Machado Garry");
        assert_eq!(fight.fighters[1].ranking, Some(7));
        assert_eq!(fight.fighters[1].country, "Ireland");
        assert_eq!(fight.fighters[1].record, None);
    }

    #[test]
    fn test_detail_mode_orders_count_down_in_document_order() {
        let bouts: Vec<String> = (0..4)
            .map(|i| {
                let (red, blue) = (format!("Red{i}"), format!("Blue{i}"));
                detail_bout("Bout", (red.as_str(), "A", ""), (blue.as_str(), "B", "C"))
            })
            .collect();
        let card = FightExtractor::new().extract_document(&page(&bouts));

        let orders: Vec<u32> = card.fights.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![4, 3, 2, 1]);
        assert!(card.fights.iter().all(|f| f.fighters.iter().all(|x| x.ranking.is_none())));
    }

    #[test]
    fn test_detail_mode_drops_bout_missing_a_corner() {
        let incomplete = r#"<div class="c-listing-fight">
            <div class="c-listing-fight__corner-name--red">Alex Pereira</div>
        </div>"#
            .to_string();
        let bouts = vec![
            detail_bout("Heavyweight", ("Ciryl", "Gane", "#2"), ("Alexander", "Volkov", "#4")),
            incomplete,
        ];
        let card = FightExtractor::new().extract_document(&page(&bouts));

        assert_eq!(card.nodes, 2);
        assert_eq!(card.fights.len(), 1);
        assert_eq!(card.fights[0].order, 2);
    }

    #[test]
    fn test_detail_mode_falls_back_to_whole_corner_name() {
        let bout = r#"<div class="c-listing-fight">
            <div class="c-listing-fight__corner-name--red"><a>Mauricio Ruffy</a></div>
            <div class="c-listing-fight__corner-name--blue">
              <span class="c-listing-fight__corner-given-name">King</span>
            </div>
            <div class="c-listing-fight__corner-record--red">Record 11-1-0</div>
        </div>"#;
        let card = FightExtractor::new().extract_document(bout);

        let fighters = &card.fights[0].fighters;
        assert_eq!(fighters[0].name, "Mauricio Ruffy");
        assert_eq!(fighters[0].record.as_deref(), Some("11-1-0"));
        assert_eq!(fighters[0].country, "TBD");
        assert_eq!(fighters[1].name, "King");
        assert_eq!(card.fights[0].weight_class, "");
    }

    #[test]
    fn test_simple_mode_defaults_weight_class_by_order() {
        let html = r#"
            <div class="fight"><span class="fighter-name">Jon Jones</span><span class="fighter-name">Stipe Miocic</span>
              <span class="weight-class">Heavyweight</span></div>
            <div class="fight"><span class="fighter-name">Bo Nickal</span><span class="fighter-name">Paul Craig</span></div>
            <div class="fight"><span class="fighter-name">Only One</span></div>"#;
        let card = FightExtractor::new().extract_fragment(html);

        assert_eq!(card.mode, FightMode::Simple);
        assert_eq!(card.nodes, 3);
        assert_eq!(card.fights.len(), 2);
        assert_eq!(card.fights[0].order, 3);
        assert_eq!(card.fights[0].weight_class, "Heavyweight");
        assert_eq!(card.fights[1].order, 2);
        assert_eq!(card.fights[1].weight_class, "Fight");
        assert_eq!(card.fights[1].fighters[0].record.as_deref(), Some("TBD"));
    }

    #[test]
    fn test_simple_mode_caps_nodes() {
        let html = r#"<div class="bout"><span class="name">A</span><span class="name">B</span></div>"#.repeat(8);
        let card = FightExtractor::new().extract_fragment(&html);
        assert_eq!(card.nodes, 5);
        assert_eq!(card.fights.len(), 5);
        assert_eq!(card.fights[4].order, 1);
        assert_eq!(card.fights[4].weight_class, "Main Event");
    }

    #[test]
    fn test_roster_mode_builds_one_main_event() {
        let html = r#"<div class="athlete">Amanda Nunes</div><div class="athlete">Julianna Pena</div><div class="athlete">Third</div>"#;
        let card = FightExtractor::new().extract_fragment(html);

        assert_eq!(card.mode, FightMode::Roster);
        assert_eq!(card.fights.len(), 1);
        let fight = &card.fights[0];
        assert_eq!(fight.weight_class, "Main Event");
        assert_eq!(fight.order, 1);
        assert_eq!(fight.fighters[0].name, "Amanda Nunes");
        assert_eq!(fight.fighters[1].name, "Julianna Pena");
        assert_eq!(fight.fighters[1].country, "TBD");
    }

    #[test]
    fn test_roster_names_on_a_detail_page_are_ignored() {
        let html = r#"<html><body><nav>
            <a class="nav-fighters">Athletes</a>
            <a class="menu-fighter-rankings">Fighter Rankings</a>
        </nav><p>Card to be announced</p></body></html>"#;
        let card = FightExtractor::new().extract_document(html);

        assert_eq!(card.mode, FightMode::None);
        assert!(card.fights.is_empty());
    }

    #[test]
    fn test_single_roster_name_yields_nothing() {
        let card = FightExtractor::new().extract_fragment(r#"<div class="fighter">Solo</div>"#);
        assert_eq!(card.mode, FightMode::None);
        assert!(card.fights.is_empty());
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("#3"), Some(3));
        assert_eq!(parse_rank("  #15 "), Some(15));
        assert_eq!(parse_rank("C"), None);
        assert_eq!(parse_rank("#"), None);
        assert_eq!(parse_rank("3"), None);
        assert_eq!(parse_rank("#3a"), None);
    }
}
