use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled show: a date, a location and its fight card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub date: DateTime<Utc>,
    pub title: String,
    pub location: String,
    /// Ordered as found on the detail page; the main event comes first and
    /// carries the highest `order`
    pub fights: Vec<Fight>,
}

/// One bout between exactly two fighters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fight {
    pub weight_class: String,
    /// Broadcast order; the main event carries the largest value
    pub order: u32,
    pub fighters: Vec<Fighter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fighter {
    pub name: String,
    pub country: String,
    pub ranking: Option<u16>,
    /// "W-L-D", or "TBD" for placeholder fighters
    pub record: Option<String>,
}

impl Fighter {
    /// A fighter known only by name.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: crate::constants::UNKNOWN_FIELD.to_string(),
            ranking: None,
            record: Some(crate::constants::UNKNOWN_FIELD.to_string()),
        }
    }
}

impl Fight {
    /// Build a fight only when exactly two fighters were resolved.
    pub fn from_pair(weight_class: impl Into<String>, order: u32, fighters: Vec<Fighter>) -> Option<Self> {
        if fighters.len() != 2 || fighters.iter().any(|f| f.name.is_empty()) {
            return None;
        }
        Some(Self {
            weight_class: weight_class.into(),
            order,
            fighters,
        })
    }
}

/// Where a run's events came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Scraped,
    Fallback,
}
