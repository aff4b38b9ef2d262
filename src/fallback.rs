use chrono::{DateTime, Duration, Utc};

use crate::constants::{DATE_FALLBACK_DAYS, UNKNOWN_FIELD};
use crate::types::{Event, Fight, Fighter};

pub const FALLBACK_EVENT_ID: &str = "ufc-upcoming-1";

/// The fixed single-event set served when a scrape produces nothing usable.
pub fn fallback_events(now: DateTime<Utc>) -> Vec<Event> {
    let fighter = |name: &str, country: &str| Fighter {
        name: name.to_string(),
        country: country.to_string(),
        ranking: None,
        record: Some(UNKNOWN_FIELD.to_string()),
    };

    vec![Event {
        id: FALLBACK_EVENT_ID.to_string(),
        date: now + Duration::days(DATE_FALLBACK_DAYS),
        title: "Upcoming UFC Event".to_string(),
        location: "Las Vegas, Nevada, USA".to_string(),
        fights: vec![Fight {
            weight_class: "Main Event".to_string(),
            order: 1,
            fighters: vec![fighter("Fighter A", "USA"), fighter("Fighter B", "Brazil")],
        }],
    }]
}

fn ranked(name: &str, country: &str, ranking: Option<u16>, record: &str) -> Fighter {
    Fighter {
        name: name.to_string(),
        country: country.to_string(),
        ranking,
        record: Some(record.to_string()),
    }
}

fn bout(weight_class: &str, order: u32, red: Fighter, blue: Fighter) -> Fight {
    Fight {
        weight_class: weight_class.to_string(),
        order,
        fighters: vec![red, blue],
    }
}

/// Two hand-written cards for demos and empty caches.
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![
        Event {
            id: "ufc-310".to_string(),
            date: now + Duration::days(30),
            title: "UFC 310: Pantoja vs Asakura".to_string(),
            location: "Las Vegas, Nevada, USA".to_string(),
            fights: vec![
                bout(
                    "Flyweight Championship",
                    1,
                    ranked("Alexandre Pantoja", "Brazil", Some(1), "28-5-0"),
                    ranked("Kai Asakura", "Japan", None, "21-4-0"),
                ),
                bout(
                    "Welterweight",
                    2,
                    ranked("Shavkat Rakhmonov", "Kazakhstan", Some(3), "18-0-0"),
                    ranked("Ian Machado Garry", "Ireland", Some(7), "15-0-0"),
                ),
                bout(
                    "Heavyweight",
                    3,
                    ranked("Ciryl Gane", "France", Some(2), "12-2-0"),
                    ranked("Alexander Volkov", "Russia", Some(4), "38-10-0"),
                ),
            ],
        },
        Event {
            id: "ufc-311".to_string(),
            date: now + Duration::days(60),
            title: "UFC 311: Islam vs Arman".to_string(),
            location: "Los Angeles, California, USA".to_string(),
            fights: vec![
                bout(
                    "Lightweight Championship",
                    1,
                    ranked("Islam Makhachev", "Russia", Some(1), "26-1-0"),
                    ranked("Arman Tsarukyan", "Armenia", Some(2), "22-3-0"),
                ),
                bout(
                    "Bantamweight Championship",
                    2,
                    ranked("Sean O'Malley", "USA", Some(1), "18-1-0"),
                    ranked("Umar Nurmagomedov", "Russia", Some(2), "18-0-0"),
                ),
            ],
        },
    ]
}
