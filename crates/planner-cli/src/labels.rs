//! Display strings per language, with English as the fallback.

use planner_engine::PlaceState;

type Table = &'static [(&'static str, &'static str)];

const EN: Table = &[
    ("open_closes", "Open now · Closes {time}"),
    ("closed_opens", "Closed · Opens {time}"),
    ("closed", "Closed"),
    ("hours_not_set", "Hours not set"),
    ("no_events", "No events in the next {hours} hours."),
    ("no_places", "No places yet. Add some places first."),
    ("truncated", "(list truncated)"),
];

const RO: Table = &[
    ("open_closes", "Deschis acum · Se închide la {time}"),
    ("closed_opens", "Închis · Se deschide la {time}"),
    ("closed", "Închis"),
    ("hours_not_set", "Program nesetat"),
    ("no_events", "Niciun eveniment în următoarele {hours} ore."),
    ("no_places", "Niciun loc încă. Adaugă mai întâi locuri."),
    ("truncated", "(listă trunchiată)"),
];

const DE: Table = &[
    ("open_closes", "Jetzt geöffnet · Schließt um {time}"),
    ("closed_opens", "Geschlossen · Öffnet um {time}"),
    ("closed", "Geschlossen"),
    ("hours_not_set", "Öffnungszeiten nicht festgelegt"),
    ("no_events", "Keine Veranstaltungen in den nächsten {hours} Stunden."),
    ("no_places", "Noch keine Orte. Füge zuerst Orte hinzu."),
    ("truncated", "(Liste gekürzt)"),
];

fn table(lang: &str) -> Option<Table> {
    match lang {
        "en" => Some(EN),
        "ro" => Some(RO),
        "de" => Some(DE),
        _ => None,
    }
}

fn lookup<'a>(table: Table, key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Translate `key` for `lang`: the language's entry, else English, else the key itself.
pub fn t<'a>(lang: &str, key: &'a str) -> &'a str {
    table(lang)
        .and_then(|tbl| lookup(tbl, key))
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

/// Status line for a place, e.g. `Open now · Closes 18:00`.
pub fn place_status(lang: &str, state: &PlaceState) -> String {
    match state {
        PlaceState::Open { closes_at } => {
            t(lang, "open_closes").replace("{time}", &closes_at.format("%H:%M").to_string())
        }
        PlaceState::OpensAt { at } => {
            t(lang, "closed_opens").replace("{time}", &at.format("%H:%M").to_string())
        }
        PlaceState::Closed => t(lang, "closed").to_string(),
        PlaceState::HoursNotSet => t(lang, "hours_not_set").to_string(),
    }
}

pub fn no_events(lang: &str, hours: f64) -> String {
    t(lang, "no_events").replace("{hours}", &hours.to_string())
}
