use chrono::format::{Item as ChronoItem, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, Weekday};

use super::tokens::Item;

pub(super) fn render(items: &[Item], at: &DateTime<FixedOffset>) -> String {
    let lowered = chrono_items(items, at);
    at.format_with_items(lowered.iter()).to_string()
}

/// Lower a compiled format to chrono items. `dd` has no strftime
/// equivalent, so it is resolved against `at` here.
fn chrono_items<'a>(items: &'a [Item], at: &DateTime<FixedOffset>) -> Vec<ChronoItem<'a>> {
    let mut lowered = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Literal(text) => lowered.push(ChronoItem::Literal(text)),
            Item::Token(token) => match token.strftime() {
                Some(spec) => lowered.extend(StrftimeItems::new(spec)),
                None => lowered.push(ChronoItem::OwnedLiteral(weekday_min(at.weekday()).into())),
            },
        }
    }
    lowered
}

/// Two letter weekday name, as day.js renders `dd` (`Su`, `Mo`, ...).
pub(super) fn weekday_min(weekday: Weekday) -> String {
    weekday.to_string().chars().take(2).collect()
}
