//! Date Indexer
//!
//! Date → menu lookup and Monday-start weeks.

use chrono::{Datelike, Duration};

use crate::domain::{DateKey, Menu};

/// First menu whose canonical date equals `date`. Exact match only, no
/// timezone adjustment.
pub fn index_by_date<'a, I>(menus: I, date: DateKey) -> Option<&'a Menu>
where
    I: IntoIterator<Item = &'a Menu>,
{
    menus.into_iter().find(|menu| menu.date() == date)
}

/// The seven days of the week containing `reference`, Monday first
pub fn week_of(reference: DateKey) -> [DateKey; 7] {
    let day = reference.as_naive();
    let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    std::array::from_fn(|i| DateKey::new(monday + Duration::days(i as i64)))
}

/// Inclusive bounds of the week containing `reference`
pub fn week_range(reference: DateKey) -> (DateKey, DateKey) {
    let week = week_of(reference);
    (week[0], week[6])
}
