use chrono::{DateTime, Utc};
use core_types::Event;
use core_types::dates::month_key;
use serde::Serialize;

/// Key of the trailing group holding events whose date could not be parsed.
pub const UNKNOWN_DATE_KEY: &str = "Unknown Date";

/// All events of one calendar month, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup<'a> {
    /// Full month name and year, e.g. `"January 2023"`.
    pub key: String,
    pub events: Vec<&'a Event>,
}

/// Events grouped by month, most recent month first.
///
/// Borrows the events it was built from; nothing is cloned or mutated.
/// Iterating it is restartable and always yields the same sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Timeline<'a> {
    groups: Vec<MonthGroup<'a>>,
}

impl<'a> Timeline<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, MonthGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MonthGroup<'a>> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.key.as_str())
    }

    /// Every event in display order: groups in order, events in order within each group.
    pub fn flatten(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.groups.iter().flat_map(|group| group.events.iter().copied())
    }

    pub fn into_groups(self) -> Vec<MonthGroup<'a>> {
        self.groups
    }
}

impl<'t, 'a> IntoIterator for &'t Timeline<'a> {
    type Item = &'t MonthGroup<'a>;
    type IntoIter = std::slice::Iter<'t, MonthGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Groups events by their UTC calendar month.
///
/// Events are sorted by date descending with a stable sort, so events sharing
/// a timestamp keep their input order. Because of that order, each month is a
/// contiguous run and months come out ordered by their most recent event.
/// Events with an unparseable date are collected, in input order, into a final
/// [`UNKNOWN_DATE_KEY`] group.
pub fn group_by_month(events: &[Event]) -> Timeline<'_> {
    let mut dated: Vec<(DateTime<Utc>, &Event)> = Vec::with_capacity(events.len());
    let mut undated: Vec<&Event> = Vec::new();

    for event in events {
        match event.timestamp() {
            Some(timestamp) => dated.push((timestamp, event)),
            None => {
                tracing::warn!(id = %event.id, date = %event.date, "Unparseable event date.");
                undated.push(event);
            }
        }
    }

    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    let mut groups: Vec<MonthGroup<'_>> = Vec::new();
    for (timestamp, event) in dated {
        let key = month_key(&timestamp);
        match groups.last_mut() {
            Some(group) if group.key == key => group.events.push(event),
            _ => groups.push(MonthGroup {
                key,
                events: vec![event],
            }),
        }
    }

    if !undated.is_empty() {
        groups.push(MonthGroup {
            key: UNKNOWN_DATE_KEY.to_string(),
            events: undated,
        });
    }

    tracing::debug!(events = events.len(), groups = groups.len(), "Built event timeline.");
    Timeline { groups }
}
