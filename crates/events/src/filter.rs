use core_types::{Event, FilterCriteria};

/// Keeps the events that pass every predicate of `criteria`, in input order.
///
/// The predicates are independent and side-effect free, so the result does
/// not depend on the order they are checked in, and filtering an already
/// filtered list again with the same criteria changes nothing.
pub fn apply_filters<'a, I>(events: I, criteria: &FilterCriteria) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut seen = 0usize;
    let kept: Vec<&'a Event> = events
        .into_iter()
        .inspect(|_| seen += 1)
        .filter(|event| matches(event, criteria))
        .collect();

    tracing::debug!(seen, kept = kept.len(), "Applied event filters.");
    kept
}

/// The single-event predicate behind [`apply_filters`].
pub fn matches(event: &Event, criteria: &FilterCriteria) -> bool {
    type_allowed(event, criteria)
        && impact_in_range(event, criteria)
        && date_in_range(event, criteria)
        && symbol_allowed(event, criteria)
        && impact_strong_enough(event, criteria)
}

fn type_allowed(event: &Event, criteria: &FilterCriteria) -> bool {
    criteria.allowed_types.is_empty() || criteria.allowed_types.contains(&event.event_type)
}

/// Unscored events always pass the range check.
fn impact_in_range(event: &Event, criteria: &FilterCriteria) -> bool {
    event
        .impact_score
        .is_none_or(|score| criteria.value_range.contains(score))
}

/// Unparseable dates never match a date range.
fn date_in_range(event: &Event, criteria: &FilterCriteria) -> bool {
    match &criteria.date_range {
        None => true,
        Some(range) => event
            .timestamp()
            .is_some_and(|timestamp| range.contains(&timestamp)),
    }
}

fn symbol_allowed(event: &Event, criteria: &FilterCriteria) -> bool {
    criteria.symbols.is_empty()
        || event
            .symbol
            .as_ref()
            .is_some_and(|symbol| criteria.symbols.contains(symbol))
}

/// Unlike the range check, a minimum magnitude rejects unscored events.
fn impact_strong_enough(event: &Event, criteria: &FilterCriteria) -> bool {
    match criteria.min_abs_impact {
        None => true,
        Some(min) => event.impact_score.is_some_and(|score| score.abs() >= min),
    }
}
