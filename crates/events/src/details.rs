use core_types::Event;
use serde::Serialize;
use serde_json::{Map, Value};

/// The metadata of an event, resolved through its type.
///
/// The backend attaches a free-form map whose keys depend on the detector that
/// produced the event. This turns it into a closed set of shapes. Missing or
/// mistyped fields become `None`.
///
/// Serialized with an adjacent tag, for example
/// `{"kind": "Dividend", "details": {"amount": 0.24, ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "details")]
pub enum EventDetails {
    Earnings {
        eps_actual: Option<f64>,
        eps_estimate: Option<f64>,
        eps_surprise_pct: Option<f64>,
        revenue_actual: Option<f64>,
        revenue_estimate: Option<f64>,
        revenue_surprise_pct: Option<f64>,
    },
    Dividend {
        amount: Option<f64>,
        declaration_date: Option<String>,
        ex_date: Option<String>,
        payment_date: Option<String>,
        record_date: Option<String>,
    },
    /// Moving-average crossovers and breakouts.
    Technical {
        ma_50: Option<f64>,
        ma_200: Option<f64>,
        close_price: Option<f64>,
    },
    VolumeSpike {
        volume: Option<f64>,
        avg_volume: Option<f64>,
        volume_ratio: Option<f64>,
        price_change: Option<f64>,
        close_price: Option<f64>,
    },
    News {
        headline: Option<String>,
        url: Option<String>,
    },
    Other,
}

const TECHNICAL_TYPES: [&str; 4] = [
    "golden_cross",
    "death_cross",
    "price_above_ma200",
    "price_below_ma200",
];

impl EventDetails {
    pub fn from_event(event: &Event) -> Self {
        let kind = event.event_type.as_str();
        let meta = &event.metadata;

        if kind.starts_with("earnings") {
            EventDetails::Earnings {
                eps_actual: number(meta, "eps_actual"),
                eps_estimate: number(meta, "eps_estimate"),
                eps_surprise_pct: number(meta, "eps_surprise_pct"),
                revenue_actual: number(meta, "revenue_actual"),
                revenue_estimate: number(meta, "revenue_estimate"),
                revenue_surprise_pct: number(meta, "revenue_surprise_pct"),
            }
        } else if kind.starts_with("dividend") || kind == "ex_dividend" {
            EventDetails::Dividend {
                amount: number(meta, "amount"),
                declaration_date: text(meta, "declaration_date"),
                ex_date: text(meta, "ex_date"),
                payment_date: text(meta, "payment_date"),
                record_date: text(meta, "record_date"),
            }
        } else if TECHNICAL_TYPES.contains(&kind) {
            EventDetails::Technical {
                ma_50: number(meta, "ma_50"),
                ma_200: number(meta, "ma_200"),
                close_price: number(meta, "close_price"),
            }
        } else if kind.ends_with("_volume_spike") {
            EventDetails::VolumeSpike {
                volume: number(meta, "volume"),
                avg_volume: number(meta, "avg_volume"),
                volume_ratio: number(meta, "volume_ratio"),
                price_change: number(meta, "price_change"),
                close_price: number(meta, "close_price"),
            }
        } else if kind.starts_with("news") || meta.contains_key("headline") {
            EventDetails::News {
                headline: text(meta, "headline"),
                url: text(meta, "url").filter(|url| !url.is_empty()),
            }
        } else {
            EventDetails::Other
        }
    }
}

/// Reads a number, also accepting numeric strings.
fn number(meta: &Map<String, Value>, key: &str) -> Option<f64> {
    match meta.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(meta: &Map<String, Value>, key: &str) -> Option<String> {
    match meta.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earnings_fields_are_read_by_type() {
        let event = Event::new("1", "earnings_beat", "2023-01-15")
            .with_metadata("eps_actual", 1.52)
            .with_metadata("eps_estimate", "1.40")
            .with_metadata("revenue_actual", Value::Null);

        match EventDetails::from_event(&event) {
            EventDetails::Earnings {
                eps_actual,
                eps_estimate,
                revenue_actual,
                ..
            } => {
                assert_eq!(eps_actual, Some(1.52));
                assert_eq!(eps_estimate, Some(1.40));
                assert_eq!(revenue_actual, None);
            }
            other => panic!("expected earnings details, got {other:?}"),
        }
    }

    #[test]
    fn dividend_dates_stay_strings() {
        let event = Event::new("2", "ex_dividend", "2023-02-01")
            .with_metadata("amount", 0.24)
            .with_metadata("payment_date", "2023-02-16");
        let details = EventDetails::from_event(&event);
        assert_eq!(
            details,
            EventDetails::Dividend {
                amount: Some(0.24),
                declaration_date: None,
                ex_date: None,
                payment_date: Some("2023-02-16".to_string()),
                record_date: None,
            }
        );
    }

    #[test]
    fn technical_and_volume_spikes() {
        let cross = Event::new("3", "golden_cross", "2023-03-01").with_metadata("ma_50", 151.2);
        let spike = Event::new("4", "bearish_volume_spike", "2023-03-02")
            .with_metadata("volume_ratio", 2.7);

        assert!(matches!(
            EventDetails::from_event(&cross),
            EventDetails::Technical { ma_50: Some(_), ma_200: None, .. }
        ));
        assert!(matches!(
            EventDetails::from_event(&spike),
            EventDetails::VolumeSpike { volume_ratio: Some(r), .. } if r == 2.7
        ));
    }

    #[test]
    fn news_is_detected_by_headline() {
        let event = Event::new("5", "merger_acquisition", "2023-05-01")
            .with_metadata("headline", "Acme acquires Widget Co")
            .with_metadata("url", "");
        assert_eq!(
            EventDetails::from_event(&event),
            EventDetails::News {
                headline: Some("Acme acquires Widget Co".to_string()),
                url: None,
            }
        );
    }

    #[test]
    fn unknown_types_are_other_and_serialize_with_a_tag() {
        let event = Event::new("6", "stock_split", "2023-06-01");
        let details = EventDetails::from_event(&event);
        assert_eq!(details, EventDetails::Other);
        assert_eq!(serde_json::to_value(&details).unwrap()["kind"], "Other");
    }
}
