//! Body measurements and their chart series.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{RepbookError, Result};
use crate::keys::Namespace;
use crate::model::{BodyMeasurement, Metric};
use crate::storage::{KeyValueStore, Store};

/// Fewest points a chart is drawn with.
pub const MIN_CHART_POINTS: usize = 2;

fn leading_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
            .expect("leading number pattern is a valid regex")
    })
}

/// Parse the number a value starts with, ignoring any trailing text
/// (`"82.5 kg"` reads as 82.5, `"80,5"` as 80).
pub fn parse_metric_value(raw: &str) -> Option<f64> {
    leading_number()
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub struct Measurements<'a, S: KeyValueStore> {
    store: &'a Store<S>,
    namespace: &'a Namespace,
}

impl<'a, S: KeyValueStore> Measurements<'a, S> {
    pub fn new(store: &'a Store<S>, namespace: &'a Namespace) -> Self {
        Self { store, namespace }
    }

    /// All measurements, oldest first.
    pub fn list(&self) -> Vec<BodyMeasurement> {
        self.store.get_or_default(&self.namespace.measurements_key())
    }

    fn save(&self, items: &[BodyMeasurement]) -> Result<()> {
        self.store.set(&self.namespace.measurements_key(), items)
    }

    /// Validate and insert `measurement`, keeping the list sorted by date.
    pub fn add(&self, measurement: BodyMeasurement) -> Result<BodyMeasurement> {
        if measurement.date.trim().is_empty() {
            return Err(RepbookError::Validation("Date is required".to_string()));
        }
        if !measurement.has_any_value() {
            return Err(RepbookError::Validation(
                "Enter at least one measurement".to_string(),
            ));
        }

        let mut items = self.list();
        items.push(measurement.clone());
        items.sort_by(|a, b| a.date.cmp(&b.date));
        self.save(&items)?;
        tracing::debug!(id = %measurement.id, date = %measurement.date, "added measurement");
        Ok(measurement)
    }

    pub fn delete(&self, id: &str) -> Result<BodyMeasurement> {
        let mut items = self.list();
        let pos = items
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| RepbookError::NotFound(format!("Measurement '{}'", id)))?;
        let removed = items.remove(pos);
        self.save(&items)?;
        Ok(removed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub date: String,
    pub value: f64,
}

/// Chart-ready series of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub metric: &'static str,
    pub label: &'static str,
    pub points: Vec<MetricPoint>,
    /// Y axis `[min, max]`
    pub domain: (f64, f64),
}

impl MetricSeries {
    /// Whether there is enough data to draw a line.
    pub fn is_chartable(&self) -> bool {
        self.points.len() >= MIN_CHART_POINTS
    }
}

/// Values of `metric` in list order, dropping ones that do not parse.
pub fn metric_series(items: &[BodyMeasurement], metric: Metric) -> MetricSeries {
    let points: Vec<MetricPoint> = items
        .iter()
        .filter_map(|m| {
            parse_metric_value(m.value(metric)).map(|value| MetricPoint {
                date: m.date.clone(),
                value,
            })
        })
        .collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();

    MetricSeries {
        metric: metric.as_str(),
        label: metric.label(),
        points,
        domain: chart_domain(&values),
    }
}

/// `[max(0, floor(min - 2)), ceil(max * 1.1)]`; `[0, 110]` without values.
pub fn chart_domain(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = values.iter().copied().reduce(f64::max).unwrap_or(100.0);
    // scaled as max * 11 / 10 so whole values like 100 land on 110, not 111
    ((min - 2.0).floor().max(0.0), (max * 11.0 / 10.0).ceil())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn measurement(id: &str, date: &str, weight: &str) -> BodyMeasurement {
        BodyMeasurement {
            id: id.to_string(),
            date: date.to_string(),
            weight: weight.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_metric_value() {
        assert_eq!(parse_metric_value("82.5"), Some(82.5));
        assert_eq!(parse_metric_value(" 90 cm"), Some(90.0));
        assert_eq!(parse_metric_value("80,5"), Some(80.0));
        assert_eq!(parse_metric_value("abc"), None);
        assert_eq!(parse_metric_value(""), None);
    }

    #[test]
    fn test_add_validates_and_sorts() {
        let store = Store::new(MemoryStore::new());
        let ns = Namespace::new("t").unwrap();
        let log = Measurements::new(&store, &ns);

        assert!(log.add(measurement("1", "", "80")).is_err());
        assert!(log.add(measurement("1", "2025-01-01", "")).is_err());
        assert!(log.list().is_empty());

        log.add(measurement("2", "2025-02-01", "81")).unwrap();
        log.add(measurement("1", "2025-01-01", "82")).unwrap();
        let dates: Vec<String> = log.list().into_iter().map(|m| m.date).collect();
        assert_eq!(dates, vec!["2025-01-01", "2025-02-01"]);

        log.delete("1").unwrap();
        assert_eq!(log.list().len(), 1);
        assert!(log.delete("1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_series_and_domain() {
        let items = vec![
            measurement("1", "2025-01-01", "82"),
            measurement("2", "2025-01-08", "n/a"),
            measurement("3", "2025-01-15", "80.4"),
        ];
        let series = metric_series(&items, Metric::Weight);
        assert_eq!(series.points.len(), 2);
        assert!(series.is_chartable());
        assert_eq!(series.domain, (78.0, 91.0));

        let empty = metric_series(&items, Metric::Thigh);
        assert!(!empty.is_chartable());
        assert_eq!(empty.domain, (0.0, 110.0));
    }

    #[test]
    fn test_domain_on_whole_values() {
        assert_eq!(chart_domain(&[]), (0.0, 110.0));
        assert_eq!(chart_domain(&[90.0, 100.0]), (88.0, 110.0));
        assert_eq!(chart_domain(&[1.0, 10.0]), (0.0, 11.0));
        assert_eq!(chart_domain(&[50.0, 70.0]), (48.0, 77.0));
    }
}
