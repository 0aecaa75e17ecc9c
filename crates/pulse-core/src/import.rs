//! CSV import for metric observations and business events
//!
//! Both parsers fail on the first malformed row and report its line number.
//! Rows that are valid but look suspicious are imported and logged.

use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{BusinessEvent, EventCategory, Impact, MetricSeriesPoint};

/// Magnitude above which an imported value is logged as suspicious
pub const SUSPICIOUS_MAGNITUDE: f64 = 1_000_000.0;

/// Row of a metric values file: `metric_id,date,value`
#[derive(Debug, Deserialize)]
struct ValueRow {
    metric_id: String,
    date: String,
    value: String,
}

/// Row of an events file: `id,name,category,impact,start_date,end_date`
#[derive(Debug, Deserialize)]
struct EventRow {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    impact: Option<String>,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
}

/// Parse metric observations
///
/// Extra columns are ignored. Empty lines are skipped by the reader.
pub fn parse_metric_values<R: Read>(reader: R) -> Result<Vec<MetricSeriesPoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut points = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let row: ValueRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::invalid_record(line, e.to_string()))?;

        if row.metric_id.is_empty() {
            return Err(Error::invalid_record(line, "Missing metric_id"));
        }
        let date = parse_date(&row.date).map_err(|m| Error::invalid_record(line, m))?;
        let value = parse_value(&row.value).map_err(|m| Error::invalid_record(line, m))?;

        if value < 0.0 {
            warn!(line, metric = row.metric_id.as_str(), value, "Negative metric value");
        } else if value.abs() > SUSPICIOUS_MAGNITUDE {
            warn!(line, metric = row.metric_id.as_str(), value, "Unusually large metric value");
        }

        points.push(MetricSeriesPoint::new(row.metric_id, date, value));
    }

    debug!("Parsed {} metric values", points.len());
    Ok(points)
}

/// Parse business events
///
/// A blank `impact` defaults to medium; a blank `end_date` makes a single-day
/// event.
pub fn parse_events<R: Read>(reader: R) -> Result<Vec<BusinessEvent>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let today = Utc::now().date_naive();
    let mut events = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);
        let row: EventRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::invalid_record(line, e.to_string()))?;

        let event = event_from_row(row).map_err(|m| Error::invalid_record(line, m))?;
        if event.start_date > today {
            warn!(
                line,
                event = event.id.as_str(),
                date = %event.start_date,
                "Event starts in the future"
            );
        }
        events.push(event);
    }

    debug!("Parsed {} events", events.len());
    Ok(events)
}

fn event_from_row(row: EventRow) -> std::result::Result<BusinessEvent, String> {
    if row.id.is_empty() {
        return Err("Missing id".to_string());
    }
    if row.name.is_empty() {
        return Err("Missing name".to_string());
    }

    let category: EventCategory = row.category.parse()?;
    let impact = match row.impact.as_deref() {
        None | Some("") => Impact::default(),
        Some(s) => s.parse()?,
    };
    let start_date = parse_date(&row.start_date)?;
    let end_date = match row.end_date.as_deref() {
        None | Some("") => None,
        Some(s) => Some(parse_date(s)?),
    };

    if let Some(end) = end_date {
        if end <= start_date {
            return Err(format!(
                "End date {} must be after start date {}",
                end, start_date
            ));
        }
    }

    Ok(BusinessEvent {
        id: row.id,
        name: row.name,
        category,
        impact,
        start_date,
        end_date,
    })
}

/// 1-based line of a record in its source, falling back to 0 when unknown
fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (date part, in UTC)
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    Err(format!("Unable to parse date: {:?}", s))
}

fn parse_value(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Unable to parse value: {:?}", s))?;
    if !value.is_finite() {
        return Err(format!("Value is not a finite number: {}", s));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15").unwrap(), date(2024, 1, 15));
        assert_eq!(
            parse_date("2024-01-15T23:30:00Z").unwrap(),
            date(2024, 1, 15)
        );
        assert_eq!(
            parse_date("2024-01-15T23:30:00-05:00").unwrap(),
            date(2024, 1, 16)
        );
        assert!(parse_date("01/15/2024").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1234.5").unwrap(), 1234.5);
        assert_eq!(parse_value("-3").unwrap(), -3.0);
        assert!(parse_value("NaN").is_err());
        assert!(parse_value("inf").is_err());
        assert!(parse_value("$12").is_err());
    }

    #[test]
    fn test_parse_metric_values() {
        let csv = "metric_id,date,value,note
revenue,2024-01-01,100,launch month
revenue,2024-02-01,110.5,
signups,2024-01-01,-4,refunds";

        let points = parse_metric_values(csv.as_bytes()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], MetricSeriesPoint::new("revenue", date(2024, 1, 1), 100.0));
        assert_eq!(points[1].value, 110.5);
        assert_eq!(points[2].metric_id, "signups");
        assert_eq!(points[2].value, -4.0);
    }

    #[test]
    fn test_metric_value_error_names_line() {
        let csv = "metric_id,date,value
revenue,2024-01-01,100
revenue,2024-13-01,110";

        match parse_metric_values(csv.as_bytes()) {
            Err(Error::InvalidRecord { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("date"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let csv = "metric_id,date,value
revenue,2024-01-01,NaN";
        let err = parse_metric_values(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_parse_events() {
        let csv = "id,name,category,impact,start_date,end_date
evt-1,Spring Campaign,marketing,high,2024-03-01,2024-03-31
evt-2,Office Move,Operations,,2024-04-10,";

        let events = parse_events(csv.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, EventCategory::Marketing);
        assert_eq!(events[0].impact, Impact::High);
        assert_eq!(events[0].end_date, Some(date(2024, 3, 31)));
        assert_eq!(events[1].category, EventCategory::Operations);
        assert_eq!(events[1].impact, Impact::Medium);
        assert_eq!(events[1].end_date, None);
    }

    #[test]
    fn test_event_validation() {
        let bad_category = "id,name,category,impact,start_date,end_date
evt-1,Launch,astrology,high,2024-03-01,";
        assert!(matches!(
            parse_events(bad_category.as_bytes()),
            Err(Error::InvalidRecord { line: 2, .. })
        ));

        let inverted = "id,name,category,impact,start_date,end_date
evt-1,Launch,product,high,2024-03-01,2024-03-01";
        let err = parse_events(inverted.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("must be after"));

        let missing_name = "id,name,category,impact,start_date,end_date
evt-1,,product,high,2024-03-01,";
        assert!(parse_events(missing_name.as_bytes()).is_err());
    }
}
