//! Derived views over the in-memory measurement list
//!
//! Everything here is pure and rescans the slice it is given; nothing is
//! cached between calls.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::entities::blood_pressure::Tension;
use crate::entities::measurement::{
    DashboardSummary, MeasurementRecord, Metric, MetricCounts, MetricPoint, MetricSeries, WeekCount,
};

/// Label shown when there is no latest entry
pub const NO_LATEST_LABEL: &str = "--";

/// Records of one week, in load order
pub fn week_data(records: &[MeasurementRecord], week: u8) -> Vec<MeasurementRecord> {
    records.iter().filter(|record| record.week == week).cloned().collect()
}

/// Distinct week numbers, ascending
pub fn all_weeks(records: &[MeasurementRecord]) -> Vec<u8> {
    records
        .iter()
        .map(|record| record.week)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of distinct (week, day) pairs
pub fn distinct_days(records: &[MeasurementRecord]) -> usize {
    records
        .iter()
        .map(|record| (record.week, record.day))
        .collect::<HashSet<_>>()
        .len()
}

/// Most recently appended record
pub fn latest(records: &[MeasurementRecord]) -> Option<&MeasurementRecord> {
    records.last()
}

/// Records carrying a value for each metric
pub fn metric_counts(records: &[MeasurementRecord]) -> MetricCounts {
    MetricCounts {
        temperature: records.iter().filter(|r| r.temperature.is_some()).count(),
        tension: records.iter().filter(|r| has_tension(r)).count(),
        weight: records.iter().filter(|r| r.weight.is_some()).count(),
    }
}

fn has_tension(record: &MeasurementRecord) -> bool {
    record.tension.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// Records per week, ascending by week
pub fn week_breakdown(records: &[MeasurementRecord]) -> Vec<WeekCount> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.week).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(week, entries)| WeekCount { week, entries })
        .collect()
}

/// Everything the dashboard shows
pub fn summarize(records: &[MeasurementRecord]) -> DashboardSummary {
    let latest = latest(records).cloned();
    let latest_label = latest
        .as_ref()
        .map(MeasurementRecord::label)
        .unwrap_or_else(|| NO_LATEST_LABEL.to_string());

    DashboardSummary {
        total_entries: records.len(),
        weeks_recorded: all_weeks(records).len(),
        days_recorded: distinct_days(records),
        latest,
        latest_label,
        metric_counts: metric_counts(records),
        weeks: week_breakdown(records),
    }
}

/// Chart data for a metric, optionally restricted to one week
///
/// Records without a value for the metric are left out of the chart.
pub fn metric_series(records: &[MeasurementRecord], metric: Metric, week: Option<u8>) -> MetricSeries {
    let selected = match week {
        Some(week) => week_data(records, week),
        None => records.to_vec(),
    };

    MetricSeries {
        metric,
        week,
        available_weeks: all_weeks(records),
        points: selected.iter().filter_map(|record| metric_point(record, metric)).collect(),
    }
}

fn metric_point(record: &MeasurementRecord, metric: Metric) -> Option<MetricPoint> {
    let mut point = MetricPoint {
        id: record.id.clone(),
        week: record.week,
        day: record.day,
        value: None,
        reading: None,
        systolic: None,
        diastolic: None,
        category: None,
    };

    match metric {
        Metric::Temperature => point.value = Some(record.temperature?),
        Metric::Weight => point.value = Some(record.weight?),
        Metric::Tension => {
            let reading = record.tension.clone().filter(|t| !t.trim().is_empty())?;
            // Rows written by other clients may not parse
            if let Ok(tension) = reading.parse::<Tension>() {
                point.value = Some(f64::from(tension.systolic));
                point.systolic = Some(tension.systolic);
                point.diastolic = Some(tension.diastolic);
                point.category = Some(tension.category());
            }
            point.reading = Some(reading);
        }
    }

    Some(point)
}
