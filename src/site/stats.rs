//! Aggregate statistics over the recorded hits

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::Result;
use crate::services::{ChartData, Dataset, PopularPage, StatsProvider, TimeUnit};

use super::{Hit, Site};

/// Upper bounds, in seconds, of the dwell time buckets; the last bucket is
/// open ended.
const DWELL_BUCKETS: [(u64, &str); 3] = [(60, "< 1m"), (300, "1-5m"), (600, "5-10m")];
const DWELL_OVERFLOW: &str = "> 10m";

/// Most periods a single time series will cover, whatever is asked for.
const MAX_PERIODS: u32 = 1000;

impl Site {
    fn hits_between(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &Hit> {
        self.hits
            .iter()
            .filter(move |hit| hit.date >= from && hit.date <= to)
    }
}

impl StatsProvider for Site {
    fn hits_line_chart(
        &self,
        amount: u32,
        unit: TimeUnit,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ChartData> {
        let periods = periods(amount, unit, to);

        let mut counts: BTreeMap<NaiveDate, u64> = periods
            .iter()
            .map(|start| (*start, 0))
            .collect();

        for hit in self.hits_between(from, to) {
            if let Some(count) = counts.get_mut(&period_start(hit.date, unit)) {
                *count += 1;
            }
        }

        Ok(ChartData {
            labels: periods
                .iter()
                .map(|start| label(*start, unit))
                .collect(),
            datasets: vec![Dataset {
                label: "Page hits".to_string(),
                data: counts
                    .values()
                    .map(|count| *count as f64)
                    .collect(),
            }],
        })
    }

    /// A lead is returning if it visited anything before the period began.
    fn new_vs_returning(&self, from: NaiveDate, to: NaiveDate) -> Result<ChartData> {
        let visitors: BTreeSet<u64> = self
            .hits_between(from, to)
            .filter_map(|hit| hit.lead_id)
            .collect();

        let earlier: BTreeSet<u64> = self
            .hits
            .iter()
            .filter(|hit| hit.date < from)
            .filter_map(|hit| hit.lead_id)
            .collect();

        let returning = visitors
            .intersection(&earlier)
            .count();
        let unique = visitors.len() - returning;

        Ok(pie(
            "Unique vs returning leads",
            vec![("Unique", unique as f64), ("Returning", returning as f64)],
        ))
    }

    fn dwell_times(&self, from: NaiveDate, to: NaiveDate) -> Result<ChartData> {
        let mut counts = [0u64; DWELL_BUCKETS.len() + 1];

        for hit in self.hits_between(from, to) {
            let bucket = DWELL_BUCKETS
                .iter()
                .position(|(limit, _)| hit.dwell_seconds < *limit)
                .unwrap_or(DWELL_BUCKETS.len());
            counts[bucket] += 1;
        }

        let slices = DWELL_BUCKETS
            .iter()
            .map(|(_, name)| *name)
            .chain(std::iter::once(DWELL_OVERFLOW))
            .zip(
                counts
                    .iter()
                    .map(|count| *count as f64),
            )
            .collect();

        Ok(pie("Dwell times", slices))
    }

    fn popular_pages(
        &self,
        limit: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PopularPage>> {
        let mut counts: HashMap<u64, u64> = HashMap::new();
        for hit in self.hits_between(from, to) {
            *counts
                .entry(hit.page_id)
                .or_default() += 1;
        }

        let mut popular: Vec<PopularPage> = counts
            .into_iter()
            .filter_map(|(id, hits)| {
                self.page(id)
                    .map(|page| PopularPage {
                        id,
                        title: page
                            .title
                            .clone(),
                        hits,
                    })
            })
            .collect();

        popular.sort_by(|a, b| {
            b.hits
                .cmp(&a.hits)
                .then_with(|| a.id.cmp(&b.id))
        });
        popular.truncate(limit as usize);

        Ok(popular)
    }
}

fn pie(label: &str, slices: Vec<(&str, f64)>) -> ChartData {
    let (labels, data): (Vec<String>, Vec<f64>) = slices
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .unzip();

    ChartData {
        labels,
        datasets: vec![Dataset {
            label: label.to_string(),
            data,
        }],
    }
}

/// The first day of the period containing `date`. Weeks start on Monday.
fn period_start(date: NaiveDate, unit: TimeUnit) -> NaiveDate {
    match unit {
        TimeUnit::Day => date,
        TimeUnit::Week => date
            .checked_sub_days(Days::new(
                date.weekday()
                    .num_days_from_monday() as u64,
            ))
            .unwrap_or(date),
        TimeUnit::Month => date
            .with_day(1)
            .unwrap_or(date),
        TimeUnit::Year => date
            .with_day(1)
            .and_then(|d| d.with_month(1))
            .unwrap_or(date),
    }
}

fn previous_period(start: NaiveDate, unit: TimeUnit) -> Option<NaiveDate> {
    match unit {
        TimeUnit::Day => start.checked_sub_days(Days::new(1)),
        TimeUnit::Week => start.checked_sub_days(Days::new(7)),
        TimeUnit::Month => start.checked_sub_months(Months::new(1)),
        TimeUnit::Year => start.checked_sub_months(Months::new(12)),
    }
}

/// Start dates of the `amount` periods ending with the one containing
/// `to`, oldest first. At most [`MAX_PERIODS`] are returned.
fn periods(amount: u32, unit: TimeUnit, to: NaiveDate) -> Vec<NaiveDate> {
    let amount = amount.min(MAX_PERIODS) as usize;
    let mut result = Vec::new();
    let mut current = Some(period_start(to, unit));

    while result.len() < amount {
        match current {
            Some(start) => {
                result.push(start);
                current = previous_period(start, unit);
            }
            None => break,
        }
    }

    result.reverse();
    result
}

fn label(start: NaiveDate, unit: TimeUnit) -> String {
    let format = match unit {
        TimeUnit::Day | TimeUnit::Week => "%Y-%m-%d",
        TimeUnit::Month => "%Y-%m",
        TimeUnit::Year => "%Y",
    };
    start
        .format(format)
        .to_string()
}
