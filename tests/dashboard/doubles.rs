use std::cell::{Cell, RefCell};

use chrono::NaiveDate;

use page_tokens::services::{
    ChartData, Dataset, PopularPage, Router, StatsProvider, TimeUnit, TranslationLookup,
};
use page_tokens::Result;

/// Statistics that remember what they were asked for.
#[derive(Default)]
pub struct Stats {
    pub calls: Cell<usize>,
    pub limit: Cell<Option<u32>>,
    pub series: RefCell<Option<(u32, TimeUnit)>>,
    pub popular: Vec<PopularPage>,
}

impl Stats {
    pub fn new() -> Stats {
        Stats::default()
    }

    pub fn with_popular(mut self, id: u64, title: &str, hits: u64) -> Stats {
        self.popular
            .push(PopularPage {
                id,
                title: title.to_string(),
                hits,
            });
        self
    }

    fn called(&self) {
        self.calls
            .set(self.calls.get() + 1);
    }
}

fn slices(labels: &[&str], data: &[f64]) -> ChartData {
    ChartData {
        labels: labels
            .iter()
            .map(|label| label.to_string())
            .collect(),
        datasets: vec![Dataset {
            label: "test".to_string(),
            data: data.to_vec(),
        }],
    }
}

impl StatsProvider for Stats {
    fn hits_line_chart(
        &self,
        amount: u32,
        unit: TimeUnit,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<ChartData> {
        self.called();
        self.series
            .replace(Some((amount, unit)));
        Ok(slices(&["2024-04-01", "2024-04-02"], &[3.0, 5.0]))
    }

    fn new_vs_returning(&self, _from: NaiveDate, _to: NaiveDate) -> Result<ChartData> {
        self.called();
        Ok(slices(&["Unique", "Returning"], &[7.0, 2.0]))
    }

    fn dwell_times(&self, _from: NaiveDate, _to: NaiveDate) -> Result<ChartData> {
        self.called();
        Ok(slices(&["< 1m", "> 10m"], &[4.0, 1.0]))
    }

    fn popular_pages(
        &self,
        limit: u32,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PopularPage>> {
        self.called();
        self.limit
            .set(Some(limit));
        Ok(self
            .popular
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub struct Routes;

impl Router for Routes {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut path = format!("/{}", route);
        for (_, value) in params {
            path.push('/');
            path.push_str(value);
        }
        Ok(path)
    }
}

pub struct English;

impl TranslationLookup for English {
    fn translate(&self, key: &str) -> String {
        match key {
            "dashboard.label.title" => "Title".to_string(),
            "dashboard.label.hits" => "Hits".to_string(),
            _ => key.to_string(),
        }
    }
}
