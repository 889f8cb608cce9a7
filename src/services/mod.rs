//! Interfaces to the rest of the application. The renderers and the
//! dashboard only ever see these traits; the site store in
//! [`crate::site`] is one implementation and test doubles are another.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::{Clickthrough, Page, Redirect};
use crate::error::Result;

pub trait PageRepository {
    fn get(&self, id: u64) -> Result<Option<Page>>;

    /// Build the public URL of a page, with tracking data attached if a
    /// clickthrough is given.
    fn generate_url(
        &self,
        page: &Page,
        absolute: bool,
        clickthrough: Option<&Clickthrough>,
    ) -> Result<String>;

    fn all(&self) -> Result<Vec<Page>>;
}

pub trait RedirectRepository {
    fn get(&self, key: &str) -> Result<Option<Redirect>>;

    fn generate_redirect_url(
        &self,
        redirect: &Redirect,
        clickthrough: Option<&Clickthrough>,
    ) -> Result<String>;
}

/// Translation of message keys. By convention an untranslated key is handed
/// back unchanged.
pub trait TranslationLookup {
    fn translate(&self, key: &str) -> String;
}

pub trait SocialShareProvider {
    /// Share button markup, keyed by network name.
    fn share_buttons(&self, page: &Page) -> Result<BTreeMap<String, String>>;
}

pub trait Templating {
    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String>;
}

pub trait Router {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String>;
}

pub trait StatsProvider {
    fn hits_line_chart(
        &self,
        amount: u32,
        unit: TimeUnit,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ChartData>;

    fn new_vs_returning(&self, from: NaiveDate, to: NaiveDate) -> Result<ChartData>;

    fn dwell_times(&self, from: NaiveDate, to: NaiveDate) -> Result<ChartData>;

    fn popular_pages(&self, limit: u32, from: NaiveDate, to: NaiveDate)
        -> Result<Vec<PopularPage>>;
}

/// Granularity of a time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "W")]
    Week,
    #[serde(rename = "M")]
    Month,
    #[serde(rename = "Y")]
    Year,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "D" | "d" => Ok(TimeUnit::Day),
            "W" | "w" => Ok(TimeUnit::Week),
            "M" | "m" => Ok(TimeUnit::Month),
            "Y" | "y" => Ok(TimeUnit::Year),
            _ => Err(format!("unknown time unit \"{}\", expected one of D, W, M, Y", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularPage {
    pub id: u64,
    pub title: String,
    pub hits: u64,
}
