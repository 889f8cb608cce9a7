//! Requests for and payloads of dashboard widgets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::{ChartData, TimeUnit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetParams {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub time_unit: Option<TimeUnit>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRequest {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub height: i64,
    pub params: WidgetParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub chart_type: ChartType,
    pub chart_height: i64,
    pub chart_data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub text: String,
    pub link: Option<String>,
}

impl TableCell {
    pub fn text(text: impl Into<String>) -> TableCell {
        TableCell {
            text: text.into(),
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, link: impl Into<String>) -> TableCell {
        TableCell {
            text: text.into(),
            link: Some(link.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePayload {
    pub head_items: Vec<String>,
    pub body_items: Vec<Vec<TableCell>>,
}

/// The data a widget displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetResult {
    Chart(ChartPayload),
    Table(TablePayload),
}

/// The outcome of handling a widget request: which template to display it
/// with, and the data unless the caller already has it cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetDetail {
    pub template: &'static str,
    pub data: Option<WidgetResult>,
}
