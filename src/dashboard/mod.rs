//! Chart and table data for the page dashboard widgets

mod widget;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::services::{Router, StatsProvider, Templating, TranslationLookup};
use crate::templating::{CHART_TEMPLATE, TABLE_TEMPLATE};

pub use widget::*;

/// Bundle the widgets below are listed under.
pub const BUNDLE: &str = "page";

pub const HITS_IN_TIME: &str = "page.hits.in.time";
pub const UNIQUE_VS_RETURNING: &str = "unique.vs.returning.leads";
pub const DWELL_TIMES: &str = "dwell.times";
pub const POPULAR_PAGES: &str = "popular.pages";

static WIDGET_TYPES: [&str; 4] = [HITS_IN_TIME, UNIQUE_VS_RETURNING, DWELL_TIMES, POPULAR_PAGES];

/// Route used to link a popular page to its detail view.
pub const PAGE_ACTION_ROUTE: &str = "page_action";

/// Vertical space taken up by the widget's own header and padding.
const WIDGET_CHROME: i64 = 80;

/// Height of one table row.
const ROW_HEIGHT: f64 = 35.0;

const DEFAULT_AMOUNT: u32 = 30;

struct Binding<'a> {
    template: &'static str,
    handler: fn(&Dashboard<'a>, &WidgetRequest) -> Result<WidgetResult>,
}

/// Assembles the data for the widgets of the page bundle. The first
/// handler for a type wins; a type not handled here is left for others.
pub struct Dashboard<'a> {
    stats: &'a dyn StatsProvider,
    router: &'a dyn Router,
    translator: &'a dyn TranslationLookup,
    templates: &'a dyn Templating,
    bindings: HashMap<&'static str, Binding<'a>>,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        stats: &'a dyn StatsProvider,
        router: &'a dyn Router,
        translator: &'a dyn TranslationLookup,
        templates: &'a dyn Templating,
    ) -> Self {
        let bindings: HashMap<&'static str, Binding<'a>> = HashMap::from([
            (
                HITS_IN_TIME,
                Binding {
                    template: CHART_TEMPLATE,
                    handler: Self::hits_in_time,
                },
            ),
            (
                UNIQUE_VS_RETURNING,
                Binding {
                    template: CHART_TEMPLATE,
                    handler: Self::unique_vs_returning,
                },
            ),
            (
                DWELL_TIMES,
                Binding {
                    template: CHART_TEMPLATE,
                    handler: Self::dwell_times,
                },
            ),
            (
                POPULAR_PAGES,
                Binding {
                    template: TABLE_TEMPLATE,
                    handler: Self::popular_pages,
                },
            ),
        ]);

        Dashboard {
            stats,
            router,
            translator,
            templates,
            bindings,
        }
    }

    /// The widget types this dashboard can produce, in display order.
    pub fn types(&self) -> &'static [&'static str] {
        &WIDGET_TYPES
    }

    /// Produce the detail for a widget. Returns `None` for a type this
    /// dashboard doesn't know, so that another can handle it. When
    /// `cached` is set the data is not fetched again but the template is
    /// still given.
    pub fn generate(&self, request: &WidgetRequest, cached: bool) -> Result<Option<WidgetDetail>> {
        let binding = match self
            .bindings
            .get(
                request
                    .widget_type
                    .as_str(),
            ) {
            Some(binding) => binding,
            None => {
                debug!("Not a {} widget: {}", BUNDLE, request.widget_type);
                return Ok(None);
            }
        };

        info!("Generating widget {}", request.widget_type);

        let data = if cached {
            debug!("Data for {} already cached", request.widget_type);
            None
        } else {
            Some((binding.handler)(self, request)?)
        };

        Ok(Some(WidgetDetail {
            template: binding.template,
            data,
        }))
    }

    /// Render a widget's data with the template it was bound to.
    pub fn render(&self, template: &str, result: &WidgetResult) -> Result<String> {
        let mut context = serde_json::to_value(result)?;

        if let (WidgetResult::Chart(chart), Some(object)) = (result, context.as_object_mut()) {
            let json = serde_json::to_string(&chart.chart_data)?;
            object.insert("chartJson".to_string(), serde_json::Value::String(json));
        }

        self.templates
            .render(template, &context)
    }

    fn hits_in_time(&self, request: &WidgetRequest) -> Result<WidgetResult> {
        let params = &request.params;
        let data = self
            .stats
            .hits_line_chart(
                params
                    .amount
                    .unwrap_or(DEFAULT_AMOUNT),
                params
                    .time_unit
                    .unwrap_or_default(),
                params.date_from,
                params.date_to,
            )?;

        Ok(chart(ChartType::Line, request.height, data))
    }

    fn unique_vs_returning(&self, request: &WidgetRequest) -> Result<WidgetResult> {
        let params = &request.params;
        let data = self
            .stats
            .new_vs_returning(params.date_from, params.date_to)?;

        Ok(chart(ChartType::Pie, request.height, data))
    }

    fn dwell_times(&self, request: &WidgetRequest) -> Result<WidgetResult> {
        let params = &request.params;
        let data = self
            .stats
            .dwell_times(params.date_from, params.date_to)?;

        Ok(chart(ChartType::Pie, request.height, data))
    }

    fn popular_pages(&self, request: &WidgetRequest) -> Result<WidgetResult> {
        let params = &request.params;
        let limit = match params.limit {
            Some(limit) if limit > 0 => limit,
            _ => derive_limit(request.height),
        };

        let pages = self
            .stats
            .popular_pages(limit, params.date_from, params.date_to)?;

        let mut rows = Vec::with_capacity(pages.len());
        for page in &pages {
            let id = page
                .id
                .to_string();
            let url = self
                .router
                .generate(PAGE_ACTION_ROUTE, &[("objectAction", "view"), ("objectId", id.as_str())])?;

            rows.push(vec![
                TableCell::link(page.title.as_str(), url),
                TableCell::text(
                    page.hits
                        .to_string(),
                ),
            ]);
        }

        Ok(WidgetResult::Table(TablePayload {
            head_items: vec![
                self.translator
                    .translate("dashboard.label.title"),
                self.translator
                    .translate("dashboard.label.hits"),
            ],
            body_items: rows,
        }))
    }
}

fn chart(chart_type: ChartType, height: i64, chart_data: crate::services::ChartData) -> WidgetResult {
    WidgetResult::Chart(ChartPayload {
        chart_type,
        chart_height: height.saturating_sub(WIDGET_CHROME),
        chart_data,
    })
}

/// How many table rows fit in a widget of the given height. Never less
/// than one, so a tiny widget still asks for something.
pub fn derive_limit(height: i64) -> u32 {
    let rows = (height.saturating_sub(WIDGET_CHROME) as f64 / ROW_HEIGHT - 1.0).round();

    if rows < 1.0 {
        1
    } else {
        rows as u32
    }
}
