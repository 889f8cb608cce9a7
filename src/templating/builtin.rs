//! Markup for language bars, share buttons, builder token lists, and
//! dashboard widgets. TinyTemplate treats `{` as the start of a value, so
//! none of these carry literal braces; token strings are passed in as data.

pub const LANGBAR_TEMPLATE: &str = "page:langbar";
pub const SHARE_BUTTON_STYLES_TEMPLATE: &str = "page:sharebtn_css";
pub const TOKEN_EXTRA_TEMPLATE: &str = "page:token_extra";
pub const TOKEN_INDEX_TEMPLATE: &str = "page:token_index";
pub const CHART_TEMPLATE: &str = "core:chart";
pub const TABLE_TEMPLATE: &str = "core:table";

static LANGBAR: &str = r#"<nav class="langbar">
  <ul>
{{ for page in pages }}    <li><a href="{page.url}">{page.lang}</a></li>
{{ endfor }}  </ul>
</nav>
"#;

static SHARE_BUTTON_STYLES: &str = r#"<link rel="stylesheet" type="text/css" href="media/css/sharebuttons.css" />
"#;

static TOKEN_EXTRA: &str = r##"<div class="page-tokens">
  <ul>
{{ for token in tokens }}    <li><a href="#" class="builder-token" data-token="{token.token}">{token.label}</a></li>
{{ endfor }}  </ul>
</div>
"##;

static TOKEN_INDEX: &str = r##"<div class="page-tokens">
{{ if pages }}  <ul>
{{ for page in pages }}    <li><a href="#" class="builder-token" data-token="{page.token}">{page.title}</a></li>
{{ endfor }}  </ul>
{{ else }}  <p>{empty}</p>
{{ endif }}</div>
"##;

static CHART: &str = r#"<div class="chart-wrapper">
  <canvas class="chart {chartType}-chart" height="{chartHeight}" data-chart-type="{chartType}" data-chart="{chartJson}"></canvas>
</div>
"#;

static TABLE: &str = r#"<table class="table table-striped">
  <thead>
    <tr>
{{ for item in headItems }}      <th>{item}</th>
{{ endfor }}    </tr>
  </thead>
  <tbody>
{{ for row in bodyItems }}    <tr>
{{ for cell in row }}      <td>{{ if cell.link }}<a href="{cell.link}">{cell.text}</a>{{ else }}{cell.text}{{ endif }}</td>
{{ endfor }}    </tr>
{{ endfor }}  </tbody>
</table>
"#;

pub(super) static ALL: [(&str, &str); 6] = [
    (LANGBAR_TEMPLATE, LANGBAR),
    (SHARE_BUTTON_STYLES_TEMPLATE, SHARE_BUTTON_STYLES),
    (TOKEN_EXTRA_TEMPLATE, TOKEN_EXTRA),
    (TOKEN_INDEX_TEMPLATE, TOKEN_INDEX),
    (CHART_TEMPLATE, CHART),
    (TABLE_TEMPLATE, TABLE),
];
