use crate::canvas::DisplayList;
use crate::config::Config;
use crate::models::{PLACEHOLDER, RecentVisit, UpcomingVisit};
use crate::range::{ReportRange, navigation_href};
use crate::render::DashboardRenderer;
use crate::svg::render_svg;
use crate::targets::{BarList, Slot, TableBody, Targets, TextSlots};
use crate::theme::Theme;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Server-side stand-in for the dashboard document: every output target
/// the renderer writes to, plus what the page chrome needs.
pub struct DashboardPage {
    pub slots: TextSlots,
    pub bars: BarList,
    pub chart: DisplayList,
    pub recent: TableBody,
    pub upcoming: TableBody,
    pub theme: Theme,
    range: ReportRange,
    start_date: NaiveDate,
    current: String,
    block: Option<String>,
}

impl DashboardPage {
    pub fn new(config: &Config, range: ReportRange, ratio: f64, today: NaiveDate, current: &str) -> Self {
        Self {
            slots: TextSlots::all(PLACEHOLDER),
            bars: BarList::default(),
            chart: DisplayList::new(config.chart_width, config.chart_height, ratio),
            recent: TableBody::default(),
            upcoming: TableBody::default(),
            theme: config.theme.clone(),
            range,
            start_date: range.start_date(today),
            current: current.to_string(),
            block: None,
        }
    }

    pub fn targets(&mut self) -> Targets<'_> {
        Targets {
            slots: &mut self.slots,
            bars: Some(&mut self.bars),
            line_chart: Some(&mut self.chart),
            recent: Some(&mut self.recent),
            upcoming: Some(&mut self.upcoming),
            theme: &self.theme,
        }
    }

    /// Embeds `block` and renders it; the page keeps its default state when
    /// the block is absent or malformed.
    pub fn load(&mut self, block: Option<String>) -> bool {
        let renderer = DashboardRenderer::new();
        let rendered = renderer.render_block(block.as_deref(), &mut self.targets());
        self.block = block;
        rendered
    }

    pub fn to_html(&self) -> Result<String, url::ParseError> {
        let slot = |slot: Slot| escape_html(self.slots.get(slot).unwrap_or(PLACEHOLDER));

        let values: BTreeMap<&str, String> = BTreeMap::from([
            ("THEME", self.theme.css_declarations().replace('<', "")),
            ("RANGE_OPTIONS", self.range_options()?),
            ("RANGE_LABEL", escape_html(&self.range.label())),
            ("START_DATE", self.start_date.to_string()),
            ("K_TOTAL", slot(Slot::Total)),
            ("K_APPROVED", slot(Slot::Approved)),
            ("K_DEALS", slot(Slot::Deals)),
            ("K_REPS", slot(Slot::Reps)),
            ("CONV", slot(Slot::Conversion)),
            ("CLIENTS", slot(Slot::Clients)),
            ("UPCOMING", slot(Slot::Upcoming)),
            ("REP_TOTAL", slot(Slot::RepTotal)),
            ("BARS", self.bar_rows()),
            ("LINE_CHART", render_svg(&self.chart, "lineChart")),
            ("RECENT_HEAD", header_row(&RecentVisit::COLUMNS)),
            ("RECENT_ROWS", body_rows(&self.recent)),
            ("UPCOMING_HEAD", header_row(&UpcomingVisit::COLUMNS)),
            ("UPCOMING_ROWS", body_rows(&self.upcoming)),
            ("DATA_BLOCK", self.data_block()),
        ]);

        Ok(fill_template(PAGE_HTML, &values))
    }

    fn range_options(&self) -> Result<String, url::ParseError> {
        let mut options = String::new();
        for option in ReportRange::OPTIONS {
            let value = option.query_value();
            let href = navigation_href(&self.current, &value)?;
            let selected = if option == self.range { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{value}" data-href="{}"{selected}>{}</option>"#,
                escape_html(&href),
                escape_html(&option.label())
            ));
        }
        Ok(options)
    }

    fn bar_rows(&self) -> String {
        self.bars
            .rows()
            .iter()
            .map(|row| {
                format!(
                    r#"<div class="barrow"><span class="barlbl">{}</span><div class="bar" style="width:{}%" title="{}"></div></div>"#,
                    escape_html(&row.label),
                    row.width_percent,
                    escape_html(&row.title)
                )
            })
            .collect()
    }

    fn data_block(&self) -> String {
        match &self.block {
            Some(block) => format!(
                r#"<script type="application/json" id="dashdata">{}</script>"#,
                block.replace("</", "<\\/")
            ),
            None => String::new(),
        }
    }
}

/// Substitutes each `{{NAME}}` in `template` in one pass. Inserted values
/// are never scanned again; unknown names are left as written.
fn fill_template(template: &str, values: &BTreeMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let name = &after[..close];
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn header_row(columns: &[&str]) -> String {
    let cells: String = columns
        .iter()
        .map(|column| format!("<th>{}</th>", escape_html(column)))
        .collect();
    format!("<tr>{cells}</tr>")
}

fn body_rows(body: &TableBody) -> String {
    body.rows()
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect()
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sales Dashboard</title>
  <style>
    :root {
      --bg: #14161f;
      --card: #1d2030;
      --ink: #e8e9f1;
      --muted: #8a8fa8;
      --accent: #6c63ff;
      --accent-3: #00d18f;
      {{THEME}}
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", Arial, sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    select {
      background: var(--card);
      color: var(--ink);
      border: 1px solid rgba(255, 255, 255, 0.12);
      border-radius: 10px;
      padding: 8px 12px;
    }

    .kpis {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      border: 1px solid rgba(255, 255, 255, 0.06);
    }

    .card .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .card .value {
      display: block;
      margin-top: 6px;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 14px;
    }

    .barrow {
      display: grid;
      grid-template-columns: 130px 1fr;
      align-items: center;
      gap: 10px;
      margin: 8px 0;
    }

    .barlbl {
      color: var(--muted);
      overflow: hidden;
      text-overflow: ellipsis;
      white-space: nowrap;
    }

    .bar {
      height: 12px;
      border-radius: 6px;
      background: var(--accent);
      min-width: 2px;
    }

    #lineChart {
      max-width: 100%;
      height: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 8px 6px;
      border-bottom: 1px solid rgba(255, 255, 255, 0.06);
    }

    th {
      color: var(--muted);
      font-weight: 500;
      text-transform: capitalize;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Dashboard</h1>
        <p class="subtitle">{{RANGE_LABEL}} &middot; since {{START_DATE}}</p>
      </div>
      <select id="range" aria-label="Reporting window" onchange="location.href = this.selectedOptions[0].dataset.href">
        {{RANGE_OPTIONS}}
      </select>
    </header>

    <section class="kpis">
      <div class="card"><span class="label">Visits</span><span class="value" id="k_total">{{K_TOTAL}}</span></div>
      <div class="card"><span class="label">Approved plans</span><span class="value" id="k_approved">{{K_APPROVED}}</span></div>
      <div class="card"><span class="label">Deals closed</span><span class="value" id="k_deals">{{K_DEALS}}</span></div>
      <div class="card"><span class="label">Active reps</span><span class="value" id="k_reps">{{K_REPS}}</span></div>
      <div class="card"><span class="label">Conversion</span><span class="value" id="conv">{{CONV}}</span></div>
      <div class="card"><span class="label">Clients</span><span class="value" id="clientsCount">{{CLIENTS}}</span></div>
      <div class="card"><span class="label">Next 7 days</span><span class="value" id="upcoming">{{UPCOMING}}</span></div>
    </section>

    <section class="charts">
      <div class="card">
        <span class="label">Visits by rep &middot; <span id="repTotal">{{REP_TOTAL}}</span></span>
        <div id="bars">{{BARS}}</div>
      </div>
      <div class="card">
        <span class="label">Monthly trend</span>
        {{LINE_CHART}}
      </div>
    </section>

    <section class="card">
      <span class="label">Recent daily visits</span>
      <table id="t_recent"><thead>{{RECENT_HEAD}}</thead><tbody>{{RECENT_ROWS}}</tbody></table>
    </section>

    <section class="card">
      <span class="label">Upcoming visits</span>
      <table id="t_next"><thead>{{UPCOMING_HEAD}}</thead><tbody>{{UPCOMING_ROWS}}</tbody></table>
    </section>
  </main>
  {{DATA_BLOCK}}
</body>
</html>
"#;
