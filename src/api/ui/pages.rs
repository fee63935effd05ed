//! Server-rendered HTML for the Prediction and History views

use crate::domain::diamond::{CARAT_RANGE, DIMENSION_RANGE, TABLE_RANGE};
use crate::domain::history::CSV_HEADERS;
use crate::domain::{Clarity, Color, Cut, HistoryRecord, PredictionForm};

pub const EMPTY_HISTORY_NOTICE: &str = "No prediction history yet!";

/// Message box shown above the page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Error(_) => "error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Warning(text) | Self::Error(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Prediction,
    History,
}

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Entry form, prefilled with `form` so a rejected submission can be fixed
pub fn prediction_page(form: &PredictionForm, notice: Option<&Notice>) -> String {
    let mut body = String::new();

    body.push_str("<h1>💎 Diamond Price Prediction</h1>\n");
    body.push_str("<form method=\"post\" action=\"/predict\" class=\"grid\">\n");

    body.push_str("<div class=\"column\">\n");
    body.push_str(&number_input("carat", "Carat Weight", form.carat, CARAT_RANGE));
    body.push_str(&select(
        "cut",
        "Cut Quality (Fair lowest - Ideal highest)",
        &Cut::ALL.map(|c| c.label()),
        &form.cut,
    ));
    body.push_str(&select(
        "color",
        "Color Grade (J lowest - D highest)",
        &Color::ALL.map(|c| c.label()),
        &form.color,
    ));
    body.push_str(&select(
        "clarity",
        "Clarity Grade (I1 lowest - IF highest)",
        &Clarity::ALL.map(|c| c.label()),
        &form.clarity,
    ));
    body.push_str("</div>\n");

    body.push_str("<div class=\"column\">\n");
    body.push_str(&number_input("table", "Table", form.table, TABLE_RANGE));
    body.push_str(&number_input("x", "Length", form.x, DIMENSION_RANGE));
    body.push_str(&number_input("y", "Width", form.y, DIMENSION_RANGE));
    body.push_str(&number_input("z", "Depth", form.z, DIMENSION_RANGE));
    body.push_str("</div>\n");

    body.push_str("<button type=\"submit\" class=\"primary\">Predict Price</button>\n");
    body.push_str("</form>\n");

    layout(View::Prediction, notice, &body)
}

/// History table, newest first; `records` must already be in view order
pub fn history_page(records: &[HistoryRecord]) -> String {
    let mut body = String::new();
    body.push_str("<h1>📊 Prediction History</h1>\n");

    if records.is_empty() {
        let notice = Notice::Warning(EMPTY_HISTORY_NOTICE.to_string());
        return layout(View::History, Some(&notice), &body);
    }

    body.push_str("<table>\n<thead><tr>");
    for header in CSV_HEADERS {
        body.push_str(&format!("<th>{}</th>", html_escape(header)));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for record in records {
        body.push_str("<tr>");
        for cell in history_cells(record) {
            body.push_str(&format!("<td>{}</td>", html_escape(&cell)));
        }
        body.push_str("</tr>\n");
    }

    body.push_str("</tbody>\n</table>\n");
    body.push_str(
        "<p><a class=\"download\" href=\"/history.csv\" download>Download History as CSV</a></p>\n",
    );

    layout(View::History, None, &body)
}

/// Table cells in export column order. Measurements are written the way
/// the CSV export writes them; only the price is currency formatted.
fn history_cells(record: &HistoryRecord) -> [String; 10] {
    [
        record.formatted_timestamp(),
        measure(record.carat()),
        record.cut().to_string(),
        record.color().to_string(),
        record.clarity().to_string(),
        measure(record.table()),
        measure(record.x()),
        measure(record.y()),
        measure(record.z()),
        record.formatted_price(),
    ]
}

fn measure(value: f64) -> String {
    format!("{:?}", value)
}

fn number_input(name: &str, label: &str, value: f64, (min, max): (f64, f64)) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{value}\" \
         min=\"{min}\" max=\"{max}\" step=\"0.1\" required>\n",
        name = name,
        label = html_escape(label),
        value = value,
        min = min,
        max = max,
    )
}

fn select(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let mut html = format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n",
        name = name,
        label = html_escape(label),
    );

    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "  <option value=\"{value}\"{marker}>{value}</option>\n",
            value = html_escape(option),
            marker = marker,
        ));
    }

    html.push_str("</select>\n");
    html
}

fn layout(view: View, notice: Option<&Notice>, body: &str) -> String {
    let mut html = String::new();

    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>Diamond Price Prediction</title>\n",
    );
    html.push_str(
        "  <style>\n    body { font-family: ui-sans-serif, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; display: flex; min-height: 100vh; }\n    nav { width: 180px; padding: 24px 16px; background: #f0f2f6; }\n    nav a { display: block; padding: 6px 8px; color: #31333f; text-decoration: none; border-radius: 6px; }\n    nav a.active { background: #ff4b4b; color: #fff; }\n    main { flex: 1; max-width: 760px; padding: 24px 32px; }\n    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 8px 24px; }\n    .column label { display: block; margin-top: 10px; font-size: 14px; }\n    .column input, .column select { width: 100%; padding: 6px; box-sizing: border-box; }\n    button.primary { grid-column: 1 / -1; justify-self: start; margin-top: 12px; padding: 8px 16px; background: #ff4b4b; color: #fff; border: 0; border-radius: 6px; }\n    .notice { padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; }\n    .success { background: #dff5e3; color: #176f2c; }\n    .warning { background: #fff8d6; color: #7a5c00; }\n    .error { background: #ffe1e1; color: #9b1c1c; }\n    table { border-collapse: collapse; width: 100%; font-size: 13px; }\n    th, td { border-bottom: 1px solid #e6e9ef; padding: 6px 8px; text-align: left; }\n  </style>\n</head>\n<body>\n",
    );

    html.push_str("<nav>\n");
    for (target, href, label) in [
        (View::Prediction, "/", "Prediction"),
        (View::History, "/history", "History"),
    ] {
        let class = if target == view { " class=\"active\"" } else { "" };
        html.push_str(&format!("  <a href=\"{}\"{}>{}</a>\n", href, class, label));
    }
    html.push_str("</nav>\n<main>\n");

    if let Some(notice) = notice {
        html.push_str(&format!(
            "<div class=\"notice {}\">{}</div>\n",
            notice.class(),
            html_escape(notice.text())
        ));
    }

    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::domain::diamond::fixtures::{ideal_form, ideal_input};
    use crate::domain::HistoryStore;

    #[test]
    fn test_prediction_page_defaults() {
        let html = prediction_page(&PredictionForm::default(), None);

        assert!(html.contains("name=\"carat\" value=\"0.1\" min=\"0.1\" max=\"10\""));
        assert!(html.contains("name=\"table\" value=\"50\" min=\"50\" max=\"80\""));
        assert!(html.contains("<option value=\"Fair\" selected>Fair</option>"));
        assert!(html.contains("<option value=\"Very Good\">Very Good</option>"));
        assert!(html.contains("<a href=\"/\" class=\"active\">Prediction</a>"));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn test_prediction_page_keeps_submitted_values() {
        let notice = Notice::Success("💎 Predicted Price: $2,700.00".to_string());
        let html = prediction_page(&ideal_form(), Some(&notice));

        assert!(html.contains("<option value=\"Ideal\" selected>"));
        assert!(html.contains("<option value=\"IF\" selected>"));
        assert!(html.contains("<div class=\"notice success\">💎 Predicted Price: $2,700.00</div>"));
    }

    #[test]
    fn test_notice_is_escaped() {
        let notice = Notice::Error("Unknown category '<script>'".to_string());
        let html = prediction_page(&PredictionForm::default(), Some(&notice));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_history_page() {
        let html = history_page(&[]);

        assert!(html.contains(EMPTY_HISTORY_NOTICE));
        assert!(!html.contains("<table>"));
        assert!(!html.contains("Download History as CSV"));
        assert!(html.contains("<a href=\"/history\" class=\"active\">History</a>"));
    }

    #[test]
    fn test_history_page_rows() {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = HistoryRecord::new(timestamp, &ideal_input(), 5234.5);
        let html = history_page(&[record]);

        assert!(html.contains("<th>Predicted Price</th>"));
        assert!(html.contains("<td>2024-05-01 12:00:00.000000</td>"));
        assert!(html.contains("<td>1.0</td><td>Ideal</td><td>D</td><td>IF</td><td>57.0</td><td>6.0</td><td>6.0</td><td>3.7</td>"));
        assert!(html.contains("<td>$5,234.50</td>"));
        assert!(html.contains("href=\"/history.csv\""));
    }

    #[test]
    fn test_history_cells_match_csv_export() {
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = HistoryRecord::new(timestamp, &ideal_input(), 5234.123456);

        let mut store = HistoryStore::new();
        store.append(record.clone());
        let csv = store.export_csv().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        let cells = history_cells(&record);

        for idx in 0..9 {
            assert_eq!(cells[idx], row[idx], "column {}", CSV_HEADERS[idx]);
        }
        assert_eq!(&row[9], "5234.123456");
        assert_eq!(cells[9], "$5,234.12");
    }
}
