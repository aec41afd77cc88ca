//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::views::AnalyticsView;
use colored::*;
use pulse_domain::{Camera, Severity};
use pulse_feed::ConnectionState;
use pulse_store::{IncidentStore, Rows, ViewRow};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows as TableRows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format incident rows.
    pub fn format_rows(&self, rows: Rows<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = rows.map(|row| row_json(&row)).collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => Ok(self.format_rows_table(rows)),
            OutputFormat::Quiet => Ok(rows.map(|row| row.event).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format a single incident as one line, for streaming output.
    pub fn format_row_line(&self, row: &ViewRow<'_>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&row_json(row))?),
            OutputFormat::Quiet => Ok(row.event.to_string()),
            OutputFormat::Table => Ok(format!(
                "{} {}  {}  {}  {}",
                self.severity_marker(row.severity),
                row.timestamp,
                row.event,
                confidence_label(row.confidence),
                self.severity_label(row.severity),
            )),
        }
    }

    /// Format rows as a table.
    fn format_rows_table(&self, rows: Rows<'_>) -> String {
        let mut builder = Builder::default();
        builder.push_record(["", "Event", "Time", "Confidence", "Severity"]);

        for row in rows {
            builder.push_record([
                self.severity_marker(row.severity),
                row.event.to_string(),
                row.timestamp.to_string(),
                confidence_label(row.confidence),
                self.severity_label(row.severity),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(TableRows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format camera status.
    pub fn format_cameras(&self, cameras: &[Camera]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let cameras: Vec<Value> = cameras
                    .iter()
                    .map(|c| {
                        json!({
                            "camera_id": c.camera_id,
                            "status": c.status.as_str(),
                            "stream_quality": c.stream_quality,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&cameras)?)
            }
            OutputFormat::Quiet => Ok(cameras
                .iter()
                .map(|c| c.camera_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Camera", "Status", "Quality"]);
                for camera in cameras {
                    let status = if camera.is_online() {
                        self.colorize(camera.status.as_str(), "green")
                    } else {
                        camera.status.as_str().to_string()
                    };
                    builder.push_record([camera.camera_id.clone(), status, camera.stream_quality.clone()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(TableRows::first()).with(Alignment::center()));
                Ok(format!("Cameras\n{}", table))
            }
        }
    }

    /// Format the analytics screen.
    pub fn format_analytics(&self, view: &AnalyticsView) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let bars: Vec<Value> = view
                    .bars
                    .iter()
                    .map(|b| json!({ "label": b.label, "value": b.value }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "period": view.period.as_str(),
                    "total_incidents": view.total_incidents,
                    "critical": view.critical,
                    "warning": view.warning,
                    "axis_max": view.axis_max,
                    "bars": bars,
                }))?)
            }
            OutputFormat::Quiet => Ok(format!("{} {}", view.critical, view.warning)),
            OutputFormat::Table => Ok(self.format_analytics_table(view)),
        }
    }

    fn format_analytics_table(&self, view: &AnalyticsView) -> String {
        let selector: Vec<String> = crate::views::Period::ALL
            .iter()
            .map(|p| {
                if *p == view.period {
                    self.colorize(&format!("[{}]", p.as_str()), "yellow")
                } else {
                    format!(" {} ", p.as_str())
                }
            })
            .collect();

        let label_width = view.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        let mut lines = vec!["Analytics".to_string(), selector.join(" "), String::new()];
        lines.push(format!("{:>width$} ┤ {}", "", view.axis_max, width = label_width));
        for bar in &view.bars {
            lines.push(format!(
                "{:>width$} │ {} {}",
                bar.label,
                self.colorize(&"█".repeat(bar.length), "yellow"),
                bar.value,
                width = label_width,
            ));
        }
        lines.push(format!("{:>width$} ┤ 0", "", width = label_width));
        lines.push(String::new());

        let mut builder = Builder::default();
        builder.push_record(["Critical".to_string(), view.critical.to_string()]);
        builder.push_record(["Warnings".to_string(), view.warning.to_string()]);
        let mut summary = builder.build();
        summary.with(Style::rounded());
        lines.push(summary.to_string());

        lines.join("\n")
    }

    /// Format the live dashboard.
    pub fn format_dashboard(&self, store: &IncidentStore, state: &ConnectionState) -> Result<String> {
        if self.format != OutputFormat::Table {
            return Ok(serde_json::to_string_pretty(&json!({
                "state": state.to_string(),
                "degraded": state.is_degraded(),
                "alerts": store.len(),
                "incidents": store.rows().map(|row| row_json(&row)).collect::<Vec<_>>(),
            }))?);
        }

        let mut lines = vec![
            self.colorize("Pulse 5G", "bold"),
            "Dashboard".to_string(),
            String::new(),
        ];

        let mut cards = Builder::default();
        cards.push_record(["NETWORK", "ALERTS"]);
        cards.push_record(["5G Edge".to_string(), store.len().to_string()]);
        cards.push_record(["Active", "Live"]);
        let mut cards = cards.build();
        cards.with(Style::rounded());
        lines.push(cards.to_string());

        if state.is_degraded() {
            lines.push(self.warning(&format!("feed degraded ({})", state)));
        }

        lines.push(String::new());
        lines.push("Latest Alerts".to_string());
        lines.push(self.format_rows_table(store.rows()));

        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn severity_marker(&self, severity: &Severity) -> String {
        let marker = severity.affordance().marker;
        match severity {
            Severity::Critical => self.colorize(marker, "red"),
            _ => marker.to_string(),
        }
    }

    fn severity_label(&self, severity: &Severity) -> String {
        let color = match severity {
            Severity::Critical => "red",
            Severity::Warning => "yellow",
            Severity::Info => "blue",
            Severity::Unclassified(_) => "none",
        };
        self.colorize(severity.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn row_json(row: &ViewRow<'_>) -> Value {
    json!({
        "event": row.event,
        "confidence": row.confidence,
        "timestamp": row.timestamp,
        "severity": row.severity.as_str(),
        "icon": row.severity.affordance().icon,
        "placeholder": row.placeholder,
    })
}

fn confidence_label(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{AnalyticsView, Period};
    use pulse_domain::{AnalyticsSnapshot, CameraStatus, Incident};

    fn scenario_store() -> IncidentStore {
        let mut store = IncidentStore::default();
        store.append(Incident::new("Fire Detected", 0.95, "12:01", Severity::Critical));
        store.append(Incident::new("Person Fallen", 0.8, "12:02", Severity::Warning));
        store
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let store = scenario_store();
        let output = formatter.format_rows(store.rows()).unwrap();
        assert!(output.contains("Event"));
        assert!(output.contains("95%"));
        let fallen = output.find("Person Fallen").unwrap();
        let fire = output.find("Fire Detected").unwrap();
        assert!(fallen < fire);
    }

    #[test]
    fn test_placeholder_rows() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let store = IncidentStore::default();
        let output = formatter.format_rows(store.rows()).unwrap();
        assert!(output.contains("No incidents detected"));
        assert!(output.contains("System Monitoring Active"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let store = scenario_store();
        let output = formatter.format_rows(store.rows()).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["event"], "Person Fallen");
        assert_eq!(parsed[1]["icon"], "alert-circle");
        assert_eq!(parsed[1]["placeholder"], false);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let store = scenario_store();
        let output = formatter.format_rows(store.rows()).unwrap();
        assert_eq!(output, "Person Fallen\nFire Detected");
    }

    #[test]
    fn test_row_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let store = scenario_store();
        let row = store.rows().last().unwrap();
        let line = formatter.format_row_line(&row).unwrap();
        assert_eq!(line, "! 12:01  Fire Detected  95%  critical");
    }

    #[test]
    fn test_unclassified_severity_uses_fallback_icon() {
        let mut store = IncidentStore::default();
        store.append(Incident::new("Intrusion", 0.9, "12:05", Severity::from_tag("emergency")));

        let formatter = Formatter::new(OutputFormat::Json, false);
        let row = store.rows().next().unwrap();
        let parsed: Value = serde_json::from_str(&formatter.format_row_line(&row).unwrap()).unwrap();
        assert_eq!(parsed["severity"], "emergency");
        assert_eq!(parsed["icon"], "ellipse");

        let formatter = Formatter::new(OutputFormat::Table, false);
        let line = formatter.format_row_line(&row).unwrap();
        assert_eq!(line, "- 12:05  Intrusion  90%  emergency");
    }

    #[test]
    fn test_cameras_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_cameras(&Camera::placeholders()).unwrap();
        assert!(output.contains("CAM-03"));
        assert!(output.contains("Offline"));

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let cameras = vec![Camera::new("CAM-09", CameraStatus::Online, "4K")];
        assert_eq!(formatter.format_cameras(&cameras).unwrap(), "CAM-09");
    }

    #[test]
    fn test_analytics_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let view = AnalyticsView::from_fetch(Ok(AnalyticsSnapshot::empty()), Period::Week);
        let output = formatter.format_analytics(&view).unwrap();
        assert!(output.contains("[Week]"));
        assert!(output.contains("Fri │ "));
        assert!(output.contains(&"█".repeat(40)));
        assert!(output.contains("Critical"));
    }

    #[test]
    fn test_analytics_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let view = AnalyticsView::from_fetch(Ok(AnalyticsSnapshot::empty()), Period::Month);
        let parsed: Value = serde_json::from_str(&formatter.format_analytics(&view).unwrap()).unwrap();
        assert_eq!(parsed["period"], "Month");
        assert_eq!(parsed["axis_max"], 156);
        assert_eq!(parsed["bars"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_dashboard_shows_degraded_banner() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let store = scenario_store();

        let output = formatter
            .format_dashboard(&store, &ConnectionState::Connecting)
            .unwrap();
        assert!(output.starts_with("Pulse 5G\nDashboard"));
        assert!(output.contains("5G Edge"));
        assert!(output.contains("feed degraded"));

        let output = formatter.format_dashboard(&store, &ConnectionState::Open).unwrap();
        assert!(!output.contains("feed degraded"));
        assert!(output.contains("Live"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
