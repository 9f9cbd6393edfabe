use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::state::{Alert, AlertKind, RequestError};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(response_obj), Some(Value::Object(extra))) =
                (response.as_object_mut(), data)
            {
                response_obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Pretty-print any response DTO as JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the alert slice the way a notification bar would show it. JSON mode
/// skips alerts; the data itself is the output there.
pub fn render_alerts(output_format: &OutputFormat, alerts: &[Alert]) {
    if matches!(output_format, OutputFormat::Json) {
        return;
    }
    for alert in alerts {
        match alert.kind {
            AlertKind::Success => println!("✓ {}", alert.msg),
            AlertKind::Danger => eprintln!("✗ {}", alert.msg),
            AlertKind::Info => println!("• {}", alert.msg),
        }
    }
}

/// Turn a populated error slice into a command failure.
pub fn fail_on_error(error: &Option<RequestError>) -> anyhow::Result<()> {
    match error {
        Some(err) => Err(anyhow::anyhow!("{} (status {})", err.msg, err.status)),
        None => Ok(()),
    }
}

/// `2019-04-01 - now` / `2019-04-01 - 2021-09-30` range for entry listings
pub fn format_date_range(from: DateTime<Utc>, to: Option<DateTime<Utc>>, current: bool) -> String {
    let start = from.format("%Y-%m-%d");
    if current {
        return format!("{} - now", start);
    }
    match to {
        Some(end) => format!("{} - {}", start, end.format("%Y-%m-%d")),
        None => format!("{} -", start),
    }
}
