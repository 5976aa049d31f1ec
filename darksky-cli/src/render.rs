//! Human-readable forecast output.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use darksky_core::{DataPoint, Forecast, Metadata, Units};

pub fn summary(forecast: &Forecast, metadata: &Metadata) -> String {
    let units = forecast.flags.as_ref().map(|f| f.units);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Forecast for {:.4}, {:.4} ({})",
        forecast.latitude, forecast.longitude, forecast.timezone
    );

    if let Some(now) = &forecast.currently {
        let _ = writeln!(out, "\nNow{}", at(now.time));
        let _ = writeln!(out, "  {}", conditions(now, units));
    }

    if let Some(text) = forecast.hourly.as_ref().and_then(|h| h.summary.as_ref()) {
        let _ = writeln!(out, "\nNext hours: {text}");
    }

    if let Some(daily) = &forecast.daily {
        let _ = writeln!(out, "\nDaily");
        if let Some(text) = &daily.summary {
            let _ = writeln!(out, "  {text}");
        }
        for day in daily {
            let date = day
                .time
                .map(|t| t.format("%a %Y-%m-%d").to_string())
                .unwrap_or_else(|| "?".to_string());
            let range = match (day.temperature_low, day.temperature_high) {
                (Some(low), Some(high)) => format!("{low:.0}..{high:.0}{}", temperature_unit(units)),
                _ => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "  {date}  {range:<12} {}",
                day.summary.as_deref().unwrap_or("")
            );
        }
    }

    for alert in forecast.alerts() {
        let _ = writeln!(
            out,
            "\n[{}] {} (until {})",
            alert.severity.to_uppercase(),
            alert.title,
            alert.expires_on.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out, "  {}", alert.uri);
    }

    let mut footer = Vec::new();
    if let Some(calls) = metadata.api_requests_today {
        footer.push(format!("{calls} API calls today"));
    }
    if let Some(ms) = metadata.response_time {
        footer.push(format!("served in {ms}ms"));
    }
    if !footer.is_empty() {
        let _ = writeln!(out, "\n({})", footer.join(", "));
    }

    out
}

fn conditions(point: &DataPoint, units: Option<Units>) -> String {
    let mut parts = Vec::new();

    if let Some(text) = &point.summary {
        parts.push(text.clone());
    }
    if let Some(t) = point.temperature {
        let mut temp = format!("{t:.1}{}", temperature_unit(units));
        if let Some(feels) = point.apparent_temperature {
            let _ = write!(temp, " (feels like {feels:.1})");
        }
        parts.push(temp);
    }
    if let Some(h) = point.humidity {
        parts.push(format!("humidity {:.0}%", h * 100.0));
    }
    if let Some(speed) = point.wind_speed {
        parts.push(format!("wind {speed:.1} {}", speed_unit(units)));
    }
    if let Some(p) = point.precip_probability.filter(|p| *p > 0.0) {
        let kind = point.precip_type.map_or("precipitation", |k| k.as_str());
        parts.push(format!("{:.0}% chance of {kind}", p * 100.0));
    }

    if parts.is_empty() {
        "no data".to_string()
    } else {
        parts.join(", ")
    }
}

fn at(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| format!(" ({})", t.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default()
}

fn temperature_unit(units: Option<Units>) -> &'static str {
    match units {
        Some(Units::Us) => "°F",
        Some(_) => "°C",
        None => "°",
    }
}

fn speed_unit(units: Option<Units>) -> &'static str {
    match units {
        Some(Units::Us) | Some(Units::Uk2) => "mph",
        Some(Units::Ca) => "km/h",
        Some(Units::Si) => "m/s",
        _ => "",
    }
}
