//! Duration expression parsing
//!
//! Accepts plain seconds (`"1.5"`), unit expressions (`"1 min 30 s"`,
//! `"2h15m"`, `"250 milliseconds"`) and timers (`"01:30"`, `"1:02:03.5"`).

use std::time::Duration;

use crate::errors::{Result, WebassertError};

/// Parse a duration expression into a `Duration`
pub fn timestr_to_duration(text: &str) -> Result<Duration> {
    let secs = timestr_to_secs(text)?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid(text))
}

/// Parse a duration expression into seconds
pub fn timestr_to_secs(text: &str) -> Result<f64> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if normalized.is_empty() || normalized.starts_with('-') {
        return Err(invalid(text));
    }

    let secs = if let Ok(secs) = normalized.parse::<f64>() {
        secs
    } else if normalized.contains(':') {
        timer_to_secs(&normalized).ok_or_else(|| invalid(text))?
    } else {
        units_to_secs(&normalized).ok_or_else(|| invalid(text))?
    };

    if !secs.is_finite() || secs < 0.0 {
        return Err(invalid(text));
    }
    Ok(secs)
}

fn invalid(text: &str) -> WebassertError {
    WebassertError::InvalidTimeout(text.to_string())
}

/// `[hh:]mm:ss[.fff]`
fn timer_to_secs(timer: &str) -> Option<f64> {
    let parts: Vec<&str> = timer.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let (last, leading) = parts.split_last()?;
    let mut secs = 0.0;
    for part in leading {
        let value = part.parse::<u64>().ok()?;
        secs = secs * 60.0 + value as f64;
    }
    if !last.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let seconds = last.parse::<f64>().ok()?;
    Some(secs * 60.0 + seconds)
}

fn units_to_secs(expr: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut rest = expr;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value = rest[..number_len].parse::<f64>().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let multiplier = unit_multiplier(&rest[..unit_len])?;
        rest = &rest[unit_len..];

        total += value * multiplier;
    }

    Some(total)
}

fn unit_multiplier(unit: &str) -> Option<f64> {
    match unit {
        "d" | "day" | "days" => Some(86_400.0),
        "h" | "hour" | "hours" => Some(3_600.0),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(60.0),
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1.0),
        "ms" | "millis" | "millisecond" | "milliseconds" => Some(0.001),
        _ => None,
    }
}

#[cfg(test)]
#[path = "timestr_test.rs"]
mod timestr_test;
