//! Result panel rendering.
//!
//! The panel shows an "Invalid input" line when the error flag is up, then
//! either the last result or the input placeholder. The `LOCATION` row reads
//! `city, region`, followed by the postal code in parentheses when the service
//! returned one.

use colored::*;

use crate::config::{INPUT_PLACEHOLDER, INVALID_INPUT_MESSAGE};
use crate::lookup::LookupResult;
use crate::tracker::TrackerState;

const LABEL_WIDTH: usize = 12;

/// Renders the panel with terminal colors.
pub fn render_panel(state: &TrackerState) -> String {
    render(state, true)
}

/// Renders the panel as plain text.
pub fn render_panel_plain(state: &TrackerState) -> String {
    render(state, false)
}

fn render(state: &TrackerState, styled: bool) -> String {
    let mut lines = Vec::new();

    if state.error {
        lines.push(if styled {
            INVALID_INPUT_MESSAGE.red().italic().to_string()
        } else {
            INVALID_INPUT_MESSAGE.to_string()
        });
    }

    match &state.result {
        Some(result) => {
            for (label, value) in rows(result) {
                lines.push(if styled {
                    format!(
                        "{}{}",
                        format!("{label:<LABEL_WIDTH$}").dimmed(),
                        value.bold()
                    )
                } else {
                    format!("{label:<LABEL_WIDTH$}{value}")
                });
            }
        }
        None if !state.error => lines.push(INPUT_PLACEHOLDER.to_string()),
        None => {}
    }

    lines.join("\n")
}

fn rows(result: &LookupResult) -> [(&'static str, String); 4] {
    let location = &result.location;
    let place = match &location.postal_code {
        Some(code) => format!("{}, {} ({})", location.city, location.region, code),
        None => format!("{}, {}", location.city, location.region),
    };

    [
        ("IP ADDRESS", result.ip.clone()),
        ("LOCATION", place),
        ("TIMEZONE", format!("UTC{}", location.timezone)),
        ("ISP", result.isp.clone()),
    ]
}
