// © 2023-2024 ETH Zurich
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// any later version.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use thiserror::Error;

use crate::{Minutes, MINUTES_PER_HOUR};

/// Largest hour accepted by `to_minutes`. Keeps every derived time well inside `Minutes`.
pub const MAX_HOURS: Minutes = 999;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("wrong time format '{input}': expected hh:mm or hh:mm:ss")]
    SeparatorCount { input: String },
    #[error("wrong time format '{input}': {field} is not a number")]
    NotANumber { input: String, field: &'static str },
    #[error("wrong time format '{input}': {field} is out of range")]
    OutOfRange { input: String, field: &'static str },
}

/// Parses "hh:mm" or "hh:mm:ss" into minutes since midnight. Seconds are truncated.
/// Hours are not limited to 23, so "26:15" is 1575, but must not exceed `MAX_HOURS`.
pub fn to_minutes(text: &str) -> Result<Minutes, FormatError> {
    let trimmed = text.trim();
    let splitted: Vec<&str> = trimmed.split(':').collect();
    if splitted.len() < 2 || splitted.len() > 3 {
        return Err(FormatError::SeparatorCount {
            input: text.to_string(),
        });
    }

    let hours = parse_field(text, splitted[0], "hour")?;
    let minutes = parse_field(text, splitted[1], "minute")?;
    if minutes >= 60 {
        return Err(FormatError::OutOfRange {
            input: text.to_string(),
            field: "minute",
        });
    }
    if let Some(seconds) = splitted.get(2) {
        if parse_field(text, seconds, "second")? >= 60 {
            return Err(FormatError::OutOfRange {
                input: text.to_string(),
                field: "second",
            });
        }
    }

    if hours > MAX_HOURS {
        return Err(FormatError::OutOfRange {
            input: text.to_string(),
            field: "hour",
        });
    }
    Ok(hours * MINUTES_PER_HOUR + minutes)
}

/// Renders minutes as zero-padded "hh:mm". Does not wrap at 24:00.
pub fn to_text(minutes: Minutes) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let absolute = minutes.unsigned_abs();
    format!(
        "{}{:02}:{:02}",
        sign,
        absolute / MINUTES_PER_HOUR as u32,
        absolute % MINUTES_PER_HOUR as u32
    )
}

fn parse_field(input: &str, field_text: &str, field: &'static str) -> Result<Minutes, FormatError> {
    let not_a_number = || FormatError::NotANumber {
        input: input.to_string(),
        field,
    };
    // `parse` would also accept a leading '+'
    if field_text.is_empty() || !field_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }
    field_text.parse::<Minutes>().map_err(|_| not_a_number())
}
