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

use crate::base_types::{HubId, Minutes};

/// A record that cannot be read. The offending record is dropped, never partially processed.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {field} is not a number: '{value}'")]
    NotANumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    InvalidTime {
        line: usize,
        source: time::FormatError,
    },
    #[error("line {line}: {field} is missing")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: unknown month '{value}'")]
    UnknownMonth { line: usize, value: String },
    #[error("line {line}: day {day} does not exist in month {month} of {year}")]
    InvalidDate {
        line: usize,
        year: i32,
        month: u32,
        day: u32,
    },
    #[error("route '{route}': {source}")]
    InvalidRouteTime {
        route: String,
        source: time::FormatError,
    },
    #[error("route {position} of the input: {source}")]
    InvalidRouteRecord {
        position: usize,
        source: serde_json::Error,
    },
    #[error("could not read table: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not read json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A configuration that leads to an impossible state. Aborts the run for the affected hub.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("configuration value {option} must not be negative (got {value})")]
    Negative { option: &'static str, value: f64 },
    #[error("configuration value {option} must not exceed {max} minutes (got {value})")]
    TooLarge {
        option: &'static str,
        value: Minutes,
        max: Minutes,
    },
    #[error("global hour ceiling must be positive (got {0})")]
    NonPositiveCeiling(f64),
    #[error("synthetic name base {0:#x} is not a valid character")]
    InvalidNameBase(u32),
    #[error("route '{route}' in hub {hub} has a negative duration of {minutes} minutes")]
    NegativeDuration {
        hub: HubId,
        route: String,
        minutes: Minutes,
    },
    #[error("route '{route}' in hub {hub} takes longer than {max} minutes")]
    DurationOutOfRange {
        hub: HubId,
        route: String,
        max: Minutes,
    },
}
