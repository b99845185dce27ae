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

//! Reading of the tab-separated tables that the planners paste from their route exports.
//! Malformed rows are skipped and reported, the remaining rows are kept.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::actual_routes::{month_from_name, ActualRoute};
use crate::base_types::{DeliveryCount, Hours, HubId, Idx, Kilogram, Minutes, RouteIdx};
use crate::config::ConfigHours;
use crate::error::FormatError;
use crate::roster::NamedWorker;
use crate::routes::Route;

const ROUTE_FIELDS: usize = 15;
const ROUTE_ID: usize = 0;
const ROUTE_DATE: usize = 2;
const ROUTE_DEPARTURE: usize = 3;
const ROUTE_TRAVEL_DURATION: usize = 6;
const ROUTE_HUB: usize = 10;
const ROUTE_DELIVERIES: usize = 12;
const ROUTE_WEIGHT: usize = 14;

const ROSTER_FIELDS: usize = 2;

// report of actually driven routes; columns beyond the arrival are ignored
const ACTUAL_MIN_FIELDS: usize = 9;
const ACTUAL_MONTH: usize = 0;
const ACTUAL_DAY: usize = 1;
const ACTUAL_COURIER: usize = 6;
const ACTUAL_DEPARTURE: usize = 7;
const ACTUAL_ARRIVAL: usize = 8;

/// Records that could be read and the errors of the rows that were skipped.
#[derive(Debug)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub rejected: Vec<FormatError>,
}

impl<T> Ingested<T> {
    fn new() -> Ingested<T> {
        Ingested {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, error: FormatError) {
        warn!("Skipping record: {}", error);
        self.rejected.push(error);
    }
}

/// Parses the route table. The order key of a route is its position among the accepted rows.
pub fn parse_routes(table: &str) -> Ingested<Route> {
    let mut result = Ingested::new();
    for (line, record) in records(table) {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                result.reject(error);
                continue;
            }
        };
        let idx = result.records.len() as Idx;
        match route_from_record(line, &record, idx) {
            Ok(route) => result.records.push(route),
            Err(error) => result.reject(error),
        }
    }
    debug!(
        "Ingested {} routes ({} rejected)",
        result.records.len(),
        result.rejected.len()
    );
    result
}

/// Parses the roster table (name, weekly contracted hours). Rows without a whole number of
/// hours are workers without contract and are left out.
pub fn parse_roster(table: &str, hours: &ConfigHours) -> Ingested<NamedWorker> {
    let mut result = Ingested::new();
    for (line, record) in records(table) {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                result.reject(error);
                continue;
            }
        };
        if record.len() != ROSTER_FIELDS {
            result.reject(FormatError::FieldCount {
                line,
                expected: ROSTER_FIELDS,
                found: record.len(),
            });
            continue;
        }
        let hours_field = record[1].trim();
        if hours_field.is_empty() || !hours_field.bytes().all(|b| b.is_ascii_digit()) {
            debug!("line {}: worker {} has no contracted hours", line, &record[0]);
            continue;
        }
        match hours_field.parse::<u32>() {
            Ok(weekly) => result.records.push(NamedWorker::from_contract(
                record[0].trim().to_string(),
                weekly as Hours,
                hours,
            )),
            Err(_) => result.reject(FormatError::NotANumber {
                line,
                field: "weekly hours",
                value: hours_field.to_string(),
            }),
        }
    }
    result
}

/// Parses the hub report of actually driven routes. The report gives month name and day only,
/// the year is passed in.
pub fn parse_actual_routes(table: &str, year: i32) -> Ingested<ActualRoute> {
    let mut result = Ingested::new();
    for (line, record) in records(table) {
        match record.and_then(|record| actual_route_from_record(line, &record, year)) {
            Ok(route) => result.records.push(route),
            Err(error) => result.reject(error),
        }
    }
    debug!(
        "Ingested {} actual routes ({} rejected)",
        result.records.len(),
        result.rejected.len()
    );
    result
}

/// Non-blank rows of a tab-separated table together with their line number.
fn records(table: &str) -> impl Iterator<Item = (usize, Result<StringRecord, FormatError>)> + '_ {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(table.as_bytes())
        .into_records()
        .enumerate()
        .filter_map(|(i, record)| match record {
            Ok(record) => {
                if record.iter().all(|field| field.trim().is_empty()) {
                    return None;
                }
                let line = record.position().map(|p| p.line() as usize).unwrap_or(i + 1);
                Some((line, Ok(record)))
            }
            Err(error) => Some((i + 1, Err(FormatError::from(error)))),
        })
}

fn route_from_record(line: usize, record: &StringRecord, idx: Idx) -> Result<Route, FormatError> {
    if record.len() != ROUTE_FIELDS {
        return Err(FormatError::FieldCount {
            line,
            expected: ROUTE_FIELDS,
            found: record.len(),
        });
    }

    let planned_departure = time::to_minutes(&record[ROUTE_DEPARTURE])
        .map_err(|source| FormatError::InvalidTime { line, source })?;
    let travel_duration: Minutes = number(line, record, ROUTE_TRAVEL_DURATION, "travel duration")?;
    let deliveries: DeliveryCount = number(line, record, ROUTE_DELIVERIES, "delivery count")?;
    // the weight column is not filled in by every export
    let weight: Kilogram = record[ROUTE_WEIGHT].trim().parse().unwrap_or(0);
    let date = Some(record[ROUTE_DATE].trim().to_string()).filter(|d| !d.is_empty());

    Ok(Route::new(
        RouteIdx(idx),
        record[ROUTE_ID].trim().to_string(),
        HubId::from(record[ROUTE_HUB].trim()),
        date,
        planned_departure,
        travel_duration,
        deliveries,
        weight,
        idx,
    ))
}

fn actual_route_from_record(
    line: usize,
    record: &StringRecord,
    year: i32,
) -> Result<ActualRoute, FormatError> {
    if record.len() < ACTUAL_MIN_FIELDS {
        return Err(FormatError::FieldCount {
            line,
            expected: ACTUAL_MIN_FIELDS,
            found: record.len(),
        });
    }

    let month = month_from_name(&record[ACTUAL_MONTH]).ok_or_else(|| FormatError::UnknownMonth {
        line,
        value: record[ACTUAL_MONTH].trim().to_string(),
    })?;
    let day: u32 = number(line, record, ACTUAL_DAY, "day")?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(FormatError::InvalidDate {
        line,
        year,
        month,
        day,
    })?;
    let courier = record[ACTUAL_COURIER].trim();
    if courier.is_empty() {
        return Err(FormatError::MissingField {
            line,
            field: "courier",
        });
    }
    let departure = time::to_minutes(&record[ACTUAL_DEPARTURE])
        .map_err(|source| FormatError::InvalidTime { line, source })?;
    let arrival = time::to_minutes(&record[ACTUAL_ARRIVAL])
        .map_err(|source| FormatError::InvalidTime { line, source })?;

    Ok(ActualRoute::new(date, courier.to_string(), departure, arrival))
}

fn number<N: std::str::FromStr>(
    line: usize,
    record: &StringRecord,
    column: usize,
    field: &'static str,
) -> Result<N, FormatError> {
    let value = record[column].trim();
    value.parse().map_err(|_| FormatError::NotANumber {
        line,
        field,
        value: value.to_string(),
    })
}
