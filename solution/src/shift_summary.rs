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

//! Shifts as they were actually worked, derived from the report of driven routes.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use model::actual_routes::{weekday_name, ActualRoute};
use model::base_types::{minutes_to_hours, round_hours, Hours, Minutes};
use model::config::ConfigShift;
use tracing::debug;

/// The shift of one courier on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourierShift {
    date: NaiveDate,
    courier: String,
    start: Minutes,
    end: Minutes,
    number_of_routes: usize,
}

impl CourierShift {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weekday(&self) -> &'static str {
        weekday_name(self.date)
    }

    pub fn courier(&self) -> &str {
        &self.courier
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn number_of_routes(&self) -> usize {
        self.number_of_routes
    }

    pub fn hours(&self) -> Hours {
        round_hours(minutes_to_hours(self.end - self.start))
    }
}

impl fmt::Display for CourierShift {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}-{}",
            self.date,
            self.weekday(),
            self.courier,
            time::to_text(self.start),
            time::to_text(self.end)
        )
    }
}

/// All shifts of a report, ordered by day, start and courier.
#[derive(Debug, Clone, Default)]
pub struct ShiftSummary {
    shifts: Vec<CourierShift>,
}

impl ShiftSummary {
    /// A shift starts `start_buffer` before the earliest departure of the courier on that day
    /// and ends `end_buffer` after the arrival of the route that departed last.
    pub fn new(routes: &[ActualRoute], buffers: &ConfigShift) -> ShiftSummary {
        let mut by_courier: BTreeMap<(NaiveDate, &str), Vec<&ActualRoute>> = BTreeMap::new();
        for route in routes {
            by_courier
                .entry((route.date(), route.courier()))
                .or_default()
                .push(route);
        }

        let mut shifts: Vec<CourierShift> = by_courier
            .into_iter()
            .filter_map(|((date, courier), mut driven)| {
                // stable, so equal departures keep the order of the report
                driven.sort_by_key(|route| route.departure());
                let first = driven.first()?;
                let last = driven.last()?;
                Some(CourierShift {
                    date,
                    courier: courier.to_string(),
                    start: first.departure() - buffers.start_buffer,
                    end: last.arrival() + buffers.end_buffer,
                    number_of_routes: driven.len(),
                })
            })
            .collect();
        shifts.sort_by(|a, b| {
            (a.date, a.start, &a.courier).cmp(&(b.date, b.start, &b.courier))
        });

        for shift in shifts.iter() {
            debug!("{}", shift);
        }
        ShiftSummary { shifts }
    }

    pub fn shifts(&self) -> impl Iterator<Item = &CourierShift> + '_ {
        self.shifts.iter()
    }

    pub fn number_of_shifts(&self) -> usize {
        self.shifts.len()
    }
}
