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

//! Routes as they were actually driven, read from the hub report.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::base_types::Minutes;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// One line of the report: who drove on which day, and when they left and came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualRoute {
    date: NaiveDate,
    courier: String,
    departure: Minutes,
    arrival: Minutes,
}

impl ActualRoute {
    /// An arrival before the departure is taken to be on the next day.
    pub fn new(date: NaiveDate, courier: String, departure: Minutes, arrival: Minutes) -> ActualRoute {
        let arrival = if arrival < departure {
            arrival + 24 * 60
        } else {
            arrival
        };
        ActualRoute {
            date,
            courier,
            departure,
            arrival,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn courier(&self) -> &str {
        &self.courier
    }

    pub fn departure(&self) -> Minutes {
        self.departure
    }

    pub fn arrival(&self) -> Minutes {
        self.arrival
    }
}

/// Month number (1 to 12) of a spanish month name, ignoring case.
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|index| index as u32 + 1)
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miercoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_spanish() {
        assert_eq!(month_from_name("enero"), Some(1));
        assert_eq!(month_from_name(" Marzo "), Some(3));
        assert_eq!(month_from_name("DICIEMBRE"), Some(12));
        assert_eq!(month_from_name("march"), None);
        assert_eq!(month_from_name(""), None);
    }

    #[test]
    fn weekday_of_date() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(weekday_name(monday), "Lunes");
        let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(weekday_name(saturday), "Sábado");
    }

    #[test]
    fn arrival_after_midnight_is_next_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let late = ActualRoute::new(date, "Anna".to_string(), 23 * 60 + 30, 20);

        assert_eq!(late.departure(), 1410);
        assert_eq!(late.arrival(), 1460);
    }
}
