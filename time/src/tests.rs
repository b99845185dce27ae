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

#[cfg(test)]
use super::*;

#[test]
fn parse_hours_and_minutes() {
    assert_eq!(to_minutes("00:00"), Ok(0));
    assert_eq!(to_minutes("09:00"), Ok(540));
    assert_eq!(to_minutes("9:05"), Ok(545));
    assert_eq!(to_minutes("23:59"), Ok(1439));
}

#[test]
fn parse_truncates_seconds() {
    assert_eq!(to_minutes("09:40:59"), Ok(580));
    assert_eq!(to_minutes("09:40:00"), Ok(580));
}

#[test]
fn parse_beyond_midnight() {
    assert_eq!(to_minutes("26:15"), Ok(1575));
}

#[test]
fn parse_rejects_malformed_input() {
    assert!(matches!(
        to_minutes("0900"),
        Err(FormatError::SeparatorCount { .. })
    ));
    assert!(matches!(
        to_minutes("09:00:00:00"),
        Err(FormatError::SeparatorCount { .. })
    ));
    assert!(matches!(
        to_minutes("ab:00"),
        Err(FormatError::NotANumber { field: "hour", .. })
    ));
    assert!(matches!(
        to_minutes("09:+5"),
        Err(FormatError::NotANumber { field: "minute", .. })
    ));
    assert!(matches!(
        to_minutes("09:"),
        Err(FormatError::NotANumber { field: "minute", .. })
    ));
    assert!(matches!(
        to_minutes("09:60"),
        Err(FormatError::OutOfRange { field: "minute", .. })
    ));
    assert!(matches!(
        to_minutes("09:10:75"),
        Err(FormatError::OutOfRange { field: "second", .. })
    ));
    assert!(matches!(
        to_minutes("99999999:00"),
        Err(FormatError::OutOfRange { field: "hour", .. })
    ));
}

#[test]
fn parse_bounds_hours() {
    assert_eq!(to_minutes("999:59"), Ok(MAX_HOURS * 60 + 59));
    assert!(matches!(
        to_minutes("1000:00"),
        Err(FormatError::OutOfRange { field: "hour", .. })
    ));
    // fits into i32 on its own, but not once margins and durations are added
    assert!(matches!(
        to_minutes("35791394:00"),
        Err(FormatError::OutOfRange { field: "hour", .. })
    ));
}

#[test]
fn format_is_zero_padded() {
    assert_eq!(to_text(0), "00:00");
    assert_eq!(to_text(545), "09:05");
    assert_eq!(to_text(1439), "23:59");
}

#[test]
fn format_does_not_wrap_at_midnight() {
    assert_eq!(to_text(1440), "24:00");
    assert_eq!(to_text(1575), "26:15");
}

#[test]
fn format_negative_offsets() {
    assert_eq!(to_text(-5), "-00:05");
    assert_eq!(to_text(-75), "-01:15");
}

#[test]
fn codec_round_trip_over_one_day() {
    for m in 0..1440 {
        assert_eq!(
            to_minutes(&to_text(m)),
            Ok(m),
            "round trip failed for {} ({})",
            m,
            to_text(m)
        );
    }
}
