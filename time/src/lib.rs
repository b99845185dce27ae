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

pub mod codec;

pub use codec::{to_minutes, to_text, FormatError, MAX_HOURS};

/// Minute offset relative to the midnight that starts the shift day.
/// Values beyond 1440 belong to shifts that run past midnight; negative values can appear when a
/// margin reaches before midnight.
pub type Minutes = i32;

pub const MINUTES_PER_HOUR: Minutes = 60;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
