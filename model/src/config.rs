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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::base_types::{Hours, Kilogram, Minutes};
use crate::error::{ConfigError, FormatError};

/// Upper bound of every option given in minutes.
pub const MAX_OPTION_MINUTES: Minutes = 24 * 60;

/// Parameters of one planning run. Every field falls back to the planners' usual value, so an
/// empty json object is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub shift: ConfigShift,
    /// buffers of the shifts derived from the report of actually driven routes
    pub summary_shift: ConfigShift,
    pub durations: ConfigDurations,
    pub margins: ConfigMargins,
    pub hours: ConfigHours,
    pub vehicle_weight_threshold: Kilogram,
    /// first code point of the generated names for workers without a roster entry
    pub synthetic_name_base: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigShift {
    pub start_buffer: Minutes, // before the first route of the shift
    pub end_buffer: Minutes,   // after the last route of the shift
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigDurations {
    pub per_delivery: Minutes,
    pub inter_route_buffer: Minutes,
    /// longest a worker may idle between the end of one route and the next one
    pub max_wait: Minutes,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigMargins {
    #[serde(deserialize_with = "priority_margin")]
    pub priority: DepartureMargin,
    #[serde(deserialize_with = "non_priority_margin")]
    pub non_priority: DepartureMargin,
    pub first_route_early: Minutes,
}

/// How much earlier or later than planned a route may depart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartureMargin {
    pub early: Minutes,
    pub delay: Minutes,
}

/// A margin as given in the input; missing fields keep the default of the priority class.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialDepartureMargin {
    early: Option<Minutes>,
    delay: Option<Minutes>,
}

impl PartialDepartureMargin {
    fn or(self, default: DepartureMargin) -> DepartureMargin {
        DepartureMargin {
            early: self.early.unwrap_or(default.early),
            delay: self.delay.unwrap_or(default.delay),
        }
    }
}

fn priority_margin<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DepartureMargin, D::Error> {
    Ok(PartialDepartureMargin::deserialize(deserializer)?.or(ConfigMargins::default().priority))
}

fn non_priority_margin<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DepartureMargin, D::Error> {
    Ok(PartialDepartureMargin::deserialize(deserializer)?.or(ConfigMargins::default().non_priority))
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigHours {
    pub global_ceiling: Hours,
    #[serde(rename = "flexOver6h")]
    pub flex_over_6h: f64,
    #[serde(rename = "flex4To6h")]
    pub flex_4_to_6h: f64,
    #[serde(rename = "flexUnder4h")]
    pub flex_under_4h: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            shift: ConfigShift::default(),
            summary_shift: ConfigShift::default(),
            durations: ConfigDurations::default(),
            margins: ConfigMargins::default(),
            hours: ConfigHours::default(),
            vehicle_weight_threshold: 300,
            synthetic_name_base: 'A' as u32,
        }
    }
}

impl Default for ConfigShift {
    fn default() -> ConfigShift {
        ConfigShift {
            start_buffer: 12,
            end_buffer: 5,
        }
    }
}

impl Default for ConfigDurations {
    fn default() -> ConfigDurations {
        ConfigDurations {
            per_delivery: 7,
            inter_route_buffer: 10,
            max_wait: 20,
        }
    }
}

impl Default for ConfigMargins {
    fn default() -> ConfigMargins {
        ConfigMargins {
            priority: DepartureMargin {
                early: 10,
                delay: 5,
            },
            non_priority: DepartureMargin {
                early: 25,
                delay: 15,
            },
            first_route_early: 10,
        }
    }
}

impl Default for ConfigHours {
    fn default() -> ConfigHours {
        ConfigHours {
            global_ceiling: 9.0,
            flex_over_6h: 0.10,
            flex_4_to_6h: 0.20,
            flex_under_4h: 0.20,
        }
    }
}

impl Config {
    pub fn margin(&self, priority: bool) -> DepartureMargin {
        if priority {
            self.margins.priority
        } else {
            self.margins.non_priority
        }
    }

    /// Checks that no value leads to negative or overflowing durations or to an empty hour
    /// budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let minutes = [
            ("shift.startBuffer", self.shift.start_buffer),
            ("shift.endBuffer", self.shift.end_buffer),
            ("summaryShift.startBuffer", self.summary_shift.start_buffer),
            ("summaryShift.endBuffer", self.summary_shift.end_buffer),
            ("durations.perDelivery", self.durations.per_delivery),
            ("durations.interRouteBuffer", self.durations.inter_route_buffer),
            ("durations.maxWait", self.durations.max_wait),
            ("margins.priority.early", self.margins.priority.early),
            ("margins.priority.delay", self.margins.priority.delay),
            ("margins.nonPriority.early", self.margins.non_priority.early),
            ("margins.nonPriority.delay", self.margins.non_priority.delay),
            ("margins.firstRouteEarly", self.margins.first_route_early),
        ];
        for (option, value) in minutes {
            if value < 0 {
                return Err(ConfigError::Negative {
                    option,
                    value: value as f64,
                });
            }
            if value > MAX_OPTION_MINUTES {
                return Err(ConfigError::TooLarge {
                    option,
                    value,
                    max: MAX_OPTION_MINUTES,
                });
            }
        }

        let flex = [
            ("hours.flexOver6h", self.hours.flex_over_6h),
            ("hours.flex4To6h", self.hours.flex_4_to_6h),
            ("hours.flexUnder4h", self.hours.flex_under_4h),
        ];
        for (option, value) in flex {
            if value < 0.0 {
                return Err(ConfigError::Negative { option, value });
            }
        }

        // also rejects NaN
        if !(self.hours.global_ceiling > 0.0) {
            return Err(ConfigError::NonPositiveCeiling(self.hours.global_ceiling));
        }

        if char::from_u32(self.synthetic_name_base).is_none() {
            return Err(ConfigError::InvalidNameBase(self.synthetic_name_base));
        }
        Ok(())
    }

    /// Loads a stored parameter set. Missing fields take their default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Config, FormatError> {
        let file = File::open(path).map_err(serde_json::Error::io)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let file = File::create(path).map_err(serde_json::Error::io)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
