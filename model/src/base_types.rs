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

use derive_more::Display;
use derive_more::From;
use serde::{Deserialize, Serialize};

pub use time::Minutes;

pub type Idx = u32;
pub type DeliveryCount = u32;
pub type Kilogram = u32;
pub type VehicleCount = u32;
pub type WorkerCount = u32;

/// Working time in hours (fractional).
pub type Hours = f64;

#[derive(Display, From, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HubId(String);

impl HubId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HubId {
    fn from(string: &str) -> HubId {
        HubId(string.to_string())
    }
}

/// Index of a route in the order in which it was ingested.
#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteIdx(pub Idx);

/// Anonymous worker slot, numbered per hub in creation order.
#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "w{}", _0)]
pub struct WorkerIdx(pub Idx);

impl WorkerIdx {
    pub fn rank(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    #[display(fmt = "trike")]
    #[serde(rename = "trike")]
    Trike,
    #[display(fmt = "4-wheel")]
    #[serde(rename = "4-wheel")]
    FourWheel,
}

impl VehicleClass {
    /// Light loads go by trike, everything at or above the threshold needs a 4-wheel vehicle.
    pub fn for_weight(weight: Kilogram, threshold: Kilogram) -> VehicleClass {
        if weight < threshold {
            VehicleClass::Trike
        } else {
            VehicleClass::FourWheel
        }
    }

    pub fn all() -> [VehicleClass; 2] {
        [VehicleClass::Trike, VehicleClass::FourWheel]
    }
}

/// Vehicle slot, numbered per hub and per class in creation order.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "{}{}", class, idx)]
pub struct VehicleId {
    pub class: VehicleClass,
    pub idx: Idx,
}

impl VehicleId {
    pub fn new(class: VehicleClass, idx: Idx) -> VehicleId {
        VehicleId { class, idx }
    }
}

/// Rounds hours to one decimal as they appear in the shift tables.
pub fn round_hours(hours: Hours) -> Hours {
    (hours * 10.0).round() / 10.0
}

pub fn minutes_to_hours(minutes: Minutes) -> Hours {
    minutes as Hours / 60.0
}
