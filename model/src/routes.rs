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

use std::collections::BTreeMap;
use std::fmt;

use crate::base_types::{DeliveryCount, HubId, Idx, Kilogram, Minutes, RouteIdx, VehicleClass};
use crate::config::{Config, DepartureMargin};
use crate::error::ConfigError;

/// Longest route accepted by the planner, a week.
pub const MAX_ROUTE_MINUTES: Minutes = 7 * 24 * 60;

/// Token in a route id that marks the route as priority.
const PRIORITY_MARKER: &str = "w";

/// A delivery route as planned. Immutable once ingested; the assignment result is kept
/// separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    idx: RouteIdx,
    id: String,
    hub: HubId,
    date: Option<String>,
    planned_departure: Minutes,
    travel_duration: Minutes,
    deliveries: DeliveryCount,
    weight: Kilogram,
    order: Idx,
}

impl Route {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        idx: RouteIdx,
        id: String,
        hub: HubId,
        date: Option<String>,
        planned_departure: Minutes,
        travel_duration: Minutes,
        deliveries: DeliveryCount,
        weight: Kilogram,
        order: Idx,
    ) -> Route {
        Route {
            idx,
            id,
            hub,
            date,
            planned_departure,
            travel_duration,
            deliveries,
            weight,
            order,
        }
    }

    pub fn idx(&self) -> RouteIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The first token of the id, as shown in the timelines.
    pub fn short_id(&self) -> &str {
        self.id.split_whitespace().next().unwrap_or(&self.id)
    }

    pub fn hub(&self) -> &HubId {
        &self.hub
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// The marker counts only between two other tokens: "R-101 W 12" is priority, "R-101 W" is
    /// not.
    pub fn is_priority(&self) -> bool {
        let tokens: Vec<&str> = self.id.split_whitespace().collect();
        tokens.len() > 2
            && tokens[1..tokens.len() - 1]
                .iter()
                .any(|token| token.eq_ignore_ascii_case(PRIORITY_MARKER))
    }

    pub fn planned_departure(&self) -> Minutes {
        self.planned_departure
    }

    pub fn travel_duration(&self) -> Minutes {
        self.travel_duration
    }

    pub fn deliveries(&self) -> DeliveryCount {
        self.deliveries
    }

    pub fn weight(&self) -> Kilogram {
        self.weight
    }

    pub fn order(&self) -> Idx {
        self.order
    }

    /// travel duration plus the time spent on each delivery. Fails for negative durations and
    /// for durations beyond `MAX_ROUTE_MINUTES`.
    pub fn total_duration(&self, config: &Config) -> Result<Minutes, ConfigError> {
        let out_of_range = || ConfigError::DurationOutOfRange {
            hub: self.hub.clone(),
            route: self.id.clone(),
            max: MAX_ROUTE_MINUTES,
        };
        let duration = Minutes::try_from(self.deliveries)
            .ok()
            .and_then(|deliveries| deliveries.checked_mul(config.durations.per_delivery))
            .and_then(|delivery_time| delivery_time.checked_add(self.travel_duration))
            .ok_or_else(out_of_range)?;
        if duration < 0 {
            return Err(ConfigError::NegativeDuration {
                hub: self.hub.clone(),
                route: self.id.clone(),
                minutes: duration,
            });
        }
        if duration > MAX_ROUTE_MINUTES {
            return Err(out_of_range());
        }
        Ok(duration)
    }

    pub fn vehicle_class(&self, config: &Config) -> VehicleClass {
        VehicleClass::for_weight(self.weight, config.vehicle_weight_threshold)
    }

    pub fn departure_margin(&self, config: &Config) -> DepartureMargin {
        config.margin(self.is_priority())
    }

    /// Earliest start allowed for a worker who is already on shift.
    pub fn max_early(&self, config: &Config) -> Minutes {
        self.planned_departure - self.departure_margin(config).early
    }

    /// Latest start allowed. A worker must be free strictly before this time.
    pub fn max_delay(&self, config: &Config) -> Minutes {
        self.planned_departure + self.departure_margin(config).delay
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}; dep {}; {}min + {} deliveries)",
            self.short_id(),
            self.hub,
            time::to_text(self.planned_departure),
            self.travel_duration,
            self.deliveries
        )
    }
}

/// All routes of a run, partitioned by hub. Hubs iterate in name order and the routes of a hub
/// in ascending order key (ties by ingestion index), so every traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    hubs: BTreeMap<HubId, Vec<Route>>,
}

impl Routes {
    pub fn new(routes: Vec<Route>) -> Routes {
        let mut hubs: BTreeMap<HubId, Vec<Route>> = BTreeMap::new();
        for route in routes {
            hubs.entry(route.hub.clone()).or_default().push(route);
        }
        for routes_of_hub in hubs.values_mut() {
            routes_of_hub.sort_by_key(|r| (r.order, r.idx));
        }
        Routes { hubs }
    }

    pub fn hubs(&self) -> impl Iterator<Item = &HubId> + '_ {
        self.hubs.keys()
    }

    pub fn number_of_hubs(&self) -> usize {
        self.hubs.len()
    }

    pub fn number_of_routes(&self) -> usize {
        self.hubs.values().map(Vec::len).sum()
    }

    /// The routes of the hub in processing order.
    pub fn of_hub(&self, hub: &HubId) -> &[Route] {
        self.hubs.get(hub).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HubId, &[Route])> + '_ {
        self.hubs.iter().map(|(hub, routes)| (hub, routes.as_slice()))
    }
}
