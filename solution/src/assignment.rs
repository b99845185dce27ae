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

use model::base_types::{Minutes, RouteIdx, VehicleId, WorkerIdx};
use model::routes::Route;

/// The outcome of planning a single route. Written once, when the route is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAssignment {
    route: RouteIdx,
    route_id: String,
    planned_start: Minutes,
    start: Minutes,
    end: Minutes,
    next_available: Minutes, // when the worker can take the next route
    worker: WorkerIdx,
    vehicle: VehicleId,
    opened_shift: bool, // the route is the first of a newly created worker
}

impl RouteAssignment {
    pub(crate) fn new(
        route: &Route,
        start: Minutes,
        end: Minutes,
        next_available: Minutes,
        worker: WorkerIdx,
        vehicle: VehicleId,
        opened_shift: bool,
    ) -> RouteAssignment {
        RouteAssignment {
            route: route.idx(),
            route_id: route.id().to_string(),
            planned_start: route.planned_departure(),
            start,
            end,
            next_available,
            worker,
            vehicle,
            opened_shift,
        }
    }

    pub fn route(&self) -> RouteIdx {
        self.route
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn planned_start(&self) -> Minutes {
        self.planned_start
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn next_available(&self) -> Minutes {
        self.next_available
    }

    /// Actual start minus planned start; negative if the route leaves early.
    pub fn delta(&self) -> Minutes {
        self.start - self.planned_start
    }

    pub fn worker(&self) -> WorkerIdx {
        self.worker
    }

    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    pub fn opened_shift(&self) -> bool {
        self.opened_shift
    }
}
