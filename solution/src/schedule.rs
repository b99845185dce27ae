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
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use model::base_types::{HubId, Idx, Minutes, VehicleClass, VehicleCount, WorkerIdx};
use model::config::Config;
use model::routes::Route;

use crate::assignment::RouteAssignment;
use crate::timeline::{Stop, Timeline};
use crate::vehicle_pool::VehiclePool;
use crate::worker::WorkerSlot;

/// Emitted when a worker ranks below the last named worker of the roster and gets a generated
/// name instead. Not an error: the plan stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleRosterWarning {
    pub hub: HubId,
    pub worker: WorkerIdx,
    pub rank: usize,
    pub synthetic_name: String,
}

impl fmt::Display for InfeasibleRosterWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "hub {}: no named worker at rank {} for {}, named it '{}'",
            self.hub, self.rank, self.worker, self.synthetic_name
        )
    }
}

/// The plan of a single hub: its workers (in creation order) with their timelines, the vehicle
/// pool and the assignment of every route processed so far.
///
/// Hubs never share workers or vehicles, so each hub owns its own schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    hub: HubId,
    workers: Vec<WorkerSlot>, // position in the vector == WorkerIdx
    vehicles: VehiclePool,
    assignments: Vec<RouteAssignment>, // in processing order
    warnings: Vec<InfeasibleRosterWarning>,
    config: Arc<Config>,
}

// basic methods
impl Schedule {
    pub fn empty(hub: HubId, config: Arc<Config>) -> Schedule {
        Schedule {
            vehicles: VehiclePool::new(hub.clone()),
            hub,
            workers: Vec::new(),
            assignments: Vec::new(),
            warnings: Vec::new(),
            config,
        }
    }

    pub fn hub(&self) -> &HubId {
        &self.hub
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn number_of_workers(&self) -> usize {
        self.workers.len()
    }

    /// Workers in creation order.
    pub fn workers_iter(&self) -> impl Iterator<Item = &WorkerSlot> + '_ {
        self.workers.iter()
    }

    pub fn get_worker(&self, worker: WorkerIdx) -> Result<&WorkerSlot, String> {
        self.workers
            .get(worker.rank())
            .ok_or_else(|| format!("{} is not a worker of hub {}.", worker, self.hub))
    }

    pub fn timeline_of(&self, worker: WorkerIdx) -> Result<&Timeline, String> {
        Ok(self.get_worker(worker)?.timeline())
    }

    pub fn assignments(&self) -> impl Iterator<Item = &RouteAssignment> + '_ {
        self.assignments.iter()
    }

    pub fn number_of_assignments(&self) -> usize {
        self.assignments.len()
    }

    pub fn vehicle_pool(&self) -> &VehiclePool {
        &self.vehicles
    }

    /// Minimum number of vehicles needed per class.
    pub fn vehicle_counts(&self) -> BTreeMap<VehicleClass, VehicleCount> {
        self.vehicles.counts()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &InfeasibleRosterWarning> + '_ {
        self.warnings.iter()
    }
}

// modifications
impl Schedule {
    /// Creates a new worker whose shift opens with the given route starting at `start`.
    pub fn spawn_worker_for_route(
        &mut self,
        route: &Route,
        start: Minutes,
    ) -> Result<WorkerIdx, String> {
        self.check_hub(route)?;
        let worker = WorkerIdx(self.workers.len() as Idx);
        let end = self.end_of(route, start)?;
        let stop = Stop::new(route.short_id().to_string(), start, end);

        let slot = WorkerSlot::new(worker, self.hub.clone(), stop, &self.config);
        let next_available = slot.available_from();
        self.workers.push(slot);

        let vehicle = self
            .vehicles
            .assign(route.vehicle_class(&self.config), start, end);
        self.assignments.push(RouteAssignment::new(
            route,
            start,
            end,
            next_available,
            worker,
            vehicle,
            true,
        ));
        Ok(worker)
    }

    /// Appends the route to the shift of an existing worker, starting at `start`. Returns the
    /// idle time before the route.
    pub fn assign_route_to_worker(
        &mut self,
        worker: WorkerIdx,
        route: &Route,
        start: Minutes,
    ) -> Result<Minutes, String> {
        self.check_hub(route)?;
        let slot = self
            .workers
            .get(worker.rank())
            .ok_or_else(|| format!("{} is not a worker of hub {}.", worker, self.hub))?;
        if start < slot.available_from() {
            return Err(format!(
                "{} is not available before {} (route {} would start at {}).",
                worker,
                time::to_text(slot.available_from()),
                route.short_id(),
                time::to_text(start)
            ));
        }
        let end = self.end_of(route, start)?;
        let slot = &mut self.workers[worker.rank()];
        let wait = slot.add_stop(
            Stop::new(route.short_id().to_string(), start, end),
            &self.config,
        );
        let next_available = slot.available_from();

        let vehicle = self
            .vehicles
            .assign(route.vehicle_class(&self.config), start, end);
        self.assignments.push(RouteAssignment::new(
            route,
            start,
            end,
            next_available,
            worker,
            vehicle,
            false,
        ));
        Ok(wait)
    }

    pub fn set_worker_name(&mut self, worker: WorkerIdx, name: String) -> Result<(), String> {
        let hub = &self.hub;
        self.workers
            .get_mut(worker.rank())
            .ok_or_else(|| format!("{} is not a worker of hub {}.", worker, hub))?
            .set_name(name);
        Ok(())
    }

    pub fn add_warning(&mut self, warning: InfeasibleRosterWarning) {
        self.warnings.push(warning);
    }

    fn end_of(&self, route: &Route, start: Minutes) -> Result<Minutes, String> {
        let duration = route
            .total_duration(&self.config)
            .map_err(|error| error.to_string())?;
        start
            .checked_add(duration)
            .ok_or_else(|| format!("route {} would end after the last minute.", route.short_id()))
    }

    fn check_hub(&self, route: &Route) -> Result<(), String> {
        if route.hub() != &self.hub {
            return Err(format!(
                "route {} belongs to hub {}, not to hub {}.",
                route.short_id(),
                route.hub(),
                self.hub
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "hub {}: {} workers, {} routes",
            self.hub,
            self.workers.len(),
            self.assignments.len()
        )?;
        for worker in self.workers.iter() {
            writeln!(f, "{}", worker)?;
            write!(f, "{}", worker.timeline())?;
        }
        for (class, count) in self.vehicle_counts() {
            writeln!(f, "{}: {} vehicles", class, count)?;
        }
        Ok(())
    }
}
