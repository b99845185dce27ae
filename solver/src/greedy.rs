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


use std::sync::Arc;

use itertools::Itertools;
use model::base_types::{minutes_to_hours, Hours, HubId, Minutes};
use model::config::Config;
use model::roster::{Roster, Rosters};
use model::routes::{Route, Routes};
use solution::worker::WorkerSlot;
use solution::Schedule;
use tracing::{debug, info};

use crate::{PlanningError, Solver};

/// Single pass over the routes of a hub. Each route goes to the first worker (in creation
/// order) that is free in time, has hours left and would not idle too long; otherwise a new
/// worker is created for it.
pub struct Greedy {
    config: Arc<Config>,
    routes: Arc<Routes>,
    rosters: Arc<Rosters>,
}

impl Greedy {
    pub fn initialize(config: Arc<Config>, routes: Arc<Routes>, rosters: Arc<Rosters>) -> Greedy {
        Greedy {
            config,
            routes,
            rosters,
        }
    }

    /// Hours the worker may reach: the budget of the roster entry of the same rank, capped by
    /// the global ceiling.
    fn hour_limit(&self, worker: &WorkerSlot, roster: &Roster) -> Hours {
        let ceiling = self.config.hours.global_ceiling;
        match roster.at_rank(worker.idx().rank()) {
            Some(named) => named.budget().min(ceiling),
            None => ceiling,
        }
    }

    fn can_take(
        &self,
        worker: &WorkerSlot,
        route: &Route,
        duration: Minutes,
        roster: &Roster,
    ) -> bool {
        let max_early = route.max_early(&self.config);
        let max_delay = route.max_delay(&self.config);

        worker.hub() == route.hub()
            && worker.available_from() < max_delay
            && worker.hours() + minutes_to_hours(duration) <= self.hour_limit(worker, roster)
            && max_early - worker.available_from() < self.config.durations.max_wait
    }
}

impl Solver for Greedy {
    fn solve(&self, hub: &HubId) -> Result<Schedule, PlanningError> {
        self.config.validate()?;
        let roster = self.rosters.of_hub(hub);
        let mut schedule = Schedule::empty(hub.clone(), self.config.clone());

        for route in self.routes.of_hub(hub) {
            let duration = route.total_duration(&self.config)?;

            let candidate = schedule
                .workers_iter()
                .find(|worker| self.can_take(worker, route, duration, roster))
                .map(|worker| (worker.idx(), worker.available_from()));

            match candidate {
                Some((worker, available_from)) => {
                    let start = available_from.max(route.max_early(&self.config));
                    let wait = schedule
                        .assign_route_to_worker(worker, route, start)
                        .map_err(|reason| PlanningError::Schedule {
                            hub: hub.clone(),
                            reason,
                        })?;
                    debug!(
                        "{}: {} to {} at {} (waited {}min)",
                        hub,
                        route,
                        worker,
                        time::to_text(start),
                        wait
                    );
                }
                None => {
                    let start = route.planned_departure() - self.config.margins.first_route_early;
                    let worker = schedule
                        .spawn_worker_for_route(route, start)
                        .map_err(|reason| PlanningError::Schedule {
                            hub: hub.clone(),
                            reason,
                        })?;
                    debug!(
                        "{}: {} opens the shift of {} at {}",
                        hub,
                        route,
                        worker,
                        time::to_text(start)
                    );
                }
            }
        }

        info!(
            "{}: {} routes assigned to {} workers, vehicles: {}",
            hub,
            schedule.number_of_assignments(),
            schedule.number_of_workers(),
            schedule
                .vehicle_counts()
                .iter()
                .map(|(class, count)| format!("{} {}", count, class))
                .join(", ")
        );
        Ok(schedule)
    }
}
