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

pub mod greedy;
pub mod identity;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

use model::base_types::HubId;
use model::error::ConfigError;
use model::json_serialisation::PlanningInstance;
use rayon::prelude::*;
use solution::Schedule;
use thiserror::Error;
use tracing::{info, warn};

use greedy::Greedy;

/// Aborts the planning of a single hub. Other hubs are not affected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("hub {hub}: {reason}")]
    Schedule { hub: HubId, reason: String },
}

pub type HubResult = (HubId, Result<Schedule, PlanningError>);

pub trait Solver {
    fn solve(&self, hub: &HubId) -> Result<Schedule, PlanningError>;
}

/// Plans one hub: greedy assignment followed by naming the workers after the roster.
pub fn solve_hub(instance: &PlanningInstance, hub: &HubId) -> Result<Schedule, PlanningError> {
    let greedy = Greedy::initialize(
        instance.config.clone(),
        instance.routes.clone(),
        instance.rosters.clone(),
    );
    let mut schedule = greedy.solve(hub)?;
    identity::resolve_identities(&mut schedule, instance.rosters.of_hub(hub))?;
    Ok(schedule)
}

/// Plans all hubs of the instance in parallel. The results are in hub order.
pub fn solve_instance(instance: &PlanningInstance) -> Vec<HubResult> {
    let hubs: Vec<HubId> = instance.routes.hubs().cloned().collect();
    info!(
        "Planning {} routes in {} hubs on {} threads",
        instance.routes.number_of_routes(),
        hubs.len(),
        rayon::current_num_threads()
    );

    hubs.into_par_iter()
        .map(|hub| {
            let result = solve_hub(instance, &hub);
            if let Err(error) = &result {
                warn!("Planning of hub {} aborted: {}", hub, error);
            }
            (hub, result)
        })
        .collect()
}
