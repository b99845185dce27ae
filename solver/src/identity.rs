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

use itertools::Itertools;
use model::base_types::WorkerIdx;
use model::roster::Roster;
use solution::{InfeasibleRosterWarning, Schedule};
use tracing::warn;

use crate::PlanningError;

/// Generated names for workers beyond the roster: consecutive characters from the configured
/// base on, leaving out names of the roster.
struct SyntheticNames<'a> {
    next: u32,
    roster: &'a Roster,
}

impl<'a> SyntheticNames<'a> {
    fn new(base: u32, roster: &'a Roster) -> SyntheticNames<'a> {
        SyntheticNames { next: base, roster }
    }
}

impl Iterator for SyntheticNames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.next <= char::MAX as u32 {
            let candidate = char::from_u32(self.next);
            self.next += 1;
            if let Some(c) = candidate {
                let name = c.to_string();
                if !self.roster.contains_name(&name) {
                    return Some(name);
                }
            }
        }
        None
    }
}

/// Names the workers of the schedule. Workers are ranked by assigned hours (most first, ties in
/// creation order); the worker at rank i takes the i-th named worker of the roster. Workers
/// beyond the roster get a generated name and a warning.
pub fn resolve_identities(schedule: &mut Schedule, roster: &Roster) -> Result<(), PlanningError> {
    let ranking: Vec<WorkerIdx> = schedule
        .workers_iter()
        .sorted_by(|a, b| b.hours().total_cmp(&a.hours()))
        .map(|worker| worker.idx())
        .collect();

    let mut synthetic_names = SyntheticNames::new(schedule.config().synthetic_name_base, roster);

    for (rank, worker) in ranking.into_iter().enumerate() {
        let name = match roster.at_rank(rank) {
            Some(named) => named.name().to_string(),
            None => {
                let name = synthetic_names
                    .next()
                    .unwrap_or_else(|| worker.to_string());
                let warning = InfeasibleRosterWarning {
                    hub: schedule.hub().clone(),
                    worker,
                    rank,
                    synthetic_name: name.clone(),
                };
                warn!("{}", warning);
                schedule.add_warning(warning);
                name
            }
        };
        schedule
            .set_worker_name(worker, name)
            .map_err(|reason| PlanningError::Schedule {
                hub: schedule.hub().clone(),
                reason,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use model::base_types::{HubId, RouteIdx};
    use model::config::Config;
    use model::roster::NamedWorker;
    use model::routes::Route;

    use super::*;

    fn roster(names: &[&str]) -> Roster {
        Roster::new(
            names
                .iter()
                .map(|name| NamedWorker::new(name.to_string(), 8.0))
                .collect(),
        )
    }

    #[test]
    fn synthetic_names_skip_roster_names() {
        let roster = roster(&["A", "C"]);
        let names: Vec<String> = SyntheticNames::new('A' as u32, &roster).take(3).collect();
        assert_eq!(names, vec!["B", "D", "E"]);
    }

    #[test]
    fn synthetic_names_skip_surrogates() {
        let roster = Roster::empty();
        let names: Vec<String> = SyntheticNames::new(0xD7FF, &roster).take(2).collect();
        assert_eq!(names, vec!["\u{D7FF}", "\u{E000}"]);
    }

    #[test]
    fn workers_are_ranked_by_hours() {
        // ARRANGE
        let mut schedule = Schedule::empty(HubId::from("BCN"), Arc::new(Config::default()));
        for (idx, travel) in [30, 90, 90].into_iter().enumerate() {
            let route = Route::new(
                RouteIdx(idx as u32),
                format!("R-{}", idx),
                HubId::from("BCN"),
                None,
                540,
                travel,
                0,
                0,
                idx as u32,
            );
            schedule.spawn_worker_for_route(&route, 530).unwrap();
        }

        // ACT
        resolve_identities(&mut schedule, &roster(&["Anna", "Bernat"])).unwrap();

        // ASSERT
        let names: Vec<Option<&str>> = schedule.workers_iter().map(|w| w.name()).collect();
        assert_eq!(names, vec![Some("A"), Some("Anna"), Some("Bernat")]);

        let warnings: Vec<_> = schedule.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].worker, WorkerIdx(0));
        assert_eq!(warnings[0].rank, 2);
        assert_eq!(warnings[0].synthetic_name, "A");
    }
}
