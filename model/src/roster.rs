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

use crate::base_types::{Hours, HubId};
use crate::config::ConfigHours;

const WORKING_DAYS_PER_WEEK: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NamedWorker {
    name: String,
    budget: Hours, // daily hours including the hour-band flexibility
}

impl NamedWorker {
    pub fn new(name: String, budget: Hours) -> NamedWorker {
        NamedWorker { name, budget }
    }

    /// Turns weekly contracted hours into a daily budget and applies the flexibility of the
    /// worker's hour band (more than 6h, more than 4h, the rest).
    pub fn from_contract(name: String, weekly_hours: Hours, hours: &ConfigHours) -> NamedWorker {
        let daily = weekly_hours / WORKING_DAYS_PER_WEEK;
        let flex = if daily > 6.0 {
            hours.flex_over_6h
        } else if daily > 4.0 {
            hours.flex_4_to_6h
        } else {
            hours.flex_under_4h
        };
        NamedWorker::new(name, daily * (1.0 + flex))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> Hours {
        self.budget
    }
}

/// Named workers of one hub, ranked by budget (largest first, ties keep input order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    workers: Vec<NamedWorker>,
}

impl Roster {
    pub fn new(mut workers: Vec<NamedWorker>) -> Roster {
        workers.sort_by(|a, b| b.budget.total_cmp(&a.budget));
        Roster { workers }
    }

    pub fn from_contracts(
        contracts: impl IntoIterator<Item = (String, Hours)>,
        hours: &ConfigHours,
    ) -> Roster {
        Roster::new(
            contracts
                .into_iter()
                .map(|(name, weekly)| NamedWorker::from_contract(name, weekly, hours))
                .collect(),
        )
    }

    pub fn empty() -> Roster {
        Roster::default()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// The named worker at the given rank (0 = largest budget).
    pub fn at_rank(&self, rank: usize) -> Option<&NamedWorker> {
        self.workers.get(rank)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.workers.iter().any(|w| w.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedWorker> + '_ {
        self.workers.iter()
    }
}

/// Rosters per hub. Hubs without an entry have no named workers.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    rosters: BTreeMap<HubId, Roster>,
    empty: Roster,
}

impl Rosters {
    pub fn new(rosters: BTreeMap<HubId, Roster>) -> Rosters {
        Rosters {
            rosters,
            empty: Roster::empty(),
        }
    }

    pub fn of_hub(&self, hub: &HubId) -> &Roster {
        self.rosters.get(hub).unwrap_or(&self.empty)
    }

    pub fn insert(&mut self, hub: HubId, roster: Roster) {
        self.rosters.insert(hub, roster);
    }
}
