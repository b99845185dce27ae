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

use model::base_types::HubId;
use model::error::FormatError;
use model::ingest::{parse_roster, parse_routes};
use model::json_serialisation::{load_planning_instance_from_json, PlanningInstance};
use model::roster::Roster;
use model::routes::Routes;
use tracing::{info, warn};

/// Loads the instance from the json input. Routes and rosters given as tab-separated tables
/// take the place of the ones in the json input.
pub fn load_instance(
    input_data: serde_json::Value,
    routes_table: Option<&str>,
    roster_tables: &[(HubId, String)],
) -> Result<PlanningInstance, FormatError> {
    let mut instance = load_planning_instance_from_json(input_data)?;

    if let Some(table) = routes_table {
        if instance.routes.number_of_routes() > 0 {
            warn!(
                "Replacing {} routes of the json input by the route table",
                instance.routes.number_of_routes()
            );
        }
        let ingested = parse_routes(table);
        info!(
            "{} routes read from the route table ({} rejected)",
            ingested.records.len(),
            ingested.rejected.len()
        );
        instance.routes = Arc::new(Routes::new(ingested.records));
        instance.rejected = ingested.rejected;
    }

    if !roster_tables.is_empty() {
        let mut rosters = (*instance.rosters).clone();
        for (hub, table) in roster_tables {
            let ingested = parse_roster(table, &instance.config.hours);
            info!(
                "{} named workers read for hub {}",
                ingested.records.len(),
                hub
            );
            instance.rejected.extend(ingested.rejected);
            rosters.insert(hub.clone(), Roster::new(ingested.records));
        }
        instance.rosters = Arc::new(rosters);
    }

    Ok(instance)
}
