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
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::actual_routes::ActualRoute;
use crate::base_types::{DeliveryCount, Hours, HubId, Idx, Kilogram, Minutes, RouteIdx};
use crate::config::Config;
use crate::error::FormatError;
use crate::ingest::parse_actual_routes;
use crate::roster::{Roster, Rosters};
use crate::routes::{Route, Routes};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoute {
    id: String,
    hub: String,
    date: Option<String>,
    departure_time: String,
    travel_duration_in_minutes: Minutes,
    deliveries: DeliveryCount,
    #[serde(default)]
    weight_in_kg: Kilogram,
    order: Option<Idx>, // position in the input if missing
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonNamedWorker {
    name: String,
    weekly_hours: Hours,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    #[serde(default)]
    config: Config,
    #[serde(default)]
    routes: Vec<serde_json::Value>, // read one by one, so a bad record only drops itself
    #[serde(default)]
    rosters: BTreeMap<String, Vec<JsonNamedWorker>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonSummaryInput {
    #[serde(default)]
    config: Config,
    year: Option<i32>, // year of the report dates, the current one if missing
    report: String,    // tab-separated, as exported by the hub
}

/// Everything needed for one planning run.
pub struct PlanningInstance {
    pub config: Arc<Config>,
    pub routes: Arc<Routes>,
    pub rosters: Arc<Rosters>,
    /// routes that were dropped because they could not be read
    pub rejected: Vec<FormatError>,
}

/// The report of actually driven routes together with the buffers to apply.
pub struct SummaryInstance {
    pub config: Arc<Config>,
    pub routes: Vec<ActualRoute>,
    /// report rows that were dropped because they could not be read
    pub rejected: Vec<FormatError>,
}

impl SummaryInstance {
    pub fn new(config: Config, report: &str, year: i32) -> SummaryInstance {
        let ingested = parse_actual_routes(report, year);
        SummaryInstance {
            config: Arc::new(config),
            routes: ingested.records,
            rejected: ingested.rejected,
        }
    }
}

pub fn load_summary_instance_from_json(
    input_data: serde_json::Value,
    current_year: i32,
) -> Result<SummaryInstance, FormatError> {
    let json_input: JsonSummaryInput = serde_json::from_value(input_data)?;
    Ok(SummaryInstance::new(
        json_input.config,
        &json_input.report,
        json_input.year.unwrap_or(current_year),
    ))
}

pub fn load_planning_instance_from_json(
    input_data: serde_json::Value,
) -> Result<PlanningInstance, FormatError> {
    let json_input: JsonInput = serde_json::from_value(input_data)?;
    let config = json_input.config;

    let mut routes = Vec::new();
    let mut rejected = Vec::new();
    for (position, json_route) in json_input.routes.into_iter().enumerate() {
        let route = serde_json::from_value::<JsonRoute>(json_route)
            .map_err(|source| FormatError::InvalidRouteRecord { position, source })
            .and_then(|json_route| create_route(json_route, position as Idx));
        match route {
            Ok(route) => routes.push(route),
            Err(error) => {
                warn!("Skipping route: {}", error);
                rejected.push(error);
            }
        }
    }

    let rosters = create_rosters(json_input.rosters, &config);

    Ok(PlanningInstance {
        config: Arc::new(config),
        routes: Arc::new(Routes::new(routes)),
        rosters: Arc::new(rosters),
        rejected,
    })
}

fn create_route(json_route: JsonRoute, position: Idx) -> Result<Route, FormatError> {
    let planned_departure =
        time::to_minutes(&json_route.departure_time).map_err(|source| {
            FormatError::InvalidRouteTime {
                route: json_route.id.clone(),
                source,
            }
        })?;
    Ok(Route::new(
        RouteIdx(position),
        json_route.id,
        HubId::from(json_route.hub),
        json_route.date,
        planned_departure,
        json_route.travel_duration_in_minutes,
        json_route.deliveries,
        json_route.weight_in_kg,
        json_route.order.unwrap_or(position),
    ))
}

fn create_rosters(json_rosters: BTreeMap<String, Vec<JsonNamedWorker>>, config: &Config) -> Rosters {
    let mut rosters = Rosters::default();
    for (hub, workers) in json_rosters {
        let roster = Roster::from_contracts(
            workers.into_iter().map(|w| (w.name, w.weekly_hours)),
            &config.hours,
        );
        rosters.insert(HubId::from(hub), roster);
    }
    rosters
}
