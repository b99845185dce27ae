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

use itertools::assert_equal;
use model::base_types::HubId;
use model::error::ConfigError;
use model::json_serialisation::{load_planning_instance_from_json, PlanningInstance};

use crate::{solve_instance, PlanningError};

fn instance(config: serde_json::Value) -> PlanningInstance {
    let input = serde_json::json!({
        "config": config,
        "routes": [
            { "id": "R-1", "hub": "MAD", "departureTime": "09:00", "travelDurationInMinutes": 30, "deliveries": 0 },
            { "id": "R-2", "hub": "BCN", "departureTime": "09:00", "travelDurationInMinutes": 30, "deliveries": 0 },
            { "id": "R-3", "hub": "BCN", "departureTime": "09:05", "travelDurationInMinutes": 90, "deliveries": 0 },
            { "id": "R-4", "hub": "BCN", "departureTime": "09:10", "travelDurationInMinutes": 60, "deliveries": 0 },
            { "id": "R-5", "hub": "MAD", "departureTime": "09:40", "travelDurationInMinutes": 20, "deliveries": 0 }
        ],
        "rosters": {
            "BCN": [
                { "name": "A", "weeklyHours": 40 },
                { "name": "Bernat", "weeklyHours": 20 }
            ]
        }
    });
    load_planning_instance_from_json(input).unwrap()
}

#[test]
fn hubs_are_solved_independently_in_hub_order() {
    // ARRANGE
    let instance = instance(serde_json::json!({}));

    // ACT
    let results = solve_instance(&instance);

    // ASSERT
    assert_equal(
        results.iter().map(|(hub, _)| hub.clone()),
        [HubId::from("BCN"), HubId::from("MAD")],
    );

    let bcn = results[0].1.as_ref().unwrap();
    assert_eq!(bcn.number_of_workers(), 3);
    // Scenario D: three workers, two named workers; "A" is taken by the roster
    let names: Vec<Option<&str>> = bcn.workers_iter().map(|w| w.name()).collect();
    assert_eq!(names, vec![Some("B"), Some("A"), Some("Bernat")]);
    assert_eq!(bcn.warnings().count(), 1);

    let mad = results[1].1.as_ref().unwrap();
    assert_eq!(mad.number_of_workers(), 1);
    assert_eq!(mad.number_of_assignments(), 2);
    // MAD has no roster, its only worker gets a generated name
    assert_eq!(
        mad.workers_iter().next().unwrap().name(),
        Some("A")
    );
    assert_eq!(mad.warnings().count(), 1);
}

#[test]
fn invalid_config_is_reported_per_hub() {
    let instance = instance(serde_json::json!({ "hours": { "globalCeiling": 0.0 } }));

    let results = solve_instance(&instance);

    assert_eq!(results.len(), 2);
    for (_, result) in results {
        assert!(matches!(result, Err(PlanningError::Config(_))));
    }
}

#[test]
fn overflowing_input_fails_only_its_record_or_hub() {
    // ARRANGE
    let input = serde_json::json!({
        "routes": [
            { "id": "R-1", "hub": "BCN", "departureTime": "35791394:00", "travelDurationInMinutes": 30, "deliveries": 0 },
            { "id": "R-2", "hub": "BCN", "departureTime": "09:00", "travelDurationInMinutes": 30, "deliveries": 0 },
            { "id": "R-3", "hub": "MAD", "departureTime": "09:00", "travelDurationInMinutes": 30, "deliveries": 400000000 },
            { "id": "R-4", "hub": "VLC", "departureTime": "09:00", "travelDurationInMinutes": 30, "deliveries": 1 }
        ]
    });
    let instance = load_planning_instance_from_json(input).unwrap();

    // ACT
    let results = solve_instance(&instance);

    // ASSERT
    assert_eq!(instance.rejected.len(), 1);
    assert_eq!(results.len(), 3);
    let bcn = results[0].1.as_ref().unwrap();
    assert_eq!(bcn.number_of_assignments(), 1);
    assert!(matches!(
        results[1].1,
        Err(PlanningError::Config(ConfigError::DurationOutOfRange { .. }))
    ));
    assert_eq!(results[2].1.as_ref().unwrap().number_of_assignments(), 1);
}
