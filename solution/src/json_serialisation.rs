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

use model::base_types::{Hours, Minutes, VehicleCount};
use serde::{Deserialize, Serialize};

use crate::{Schedule, ShiftSummary};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonHubSchedule {
    hub: String,
    workers: Vec<JsonWorker>,
    routes: Vec<JsonRouteAssignment>,
    vehicles: BTreeMap<String, VehicleCount>,
    warnings: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonWorker {
    worker: String,
    name: Option<String>,
    shift_start: String,
    shift_end: String,
    hours: Hours,
    shift_hours: Hours,
    timeline: Vec<JsonStop>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonStop {
    route: String,
    start: String,
    end: String,
    wait_in_minutes: Option<Minutes>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRouteAssignment {
    id: String,
    planned_start: String,
    actual_start: String,
    actual_end: String,
    next_available: String,
    delta_in_minutes: Minutes,
    worker: String,
    vehicle: String,
    opened_shift: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonCourierShift {
    date: String,
    weekday: String,
    courier: String,
    shift_start: String,
    shift_end: String,
    shift_hours: Hours,
    number_of_routes: usize,
}

pub fn shift_summary_to_json(summary: &ShiftSummary) -> serde_json::Value {
    let shifts: Vec<JsonCourierShift> = summary
        .shifts()
        .map(|shift| JsonCourierShift {
            date: shift.date().to_string(),
            weekday: shift.weekday().to_string(),
            courier: shift.courier().to_string(),
            shift_start: time::to_text(shift.start()),
            shift_end: time::to_text(shift.end()),
            shift_hours: shift.hours(),
            number_of_routes: shift.number_of_routes(),
        })
        .collect();
    serde_json::json!(shifts)
}

pub fn schedule_to_json(schedule: &Schedule) -> serde_json::Value {
    let workers = schedule
        .workers_iter()
        .map(|worker| JsonWorker {
            worker: worker.idx().to_string(),
            name: worker.name().map(str::to_string),
            shift_start: time::to_text(worker.shift_start()),
            shift_end: time::to_text(worker.shift_end()),
            hours: worker.hours(),
            shift_hours: worker.shift_hours(),
            timeline: worker
                .timeline()
                .stops()
                .map(|stop| JsonStop {
                    route: stop.route().to_string(),
                    start: time::to_text(stop.start()),
                    end: time::to_text(stop.end()),
                    wait_in_minutes: stop.wait(),
                })
                .collect(),
        })
        .collect();

    let routes = schedule
        .assignments()
        .map(|assignment| {
            // refer to the worker by name once the names are resolved
            let worker = schedule
                .get_worker(assignment.worker())
                .ok()
                .and_then(|w| w.name())
                .map(str::to_string)
                .unwrap_or_else(|| assignment.worker().to_string());
            JsonRouteAssignment {
                id: assignment.route_id().to_string(),
                planned_start: time::to_text(assignment.planned_start()),
                actual_start: time::to_text(assignment.start()),
                actual_end: time::to_text(assignment.end()),
                next_available: time::to_text(assignment.next_available()),
                delta_in_minutes: assignment.delta(),
                worker,
                vehicle: assignment.vehicle().to_string(),
                opened_shift: assignment.opened_shift(),
            }
        })
        .collect();

    let json_schedule = JsonHubSchedule {
        hub: schedule.hub().to_string(),
        workers,
        routes,
        vehicles: schedule
            .vehicle_counts()
            .into_iter()
            .map(|(class, count)| (class.to_string(), count))
            .collect(),
        warnings: schedule.warnings().map(|w| w.to_string()).collect(),
    };
    serde_json::json!(json_schedule)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use model::actual_routes::ActualRoute;
    use model::base_types::{HubId, RouteIdx, WorkerIdx};
    use model::config::{Config, ConfigShift};
    use model::routes::Route;

    use super::*;

    #[test]
    fn schedule_is_written_with_text_times() {
        let mut schedule = Schedule::empty(HubId::from("BCN"), Arc::new(Config::default()));
        let first = Route::new(
            RouteIdx(0),
            "R-0 W 1".to_string(),
            HubId::from("BCN"),
            None,
            540,
            30,
            0,
            0,
            0,
        );
        let second = Route::new(
            RouteIdx(1),
            "R-1".to_string(),
            HubId::from("BCN"),
            None,
            1430,
            20,
            0,
            400,
            1,
        );
        schedule.spawn_worker_for_route(&first, 530).unwrap();
        schedule
            .assign_route_to_worker(WorkerIdx(0), &second, 1420)
            .unwrap();
        schedule
            .set_worker_name(WorkerIdx(0), "Anna".to_string())
            .unwrap();

        let json = schedule_to_json(&schedule);

        assert_eq!(json["hub"], "BCN");
        assert_eq!(json["workers"][0]["worker"], "w0");
        assert_eq!(json["workers"][0]["name"], "Anna");
        assert_eq!(json["workers"][0]["shiftStart"], "08:38");
        assert_eq!(json["workers"][0]["shiftEnd"], "24:05");
        assert_eq!(json["workers"][0]["timeline"][0]["route"], "R-0");
        assert_eq!(json["workers"][0]["timeline"][0]["waitInMinutes"], 850);
        assert!(json["workers"][0]["timeline"][1]["waitInMinutes"].is_null());
        assert_eq!(json["routes"][1]["actualEnd"], "24:00");
        assert_eq!(json["routes"][1]["deltaInMinutes"], -10);
        assert_eq!(json["routes"][1]["worker"], "Anna");
        assert_eq!(json["routes"][1]["vehicle"], "4-wheel0");
        assert_eq!(json["vehicles"]["trike"], 1);
        assert_eq!(json["vehicles"]["4-wheel"], 1);
        assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn shift_summary_is_written_with_text_times() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let routes = vec![
            ActualRoute::new(date, "Anna".to_string(), 545, 610),
            ActualRoute::new(date, "Anna".to_string(), 1400, 10),
        ];
        let summary = ShiftSummary::new(&routes, &ConfigShift::default());

        let json = shift_summary_to_json(&summary);

        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["date"], "2024-03-09");
        assert_eq!(json[0]["weekday"], "Sábado");
        assert_eq!(json[0]["courier"], "Anna");
        assert_eq!(json[0]["shiftStart"], "08:53");
        assert_eq!(json[0]["shiftEnd"], "24:15");
        assert_eq!(json[0]["numberOfRoutes"], 2);
    }
}
