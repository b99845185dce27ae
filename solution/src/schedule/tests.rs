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

use itertools::assert_equal;
use model::base_types::{HubId, Idx, Minutes, RouteIdx, VehicleClass, VehicleId, WorkerIdx};
use model::config::Config;
use model::routes::Route;

use crate::Schedule;

fn route(idx: Idx, id: &str, hub: &str, departure: Minutes, travel: Minutes, weight: u32) -> Route {
    Route::new(
        RouteIdx(idx),
        id.to_string(),
        HubId::from(hub),
        None,
        departure,
        travel,
        0,
        weight,
        idx,
    )
}

fn default_schedule() -> Schedule {
    let config = Arc::new(Config::default());
    let mut schedule = Schedule::empty(HubId::from("BCN"), config);
    schedule
        .spawn_worker_for_route(&route(0, "R-0", "BCN", 540, 30, 0), 530)
        .unwrap();
    schedule
        .assign_route_to_worker(WorkerIdx(0), &route(1, "R-1", "BCN", 580, 20, 0), 575)
        .unwrap();
    schedule
        .spawn_worker_for_route(&route(2, "R-2", "BCN", 600, 45, 500), 590)
        .unwrap();
    schedule
}

#[test]
fn basic_methods_test() {
    // ACT
    let schedule = default_schedule();

    // ASSERT
    assert_eq!(schedule.hub(), &HubId::from("BCN"));
    assert_eq!(schedule.number_of_workers(), 2);
    assert_eq!(schedule.number_of_assignments(), 3);
    assert_equal(
        schedule.workers_iter().map(|w| w.idx()),
        [WorkerIdx(0), WorkerIdx(1)],
    );
    assert!(schedule.get_worker(WorkerIdx(2)).is_err());

    let w0 = schedule.get_worker(WorkerIdx(0)).unwrap();
    assert_eq!(w0.shift_start(), 518);
    assert_eq!(w0.shift_end(), 600);
    assert_eq!(w0.assigned_minutes(), 50);
    assert_eq!(w0.available_from(), 605);

    assert_equal(
        schedule
            .timeline_of(WorkerIdx(0))
            .unwrap()
            .stops()
            .map(|s| (s.route(), s.start(), s.end(), s.wait())),
        [("R-0", 530, 560, Some(5)), ("R-1", 575, 595, None)],
    );
}

#[test]
fn assignments_are_recorded_in_processing_order() {
    let schedule = default_schedule();

    let assignments: Vec<_> = schedule.assignments().collect();
    assert_eq!(assignments.len(), 3);

    assert_eq!(assignments[0].route(), RouteIdx(0));
    assert_eq!(assignments[0].start(), 530);
    assert_eq!(assignments[0].end(), 560);
    assert_eq!(assignments[0].next_available(), 570);
    assert_eq!(assignments[0].delta(), -10);
    assert!(assignments[0].opened_shift());

    assert_eq!(assignments[1].worker(), WorkerIdx(0));
    assert_eq!(assignments[1].delta(), -5);
    assert_eq!(assignments[1].next_available(), 605);
    assert!(!assignments[1].opened_shift());
    // the trike of R-0 is back at 560
    assert_eq!(
        assignments[1].vehicle(),
        VehicleId::new(VehicleClass::Trike, 0)
    );

    assert_eq!(assignments[2].worker(), WorkerIdx(1));
    assert_eq!(
        assignments[2].vehicle(),
        VehicleId::new(VehicleClass::FourWheel, 0)
    );
}

#[test]
fn vehicle_counts_per_class() {
    let schedule = default_schedule();
    let counts = schedule.vehicle_counts();
    assert_eq!(counts[&VehicleClass::Trike], 1);
    assert_eq!(counts[&VehicleClass::FourWheel], 1);
}

#[test]
fn route_of_other_hub_is_rejected() {
    let mut schedule = default_schedule();

    let result = schedule.spawn_worker_for_route(&route(3, "R-3", "MAD", 600, 30, 0), 590);

    assert!(result.is_err());
    assert_eq!(schedule.number_of_workers(), 2);
    assert!(schedule
        .assign_route_to_worker(WorkerIdx(0), &route(4, "R-4", "MAD", 700, 30, 0), 700)
        .is_err());
}

#[test]
fn worker_cannot_start_before_available() {
    let mut schedule = default_schedule();

    let result =
        schedule.assign_route_to_worker(WorkerIdx(0), &route(3, "R-3", "BCN", 600, 30, 0), 600);

    assert!(result.is_err());
    assert_eq!(schedule.timeline_of(WorkerIdx(0)).unwrap().len(), 2);
    assert_eq!(schedule.number_of_assignments(), 3);
}

#[test]
fn names_are_set_on_existing_workers_only() {
    let mut schedule = default_schedule();

    schedule
        .set_worker_name(WorkerIdx(1), "Anna".to_string())
        .unwrap();

    assert_eq!(schedule.get_worker(WorkerIdx(1)).unwrap().name(), Some("Anna"));
    assert_eq!(schedule.get_worker(WorkerIdx(0)).unwrap().name(), None);
    assert!(schedule
        .set_worker_name(WorkerIdx(5), "Bernat".to_string())
        .is_err());
}
