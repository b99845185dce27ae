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
use std::time as stdtime;

use chrono::Datelike;
use gethostname::gethostname;
use model::base_types::{VehicleClass, VehicleCount, WorkerCount};
use model::error::FormatError;
use model::json_serialisation::{
    load_planning_instance_from_json, load_summary_instance_from_json, PlanningInstance,
    SummaryInstance,
};
use solution::json_serialisation::{schedule_to_json, shift_summary_to_json};
use solution::ShiftSummary;
use solver::HubResult;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (default: info).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

pub fn solve_instance(input_data: serde_json::Value) -> Result<serde_json::Value, FormatError> {
    let start_time = stdtime::Instant::now();
    let instance = load_planning_instance_from_json(input_data)?;
    info!(
        "Instance with {} routes in {} hubs loaded (elapsed time: {:0.2}sec)",
        instance.routes.number_of_routes(),
        instance.routes.number_of_hubs(),
        start_time.elapsed().as_secs_f32()
    );

    Ok(solve_loaded_instance(&instance, start_time))
}

/// Plans an instance that is already loaded. `start_time` is the start of the whole run.
pub fn solve_loaded_instance(
    instance: &PlanningInstance,
    start_time: stdtime::Instant,
) -> serde_json::Value {
    let results = solver::solve_instance(instance);
    let runtime_duration = start_time.elapsed();
    info!("Solved (running time: {:0.2}sec)", runtime_duration.as_secs_f32());
    create_output_json(instance, &results, runtime_duration)
}

/// Derives the worked shifts from a report of actually driven routes. Report dates without a
/// year in the input are taken to be in the current year.
pub fn summarize_report(input_data: serde_json::Value) -> Result<serde_json::Value, FormatError> {
    let start_time = stdtime::Instant::now();
    let instance = load_summary_instance_from_json(input_data, chrono::Local::now().year())?;
    info!(
        "Report with {} routes loaded ({} rejected)",
        instance.routes.len(),
        instance.rejected.len()
    );
    Ok(summarize_loaded_report(&instance, start_time))
}

/// An invalid configuration is reported in the output instead of shifts.
pub fn summarize_loaded_report(
    instance: &SummaryInstance,
    start_time: stdtime::Instant,
) -> serde_json::Value {
    if let Err(error) = instance.config.validate() {
        warn!("Summary aborted: {}", error);
        return serde_json::json!({ "error": error.to_string() });
    }
    let summary = ShiftSummary::new(&instance.routes, &instance.config.summary_shift);
    let runtime_duration = start_time.elapsed();
    info!(
        "{} shifts summarized (running time: {:0.2}sec)",
        summary.number_of_shifts(),
        runtime_duration.as_secs_f32()
    );
    serde_json::json!({
        "info": {
            "runningTime": format!("{:0.2}sec", runtime_duration.as_secs_f32()),
            "hostname": gethostname().into_string().unwrap_or("unknown".to_string()),
            "numberOfShifts": summary.number_of_shifts(),
        },
        "rejectedRoutes": instance
            .rejected
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>(),
        "shifts": shift_summary_to_json(&summary),
    })
}

pub fn create_output_json(
    instance: &PlanningInstance,
    results: &[HubResult],
    runtime_duration: stdtime::Duration,
) -> serde_json::Value {
    let mut number_of_workers: WorkerCount = 0;
    let mut vehicles: BTreeMap<VehicleClass, VehicleCount> =
        VehicleClass::all().into_iter().map(|class| (class, 0)).collect();

    let hubs: Vec<serde_json::Value> = results
        .iter()
        .map(|(hub, result)| match result {
            Ok(schedule) => {
                number_of_workers += schedule.number_of_workers() as WorkerCount;
                for (class, count) in schedule.vehicle_counts() {
                    *vehicles.entry(class).or_default() += count;
                }
                schedule_to_json(schedule)
            }
            Err(error) => serde_json::json!({
                "hub": hub.to_string(),
                "error": error.to_string(),
            }),
        })
        .collect();

    serde_json::json!({
        "info": {
            "runningTime": format!("{:0.2}sec", runtime_duration.as_secs_f32()),
            "numberOfThreads": rayon::current_num_threads(),
            "hostname": gethostname().into_string().unwrap_or("unknown".to_string()),
            "numberOfWorkers": number_of_workers,
            "numberOfVehicles": vehicles
                .iter()
                .map(|(class, count)| (class.to_string(), *count))
                .collect::<BTreeMap<String, VehicleCount>>(),
        },
        "rejectedRoutes": instance
            .rejected
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>(),
        "hubs": hubs,
    })
}
