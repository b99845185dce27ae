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

use std::fmt;

use model::base_types::{minutes_to_hours, round_hours, Hours, HubId, Minutes, WorkerIdx};
use model::config::Config;

use crate::timeline::{Stop, Timeline};

/// An anonymous worker created by the planner. It later receives the name of a roster entry or
/// a generated one.
#[derive(Debug, Clone)]
pub struct WorkerSlot {
    idx: WorkerIdx,
    hub: HubId,
    shift_start: Minutes,
    shift_end: Minutes, // provisional until the run is over
    assigned_minutes: Minutes,
    hours: Hours, // assigned_minutes in hours, rounded to one decimal
    available_from: Minutes, // end of the last route plus the buffer between routes
    timeline: Timeline,
    name: Option<String>,
}

impl WorkerSlot {
    /// A new worker whose shift starts with the given route.
    pub(crate) fn new(
        idx: WorkerIdx,
        hub: HubId,
        first_stop: Stop,
        config: &Config,
    ) -> WorkerSlot {
        let duration = first_stop.end() - first_stop.start();
        WorkerSlot {
            idx,
            hub,
            shift_start: first_stop.start() - config.shift.start_buffer,
            shift_end: first_stop.end() + config.shift.end_buffer,
            assigned_minutes: duration,
            hours: round_hours(minutes_to_hours(duration)),
            available_from: first_stop.end() + config.durations.inter_route_buffer,
            timeline: Timeline::open(first_stop),
            name: None,
        }
    }

    /// Appends a route to the shift and returns the idle time recorded before it.
    pub(crate) fn add_stop(&mut self, stop: Stop, config: &Config) -> Minutes {
        self.assigned_minutes += stop.end() - stop.start();
        self.hours = round_hours(minutes_to_hours(self.assigned_minutes));
        self.shift_end = stop.end() + config.shift.end_buffer;
        self.available_from = stop.end() + config.durations.inter_route_buffer;
        self.timeline.append(stop)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub fn idx(&self) -> WorkerIdx {
        self.idx
    }

    pub fn hub(&self) -> &HubId {
        &self.hub
    }

    pub fn shift_start(&self) -> Minutes {
        self.shift_start
    }

    pub fn shift_end(&self) -> Minutes {
        self.shift_end
    }

    /// Time spent on routes, in hours rounded to one decimal. This is the measure the hour budget
    /// is checked against. Buffers and waits are not counted; see `shift_hours()` for the length
    /// of the whole shift.
    pub fn hours(&self) -> Hours {
        self.hours
    }

    pub fn assigned_minutes(&self) -> Minutes {
        self.assigned_minutes
    }

    /// Length of the whole shift including the buffers and the waits between routes, in hours
    /// rounded to one decimal. Reported only; the hour budget uses `hours()`.
    pub fn shift_hours(&self) -> Hours {
        round_hours(minutes_to_hours(self.shift_end - self.shift_start))
    }

    pub fn available_from(&self) -> Minutes {
        self.available_from
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for WorkerSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.idx)?,
            None => write!(f, "{}", self.idx)?,
        }
        write!(
            f,
            " {}-{} {:.1}h",
            time::to_text(self.shift_start),
            time::to_text(self.shift_end),
            self.hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_worker_covers_first_route() {
        let config = Config::default();

        let worker = WorkerSlot::new(
            WorkerIdx(0),
            HubId::from("BCN"),
            Stop::new("R-1".to_string(), 530, 560),
            &config,
        );

        assert_eq!(worker.shift_start(), 530 - 12);
        assert_eq!(worker.shift_end(), 560 + 5);
        assert_eq!(worker.assigned_minutes(), 30);
        assert_eq!(worker.hours(), 0.5);
        assert_eq!(worker.available_from(), 570);
        assert_eq!(worker.shift_hours(), 0.8); // 47 minutes
        assert_eq!(worker.timeline().len(), 1);
        assert_eq!(worker.name(), None);
    }

    #[test]
    fn adding_a_stop_extends_the_shift() {
        let config = Config::default();
        let mut worker = WorkerSlot::new(
            WorkerIdx(0),
            HubId::from("BCN"),
            Stop::new("R-1".to_string(), 530, 560),
            &config,
        );

        let wait = worker.add_stop(Stop::new("R-2".to_string(), 575, 595), &config);

        assert_eq!(wait, 5);
        assert_eq!(worker.shift_start(), 518);
        assert_eq!(worker.shift_end(), 600);
        assert_eq!(worker.assigned_minutes(), 50);
        assert_eq!(worker.hours(), 0.8);
        assert_eq!(worker.available_from(), 605);
        assert_eq!(worker.timeline().len(), 2);
    }

    #[test]
    fn hours_leave_out_buffers_and_waits() {
        let config = Config::default();
        let mut worker = WorkerSlot::new(
            WorkerIdx(0),
            HubId::from("BCN"),
            Stop::new("R-1".to_string(), 540, 600),
            &config,
        );
        worker.add_stop(Stop::new("R-2".to_string(), 630, 690), &config);

        // 120 minutes on routes, 528 to 695 on shift
        assert_eq!(worker.assigned_minutes(), 120);
        assert_eq!(worker.hours(), 2.0);
        assert_eq!(worker.shift_hours(), 2.8);
    }

    #[test]
    fn display_uses_name_once_resolved() {
        let config = Config::default();
        let mut worker = WorkerSlot::new(
            WorkerIdx(3),
            HubId::from("BCN"),
            Stop::new("R-1".to_string(), 530, 560),
            &config,
        );
        assert_eq!(worker.to_string(), "w3 08:38-09:25 0.5h");

        worker.set_name("Anna".to_string());
        assert_eq!(worker.to_string(), "Anna (w3) 08:38-09:25 0.5h");
    }
}
