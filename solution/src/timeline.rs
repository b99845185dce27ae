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

use model::base_types::Minutes;

/// Fixed changeover time between two stops of the same worker. Idle time is only counted beyond
/// it.
pub const INTER_STOP_MINUTES: Minutes = 10;

/// One assigned route in a worker's timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    route: String, // short id of the route
    start: Minutes,
    end: Minutes,
    // idle time between this stop and the next one of the same worker; stays None for the last
    // stop
    wait: Option<Minutes>,
}

impl Stop {
    pub fn new(route: String, start: Minutes, end: Minutes) -> Stop {
        Stop {
            route,
            start,
            end,
            wait: None,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn start(&self) -> Minutes {
        self.start
    }

    pub fn end(&self) -> Minutes {
        self.end
    }

    pub fn wait(&self) -> Option<Minutes> {
        self.wait
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} from {} to {}",
            self.route,
            time::to_text(self.start),
            time::to_text(self.end)
        )?;
        if let Some(wait) = self.wait {
            write!(f, " (wait {}min)", wait)?;
        }
        Ok(())
    }
}

/// The stops of a single worker in the order they were assigned. Append-only.
///
/// The wait of a stop is only known once the next stop is appended, so the last stop never
/// carries a wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    stops: Vec<Stop>,
}

impl Timeline {
    /// Starts the timeline of a new worker.
    pub fn open(stop: Stop) -> Timeline {
        Timeline { stops: vec![stop] }
    }

    /// Closes the wait of the current last stop and appends the new stop. Returns the wait that
    /// was recorded.
    pub fn append(&mut self, stop: Stop) -> Minutes {
        let wait = match self.stops.last_mut() {
            Some(previous) => {
                let wait = stop.start - (previous.end + INTER_STOP_MINUTES);
                previous.wait = Some(wait);
                wait
            }
            None => 0,
        };
        self.stops.push(Stop { wait: None, ..stop });
        wait
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stop in self.stops.iter() {
            writeln!(f, "  {}", stop)?;
        }
        Ok(())
    }
}
