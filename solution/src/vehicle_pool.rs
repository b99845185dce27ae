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

use model::base_types::{HubId, Idx, Minutes, VehicleClass, VehicleCount, VehicleId};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSlot {
    id: VehicleId,
    next_available: Minutes,
}

impl VehicleSlot {
    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn next_available(&self) -> Minutes {
        self.next_available
    }
}

/// The vehicles of one hub, grouped by class. Slots are only ever added, so the number of slots
/// of a class is the minimum number of vehicles the hub needs for the plan.
#[derive(Debug, Clone)]
pub struct VehiclePool {
    hub: HubId,
    slots: BTreeMap<VehicleClass, Vec<VehicleSlot>>,
}

impl VehiclePool {
    pub fn new(hub: HubId) -> VehiclePool {
        VehiclePool {
            hub,
            slots: BTreeMap::new(),
        }
    }

    pub fn hub(&self) -> &HubId {
        &self.hub
    }

    /// Takes the first vehicle of the class (in creation order) that is back by `route_start`,
    /// or adds a new one if all are still out.
    pub fn assign(
        &mut self,
        class: VehicleClass,
        route_start: Minutes,
        route_end: Minutes,
    ) -> VehicleId {
        let slots = self.slots.entry(class).or_default();
        if let Some(slot) = slots
            .iter_mut()
            .find(|slot| slot.next_available <= route_start)
        {
            slot.next_available = route_end;
            return slot.id;
        }

        let id = VehicleId::new(class, slots.len() as Idx);
        slots.push(VehicleSlot {
            id,
            next_available: route_end,
        });
        debug!("{}: new vehicle {}", self.hub, id);
        id
    }

    pub fn slots(&self, class: VehicleClass) -> impl Iterator<Item = &VehicleSlot> + '_ {
        self.slots.get(&class).into_iter().flatten()
    }

    pub fn count(&self, class: VehicleClass) -> VehicleCount {
        self.slots.get(&class).map_or(0, |slots| slots.len() as VehicleCount)
    }

    /// Minimum vehicles needed for each class (classes without any route are reported as 0).
    pub fn counts(&self) -> BTreeMap<VehicleClass, VehicleCount> {
        VehicleClass::all()
            .into_iter()
            .map(|class| (class, self.count(class)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use itertools::assert_equal;

    use super::*;

    #[test]
    fn reuses_first_free_vehicle_in_creation_order() {
        let mut pool = VehiclePool::new(HubId::from("BCN"));

        let v0 = pool.assign(VehicleClass::Trike, 480, 540);
        let v1 = pool.assign(VehicleClass::Trike, 500, 520);
        // both are back by 600, the older one is taken even though v1 is back earlier
        let v2 = pool.assign(VehicleClass::Trike, 600, 650);
        // only v1 is back by 530
        let v3 = pool.assign(VehicleClass::Trike, 530, 560);

        assert_eq!(v0, VehicleId::new(VehicleClass::Trike, 0));
        assert_eq!(v1, VehicleId::new(VehicleClass::Trike, 1));
        assert_eq!(v2, v0);
        assert_eq!(v3, v1);
        assert_eq!(pool.count(VehicleClass::Trike), 2);
        assert_equal(
            pool.slots(VehicleClass::Trike).map(VehicleSlot::next_available),
            [650, 560],
        );
    }

    #[test]
    fn vehicle_back_exactly_at_start_is_free() {
        let mut pool = VehiclePool::new(HubId::from("BCN"));
        let v0 = pool.assign(VehicleClass::FourWheel, 480, 540);
        assert_eq!(pool.assign(VehicleClass::FourWheel, 540, 600), v0);
        assert_eq!(pool.count(VehicleClass::FourWheel), 1);
    }

    #[test]
    fn classes_are_separate_pools() {
        let mut pool = VehiclePool::new(HubId::from("BCN"));

        let trike = pool.assign(VehicleClass::Trike, 480, 540);
        let heavy = pool.assign(VehicleClass::FourWheel, 600, 660);

        assert_eq!(trike.to_string(), "trike0");
        assert_eq!(heavy.to_string(), "4-wheel0");
        assert_eq!(
            pool.counts(),
            BTreeMap::from([(VehicleClass::Trike, 1), (VehicleClass::FourWheel, 1)])
        );
    }

    #[test]
    fn busy_heavy_vehicles_spawn_a_new_one() {
        let mut pool = VehiclePool::new(HubId::from("BCN"));
        pool.assign(VehicleClass::FourWheel, 480, 600);
        pool.assign(VehicleClass::Trike, 480, 500);

        let v = pool.assign(VehicleClass::FourWheel, 550, 620);

        assert_eq!(v, VehicleId::new(VehicleClass::FourWheel, 1));
        assert_eq!(pool.count(VehicleClass::FourWheel), 2);
        assert_eq!(pool.count(VehicleClass::Trike), 1);
    }

    #[test]
    fn empty_pool_reports_zero() {
        let pool = VehiclePool::new(HubId::from("BCN"));
        assert_eq!(pool.count(VehicleClass::Trike), 0);
        assert_eq!(pool.slots(VehicleClass::Trike).count(), 0);
    }
}
