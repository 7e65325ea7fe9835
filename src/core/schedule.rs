use serde::Serialize;

use crate::{
    core::fleet::UnitId,
    prelude::*,
    quantity::{power::Kilowatts, time::Minutes},
};

/// One selected unit and the moment it should be released to begin warming,
/// as an offset from the start of the scheduling window.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Placement {
    pub unit_id: UnitId,
    pub start_offset: Minutes,
}

/// The optimizer's output: a feasible warm-up schedule.
///
/// Placements are in chronological start order. `total_power` includes the baseline
/// load, matching the power axis of the feasibility grid.
#[must_use]
#[derive(Debug, Serialize)]
pub struct Schedule {
    pub selected: Vec<Placement>,
    pub achieved_count: usize,
    pub total_power: Kilowatts,
}

impl Schedule {
    /// Log the schedule at the info level.
    pub fn trace(&self) {
        info!(
            achieved_count = self.achieved_count,
            total_power = %self.total_power,
            "scheduled",
        );
        for placement in &self.selected {
            info!(
                unit_id = %placement.unit_id,
                start_offset = %placement.start_offset,
                "placement",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_json() {
        let schedule = Schedule {
            selected: vec![Placement { unit_id: UnitId(1), start_offset: Minutes(15.0) }],
            achieved_count: 1,
            total_power: Kilowatts(3.0),
        };
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["achieved_count"], 1);
        assert_eq!(json["selected"][0]["unit_id"], 1);
        assert_eq!(json["selected"][0]["start_offset"], 15.0);
    }
}
