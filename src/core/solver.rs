use std::time::Instant;

use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{
        error::ScheduleError,
        fleet::{Fleet, Unit},
        grid::FeasibilityGrid,
        level::{PowerLevel, TimeLevel},
        schedule::{Placement, Schedule},
    },
    prelude::*,
    quantity::{power::Kilowatts, time::Minutes},
};

#[derive(Builder)]
pub struct Solver<'a> {
    fleet: &'a Fleet,

    /// Span between the earliest allowed start and the hard deadline.
    time_budget: Minutes,

    /// Maximum cumulative power the facility may allocate, baseline included.
    power_cap: Kilowatts,

    /// Pre-existing facility load occupying the low end of the power axis.
    baseline: Kilowatts,
}

impl Solver<'_> {
    /// Find a warm-up schedule maximizing the number of fully-warmed units.
    ///
    /// The problem is a two-constraint 0/1 knapsack: each unit spends its warm-up
    /// duration out of the shared time budget and its power draw out of the shared
    /// power budget, and every unit counts for one. Time is deliberately *not*
    /// modeled as interval overlap — summing durations out of a shared budget is a
    /// known approximation inherited from the calibration tooling, not literal
    /// wall-clock feasibility.
    ///
    /// The [DP][1] state space:
    ///
    /// - Unit dimension: one stage per fleet unit, derived solely from the previous
    ///   stage, so each unit is considered at most once per cell.
    /// - Time dimension: each whole minute of the budget.
    /// - Power dimension: each whole kilowatt up to the cap.
    ///
    /// Ties between equally-sized selections resolve to the units appearing earliest
    /// in registry order, and the final scan picks the smallest power achieving the
    /// best count, so the result is deterministic for a fixed fleet order.
    ///
    /// "Zero units schedulable" is a valid outcome, not an error: once the grid is
    /// built, solving cannot fail.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Dynamic_programming
    #[instrument(skip_all)]
    pub fn solve(self) -> Result<Schedule, ScheduleError> {
        let baseline = PowerLevel::ceil_from(self.baseline);
        let power_cap = PowerLevel::floor_from(self.power_cap);
        if baseline > power_cap {
            return Err(ScheduleError::InvalidWindow {
                baseline: self.baseline,
                power_cap: self.power_cap,
            });
        }
        let time_budget = TimeLevel::floor_from(self.time_budget);

        let start_instant = Instant::now();
        let mut grid = FeasibilityGrid::try_new(self.fleet.len(), time_budget, power_cap, baseline)?;
        info!(?time_budget, ?power_cap, ?baseline, n_units = self.fleet.len(), "optimizing…");

        for (unit_index, unit) in self.fleet.units().iter().enumerate() {
            Self::fill_stage(&mut grid, unit_index + 1, unit);
        }

        let (best_count, best_power) = Self::best_cell(&grid, self.fleet.len(), baseline);
        let schedule = self.backtrack(&grid, best_count, best_power);
        info!(
            elapsed = ?start_instant.elapsed(),
            achieved_count = schedule.achieved_count,
            total_power = %schedule.total_power,
            "optimized",
        );
        Ok(schedule)
    }

    /// Compute one unit's stage from the previous stage.
    ///
    /// A cell either skips the unit (carrying the previous stage's count) or takes it
    /// (one more than the previous stage's count at the reduced budgets). A take must
    /// strictly improve on the skip, which is what keeps ties with the earlier units.
    fn fill_stage(grid: &mut FeasibilityGrid, stage: usize, unit: &Unit) {
        let warmup = unit.time_level();
        let draw = unit.power_level();
        let cells = (0..=grid.time_budget().0).cartesian_product(0..=grid.power_cap().0);
        for (time_level, power_level) in cells {
            let (time_level, power_level) = (TimeLevel(time_level), PowerLevel(power_level));
            let skipped = grid.get(stage - 1, time_level, power_level);
            let taken = (time_level >= warmup && power_level >= draw)
                .then(|| {
                    grid.get(
                        stage - 1,
                        TimeLevel(time_level.0 - warmup.0),
                        PowerLevel(power_level.0 - draw.0),
                    )
                })
                .flatten()
                .map(|count| count + 1);
            *grid.get_mut(stage, time_level, power_level) = match (skipped, taken) {
                (Some(skipped), Some(taken)) if taken > skipped => Some(taken),
                (None, taken @ Some(_)) => taken,
                (skipped, _) => skipped,
            };
        }
    }

    /// Scan the deadline row of the final stage for the best achievable count
    /// and the smallest power budget achieving it.
    fn best_cell(grid: &FeasibilityGrid, n_stages: usize, baseline: PowerLevel) -> (u16, PowerLevel) {
        let deadline = grid.time_budget();
        let mut best = (0, baseline);
        for power_level in baseline.0..=grid.power_cap().0 {
            if let Some(count) = grid.get(n_stages, deadline, PowerLevel(power_level))
                && count > best.0
            {
                best = (count, PowerLevel(power_level));
            }
        }
        best
    }

    /// Reconstruct the winning selection by walking the stages backwards.
    ///
    /// At each stage, the unit was taken if and only if skipping it cannot explain
    /// the cell's count. Start offsets are assigned just-in-time, walking back from
    /// the deadline, so every selected unit finishes warming exactly when the next
    /// one ends or the deadline hits; the output is then reversed to chronological
    /// order.
    fn backtrack(&self, grid: &FeasibilityGrid, best_count: u16, best_power: PowerLevel) -> Schedule {
        let mut selected = Vec::with_capacity(usize::from(best_count));
        let mut time_level = grid.time_budget();
        let mut power_level = best_power;
        let mut count = best_count;

        for (unit_index, unit) in self.fleet.units().iter().enumerate().rev() {
            if count == 0 {
                break;
            }
            let stage = unit_index + 1;
            debug_assert_eq!(grid.get(stage, time_level, power_level), Some(count));
            if grid.get(stage - 1, time_level, power_level) == Some(count) {
                continue;
            }
            time_level = TimeLevel(time_level.0 - unit.time_level().0);
            power_level = PowerLevel(power_level.0 - unit.power_level().0);
            count -= 1;
            debug_assert_eq!(grid.get(stage - 1, time_level, power_level), Some(count));
            selected.push(Placement { unit_id: unit.id, start_offset: time_level.to_minutes() });
        }
        debug_assert_eq!(count, 0);

        selected.reverse();
        Schedule {
            selected,
            achieved_count: usize::from(best_count),
            total_power: best_power.to_kilowatts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            fleet::{UnitId, UnitSpec},
            model::WarmupModel,
        },
        quantity::temperature::{Degrees, DegreesPerHour},
    };

    /// With a zero slope and a 60 °F/h intercept, the warm-up time in minutes equals
    /// the desired rise in degrees.
    fn fleet_with_durations(units: &[(u32, f64, f64)]) -> Fleet {
        let model = WarmupModel { slope: 0.0, intercept: DegreesPerHour(60.0) };
        let specs: Vec<UnitSpec> = units
            .iter()
            .map(|(id, power, minutes)| UnitSpec {
                id: UnitId(*id),
                power_draw: Kilowatts(*power),
                desired_rise: Degrees(*minutes),
            })
            .collect();
        Fleet::try_new(&specs, Degrees(20.0), &model).unwrap()
    }

    fn solve(
        fleet: &Fleet,
        time_budget: f64,
        power_cap: f64,
        baseline: f64,
    ) -> Result<Schedule, ScheduleError> {
        Solver::builder()
            .fleet(fleet)
            .time_budget(Minutes(time_budget))
            .power_cap(Kilowatts(power_cap))
            .baseline(Kilowatts(baseline))
            .build()
            .solve()
    }

    /// A and C fit together (6 kW, 25 minutes); any pair with B blows the time budget.
    #[test]
    fn picks_the_two_compatible_units() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0), (2, 6.0, 20.0), (3, 3.0, 15.0)]);
        let schedule = solve(&fleet, 25.0, 9.0, 0.0).unwrap();
        assert_eq!(schedule.achieved_count, 2);
        assert_eq!(schedule.total_power, Kilowatts(6.0));
        let ids: Vec<UnitId> = schedule.selected.iter().map(|p| p.unit_id).collect();
        assert_eq!(ids, [UnitId(1), UnitId(3)]);
    }

    #[test]
    fn start_offsets_are_chronological_and_within_budget() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0), (2, 6.0, 20.0), (3, 3.0, 15.0)]);
        let schedule = solve(&fleet, 25.0, 9.0, 0.0).unwrap();
        assert_eq!(schedule.selected[0].start_offset, Minutes(0.0));
        assert_eq!(schedule.selected[1].start_offset, Minutes(10.0));
    }

    #[test]
    fn unit_exceeding_the_time_budget_is_left_out() {
        let fleet = fleet_with_durations(&[(1, 3.0, 90.0)]);
        let schedule = solve(&fleet, 60.0, 9.0, 0.0).unwrap();
        assert_eq!(schedule.achieved_count, 0);
        assert!(schedule.selected.is_empty());
    }

    #[test]
    fn power_cap_below_the_smallest_draw_schedules_nothing() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0), (2, 6.0, 15.0)]);
        let schedule = solve(&fleet, 120.0, 2.0, 0.0).unwrap();
        assert_eq!(schedule.achieved_count, 0);
        assert!(schedule.selected.is_empty());
    }

    /// The baseline occupies the low end of the power axis and is included
    /// in the reported total.
    #[test]
    fn baseline_load_reduces_the_headroom() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0), (2, 3.0, 10.0), (3, 3.0, 10.0)]);
        let schedule = solve(&fleet, 120.0, 9.0, 3.0).unwrap();
        assert_eq!(schedule.achieved_count, 2);
        assert_eq!(schedule.total_power, Kilowatts(9.0));
    }

    #[test]
    fn achieved_count_never_exceeds_the_fleet_size() {
        let fleet = fleet_with_durations(&[(1, 1.0, 1.0), (2, 1.0, 1.0)]);
        let schedule = solve(&fleet, 1000.0, 1000.0, 0.0).unwrap();
        assert_eq!(schedule.achieved_count, 2);
    }

    /// Growing either budget can only help.
    #[test]
    fn optimum_is_monotone_in_both_budgets() {
        let fleet = fleet_with_durations(&[
            (1, 3.0, 10.0),
            (2, 6.0, 20.0),
            (3, 3.0, 15.0),
            (4, 6.0, 5.0),
        ]);
        let mut previous = 0;
        for power_cap in [3.0, 6.0, 9.0, 12.0, 18.0] {
            let count = solve(&fleet, 30.0, power_cap, 0.0).unwrap().achieved_count;
            assert!(count >= previous);
            previous = count;
        }
        let mut previous = 0;
        for time_budget in [5.0, 15.0, 30.0, 50.0] {
            let count = solve(&fleet, time_budget, 18.0, 0.0).unwrap().achieved_count;
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn re_solving_is_idempotent() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0), (2, 6.0, 20.0), (3, 3.0, 15.0)]);
        let first = solve(&fleet, 25.0, 9.0, 0.0).unwrap();
        let second = solve(&fleet, 25.0, 9.0, 0.0).unwrap();
        assert_eq!(first.achieved_count, second.achieved_count);
        assert_eq!(first.total_power, second.total_power);
    }

    /// Summed durations of the selection must fit the budget even when many
    /// selections tie: this is the semantics the grid is built on.
    #[test]
    fn selected_durations_fit_the_budget() {
        let fleet = fleet_with_durations(&[
            (1, 2.0, 13.0),
            (2, 2.0, 11.0),
            (3, 2.0, 7.0),
            (4, 2.0, 19.0),
            (5, 2.0, 5.0),
        ]);
        let schedule = solve(&fleet, 31.0, 6.0, 0.0).unwrap();
        let total_minutes: f64 = schedule
            .selected
            .iter()
            .map(|placement| {
                let unit = fleet
                    .units()
                    .iter()
                    .find(|unit| unit.id == placement.unit_id)
                    .unwrap();
                unit.time_level().to_minutes().0
            })
            .sum();
        assert!(total_minutes <= 31.0);
        assert_eq!(schedule.achieved_count, 3);
    }

    #[test]
    fn baseline_above_the_cap_fails() {
        let fleet = fleet_with_durations(&[(1, 3.0, 10.0)]);
        let error = solve(&fleet, 25.0, 9.0, 10.0).unwrap_err();
        assert!(matches!(error, ScheduleError::InvalidWindow { .. }));
    }
}
