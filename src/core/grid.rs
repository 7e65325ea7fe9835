use crate::core::{
    error::ScheduleError,
    level::{PowerLevel, TimeLevel},
};

/// Upper bound on the grid size, checked before any fill work is done.
pub const MAX_CELLS: usize = 1 << 26;

/// Dynamic-programming table of the two-resource selection problem.
///
/// A cell `(stage, t, p)` holds the maximum count of units, among the first `stage`
/// units of the fleet, feasibly scheduled using at most `t` minutes of cumulative
/// warm-up time and at most `p` kilowatts of cumulative power. [`None`] marks an
/// unreachable state: every cell below the baseline load is unreachable, since the
/// baseline occupies the low end of the power axis before any unit is scheduled.
///
/// The stage axis is what makes backtracking exact: stage `i` is derived solely from
/// stage `i - 1`, so each unit is considered at most once (0/1 semantics) and a
/// difference between adjacent stages at a cell identifies the unit contributing to
/// that cell's optimum. Within a stage, cell values are monotonically non-decreasing
/// in both `t` and `p`.
///
/// Derived and discardable: the grid holds no external resources and is dropped after
/// backtracking.
#[must_use]
#[derive(Debug)]
pub struct FeasibilityGrid {
    /// Unit-stage dimension size: number of units plus the empty seed stage.
    n_stages: usize,

    /// Time dimension size: the budget in minutes, inclusive.
    n_time_levels: usize,

    /// Power dimension size: the cap in kilowatts, inclusive.
    n_power_levels: usize,

    /// Flattened 3D array of cells to speed up the lookups.
    flat_matrix: Vec<Option<u16>>,
}

impl FeasibilityGrid {
    /// Allocate the grid and seed the empty stage.
    ///
    /// Fails with [`ScheduleError::GridTooLarge`] when the cross product of the
    /// budgets exceeds [`MAX_CELLS`]; the check runs before a single cell is
    /// allocated.
    pub fn try_new(
        n_units: usize,
        time_budget: TimeLevel,
        power_cap: PowerLevel,
        baseline: PowerLevel,
    ) -> Result<Self, ScheduleError> {
        let n_stages = n_units + 1;
        let n_time_levels = time_budget.0 + 1;
        let n_power_levels = power_cap.0 + 1;
        let n_cells = n_stages
            .checked_mul(n_time_levels)
            .and_then(|cells| cells.checked_mul(n_power_levels))
            .filter(|n_cells| *n_cells <= MAX_CELLS)
            .ok_or(ScheduleError::GridTooLarge {
                n_cells: n_stages.saturating_mul(n_time_levels).saturating_mul(n_power_levels),
                max_cells: MAX_CELLS,
            })?;

        let mut grid =
            Self { n_stages, n_time_levels, n_power_levels, flat_matrix: vec![None; n_cells] };
        // Seed: with no units considered, a count of zero is achievable within any
        // budget that already accommodates the baseline load.
        for time_level in 0..n_time_levels {
            for power_level in baseline.0..n_power_levels {
                *grid.get_mut(0, TimeLevel(time_level), PowerLevel(power_level)) = Some(0);
            }
        }
        Ok(grid)
    }

    /// Get the best feasible count at the given stage and budgets.
    pub fn get(&self, stage: usize, time_level: TimeLevel, power_level: PowerLevel) -> Option<u16> {
        self.flat_matrix[self.flat_index(stage, time_level, power_level)]
    }

    /// Get the mutable cell at the given stage and budgets.
    pub fn get_mut(
        &mut self,
        stage: usize,
        time_level: TimeLevel,
        power_level: PowerLevel,
    ) -> &mut Option<u16> {
        let flat_index = self.flat_index(stage, time_level, power_level);
        &mut self.flat_matrix[flat_index]
    }

    pub const fn time_budget(&self) -> TimeLevel {
        TimeLevel(self.n_time_levels - 1)
    }

    pub const fn power_cap(&self) -> PowerLevel {
        PowerLevel(self.n_power_levels - 1)
    }

    /// Convert the indices into the respective index in the flattened array.
    #[must_use]
    fn flat_index(&self, stage: usize, time_level: TimeLevel, power_level: PowerLevel) -> usize {
        debug_assert!(stage < self.n_stages, "stage is out of bounds ({stage})");
        debug_assert!(time_level.0 < self.n_time_levels, "time level is out of bounds");
        debug_assert!(power_level.0 < self.n_power_levels, "power level is out of bounds");
        (stage * self.n_time_levels + time_level.0) * self.n_power_levels + power_level.0
    }
}
