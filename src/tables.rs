use average::Mean;
use chrono::{NaiveTime, TimeDelta};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    config::WindowConfig,
    core::{
        fleet::Fleet,
        schedule::{Placement, Schedule},
    },
    quantity::power::Kilowatts,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

#[expect(clippy::cast_possible_truncation)]
fn clock_time(start: NaiveTime, offset_minutes: f64) -> NaiveTime {
    start + TimeDelta::minutes(offset_minutes as i64)
}

pub fn build_schedule_table(schedule: &Schedule, fleet: &Fleet, window: &WindowConfig) -> Table {
    let mean_power: Kilowatts = {
        let estimate: Mean =
            fleet.units().iter().map(|unit| unit.power_draw.0).collect();
        if estimate.is_empty() { Kilowatts::ZERO } else { Kilowatts(estimate.mean()) }
    };

    let mut table = new_table();
    table.set_header(vec!["Unit", "Power", "Rise", "Warm-up", "Start", "Ready"]);
    for Placement { unit_id, start_offset } in &schedule.selected {
        // The placement came out of the grid, so the unit is guaranteed to exist:
        let Some(unit) = fleet.units().iter().find(|unit| unit.id == *unit_id) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(unit.id),
            Cell::new(unit.power_draw).set_alignment(CellAlignment::Right).fg(
                if unit.power_draw > mean_power { Color::Red } else { Color::Green },
            ),
            Cell::new(unit.desired_rise).set_alignment(CellAlignment::Right),
            Cell::new(unit.warmup_time).set_alignment(CellAlignment::Right),
            Cell::new(clock_time(window.earliest_start, start_offset.0).format("%H:%M")),
            Cell::new(
                clock_time(window.earliest_start, start_offset.0 + unit.time_level().to_minutes().0)
                    .format("%H:%M"),
            )
            .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_summary_table(schedule: &Schedule, fleet: &Fleet, window: &WindowConfig) -> Table {
    let headroom = window.power_cap - schedule.total_power;
    let mut table = new_table();
    table
        .set_header(vec!["Scheduled", "Fleet", "Total power", "Power cap", "Headroom"])
        .add_row(vec![
            Cell::new(schedule.achieved_count).add_attribute(Attribute::Bold),
            Cell::new(fleet.len()),
            Cell::new(schedule.total_power).set_alignment(CellAlignment::Right),
            Cell::new(window.power_cap).set_alignment(CellAlignment::Right),
            Cell::new(headroom).set_alignment(CellAlignment::Right).fg(
                if headroom >= Kilowatts::ZERO { Color::Green } else { Color::Red },
            ),
        ]);
    table
}
