//! Grid strategies over one (agenda, week) pair.
//!
//! The same block set renders as a precise-hours week matrix, a
//! fixed-periods matrix, a month overview, or a single-day timeline.
//! [`compose`] is the one dispatch point that picks the strategy, so a
//! new variant is a compile-time-checked change.

use chrono::{Datelike, NaiveDate};

use crate::block::Block;
use crate::dates::{DayInfo, month_grid, week_days};
use crate::error::{ScheduleError, ScheduleResult};
use crate::index::{index_by_member_and_date, index_by_member_date_and_period};
use crate::member::Member;
use crate::schedule::{FixedPeriod, Schedule, TimeSlotDisplay, UseCase};

/// Maximum member-color swatches shown per month cell before collapsing
/// the remainder to a "+N" count.
pub const MAX_SWATCHES: usize = 5;

/// Day timeline bounds and row geometry.
pub const DAY_START_HOUR: u32 = 7;
pub const DAY_END_HOUR: u32 = 20;
pub const HOUR_ROW_HEIGHT_PX: f32 = 60.0;

/// Which view the frontend asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Week,
    Month,
    Day(NaiveDate),
}

/// One composed grid, borrowing the agenda it was built from.
#[derive(Debug)]
pub enum GridView<'a> {
    Week(WeekGrid<'a>),
    Periods(PeriodGrid<'a>),
    Month(MonthGrid),
    Day(DayTimeline<'a>),
}

/// Member x day matrix with literal start-end blocks per cell.
#[derive(Debug)]
pub struct WeekGrid<'a> {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<MemberRow<'a>>,
}

#[derive(Debug)]
pub struct MemberRow<'a> {
    pub member: &'a Member,
    /// One cell per entry in `days`, blocks sorted by start time.
    pub cells: Vec<Vec<&'a Block>>,
}

/// Member x day matrix, each day subdivided into the agenda's periods.
#[derive(Debug)]
pub struct PeriodGrid<'a> {
    pub days: Vec<NaiveDate>,
    pub periods: Vec<&'a FixedPeriod>,
    pub rows: Vec<PeriodRow<'a>>,
}

#[derive(Debug)]
pub struct PeriodRow<'a> {
    pub member: &'a Member,
    /// `cells[day][period]`
    pub cells: Vec<Vec<Vec<&'a Block>>>,
}

/// Six-week overview; each cell aggregates all blocks on that date
/// across all members.
#[derive(Debug)]
pub struct MonthGrid {
    pub cells: Vec<MonthCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub day: DayInfo,
    pub block_count: usize,
    /// Colors of the first distinct members on this date, at most
    /// [`MAX_SWATCHES`].
    pub swatches: Vec<String>,
    /// Distinct members beyond the swatch cap.
    pub overflow: usize,
}

/// Hour-row timeline for a single day, 07:00 to 20:00.
#[derive(Debug)]
pub struct DayTimeline<'a> {
    pub date: NaiveDate,
    pub hours: Vec<HourRow<'a>>,
}

#[derive(Debug)]
pub struct HourRow<'a> {
    pub hour: u32,
    pub blocks: Vec<PositionedBlock<'a>>,
}

/// A block positioned inside its starting hour row by proportional
/// pixel offset and height.
#[derive(Debug)]
pub struct PositionedBlock<'a> {
    pub block: &'a Block,
    pub offset_px: f32,
    pub height_px: f32,
}

/// Pick and build the grid strategy for `mode` on this agenda.
///
/// Fixed-period agendas always get the period layout in week view, and
/// rotation agendas keep it too as long as they define periods.
pub fn compose<'a>(
    schedule: &'a Schedule,
    mode: ViewMode,
    today: NaiveDate,
) -> ScheduleResult<GridView<'a>> {
    match mode {
        ViewMode::Week => {
            let rotation_layout = schedule.use_case == UseCase::Rotation
                && !schedule.fixed_periods.is_empty();
            if schedule.time_slot_display == TimeSlotDisplay::FixedPeriods || rotation_layout {
                Ok(GridView::Periods(period_grid(schedule)?))
            } else {
                Ok(GridView::Week(week_grid(schedule)))
            }
        }
        ViewMode::Month => Ok(GridView::Month(month_view(schedule, today))),
        ViewMode::Day(date) => Ok(GridView::Day(day_timeline(schedule, date)?)),
    }
}

/// Days of the displayed week, filtered to the agenda's active days.
fn active_week_days(schedule: &Schedule) -> Vec<NaiveDate> {
    week_days(schedule.current_week_start)
        .into_iter()
        .filter(|d| {
            let day_index = d.weekday().num_days_from_monday() as u8;
            schedule.active_days.contains(&day_index)
        })
        .collect()
}

fn week_grid(schedule: &Schedule) -> WeekGrid<'_> {
    let days = active_week_days(schedule);
    let index = index_by_member_and_date(&schedule.blocks);

    let rows = schedule
        .members
        .iter()
        .map(|member| {
            let cells = days
                .iter()
                .map(|day| {
                    let mut cell = index
                        .get(&(member.id.clone(), *day))
                        .cloned()
                        .unwrap_or_default();
                    cell.sort_by(|a, b| a.start.cmp(&b.start));
                    cell
                })
                .collect();
            MemberRow { member, cells }
        })
        .collect();

    WeekGrid { days, rows }
}

fn period_grid(schedule: &Schedule) -> ScheduleResult<PeriodGrid<'_>> {
    let Some(fallback) = schedule.fallback_period() else {
        return Err(ScheduleError::MissingPeriods(schedule.name.clone()));
    };

    let days = active_week_days(schedule);
    let periods: Vec<&FixedPeriod> = schedule.fixed_periods.iter().collect();
    let index = index_by_member_date_and_period(&schedule.blocks, &fallback.id);

    let rows = schedule
        .members
        .iter()
        .map(|member| {
            let cells = days
                .iter()
                .map(|day| {
                    periods
                        .iter()
                        .map(|period| {
                            index
                                .get(&(member.id.clone(), *day, period.id.clone()))
                                .cloned()
                                .unwrap_or_default()
                        })
                        .collect()
                })
                .collect();
            PeriodRow { member, cells }
        })
        .collect();

    Ok(PeriodGrid {
        days,
        periods,
        rows,
    })
}

fn month_view(schedule: &Schedule, today: NaiveDate) -> MonthGrid {
    let cells = month_grid(schedule.current_week_start, today)
        .into_iter()
        .map(|day| {
            let blocks: Vec<&Block> = schedule
                .blocks
                .iter()
                .filter(|b| b.date == day.date)
                .collect();

            // Distinct members in block-list order
            let mut member_ids: Vec<&str> = Vec::new();
            for block in &blocks {
                for id in &block.member_ids {
                    if !member_ids.contains(&id.as_str()) {
                        member_ids.push(id);
                    }
                }
            }

            let swatches = member_ids
                .iter()
                .take(MAX_SWATCHES)
                .filter_map(|id| schedule.member(id).map(|m| m.color.clone()))
                .collect();
            let overflow = member_ids.len().saturating_sub(MAX_SWATCHES);

            MonthCell {
                day,
                block_count: blocks.len(),
                swatches,
                overflow,
            }
        })
        .collect();

    MonthGrid { cells }
}

fn day_timeline(schedule: &Schedule, date: NaiveDate) -> ScheduleResult<DayTimeline<'_>> {
    let mut hours: Vec<HourRow> = (DAY_START_HOUR..DAY_END_HOUR)
        .map(|hour| HourRow {
            hour,
            blocks: Vec::new(),
        })
        .collect();

    for block in schedule.blocks.iter().filter(|b| b.date == date) {
        let start = block.start_minutes()?;
        let end = block.end_minutes()?;

        let hour = start / 60;
        if !(DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
            continue;
        }

        let offset_px = (start % 60) as f32 / 60.0 * HOUR_ROW_HEIGHT_PX;
        let height_px = (end - start) as f32 / 60.0 * HOUR_ROW_HEIGHT_PX;

        hours[(hour - DAY_START_HOUR) as usize].blocks.push(PositionedBlock {
            block,
            offset_px,
            height_px,
        });
    }

    for row in &mut hours {
        row.blocks.sort_by(|a, b| a.block.start.cmp(&b.block.start));
    }

    Ok(DayTimeline { date, hours })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::PlanLimits;
    use crate::store::ScheduleStore;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn team_schedule() -> Schedule {
        let base = Schedule::new("Team", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        let mut store = ScheduleStore::new(base, PlanLimits::UNLIMITED);
        let alice = store.add_member("Alice").unwrap();
        let bob = store.add_member("Bob").unwrap();

        store
            .add_block(Block::new(
                vec![alice.id.clone()],
                date("2025-01-06"),
                "09:00",
                "10:00",
            ))
            .unwrap();
        store
            .add_block(Block::new(
                vec![alice.id, bob.id],
                date("2025-01-07"),
                "13:30",
                "15:00",
            ))
            .unwrap();

        store.into_schedule()
    }

    #[test]
    fn test_week_view_dispatches_by_display_and_use_case() {
        let mut schedule = team_schedule();
        let today = date("2025-01-06");

        assert!(matches!(
            compose(&schedule, ViewMode::Week, today).unwrap(),
            GridView::Week(_)
        ));

        schedule.time_slot_display = TimeSlotDisplay::FixedPeriods;
        schedule.fixed_periods = Schedule::default_periods();
        assert!(matches!(
            compose(&schedule, ViewMode::Week, today).unwrap(),
            GridView::Periods(_)
        ));

        schedule.time_slot_display = TimeSlotDisplay::PreciseHours;
        schedule.use_case = UseCase::Rotation;
        assert!(matches!(
            compose(&schedule, ViewMode::Week, today).unwrap(),
            GridView::Periods(_)
        ));

        assert!(matches!(
            compose(&schedule, ViewMode::Month, today).unwrap(),
            GridView::Month(_)
        ));
        assert!(matches!(
            compose(&schedule, ViewMode::Day(today), today).unwrap(),
            GridView::Day(_)
        ));
    }

    #[test]
    fn test_week_grid_cells_follow_active_days() {
        let mut schedule = team_schedule();
        schedule.active_days = vec![0, 1, 2, 3, 4]; // weekdays only

        let GridView::Week(grid) = compose(&schedule, ViewMode::Week, date("2025-01-06")).unwrap()
        else {
            panic!("expected week grid");
        };

        assert_eq!(grid.days.len(), 5);
        assert_eq!(grid.rows.len(), 2);
        for row in &grid.rows {
            assert_eq!(row.cells.len(), 5);
        }

        // Alice's Monday block lands in her first cell
        let alice_monday = &grid.rows[0].cells[0];
        assert_eq!(alice_monday.len(), 1);
        assert_eq!(alice_monday[0].start, "09:00");

        // The shared Tuesday block shows for both members
        assert_eq!(grid.rows[0].cells[1].len(), 1);
        assert_eq!(grid.rows[1].cells[1].len(), 1);
    }

    #[test]
    fn test_period_grid_uses_fallback_for_untagged_blocks() {
        let mut schedule = team_schedule();
        schedule.time_slot_display = TimeSlotDisplay::FixedPeriods;
        schedule.fixed_periods = Schedule::default_periods();

        let GridView::Periods(grid) =
            compose(&schedule, ViewMode::Week, date("2025-01-06")).unwrap()
        else {
            panic!("expected period grid");
        };

        assert_eq!(grid.periods.len(), 3);
        // Untagged blocks land in the first (fallback) period column
        let alice_monday = &grid.rows[0].cells[0];
        assert_eq!(alice_monday[0].len(), 1);
        assert!(alice_monday[1].is_empty());
    }

    #[test]
    fn test_month_cells_aggregate_counts_and_swatches() {
        let schedule = team_schedule();
        let GridView::Month(grid) =
            compose(&schedule, ViewMode::Month, date("2025-01-06")).unwrap()
        else {
            panic!("expected month grid");
        };

        assert_eq!(grid.cells.len(), 42);

        let tuesday = grid
            .cells
            .iter()
            .find(|c| c.day.date == date("2025-01-07"))
            .unwrap();
        assert_eq!(tuesday.block_count, 1);
        assert_eq!(tuesday.swatches.len(), 2);
        assert_eq!(tuesday.overflow, 0);

        let empty = grid
            .cells
            .iter()
            .find(|c| c.day.date == date("2025-01-09"))
            .unwrap();
        assert_eq!(empty.block_count, 0);
        assert!(empty.swatches.is_empty());
    }

    #[test]
    fn test_month_cell_swatch_overflow() {
        let base = Schedule::new("Big", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        let mut store = ScheduleStore::new(base, PlanLimits::UNLIMITED);
        let ids: Vec<String> = (0..7)
            .map(|i| store.add_member(&format!("M{}", i)).unwrap().id)
            .collect();
        store
            .add_block(Block::new(ids, date("2025-01-06"), "09:00", "10:00"))
            .unwrap();
        let schedule = store.into_schedule();

        let GridView::Month(grid) =
            compose(&schedule, ViewMode::Month, date("2025-01-06")).unwrap()
        else {
            panic!("expected month grid");
        };

        let monday = grid
            .cells
            .iter()
            .find(|c| c.day.date == date("2025-01-06"))
            .unwrap();
        assert_eq!(monday.swatches.len(), MAX_SWATCHES);
        assert_eq!(monday.overflow, 2);
    }

    #[test]
    fn test_day_timeline_positions_blocks_proportionally() {
        let schedule = team_schedule();
        let GridView::Day(timeline) = compose(
            &schedule,
            ViewMode::Day(date("2025-01-07")),
            date("2025-01-06"),
        )
        .unwrap() else {
            panic!("expected day timeline");
        };

        assert_eq!(timeline.hours.len(), (DAY_END_HOUR - DAY_START_HOUR) as usize);
        assert_eq!(timeline.hours[0].hour, DAY_START_HOUR);

        // The 13:30-15:00 block sits halfway down the 13:00 row, 1.5 rows tall
        let row = timeline.hours.iter().find(|r| r.hour == 13).unwrap();
        assert_eq!(row.blocks.len(), 1);
        let positioned = &row.blocks[0];
        assert!((positioned.offset_px - 30.0).abs() < f32::EPSILON);
        assert!((positioned.height_px - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_day_timeline_skips_out_of_range_blocks() {
        let base = Schedule::new("Night", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        let mut store = ScheduleStore::new(base, PlanLimits::UNLIMITED);
        let m = store.add_member("Nia").unwrap();
        store
            .add_block(Block::new(
                vec![m.id.clone()],
                date("2025-01-06"),
                "05:00",
                "06:00",
            ))
            .unwrap();
        store
            .add_block(Block::new(vec![m.id], date("2025-01-06"), "21:00", "22:00"))
            .unwrap();
        let schedule = store.into_schedule();

        let GridView::Day(timeline) = compose(
            &schedule,
            ViewMode::Day(date("2025-01-06")),
            date("2025-01-06"),
        )
        .unwrap() else {
            panic!("expected day timeline");
        };

        assert!(timeline.hours.iter().all(|r| r.blocks.is_empty()));
    }
}
