//! Double-booking detection.
//!
//! Detection is advisory and read-only: it reports the overlap and the
//! double-booked members, and the caller decides whether to refuse the
//! write or force it through.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::block::{Block, minute_of_day, time_ranges_overlap};
use crate::error::ScheduleResult;
use crate::schedule::Schedule;

/// Two blocks sharing at least one member with overlapping time ranges
/// on the same date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The block already in the agenda.
    pub block_id: String,
    /// The candidate (or later-listed) block.
    pub other_block_id: String,
    pub date: NaiveDate,
    pub member_ids: Vec<String>,
    /// Display names of the double-booked members.
    pub member_names: Vec<String>,
}

/// Would committing `candidate` double-book any member?
///
/// Existing blocks are scanned in list order and the first overlap wins.
/// The candidate's own id is skipped so an in-place edit can be
/// re-checked against the rest of the agenda. Boundaries are half-open:
/// a block ending 11:00 does not conflict with one starting 11:00.
pub fn detect_conflict(candidate: &Block, schedule: &Schedule) -> ScheduleResult<Option<Conflict>> {
    let c_start = minute_of_day(&candidate.start)?;
    let c_end = minute_of_day(&candidate.end)?;

    for existing in &schedule.blocks {
        if existing.id == candidate.id || existing.date != candidate.date {
            continue;
        }

        let shared = candidate.shared_members(existing);
        if shared.is_empty() {
            continue;
        }

        let e_start = minute_of_day(&existing.start)?;
        let e_end = minute_of_day(&existing.end)?;

        if time_ranges_overlap(c_start, c_end, e_start, e_end) {
            let member_names = shared
                .iter()
                .map(|id| schedule.member_name(id).unwrap_or(id).to_string())
                .collect();

            return Ok(Some(Conflict {
                block_id: existing.id.clone(),
                other_block_id: candidate.id.clone(),
                date: candidate.date,
                member_ids: shared,
                member_names,
            }));
        }
    }

    Ok(None)
}

/// Run the single-block detector against every block in the agenda,
/// collapsing symmetric pairs (A-vs-B and B-vs-A) into one entry.
///
/// Pairs are normalized so `block_id` is the earlier-listed block.
/// Quadratic in block count, which is fine at agenda scale (tens to low
/// hundreds of blocks).
pub fn detect_all_conflicts(schedule: &Schedule) -> ScheduleResult<Vec<Conflict>> {
    let position: std::collections::HashMap<&str, usize> = schedule
        .blocks
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.as_str(), i))
        .collect();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut conflicts = Vec::new();

    for candidate in &schedule.blocks {
        let Some(mut conflict) = detect_conflict(candidate, schedule)? else {
            continue;
        };

        if position[conflict.block_id.as_str()] > position[conflict.other_block_id.as_str()] {
            std::mem::swap(&mut conflict.block_id, &mut conflict.other_block_id);
        }

        let key = (conflict.block_id.clone(), conflict.other_block_id.clone());
        if seen.insert(key) {
            conflicts.push(conflict);
        }
    }

    Ok(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;
    use crate::schedule::TimeSlotDisplay;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schedule_with(members: &[(&str, &str)], blocks: Vec<Block>) -> Schedule {
        let mut schedule = Schedule::new("Team", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        schedule.members = members
            .iter()
            .map(|(id, name)| Member {
                id: id.to_string(),
                name: name.to_string(),
                color: Member::color_for(0).to_string(),
            })
            .collect();
        schedule.blocks = blocks;
        schedule
    }

    fn block(id: &str, members: &[&str], day: &str, start: &str, end: &str) -> Block {
        let mut b = Block::new(
            members.iter().map(|m| m.to_string()).collect(),
            date(day),
            start,
            end,
        );
        b.id = id.to_string();
        b
    }

    #[test]
    fn test_overlapping_shared_member_conflicts() {
        let schedule = schedule_with(
            &[("m1", "Alice")],
            vec![block("a", &["m1"], "2025-01-06", "09:00", "10:00")],
        );
        let candidate = block("b", &["m1"], "2025-01-06", "09:30", "10:30");

        let conflict = detect_conflict(&candidate, &schedule).unwrap().unwrap();
        assert_eq!(conflict.block_id, "a");
        assert_eq!(conflict.other_block_id, "b");
        assert_eq!(conflict.member_names, vec!["Alice".to_string()]);
    }

    #[test]
    fn test_touching_blocks_do_not_conflict() {
        let schedule = schedule_with(
            &[("m1", "Alice")],
            vec![block("a", &["m1"], "2025-01-06", "09:00", "10:00")],
        );
        let candidate = block("c", &["m1"], "2025-01-06", "10:00", "11:00");

        assert!(detect_conflict(&candidate, &schedule).unwrap().is_none());
    }

    #[test]
    fn test_disjoint_members_do_not_conflict() {
        let schedule = schedule_with(
            &[("m1", "Alice"), ("m2", "Bob")],
            vec![block("a", &["m1"], "2025-01-06", "09:00", "10:00")],
        );
        let candidate = block("b", &["m2"], "2025-01-06", "09:00", "10:00");

        assert!(detect_conflict(&candidate, &schedule).unwrap().is_none());
    }

    #[test]
    fn test_other_dates_do_not_conflict() {
        let schedule = schedule_with(
            &[("m1", "Alice")],
            vec![block("a", &["m1"], "2025-01-06", "09:00", "10:00")],
        );
        let candidate = block("b", &["m1"], "2025-01-07", "09:00", "10:00");

        assert!(detect_conflict(&candidate, &schedule).unwrap().is_none());
    }

    #[test]
    fn test_edit_does_not_conflict_with_itself() {
        let schedule = schedule_with(
            &[("m1", "Alice")],
            vec![block("a", &["m1"], "2025-01-06", "09:00", "10:00")],
        );
        // Same id: an edit of block "a" shifted by 15 minutes
        let edited = block("a", &["m1"], "2025-01-06", "09:15", "10:15");

        assert!(detect_conflict(&edited, &schedule).unwrap().is_none());
    }

    #[test]
    fn test_detection_is_symmetric() {
        let x = block("x", &["m1"], "2025-01-06", "09:00", "10:00");
        let y = block("y", &["m1"], "2025-01-06", "09:30", "10:30");

        let with_x = schedule_with(&[("m1", "Alice")], vec![x.clone()]);
        let with_y = schedule_with(&[("m1", "Alice")], vec![y.clone()]);

        assert!(detect_conflict(&y, &with_x).unwrap().is_some());
        assert!(detect_conflict(&x, &with_y).unwrap().is_some());
    }

    #[test]
    fn test_shared_subset_is_reported() {
        let schedule = schedule_with(
            &[("m1", "Alice"), ("m2", "Bob"), ("m3", "Cleo")],
            vec![block("a", &["m1", "m2"], "2025-01-06", "09:00", "10:00")],
        );
        let candidate = block("b", &["m2", "m3"], "2025-01-06", "09:30", "11:00");

        let conflict = detect_conflict(&candidate, &schedule).unwrap().unwrap();
        assert_eq!(conflict.member_ids, vec!["m2".to_string()]);
        assert_eq!(conflict.member_names, vec!["Bob".to_string()]);
    }

    #[test]
    fn test_all_conflicts_dedupes_symmetric_pairs() {
        let schedule = schedule_with(
            &[("m1", "Alice"), ("m2", "Bob")],
            vec![
                block("a", &["m1"], "2025-01-06", "09:00", "10:00"),
                block("b", &["m1"], "2025-01-06", "09:30", "10:30"),
                block("c", &["m2"], "2025-01-06", "09:00", "10:00"),
            ],
        );

        let conflicts = detect_all_conflicts(&schedule).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].block_id, "a");
        assert_eq!(conflicts[0].other_block_id, "b");
    }

    #[test]
    fn test_all_conflicts_empty_when_clean() {
        let schedule = schedule_with(
            &[("m1", "Alice")],
            vec![
                block("a", &["m1"], "2025-01-06", "09:00", "10:00"),
                block("b", &["m1"], "2025-01-06", "10:00", "11:00"),
            ],
        );

        assert!(detect_all_conflicts(&schedule).unwrap().is_empty());
    }
}
