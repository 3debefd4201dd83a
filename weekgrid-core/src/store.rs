//! The single writer of agenda state during an editing session.
//!
//! Every mutation rebuilds the affected collections into a fresh
//! `Schedule` value and swaps it in wholesale, so a snapshot handed to a
//! renderer never observes a half-applied write. Conflict checking does
//! not happen here: the store is mechanism, the caller is policy and is
//! expected to have consulted the detector (and the user) first.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::block::Block;
use crate::dates::monday_of;
use crate::error::{ScheduleError, ScheduleResult};
use crate::limits::PlanLimits;
use crate::member::Member;
use crate::schedule::Schedule;

/// Partial update for a block; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct BlockPatch {
    pub member_ids: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub label: Option<String>,
    pub period: Option<String>,
}

pub struct ScheduleStore {
    schedule: Schedule,
    limits: PlanLimits,
}

impl ScheduleStore {
    pub fn new(schedule: Schedule, limits: PlanLimits) -> Self {
        ScheduleStore { schedule, limits }
    }

    /// The current state, for reading and indexing.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// An owned copy for renderers or persistence.
    pub fn snapshot(&self) -> Schedule {
        self.schedule.clone()
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Whether the plan's member cap still has room.
    pub fn can_add_member(&self) -> bool {
        self.limits.can_add_member(self.schedule.members.len())
    }

    /// Append a member with a generated id and the next palette color.
    /// Returns `None` when the member cap is already reached.
    pub fn add_member(&mut self, name: &str) -> Option<Member> {
        if !self.can_add_member() {
            return None;
        }

        let member = Member::new(name, Member::color_for(self.schedule.members.len()));

        let mut next = self.schedule.clone();
        next.members.push(member.clone());
        self.schedule = next;

        Some(member)
    }

    /// Merge a new name and/or color into a member. No-op on unknown ids.
    pub fn update_member(&mut self, id: &str, name: Option<&str>, color: Option<&str>) {
        let mut next = self.schedule.clone();

        for member in next.members.iter_mut().filter(|m| m.id == id) {
            if let Some(name) = name {
                member.name = name.to_string();
            }
            if let Some(color) = color {
                member.color = color.to_string();
            }
        }

        self.schedule = next;
    }

    /// Remove a member and detach it from every block. Blocks whose
    /// member list becomes empty are deleted entirely; no orphans stay
    /// behind.
    pub fn remove_member(&mut self, id: &str) {
        let mut next = self.schedule.clone();

        next.members.retain(|m| m.id != id);
        next.blocks = next
            .blocks
            .into_iter()
            .filter_map(|mut block| {
                block.member_ids.retain(|m| m != id);
                if block.member_ids.is_empty() {
                    None
                } else {
                    Some(block)
                }
            })
            .collect();

        self.schedule = next;
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Add a block after checking its invariants and member references.
    pub fn add_block(&mut self, block: Block) -> ScheduleResult<String> {
        self.check_block(&block)?;

        let id = block.id.clone();
        let mut next = self.schedule.clone();
        next.blocks.push(block);
        self.schedule = next;

        Ok(id)
    }

    /// Merge a patch into a block. No-op on unknown ids; the merged
    /// result must still satisfy the block invariants.
    pub fn update_block(&mut self, id: &str, patch: BlockPatch) -> ScheduleResult<()> {
        let Some(current) = self.schedule.block(id) else {
            return Ok(());
        };

        let mut updated = current.clone();
        if let Some(member_ids) = patch.member_ids {
            updated.member_ids = member_ids;
        }
        if let Some(date) = patch.date {
            updated.date = date;
        }
        if let Some(start) = patch.start {
            updated.start = start;
        }
        if let Some(end) = patch.end {
            updated.end = end;
        }
        if let Some(label) = patch.label {
            updated.label = if label.is_empty() { None } else { Some(label) };
        }
        if let Some(period) = patch.period {
            updated.period = if period.is_empty() { None } else { Some(period) };
        }

        self.check_block(&updated)?;

        let mut next = self.schedule.clone();
        for block in next.blocks.iter_mut().filter(|b| b.id == id) {
            *block = updated.clone();
        }
        self.schedule = next;

        Ok(())
    }

    /// Remove a block. No-op on unknown ids.
    pub fn remove_block(&mut self, id: &str) {
        let mut next = self.schedule.clone();
        next.blocks.retain(|b| b.id != id);
        self.schedule = next;
    }

    /// Remove every block stamped with `pattern_id`.
    pub fn remove_pattern(&mut self, pattern_id: &str) -> usize {
        let mut next = self.schedule.clone();
        let before = next.blocks.len();
        next.blocks.retain(|b| b.pattern.as_deref() != Some(pattern_id));
        let removed = before - next.blocks.len();
        self.schedule = next;
        removed
    }

    /// A fresh pattern id for a group of stamped blocks.
    pub fn new_pattern_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn check_block(&self, block: &Block) -> ScheduleResult<()> {
        block.validate()?;
        for member_id in &block.member_ids {
            if self.schedule.member(member_id).is_none() {
                return Err(ScheduleError::UnknownMember(member_id.clone()));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Week navigation
    // =========================================================================

    pub fn go_to_previous_week(&mut self) {
        self.shift_week(-7);
    }

    pub fn go_to_next_week(&mut self) {
        self.shift_week(7);
    }

    /// Snap the displayed week to the Monday of `today`.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        let mut next = self.schedule.clone();
        next.current_week_start = monday_of(today);
        self.schedule = next;
    }

    fn shift_week(&mut self, days: i64) {
        let mut next = self.schedule.clone();
        next.current_week_start += Duration::days(days);
        self.schedule = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TimeSlotDisplay;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_with_members(names: &[&str]) -> ScheduleStore {
        let schedule = Schedule::new("Team", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        let mut store = ScheduleStore::new(schedule, PlanLimits::UNLIMITED);
        for name in names {
            store.add_member(name).unwrap();
        }
        store
    }

    fn member_id(store: &ScheduleStore, name: &str) -> String {
        store
            .schedule()
            .members
            .iter()
            .find(|m| m.name == name)
            .unwrap()
            .id
            .clone()
    }

    #[test]
    fn test_add_member_assigns_palette_colors_in_order() {
        let store = store_with_members(&["Alice", "Bob"]);
        let members = &store.schedule().members;
        assert_eq!(members[0].color, Member::color_for(0));
        assert_eq!(members[1].color, Member::color_for(1));
    }

    #[test]
    fn test_add_member_respects_cap() {
        let schedule = Schedule::new("Solo", TimeSlotDisplay::PreciseHours, date("2025-01-06"));
        let limits = PlanLimits {
            max_members: Some(2),
            max_agendas: None,
        };
        let mut store = ScheduleStore::new(schedule, limits);

        assert!(store.add_member("Alice").is_some());
        assert!(store.add_member("Bob").is_some());
        assert!(!store.can_add_member());
        assert!(store.add_member("Cleo").is_none());
        assert_eq!(store.schedule().members.len(), 2);
    }

    #[test]
    fn test_update_member_merges_fields() {
        let mut store = store_with_members(&["Alice"]);
        let id = member_id(&store, "Alice");

        store.update_member(&id, Some("Alicia"), None);
        assert_eq!(store.schedule().members[0].name, "Alicia");
        assert_eq!(store.schedule().members[0].color, Member::color_for(0));

        store.update_member("nope", Some("Ghost"), None);
        assert_eq!(store.schedule().members.len(), 1);
    }

    #[test]
    fn test_remove_member_detaches_from_shared_blocks() {
        let mut store = store_with_members(&["Alice", "Bob"]);
        let alice = member_id(&store, "Alice");
        let bob = member_id(&store, "Bob");

        store
            .add_block(Block::new(
                vec![alice.clone(), bob.clone()],
                date("2025-01-06"),
                "09:00",
                "10:00",
            ))
            .unwrap();

        store.remove_member(&alice);

        let blocks = &store.schedule().blocks;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].member_ids, vec![bob]);
    }

    #[test]
    fn test_remove_member_deletes_blocks_left_empty() {
        let mut store = store_with_members(&["Alice"]);
        let alice = member_id(&store, "Alice");

        store
            .add_block(Block::new(
                vec![alice.clone()],
                date("2025-01-06"),
                "09:00",
                "10:00",
            ))
            .unwrap();

        store.remove_member(&alice);

        assert!(store.schedule().blocks.is_empty());
        assert!(
            store
                .schedule()
                .blocks
                .iter()
                .all(|b| !b.member_ids.is_empty())
        );
    }

    #[test]
    fn test_add_block_rejects_unknown_members() {
        let mut store = store_with_members(&["Alice"]);
        let result = store.add_block(Block::new(
            vec!["ghost".into()],
            date("2025-01-06"),
            "09:00",
            "10:00",
        ));
        assert!(matches!(result, Err(ScheduleError::UnknownMember(_))));
        assert!(store.schedule().blocks.is_empty());
    }

    #[test]
    fn test_update_block_merges_and_validates() {
        let mut store = store_with_members(&["Alice"]);
        let alice = member_id(&store, "Alice");
        let id = store
            .add_block(Block::new(
                vec![alice],
                date("2025-01-06"),
                "09:00",
                "10:00",
            ))
            .unwrap();

        store
            .update_block(
                &id,
                BlockPatch {
                    start: Some("11:00".into()),
                    end: Some("12:00".into()),
                    label: Some("Standup".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let block = store.schedule().block(&id).unwrap();
        assert_eq!(block.start, "11:00");
        assert_eq!(block.label.as_deref(), Some("Standup"));

        // A patch that breaks the time invariant is refused whole
        let result = store.update_block(
            &id,
            BlockPatch {
                end: Some("10:00".into()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(store.schedule().block(&id).unwrap().end, "12:00");
    }

    #[test]
    fn test_update_block_unknown_id_is_noop() {
        let mut store = store_with_members(&["Alice"]);
        assert!(store.update_block("nope", BlockPatch::default()).is_ok());
    }

    #[test]
    fn test_remove_pattern_removes_the_group() {
        let mut store = store_with_members(&["Alice"]);
        let alice = member_id(&store, "Alice");
        let pattern = ScheduleStore::new_pattern_id();

        for day in ["2025-01-06", "2025-01-07", "2025-01-08"] {
            let mut block = Block::new(vec![alice.clone()], date(day), "09:00", "10:00");
            block.pattern = Some(pattern.clone());
            store.add_block(block).unwrap();
        }
        store
            .add_block(Block::new(
                vec![alice.clone()],
                date("2025-01-09"),
                "09:00",
                "10:00",
            ))
            .unwrap();

        assert_eq!(store.remove_pattern(&pattern), 3);
        assert_eq!(store.schedule().blocks.len(), 1);
    }

    #[test]
    fn test_week_navigation() {
        let mut store = store_with_members(&[]);
        assert_eq!(store.schedule().current_week_start, date("2025-01-06"));

        store.go_to_next_week();
        assert_eq!(store.schedule().current_week_start, date("2025-01-13"));

        store.go_to_previous_week();
        store.go_to_previous_week();
        assert_eq!(store.schedule().current_week_start, date("2024-12-30"));

        // 2025-02-19 is a Wednesday
        store.go_to_today(date("2025-02-19"));
        assert_eq!(store.schedule().current_week_start, date("2025-02-17"));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let mut store = store_with_members(&["Alice"]);
        let before = store.snapshot();

        store.add_member("Bob");

        assert_eq!(before.members.len(), 1);
        assert_eq!(store.schedule().members.len(), 2);
    }
}
