//! Fast cell-lookup indexes over an agenda's blocks.
//!
//! Grid rendering looks up individual (member, day) cells many times per
//! pass; these maps are built once from the current block list and treated
//! as read-only. Indexing is pure and cheap enough to redo on every
//! mutation, so there is no incremental update path.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::block::Block;

/// Key of one member-day cell.
pub type CellKey = (String, NaiveDate);

/// Key of one member-day-period cell.
pub type PeriodCellKey = (String, NaiveDate, String);

/// Map each (member, date) cell to its blocks.
///
/// A block is indexed once per member it contains: a three-member block
/// appears under three keys. Cell contents keep block-list order.
pub fn index_by_member_and_date(blocks: &[Block]) -> HashMap<CellKey, Vec<&Block>> {
    let mut index: HashMap<CellKey, Vec<&Block>> = HashMap::new();

    for block in blocks {
        for member_id in &block.member_ids {
            index
                .entry((member_id.clone(), block.date))
                .or_default()
                .push(block);
        }
    }

    index
}

/// Like [`index_by_member_and_date`], further keyed by period id.
///
/// Blocks without a `periodId` land under `fallback` so period grids
/// always have a column to show them in.
pub fn index_by_member_date_and_period<'a>(
    blocks: &'a [Block],
    fallback: &str,
) -> HashMap<PeriodCellKey, Vec<&'a Block>> {
    let mut index: HashMap<PeriodCellKey, Vec<&'a Block>> = HashMap::new();

    for block in blocks {
        let period = block.period.clone().unwrap_or_else(|| fallback.to_string());
        for member_id in &block.member_ids {
            index
                .entry((member_id.clone(), block.date, period.clone()))
                .or_default()
                .push(block);
        }
    }

    index
}
