pub mod block;
pub mod conflicts;
pub mod delete;
pub mod list;
pub mod member;
pub mod new;
pub mod print;
pub mod show;
pub mod week;

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use weekgrid_core::dates::parse_iso_date;
use weekgrid_core::{AgendaDir, Schedule, ScheduleStore};

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Load an agenda into a mutation store carrying the plan's limits.
pub fn load_store(dir: &AgendaDir, slug: &str) -> Result<ScheduleStore> {
    let schedule = dir.load_agenda(slug)?;
    Ok(ScheduleStore::new(schedule, dir.plan().limits()))
}

/// Accept YYYY-MM-DD or a weekday name resolved within the displayed week.
pub fn parse_day(input: &str, week_start: NaiveDate) -> Result<NaiveDate> {
    let names: [(&str, i64); 17] = [
        ("mon", 0),
        ("monday", 0),
        ("tue", 1),
        ("tues", 1),
        ("tuesday", 1),
        ("wed", 2),
        ("wednesday", 2),
        ("thu", 3),
        ("thur", 3),
        ("thurs", 3),
        ("thursday", 3),
        ("fri", 4),
        ("friday", 4),
        ("sat", 5),
        ("saturday", 5),
        ("sun", 6),
        ("sunday", 6),
    ];

    let lower = input.to_lowercase();
    if let Some((_, offset)) = names.iter().find(|(name, _)| *name == lower) {
        return Ok(week_start + Duration::days(*offset));
    }

    Ok(parse_iso_date(input)?)
}

/// Resolve a member reference (name or id) to its id.
pub fn resolve_member(schedule: &Schedule, member: &str) -> Result<String> {
    if let Some(found) = schedule
        .members
        .iter()
        .find(|m| m.id == member || m.name.eq_ignore_ascii_case(member))
    {
        return Ok(found.id.clone());
    }

    let available: Vec<_> = schedule.members.iter().map(|m| m.name.clone()).collect();
    anyhow::bail!(
        "No member '{}' in '{}'. Available: {}",
        member,
        schedule.name,
        available.join(", ")
    )
}

pub fn resolve_members(schedule: &Schedule, members: &[String]) -> Result<Vec<String>> {
    members
        .iter()
        .map(|m| resolve_member(schedule, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_day_accepts_iso_dates() {
        let monday = date("2025-01-06");
        assert_eq!(parse_day("2025-03-20", monday).unwrap(), date("2025-03-20"));
        assert!(parse_day("soonish", monday).is_err());
    }

    #[test]
    fn test_parse_day_resolves_weekday_names_in_week() {
        let monday = date("2025-01-06");
        assert_eq!(parse_day("mon", monday).unwrap(), monday);
        assert_eq!(parse_day("Wednesday", monday).unwrap(), date("2025-01-08"));
        assert_eq!(parse_day("sun", monday).unwrap(), date("2025-01-12"));
    }
}
