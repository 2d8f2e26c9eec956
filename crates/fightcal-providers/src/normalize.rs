//! RawFightRecord to FightEvent conversion.
//!
//! 1. Parses the provider date into a UTC start time
//! 2. Takes the combatants in billing order as the event's opponents
//! 3. Builds the [`FightEvent`], which fixes the end time and description
//!
//! Records that fail any step are rejected individually; the remaining
//! records still produce events.

use fightcal_core::{EventBuildError, FightEvent, parse_fight_date};
use tracing::{debug, warn};

use crate::raw_fight::{RawFightRecord, UpcomingFights};

/// Converts one raw record into a [`FightEvent`] for `fighter_name`.
///
/// # Errors
///
/// [`EventBuildError::InvalidDate`] when the date is missing or unparsable,
/// [`EventBuildError::NoCombatants`] when the record names nobody.
pub fn build_fight_event(
    fighter_name: &str,
    record: &RawFightRecord,
) -> Result<FightEvent, EventBuildError> {
    let raw_date = record.event.date.as_deref().unwrap_or_default();
    let start = parse_fight_date(raw_date).ok_or_else(|| EventBuildError::InvalidDate {
        fighter: fighter_name.to_string(),
        value: raw_date.to_string(),
    })?;

    FightEvent::new(
        fighter_name,
        &record.fighters,
        start,
        record.display_location(),
    )
}

/// Converts every record in `fights`, skipping the ones that cannot be built.
///
/// Events come out in fighter-name order.
pub fn build_fight_events(fights: &UpcomingFights) -> Vec<FightEvent> {
    let mut events = Vec::with_capacity(fights.len());
    for (fighter_name, record) in fights {
        match build_fight_event(fighter_name, record) {
            Ok(event) => events.push(event),
            Err(e) => warn!(fighter = %fighter_name, error = %e, "skipping fight"),
        }
    }
    debug!(
        built = events.len(),
        skipped = fights.len() - events.len(),
        "normalized fight records"
    );
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn builds_event_from_record() {
        let record = RawFightRecord::new(["A", "C"], "2025-05-01T20:00:00Z", "Vegas");
        let event = build_fight_event("A", &record).unwrap();

        assert_eq!(event.fighter_name, "A");
        assert_eq!(event.opponents, vec!["A", "C"]);
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 5, 1, 20, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2025, 5, 1, 22, 0, 0).unwrap());
        assert_eq!(event.location, "Vegas");
        assert_eq!(event.summary(), "A vs C");
        assert!(event.description.contains('A'));
    }

    #[test]
    fn naive_provider_dates_are_utc() {
        let record = RawFightRecord::new(["B", "D"], "2025-09-13T22:00:00", "Riyadh");
        let event = build_fight_event("B", &record).unwrap();
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 9, 13, 22, 0, 0).unwrap());
    }

    #[test]
    fn unparsable_date_is_rejected() {
        let record = RawFightRecord::new(["A", "C"], "next saturday", "Vegas");
        let err = build_fight_event("A", &record).unwrap_err();
        assert_eq!(
            err,
            EventBuildError::InvalidDate {
                fighter: "A".to_string(),
                value: "next saturday".to_string()
            }
        );
    }

    #[test]
    fn missing_date_is_rejected() {
        let mut record = RawFightRecord::new(["A", "C"], "", "Vegas");
        record.event.date = None;
        assert!(matches!(
            build_fight_event("A", &record),
            Err(EventBuildError::InvalidDate { .. })
        ));
    }

    #[test]
    fn malformed_records_do_not_block_others() {
        let mut fights = UpcomingFights::new();
        fights.insert(
            "A".to_string(),
            RawFightRecord::new(["A", "C"], "2025-05-01T20:00:00Z", "Vegas"),
        );
        fights.insert(
            "B".to_string(),
            RawFightRecord::new(["B", "D"], "TBD", "London"),
        );
        fights.insert(
            "E".to_string(),
            RawFightRecord::new(Vec::<String>::new(), "2025-06-01T20:00:00Z", "Paris"),
        );
        fights.insert(
            "F".to_string(),
            RawFightRecord::new(["F", "G"], "2025-07-01T20:00:00Z", "Tokyo"),
        );

        let events = build_fight_events(&fights);
        let names: Vec<_> = events.iter().map(|e| e.fighter_name.as_str()).collect();
        assert_eq!(names, vec!["A", "F"]);
        assert!(
            events
                .iter()
                .all(|e| e.end - e.start == Duration::hours(2))
        );
    }
}
