#[cfg(test)]
mod tests {
    use crate::calendar::{days_in_month, generate_month, CellStatus};
    use crate::catalog::WorkingHoursCatalog;
    use crate::StaticCatalog;
    use bookflow_common::services::AvailabilityCatalog;
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
    use proptest::prelude::*;

    // A catalog with slots on an arbitrary subset of days around the month
    fn catalog_from_offsets(base: NaiveDate, offsets: &[u8]) -> StaticCatalog {
        let slot = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        offsets.iter().fold(StaticCatalog::new(), |catalog, offset| {
            catalog.with_slots(base + Duration::days(i64::from(*offset)), [slot])
        })
    }

    proptest! {
        // Test that the grid holds exactly one cell per calendar day
        #[test]
        fn test_non_empty_cells_match_month_length(
            year in 1970..2100i32,
            month in 1..=12u32,
        ) {
            let catalog = StaticCatalog::new();
            let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
            let grid = generate_month(year, month, &catalog, today, None).unwrap();

            let expected = days_in_month(year, month).unwrap() as usize;
            prop_assert_eq!(grid.days().count(), expected);
            prop_assert_eq!(grid.cells.len(), grid.leading_blanks as usize + expected);
            prop_assert!(grid.leading_blanks < 7);

            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            prop_assert_eq!(grid.leading_blanks, first.weekday().num_days_from_sunday());
        }

        // Test that identical inputs give identical grids
        #[test]
        fn test_generation_is_deterministic(
            month in 1..=12u32,
            today_offset in 0..400i64,
            offsets in proptest::collection::vec(0..120u8, 0..40),
            selected_offset in proptest::option::of(0..60i64),
        ) {
            let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let catalog = catalog_from_offsets(base, &offsets);
            let today = base + Duration::days(today_offset);
            let selected = selected_offset.map(|offset| base + Duration::days(offset));

            let first = generate_month(2025, month, &catalog, today, selected).unwrap();
            let second = generate_month(2025, month, &catalog, today, selected).unwrap();
            prop_assert_eq!(first, second);
        }

        // Test that no cell before today is ever offered
        #[test]
        fn test_nothing_before_today_is_selectable(
            month in 1..=12u32,
            today_offset in 0..365i64,
            offsets in proptest::collection::vec(0..120u8, 0..40),
        ) {
            let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let catalog = catalog_from_offsets(base, &offsets);
            let today = base + Duration::days(today_offset);
            let selected = Some(today - Duration::days(1));

            let grid = generate_month(2025, month, &catalog, today, selected).unwrap();
            for cell in grid.days() {
                let date = cell.date.unwrap();
                if date < today {
                    prop_assert_eq!(cell.status, CellStatus::Past);
                } else if cell.status == CellStatus::Available {
                    prop_assert!(catalog.has_slots(date));
                }
            }
        }

        // Test that working-hours slots fit inside the working day
        #[test]
        fn test_working_hours_slots_fit_the_day(
            start_hour in 0..12u32,
            end_hour in 13..24u32,
            slot_minutes in 5..=120i64,
        ) {
            let start = NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap();
            let end = NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap();
            let catalog = WorkingHoursCatalog::new(
                vec![Weekday::Mon],
                start,
                end,
                Duration::minutes(slot_minutes),
            )
            .unwrap();

            // 1 Sep 2025 is a Monday
            let monday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
            let slots = catalog.lookup(monday);
            prop_assert!(!slots.is_empty());
            prop_assert_eq!(slots[0], start);
            for pair in slots.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for slot in &slots {
                prop_assert!(*slot + Duration::minutes(slot_minutes) <= end);
            }
        }
    }
}
