#[cfg(test)]
mod tests {
    use crate::actions::WizardAction;
    use crate::draft::DraftField;
    use crate::test_support::{date, new_wizard, times};
    use crate::validation;
    use crate::wizard::Step;
    use bookflow_common::services::AvailabilityCatalog;
    use chrono::{Duration, NaiveTime};
    use proptest::prelude::*;

    fn slot_times() -> Vec<NaiveTime> {
        times(&["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"])
    }

    // Random user actions over early September 2025, including invalid ones
    fn action_strategy() -> impl Strategy<Value = WizardAction> {
        let field = proptest::sample::select(DraftField::ALL.to_vec());
        let value = prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            Just("Ada".to_string()),
            Just("ada@x.com".to_string()),
            Just("not-an-email".to_string()),
        ];
        prop_oneof![
            (field, value).prop_map(|(field, value)| WizardAction::SetField { field, value }),
            proptest::sample::select(vec!["postgres", "s3", " "]).prop_map(|integration| {
                WizardAction::ToggleIntegration {
                    integration: integration.to_string(),
                }
            }),
            (0..14i64).prop_map(|offset| WizardAction::SelectDate {
                date: date(2025, 8, 28) + Duration::days(offset),
            }),
            proptest::sample::select(slot_times())
                .prop_map(|time| WizardAction::SelectTime { time }),
            Just(WizardAction::Advance),
            Just(WizardAction::Retreat),
            Just(WizardAction::Submit),
            Just(WizardAction::NextMonth),
            Just(WizardAction::PreviousMonth),
        ]
    }

    proptest! {
        // Test that a selected time is always one of the selected date's slots
        #[test]
        fn test_selected_time_is_always_offered(
            actions in proptest::collection::vec(action_strategy(), 0..60),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let (mut wizard, _) = new_wizard();
            let catalog = crate::test_support::sample_catalog();

            for action in actions {
                let _ = runtime.block_on(wizard.apply(action));

                let draft = wizard.draft();
                if let Some(time) = draft.selected_time {
                    prop_assert!(draft.selected_date.is_some());
                    prop_assert!(catalog.offers(draft.selected_date.unwrap(), time));
                }
                if let Some(date) = draft.selected_date {
                    prop_assert!(date >= wizard.today());
                    prop_assert!(catalog.has_slots(date));
                }
            }
        }

        // Test that the wizard only ever sits on a step whose predecessors validate
        #[test]
        fn test_steps_are_reached_only_through_valid_predecessors(
            actions in proptest::collection::vec(action_strategy(), 0..60),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let (mut wizard, sink) = new_wizard();
            let catalog = crate::test_support::sample_catalog();

            for action in actions {
                let before = wizard.step();
                let draft_before = wizard.draft().clone();
                let result = runtime.block_on(wizard.apply(action));
                let after = wizard.step();

                // Forward moves need the step being left to validate
                if after > before {
                    prop_assert!(result.is_ok());
                    prop_assert!(
                        validation::step_errors(before, &draft_before, &catalog, wizard.today()).is_empty()
                    );
                    prop_assert_eq!(after.number(), before.number() + 1);
                }
                // Backward moves go one step at a time
                if after < before {
                    prop_assert_eq!(after.number() + 1, before.number());
                    prop_assert!(before != Step::Confirmed);
                }
                if before == Step::Confirmed {
                    prop_assert_eq!(after, Step::Confirmed);
                    prop_assert_eq!(wizard.draft(), &draft_before);
                }
                prop_assert_eq!(wizard.step_valid(), wizard.field_errors().is_empty());
            }

            let confirmed = wizard.step() == Step::Confirmed;
            prop_assert_eq!(sink.bookings().len(), usize::from(confirmed));
            if confirmed {
                let booking = &sink.bookings()[0];
                prop_assert!(catalog.offers(booking.date, booking.time));
            }
        }
    }
}
