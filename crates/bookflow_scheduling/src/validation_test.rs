#[cfg(test)]
mod tests {
    use crate::draft::{BookingDraft, DraftField};
    use crate::test_support::{date, sample_catalog, time, today};
    use crate::validation::{
        contact_errors, draft_errors, is_valid_email, requirements_errors, schedule_errors,
        step_errors, Field, FieldError, FieldErrorKind,
    };
    use crate::wizard::Step;

    fn complete_draft() -> BookingDraft {
        let mut draft = BookingDraft::default();
        draft.set(DraftField::FirstName, "Ada".to_string());
        draft.set(DraftField::LastName, "Lovelace".to_string());
        draft.set(DraftField::Email, "ada@x.com".to_string());
        draft.set(DraftField::Company, "Analytical Eng".to_string());
        draft.selected_date = Some(date(2025, 9, 2));
        draft.selected_time = Some(time("10:00"));
        draft.set(DraftField::UseCase, "Nightly DB backup".to_string());
        draft
    }

    fn missing(field: DraftField) -> FieldError {
        FieldError {
            field: Field::Text(field),
            kind: FieldErrorKind::Missing,
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ada@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(is_valid_email(" ada@x.com "));
        assert!(!is_valid_email("ada@x"));
        assert!(!is_valid_email("ada.x.com"));
        assert!(!is_valid_email("ada@@x.com"));
        assert!(!is_valid_email("a da@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_empty_contact_reports_every_required_field() {
        let errors = contact_errors(&BookingDraft::default());

        assert_eq!(
            errors,
            vec![
                missing(DraftField::FirstName),
                missing(DraftField::LastName),
                missing(DraftField::Email),
                missing(DraftField::Company),
            ]
        );
    }

    #[test]
    fn test_malformed_email_is_reported_once() {
        let mut draft = complete_draft();
        draft.set(DraftField::Email, "ada-at-x".to_string());

        assert_eq!(
            contact_errors(&draft),
            vec![FieldError {
                field: Field::Text(DraftField::Email),
                kind: FieldErrorKind::MalformedEmail,
            }]
        );
    }

    #[test]
    fn test_schedule_needs_date_then_time() {
        let catalog = sample_catalog();
        let mut draft = complete_draft();
        draft.selected_date = None;
        draft.selected_time = None;

        let fields: Vec<_> = schedule_errors(&draft, &catalog, today())
            .into_iter()
            .map(|error| error.field)
            .collect();
        assert_eq!(fields, vec![Field::SelectedDate, Field::SelectedTime]);

        draft.selected_date = Some(date(2025, 9, 2));
        assert_eq!(
            schedule_errors(&draft, &catalog, today()),
            vec![FieldError {
                field: Field::SelectedTime,
                kind: FieldErrorKind::Missing,
            }]
        );
    }

    #[test]
    fn test_schedule_rejects_time_not_offered_on_date() {
        let catalog = sample_catalog();
        let mut draft = complete_draft();
        draft.selected_date = Some(date(2025, 9, 4));

        assert_eq!(
            schedule_errors(&draft, &catalog, today()),
            vec![FieldError {
                field: Field::SelectedTime,
                kind: FieldErrorKind::NotOffered,
            }]
        );
    }

    #[test]
    fn test_schedule_rejects_date_that_has_passed() {
        let catalog = sample_catalog();
        let draft = complete_draft();

        assert!(schedule_errors(&draft, &catalog, date(2025, 9, 2)).is_empty());
        assert_eq!(
            schedule_errors(&draft, &catalog, date(2025, 9, 3)),
            vec![FieldError {
                field: Field::SelectedDate,
                kind: FieldErrorKind::InPast,
            }]
        );
        assert_eq!(draft_errors(&draft, &catalog, date(2025, 9, 3)).len(), 1);
    }

    #[test]
    fn test_requirements_need_only_use_case() {
        let mut draft = BookingDraft::default();
        assert_eq!(requirements_errors(&draft), vec![missing(DraftField::UseCase)]);

        draft.set(DraftField::UseCase, "Backups".to_string());
        assert!(requirements_errors(&draft).is_empty());
    }

    #[test]
    fn test_step_errors_dispatch_by_step() {
        let catalog = sample_catalog();
        let draft = BookingDraft::default();

        assert_eq!(step_errors(Step::ContactInfo, &draft, &catalog, today()).len(), 4);
        assert_eq!(step_errors(Step::DateTime, &draft, &catalog, today()).len(), 2);
        assert_eq!(step_errors(Step::Requirements, &draft, &catalog, today()).len(), 1);
        assert!(step_errors(Step::Confirmed, &draft, &catalog, today()).is_empty());
    }

    #[test]
    fn test_complete_draft_has_no_errors() {
        let catalog = sample_catalog();
        assert!(draft_errors(&complete_draft(), &catalog, today()).is_empty());
        assert_eq!(draft_errors(&BookingDraft::default(), &catalog, today()).len(), 7);
    }

    #[test]
    fn test_field_errors_serialize_with_dotted_paths() {
        let json = serde_json::to_value(missing(DraftField::FirstName)).unwrap();
        assert_eq!(json["field"], "contact.firstName");
        assert_eq!(json["kind"], "missing");

        let json = serde_json::to_value(FieldError {
            field: Field::SelectedTime,
            kind: FieldErrorKind::NotOffered,
        })
        .unwrap();
        assert_eq!(json["field"], "selectedTime");
        assert_eq!(json["kind"], "not_offered");
    }

    #[test]
    fn test_draft_field_paths_round_trip() {
        for field in DraftField::ALL {
            assert_eq!(field.path().parse::<DraftField>(), Ok(field));
        }
        assert!("contact.age".parse::<DraftField>().is_err());
    }

    #[test]
    fn test_setting_blank_optional_field_clears_it() {
        let mut draft = BookingDraft::default();
        draft.set(DraftField::JobTitle, "CTO".to_string());
        assert_eq!(draft.get(DraftField::JobTitle), Some("CTO"));

        draft.set(DraftField::JobTitle, "  ".to_string());
        assert_eq!(draft.get(DraftField::JobTitle), None);
    }
}
