#[cfg(test)]
mod tests {
    use crate::error::{conflict, external_service_error, BookflowError, HttpStatusCode};
    use crate::models::{hhmm, BookingRequest, ContactInfo, Requirements};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use uuid::Uuid;

    fn sample_booking() -> BookingRequest {
        BookingRequest {
            reference: Uuid::nil(),
            contact: ContactInfo {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@x.com".to_string(),
                company: "Analytical Eng".to_string(),
                ..Default::default()
            },
            date: NaiveDate::from_ymd_opt(2025, 9, 2).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            requirements: Requirements {
                use_case: "Nightly DB backup".to_string(),
                ..Default::default()
            },
            submitted_at: Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_booking_serializes_time_as_hours_and_minutes() {
        let json = serde_json::to_value(sample_booking()).unwrap();

        assert_eq!(json["time"], "10:00");
        assert_eq!(json["date"], "2025-09-02");
        assert_eq!(json["contact"]["first_name"], "Ada");
        assert_eq!(json["requirements"]["integrations_needed"], serde_json::json!([]));
    }

    #[test]
    fn test_booking_deserializes_from_wire_format() {
        let json = serde_json::to_string(&sample_booking()).unwrap();
        let parsed: BookingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_booking());
    }

    #[test]
    fn test_hhmm_rejects_garbage() {
        assert!(hhmm::parse("25:00").is_err());
        assert!(hhmm::parse("ten").is_err());
        assert_eq!(
            hhmm::parse(" 09:30 ").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(conflict("step not complete").status_code(), 409);
        assert_eq!(external_service_error("webhook", "down").status_code(), 502);
        assert_eq!(
            BookflowError::ValidationError("bad".to_string()).status_code(),
            422
        );
    }
}
