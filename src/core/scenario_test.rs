#[cfg(test)]
mod scenario_tests {
    use crate::core::alerts::sound::testing::CountingSink;
    use crate::core::board::Board;
    use crate::core::error::{Error, ValidationError};
    use crate::core::intake::IntakeForm;
    use crate::core::model::Priority;
    use crate::core::store::{IntimationStore, JsonFileStore};
    use chrono::{Duration, Local, TimeZone, Utc};
    use tempfile::tempdir;

    fn payroll_form() -> IntakeForm {
        IntakeForm {
            app_name: "Payroll".to_string(),
            priority: "high".to_string(),
            duration_value: "1".to_string(),
            duration_unit: "days".to_string(),
            ..IntakeForm::default()
        }
    }

    #[test]
    fn add_then_view_payroll() {
        let dir = tempdir().unwrap();
        let board = Board::new(
            JsonFileStore::new(dir.path().join("intimations.json")),
            CountingSink::default(),
        );
        let t = Utc.with_ymd_and_hms(2026, 5, 4, 9, 15, 0).unwrap();

        let created = board.submit(&payroll_form(), &t).unwrap();
        assert_eq!(created.id, t.timestamp_millis());
        assert_eq!(created.alert_count, 0);
        assert!(!created.has_been_viewed);
        assert_eq!(created.last_alert_timestamp, None);
        assert_eq!(created.expiry, t + Duration::days(1));
        assert!(created.is_active(t));
        assert_eq!(board.counts(&t).high, 1);

        // Gone from every view one second past expiry
        let after = created.expiry + Duration::seconds(1);
        assert!(board.render(Priority::High, &after).unwrap().is_empty());
        assert_eq!(board.counts(&after).high, 0);
    }

    #[test]
    fn rejected_intake_leaves_store_untouched() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("intimations.json"));
        let board = Board::new(store, CountingSink::default());
        let now = Utc::now();

        board.submit(&payroll_form(), &now).unwrap();

        let mut form = payroll_form();
        form.app_name = "   ".to_string();
        let err = board.submit(&form, &now).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingAppName)
        ));
        assert_eq!(board.store().load().len(), 1);
    }

    #[test]
    fn delete_unknown_id_changes_nothing() {
        let dir = tempdir().unwrap();
        let board = Board::new(
            JsonFileStore::new(dir.path().join("intimations.json")),
            CountingSink::default(),
        );
        let now = Utc::now();
        board.submit(&payroll_form(), &now).unwrap();

        assert!(!board.remove(-1).unwrap());

        let views = board.delete(-1, Priority::High, &now).unwrap();
        assert_eq!(views.len(), 1);
        // Re-render marks the record viewed, nothing else changes
        let stored = board.store().load();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].has_been_viewed);
    }

    #[test]
    fn repeating_alert_lifecycle_in_local_time() {
        let dir = tempdir().unwrap();
        let board = Board::new(
            JsonFileStore::new(dir.path().join("intimations.json")),
            CountingSink::default(),
        );
        let now = Local::now();
        let mut form = payroll_form();
        form.interval_hours = "1".to_string();
        board.submit(&form, &now).unwrap();

        let views = board.render(Priority::High, &now).unwrap();
        assert!(views[0].pulse);
        assert_eq!(board.announce(&views), 1);
        assert_eq!(board.sound().plays.get(), 1);

        // Viewed now, so a fresh load never re-arms it
        let reopened = Board::new(
            JsonFileStore::new(dir.path().join("intimations.json")),
            CountingSink::default(),
        );
        let views = reopened
            .render(Priority::High, &(now + Duration::hours(2)))
            .unwrap();
        assert!(!views[0].pulse);
        assert_eq!(reopened.announce(&views), 0);
        assert_eq!(reopened.sound().plays.get(), 0);
    }
}
