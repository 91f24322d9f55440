use domain::{PRIORITIES, PRIORITY_TABLE, Priority, Status, priority_info, status_info};

#[test]
fn priority_table_is_ordered_by_rank() {
    let ranks: Vec<u8> = PRIORITIES
        .iter()
        .map(|priority| priority_info(*priority).rank)
        .collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
    for (index, info) in PRIORITY_TABLE.iter().enumerate() {
        assert_eq!(info.priority, PRIORITIES[index]);
    }
}

#[test]
fn priority_labels_and_response_times() {
    let critical = priority_info(Priority::Critical);
    assert_eq!(critical.label, "🚨 CRITICAL");
    assert_eq!(critical.response_time, "0-15 min");
    assert_eq!(priority_info(Priority::High).response_time, "Under 1 hour");
    assert_eq!(priority_info(Priority::Medium).response_time, "2-8 hours");
    assert_eq!(priority_info(Priority::Low).response_time, "When available");
}

#[test]
fn tokens_parse_exactly() {
    assert_eq!("CRITICAL".parse::<Priority>(), Ok(Priority::Critical));
    assert_eq!("In Progress".parse::<Status>(), Ok(Status::InProgress));
    assert_eq!(status_info(Status::OnHold).token, "On Hold");

    let err = "critical".parse::<Priority>().expect_err("case sensitive");
    assert_eq!(err.to_string(), "unknown priority token: critical");
    assert!("Done".parse::<Status>().is_err());
}

#[test]
fn display_uses_tokens() {
    assert_eq!(Priority::Medium.to_string(), "MEDIUM");
    assert_eq!(Status::Completed.to_string(), "Completed");
}
