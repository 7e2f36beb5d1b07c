// tests/unit/domain_model_tests.rs
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::ActiveValue;
use subscription_backend::{
    api::dto::subscription_dto::{SubscriptionDto, TotalCostResponse},
    domain::subscription_model::SubscriptionChanges,
};

use crate::common::test_data;

fn changes() -> SubscriptionChanges {
    SubscriptionChanges {
        service_name: "Spotify".to_string(),
        price: 199,
        user_id: "user-2".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        updated_at: Utc::now() + Duration::seconds(5),
    }
}

#[test]
fn test_model_new_stamps_matching_timestamps() {
    let record = test_data::subscription_record("sub-1", "Netflix", 999, "user123", 2024, 1);

    assert_eq!(record.created_at, record.updated_at);
    assert_eq!(
        record.start_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
    assert!(record.end_date.is_none());
}

#[test]
fn test_with_changes_keeps_identity_and_creation_time() {
    let record = test_data::subscription_record("sub-1", "Netflix", 999, "user123", 2024, 1);
    let changes = changes();

    let updated = record.with_changes(&changes);

    assert_eq!(updated.id, "sub-1");
    assert_eq!(updated.created_at, record.created_at);
    assert_eq!(updated.service_name, "Spotify");
    assert_eq!(updated.price, 199);
    assert_eq!(updated.user_id, "user-2");
    assert_eq!(updated.end_date, changes.end_date);
    assert_eq!(updated.updated_at, changes.updated_at);
}

#[test]
fn test_changes_active_model_leaves_id_and_created_at_unset() {
    let active = changes().into_active_model();

    assert!(matches!(active.id, ActiveValue::NotSet));
    assert!(matches!(active.created_at, ActiveValue::NotSet));
    assert_eq!(active.price, ActiveValue::Set(199));
}

#[test]
fn test_insert_model_sets_every_column() {
    let record = test_data::subscription_record("sub-1", "Netflix", 999, "user123", 2024, 1);
    let active = record.clone().into_insert_model();

    assert_eq!(active.id, ActiveValue::Set("sub-1".to_string()));
    assert_eq!(active.end_date, ActiveValue::Set(None));
    assert_eq!(active.created_at, ActiveValue::Set(record.created_at));
}

#[test]
fn test_subscription_dto_serializes_month_year_dates() {
    let mut record = test_data::subscription_record("sub-1", "Netflix", 999, "user123", 2024, 3);
    record.end_date = NaiveDate::from_ymd_opt(2024, 12, 1);

    let json = serde_json::to_value(SubscriptionDto::from(record)).unwrap();

    assert_eq!(json["id"], "sub-1");
    assert_eq!(json["start_date"], "03-2024");
    assert_eq!(json["end_date"], "12-2024");
    assert_eq!(json["price"], 999);
}

#[test]
fn test_subscription_dto_omits_missing_end_date() {
    let record = test_data::subscription_record("sub-1", "Netflix", 999, "user123", 2024, 3);
    let json = serde_json::to_value(SubscriptionDto::from(record)).unwrap();

    assert!(json.get("end_date").is_none());
}

#[test]
fn test_total_cost_response_echoes_query() {
    let query = test_data::total_cost_query(Some("user123"), None, Some("01-2024"), None);
    let json = serde_json::to_value(TotalCostResponse::new(1998, query)).unwrap();

    assert_eq!(json["total_cost"], 1998);
    assert_eq!(json["user_id"], "user123");
    assert_eq!(json["start_date"], "01-2024");
    assert!(json.get("service_name").is_none());
    assert!(json.get("end_date").is_none());
}
