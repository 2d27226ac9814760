use fintrack_core::{storage::RecordSource, CoreError};
use fintrack_domain::{Bill, BillFrequency, Frequency, Income, UserRecords};
use fintrack_storage_json::{load_records_from_path, save_records_to_path, JsonRecordStore};
use std::fs;
use tempfile::tempdir;

fn sample(user: &str) -> UserRecords {
    let mut records = UserRecords::new(user, 640.0);
    records
        .incomes
        .push(Income::new("Salary", 2100.0, "2025-05-15", Frequency::Monthly));
    records
        .bills
        .push(Bill::new("Rent", 950.0, "2025-05-01", BillFrequency::Monthly));
    records
}

#[test]
fn json_store_can_save_and_load_records() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().join("records")).expect("create store");

    let records = sample("alice");
    let path = store.save_records(&records).expect("save records");
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));

    let loaded = store.load_records("alice").expect("load records");
    assert_eq!(loaded, records);
    assert_eq!(store.list_users().expect("list users"), vec!["alice"]);
}

#[test]
fn missing_user_is_reported() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");

    let err = store.load_records("ghost").expect_err("no records");
    assert!(matches!(err, CoreError::RecordsNotFound(ref user) if user == "ghost"));
}

#[test]
fn records_without_user_id_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");

    let err = store
        .save_records(&UserRecords::default())
        .expect_err("blank user id");
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn delete_removes_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");
    store.save_records(&sample("bob")).expect("save");

    assert!(store.delete_records("bob").expect("delete"));
    assert!(!store.delete_records("bob").expect("second delete"));
    assert!(store.list_users().expect("list").is_empty());
}

#[test]
fn snapshots_tolerate_store_documents_with_gaps() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");
    let raw = r#"{
        "startingBalance": 100,
        "incomes": [{ "id": "i1", "name": "Pay", "amount": 50 }],
        "expenses": [{ "id": "e1", "name": "Lunch", "amount": 12, "date": "garbage" }]
    }"#;
    fs::write(store.records_path("carol"), raw).expect("write snapshot");

    let loaded = store.load_records("carol").expect("load");
    assert_eq!(loaded.user_id, "carol");
    assert_eq!(loaded.incomes[0].date, None);
    assert_eq!(loaded.expenses[0].date.as_deref(), Some("garbage"));
    assert!(loaded.bills.is_empty());
}

#[test]
fn path_helpers_round_trip_and_leave_no_temp_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("snapshot.json");
    let records = sample("dave");

    save_records_to_path(&records, &path).expect("save");
    assert!(!path.with_extension("json.tmp").exists());
    let loaded = load_records_from_path(&path).expect("load");
    assert_eq!(loaded, records);
}

#[test]
fn corrupt_snapshot_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "[1, 2").expect("write");

    let err = load_records_from_path(&path).expect_err("corrupt");
    assert!(matches!(err, CoreError::Serde(_)));
}

#[test]
fn user_ids_differing_only_in_case_stay_separate() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");

    store
        .save_records(&UserRecords::new("AbC123", 111.0))
        .expect("save upper");
    store
        .save_records(&UserRecords::new("abc123", 999.0))
        .expect("save lower");

    let upper = store.load_records("AbC123").expect("load upper");
    assert_eq!(upper.user_id, "AbC123");
    assert_eq!(upper.starting_balance, 111.0);
    let lower = store.load_records("abc123").expect("load lower");
    assert_eq!(lower.starting_balance, 999.0);

    assert_eq!(
        store.list_users().expect("list users"),
        vec!["AbC123".to_string(), "abc123".to_string()]
    );
}

#[test]
fn unusual_user_ids_round_trip_through_list_users() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");
    store
        .save_records(&UserRecords::new("team/ops user_1", 5.0))
        .expect("save");
    fs::write(dir.path().join("Stray.json"), "{}").expect("write stray file");

    assert_eq!(store.list_users().expect("list"), vec!["team/ops user_1"]);
    let path = store.records_path("team/ops user_1");
    assert_eq!(path.parent(), Some(dir.path()));
}
