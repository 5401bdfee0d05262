use super::open_temp_db;
use crate::models::dataset::TestDataSet;
use crate::table::parse_csv;
use chrono::Duration;

fn dataset(name: &str, offset_secs: i64) -> TestDataSet {
    let mut ds = TestDataSet::new(name.to_string(), parse_csv("sku\n12345678"));
    ds.created_at += Duration::seconds(offset_secs);
    ds
}

#[test]
fn first_dataset_becomes_active_automatically() {
    let (db, _temp) = open_temp_db();
    assert_eq!(db.datasets.active_id().expect("active"), None);

    let first = dataset("first.csv", 0);
    db.datasets.create(&first).expect("create");
    assert_eq!(db.datasets.active_id().expect("active"), Some(first.id.clone()));

    // A second upload does not steal the active pointer.
    let second = dataset("second.csv", 1);
    db.datasets.create(&second).expect("create");
    assert_eq!(db.datasets.active_id().expect("active"), Some(first.id));
}

#[test]
fn set_active_requires_existing_dataset() {
    let (db, _temp) = open_temp_db();
    let ds = dataset("only.csv", 0);
    db.datasets.create(&ds).expect("create");

    assert!(db.datasets.set_active("no-such-id").is_err());
    db.datasets.set_active(&ds.id).expect("set active");
    assert_eq!(db.datasets.active_id().expect("active"), Some(ds.id));
}

#[test]
fn deleting_active_dataset_reassigns_to_first_remaining() {
    let (db, _temp) = open_temp_db();
    let first = dataset("first.csv", 0);
    let second = dataset("second.csv", 1);
    let third = dataset("third.csv", 2);
    for ds in [&first, &second, &third] {
        db.datasets.create(ds).expect("create");
    }
    db.datasets.set_active(&second.id).expect("set active");

    assert!(db.datasets.delete(&second.id).expect("delete"));
    // First remaining in creation order.
    assert_eq!(db.datasets.active_id().expect("active"), Some(first.id.clone()));

    // Deleting a non-active dataset leaves the pointer alone.
    assert!(db.datasets.delete(&third.id).expect("delete"));
    assert_eq!(db.datasets.active_id().expect("active"), Some(first.id));
}

#[test]
fn deleting_last_dataset_clears_the_pointer() {
    let (db, _temp) = open_temp_db();
    let only = dataset("only.csv", 0);
    db.datasets.create(&only).expect("create");

    assert!(db.datasets.delete(&only.id).expect("delete"));
    assert_eq!(db.datasets.active_id().expect("active"), None);
    assert!(db.datasets.active().expect("active").is_none());
}

#[test]
fn delete_of_missing_dataset_is_a_noop() {
    let (db, _temp) = open_temp_db();
    let only = dataset("only.csv", 0);
    db.datasets.create(&only).expect("create");

    assert!(!db.datasets.delete("no-such-id").expect("delete"));
    assert_eq!(db.datasets.active_id().expect("active"), Some(only.id));
}

#[test]
fn list_is_sorted_by_creation_time() {
    let (db, _temp) = open_temp_db();
    let newer = dataset("newer.csv", 10);
    let older = dataset("older.csv", 0);
    db.datasets.create(&newer).expect("create");
    db.datasets.create(&older).expect("create");

    let names: Vec<String> = db
        .datasets
        .list()
        .expect("list")
        .into_iter()
        .map(|ds| ds.name)
        .collect();
    assert_eq!(names, vec!["older.csv", "newer.csv"]);
}
