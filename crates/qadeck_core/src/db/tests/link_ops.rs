use super::open_temp_db;
use crate::models::link::{LinkRecord, UpdateLinkRequest};

fn link(name: &str, category: &str) -> LinkRecord {
    LinkRecord::new(
        name.to_string(),
        format!("https://{}.example.com", name.to_lowercase()),
        category.to_string(),
    )
}

#[test]
fn create_get_update_roundtrip() {
    let (db, _temp) = open_temp_db();
    let record = link("Jira", "Tools");
    db.links.create(&record).expect("create");

    let fetched = db.links.get(&record.id).expect("get").expect("exists");
    assert_eq!(fetched, record);

    let updated = db
        .links
        .update(
            &record.id,
            UpdateLinkRequest {
                name: "Jira Cloud".to_string(),
                url: "https://jira.example.com/cloud".to_string(),
                category: "Tracking".to_string(),
            },
        )
        .expect("update")
        .expect("exists");
    assert_eq!(updated.id, record.id);
    assert_eq!(updated.name, "Jira Cloud");
    assert_eq!(updated.category, "Tracking");
    assert_eq!(updated.created_at, record.created_at);
}

#[test]
fn update_missing_link_returns_none() {
    let (db, _temp) = open_temp_db();
    let result = db
        .links
        .update(
            "no-such-id",
            UpdateLinkRequest {
                name: "x".to_string(),
                url: "https://x.example.com".to_string(),
                category: String::new(),
            },
        )
        .expect("update");
    assert!(result.is_none());
}

#[test]
fn duplicate_id_is_rejected() {
    let (db, _temp) = open_temp_db();
    let record = link("Jira", "Tools");
    db.links.create(&record).expect("create");
    let err = db.links.create(&record).expect_err("duplicate id");
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn list_preserves_insertion_order() {
    let (db, _temp) = open_temp_db();
    let mut first = link("One", "A");
    let mut second = link("Two", "B");
    let mut third = link("Three", "A");
    // Force distinct, ordered creation timestamps.
    first.created_at = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH + chrono::Duration::seconds(1);
    second.created_at = first.created_at + chrono::Duration::seconds(1);
    third.created_at = second.created_at + chrono::Duration::seconds(1);

    db.links.create(&second).expect("create");
    db.links.create(&third).expect("create");
    db.links.create(&first).expect("create");

    let names: Vec<String> = db
        .links
        .list()
        .expect("list")
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["One", "Two", "Three"]);
}

#[test]
fn bulk_delete_skips_missing_ids() {
    let (db, _temp) = open_temp_db();
    let keep = link("Keep", "A");
    let drop_one = link("DropOne", "A");
    let drop_two = link("DropTwo", "B");
    for record in [&keep, &drop_one, &drop_two] {
        db.links.create(record).expect("create");
    }

    let deleted = db
        .links
        .delete_many(&[
            drop_one.id.clone(),
            drop_two.id.clone(),
            "no-such-id".to_string(),
        ])
        .expect("delete");
    assert_eq!(deleted, 2);

    let remaining = db.links.list().expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn rename_category_touches_only_matching_links() {
    let (db, _temp) = open_temp_db();
    let a1 = link("A1", "Old");
    let a2 = link("A2", "Old");
    let b = link("B", "Other");
    for record in [&a1, &a2, &b] {
        db.links.create(record).expect("create");
    }

    let renamed = db.links.rename_category("Old", "New").expect("rename");
    assert_eq!(renamed, 2);

    let categories: Vec<String> = db
        .links
        .list()
        .expect("list")
        .into_iter()
        .map(|l| l.category)
        .collect();
    assert!(categories.contains(&"New".to_string()));
    assert!(categories.contains(&"Other".to_string()));
    assert!(!categories.contains(&"Old".to_string()));
}

#[test]
fn uncategorized_selector_reaches_blank_category_links() {
    let (db, _temp) = open_temp_db();
    let orphan = link("Orphan", "");
    let tool = link("Jira", "Tools");
    db.links.create(&orphan).expect("create");
    db.links.create(&tool).expect("create");

    let ids = db.links.ids_in_category("Uncategorized").expect("ids");
    assert_eq!(ids, vec![orphan.id.clone()]);

    let renamed = db
        .links
        .rename_category("Uncategorized", "Inbox")
        .expect("rename");
    assert_eq!(renamed, 1);
    let moved = db.links.get(&orphan.id).expect("get").expect("exists");
    assert_eq!(moved.category, "Inbox");
}

#[test]
fn ids_in_category_matches_exactly() {
    let (db, _temp) = open_temp_db();
    let sites = link("Shop", "Sites");
    let tools = link("Jira", "Tools");
    db.links.create(&sites).expect("create");
    db.links.create(&tools).expect("create");

    let ids = db.links.ids_in_category("Sites").expect("ids");
    assert_eq!(ids, vec![sites.id]);
}
