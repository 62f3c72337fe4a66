use mockapi_core::{
    EndpointDetails, EndpointKey, EndpointStore, MissingRow, ResponseHeader, StoreError,
};

#[test]
fn create_then_lookup_returns_id() {
    let store = EndpointStore::open_in_memory().unwrap();

    let id = store.create_group("users").unwrap();
    assert!(id > 0);
    assert_eq!(store.lookup_group_id("users").unwrap(), Some(id));
}

#[test]
fn lookup_of_unknown_group_is_none() {
    let store = EndpointStore::open_in_memory().unwrap();
    assert_eq!(store.lookup_group_id("never-created").unwrap(), None);
}

#[test]
fn duplicate_group_name_is_rejected_and_leaves_one_row() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("users").unwrap();

    let err = store.create_group("users").unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
    assert_eq!(count_groups_named(&store, "users"), 1);
}

#[test]
fn blank_group_name_is_rejected_before_sql() {
    let store = EndpointStore::open_in_memory().unwrap();

    let err = store.create_group("   ").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.list_groups().unwrap().is_empty());
}

#[test]
fn rename_group_keeps_id_and_endpoints() {
    let store = EndpointStore::open_in_memory().unwrap();
    let id = store.create_group("old").unwrap();
    store
        .create_endpoint("old", &EndpointDetails::new("/a", "GET", "json", "{}"))
        .unwrap();

    store.rename_group("old", "new").unwrap();

    assert_eq!(store.lookup_group_id("old").unwrap(), None);
    assert_eq!(store.lookup_group_id("new").unwrap(), Some(id));
    assert_eq!(store.list_endpoints("new").unwrap().len(), 1);
}

#[test]
fn rename_group_to_taken_name_is_constraint_violation() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("a").unwrap();
    store.create_group("b").unwrap();

    let err = store.rename_group("a", "b").unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
    assert!(store.get_group("a").unwrap().is_some());
}

#[test]
fn rename_missing_group_is_not_found() {
    let store = EndpointStore::open_in_memory().unwrap();

    let err = store.rename_group("ghost", "spirit").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(MissingRow::Group(name)) if name == "ghost"));
    assert!(store.list_groups().unwrap().is_empty());
}

#[test]
fn delete_missing_group_changes_nothing() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("kept").unwrap();

    let err = store.delete_group("ghost").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.list_groups().unwrap().len(), 1);
}

#[test]
fn delete_group_cascades_to_endpoints_and_headers() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("G").unwrap();
    store.create_group("other").unwrap();
    store
        .create_endpoint("G", &EndpointDetails::new("/a", "GET", "json", "{}"))
        .unwrap();
    store
        .create_endpoint("other", &EndpointDetails::new("/b", "GET", "json", "{}"))
        .unwrap();
    store
        .add_response_header(&EndpointKey::new("/a", "GET"), &ResponseHeader::from(("X", "1")))
        .unwrap();
    store
        .add_response_header(&EndpointKey::new("/b", "GET"), &ResponseHeader::new("Y", "2"))
        .unwrap();

    store.delete_group("G").unwrap();

    assert_eq!(count_rows(&store, "Groups"), 1);
    assert_eq!(count_rows(&store, "EndpointDetails"), 1);
    assert_eq!(count_rows(&store, "ResponseHeaders"), 1);
    assert!(store
        .get_endpoint(&EndpointKey::new("/a", "GET"))
        .unwrap()
        .is_none());
}

#[test]
fn list_groups_follows_creation_order() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("zeta").unwrap();
    store.create_group("alpha").unwrap();

    let names: Vec<_> = store
        .list_groups()
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(names, ["zeta", "alpha"]);
}

fn count_groups_named(store: &EndpointStore, name: &str) -> i64 {
    store
        .connection()
        .query_row("SELECT COUNT(*) FROM Groups WHERE name = ?1;", [name], |row| {
            row.get(0)
        })
        .unwrap()
}

fn count_rows(store: &EndpointStore, table: &str) -> i64 {
    store
        .connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })
        .unwrap()
}
