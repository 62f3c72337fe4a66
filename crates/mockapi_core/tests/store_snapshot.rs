use mockapi_core::{EndpointDetails, EndpointStore, ResponseHeader};
use serde_json::json;

#[test]
fn snapshot_nests_groups_endpoints_and_headers() {
    let store = EndpointStore::open_in_memory().unwrap();
    store.create_group("users").unwrap();
    store.create_group("empty").unwrap();
    let details = EndpointDetails::new("/users", "GET", "json", "[]").with_description("list");
    store.create_endpoint("users", &details).unwrap();
    store
        .add_response_header(&details.key(), &ResponseHeader::new("X-Total", "0"))
        .unwrap();

    let snapshot = store.snapshot().unwrap();

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].name, "users");
    assert_eq!(snapshot[0].endpoints[0].details, details);
    assert_eq!(
        snapshot[0].endpoints[0].headers,
        [ResponseHeader::new("X-Total", "0")]
    );
    assert!(snapshot[1].endpoints.is_empty());
}

#[test]
fn snapshot_serializes_with_column_vocabulary() {
    let store = EndpointStore::open_in_memory().unwrap();
    let group_id = store.create_group("users").unwrap();
    let details = EndpointDetails::new("/users", "POST", "json", r#"{"ok":true}"#);
    store.create_endpoint("users", &details).unwrap();

    let value = serde_json::to_value(store.snapshot().unwrap()).unwrap();

    assert_eq!(
        value,
        json!([{
            "id": group_id,
            "name": "users",
            "endpoints": [{
                "endpoint": "/users",
                "description": null,
                "httpMethod": "POST",
                "responseBodyType": "json",
                "responseBody": "{\"ok\":true}",
                "headers": []
            }]
        }])
    );
}

#[test]
fn endpoint_details_deserialize_from_caller_json() {
    let details: EndpointDetails = serde_json::from_value(json!({
        "endpoint": "/ping",
        "description": "health",
        "httpMethod": "GET",
        "responseBodyType": "text",
        "responseBody": "pong"
    }))
    .unwrap();

    assert_eq!(
        details,
        EndpointDetails::new("/ping", "GET", "text", "pong").with_description("health")
    );
}
