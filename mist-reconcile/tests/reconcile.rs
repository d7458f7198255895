//! End-to-end reconciliations over HTTP against a mock Mist API.

mod common;

use common::{MockMist, ORG};
use mist_client::{ClientError, Session};
use mist_reconcile::{Action, Manifest, NamePolicy, ReconcileError, apply};
use serde_json::{Value, json};

fn manifest(value: Value) -> Manifest {
    serde_json::from_value(value).expect("Invalid manifest")
}

#[tokio::test]
async fn test_rejected_token_aborts_before_listing() {
    let mist = MockMist::start_with_self_status(401).await;

    let err = Session::connect(mist.config()).await.err().expect("connect should fail");
    assert!(matches!(err, ClientError::Unauthorized));

    let requests = mist.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/v1/self");
}

#[tokio::test]
async fn test_token_header_reaches_server() {
    let mist = MockMist::start().await;
    mist.session().await;

    let requests = mist.server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    assert_eq!(auth, Some("Token test-token"));
}

#[tokio::test]
async fn test_absent_site_twice() {
    let mist = MockMist::start().await;
    let sites = format!("orgs/{ORG}/sites");
    mist.respond("GET", &sites, 200, json!([{"name": "katy", "id": "s-1"}]), Some(1)).await;
    mist.respond("GET", &sites, 200, json!([]), None).await;
    mist.respond("DELETE", "sites/s-1", 200, json!({"id": "s-1"}), None).await;
    let session = mist.session().await;
    let absent = manifest(json!({"kind": "site", "state": "absent", "name": "katy"}));

    let first = apply(&session, &absent, NamePolicy::LastWins).await.unwrap();
    let second = apply(&session, &absent, NamePolicy::LastWins).await.unwrap();

    assert!(first.changed);
    assert_eq!(first.action, Action::Deleted);
    assert_eq!(
        serde_json::to_value(&second).unwrap(),
        json!({"changed": false, "data": "site does not exist, exiting"})
    );
    assert_eq!(mist.mutations().await.len(), 1);
}

#[tokio::test]
async fn test_present_wlan_created_then_updated() {
    let mist = MockMist::start().await;
    let wlans = format!("orgs/{ORG}/wlans");
    mist.respond("GET", &wlans, 200, json!([]), Some(1)).await;
    mist.respond("GET", &wlans, 200, json!([{"ssid": "Yorke", "id": "w-1"}]), None).await;
    mist.respond("POST", &wlans, 200, json!({"ssid": "Yorke", "id": "w-1"}), None).await;
    mist.respond("PUT", &format!("{wlans}/w-1"), 200, json!({"ssid": "Yorke", "id": "w-1"}), None).await;
    let session = mist.session().await;
    let present = manifest(json!({
        "kind": "wlan",
        "ssid": "Yorke",
        "auth": {"type": "psk", "psk": "correct-horse"},
    }));

    let first = apply(&session, &present, NamePolicy::LastWins).await.unwrap();
    let second = apply(&session, &present, NamePolicy::LastWins).await.unwrap();

    assert_eq!(first.action, Action::Created);
    assert_eq!(second.action, Action::Updated);

    let mutations = mist.mutations().await;
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0].0, "POST");
    assert_eq!(mutations[1].0, "PUT");
    assert_eq!(mutations[1].1, format!("/api/v1/{wlans}/w-1"));
    assert_eq!(
        mutations[1].2,
        json!({"ssid": "Yorke", "auth": {"type": "psk", "psk": "correct-horse"}})
    );
}

#[tokio::test]
async fn test_org_wlan_delete_nonexistent() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/wlans"), 200, json!([]), None).await;
    let session = mist.session().await;

    let result = apply(
        &session,
        &manifest(json!({"kind": "wlan", "state": "absent", "ssid": "Yorke"})),
        NamePolicy::LastWins,
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"changed": false, "data": "wlan does not exist, exiting"})
    );
    assert!(mist.mutations().await.is_empty());
}

#[tokio::test]
async fn test_site_group_membership_payload() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/sites"), 200, json!([{"name": "katy", "id": "s-1"}]), None)
        .await;
    mist.respond(
        "GET",
        &format!("orgs/{ORG}/sitegroups"),
        200,
        json!([{"name": "Burnt Tomato", "id": "abc-123"}]),
        None,
    )
    .await;
    mist.respond("PUT", "sites/s-1", 200, json!({"id": "s-1"}), None).await;
    let session = mist.session().await;

    apply(
        &session,
        &manifest(json!({"kind": "site", "name": "katy", "sitegroups": ["Burnt Tomato"]})),
        NamePolicy::LastWins,
    )
    .await
    .unwrap();

    let mutations = mist.mutations().await;
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].2, json!({"sitegroup_ids": ["abc-123"]}));
}

#[tokio::test]
async fn test_site_attach_failure_is_partial() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/sites"), 200, json!([]), None).await;
    mist.respond("POST", &format!("orgs/{ORG}/sites"), 200, json!({"name": "katy", "id": "s-9"}), None)
        .await;
    mist.respond(
        "GET",
        &format!("orgs/{ORG}/sitegroups"),
        200,
        json!([{"name": "g", "id": "g-1"}]),
        None,
    )
    .await;
    mist.respond("PUT", "sites/s-9", 500, json!({"detail": "internal"}), None).await;
    let session = mist.session().await;

    let err = apply(
        &session,
        &manifest(json!({"kind": "site", "name": "katy", "sitegroups": ["g"]})),
        NamePolicy::LastWins,
    )
    .await
    .unwrap_err();

    match err {
        ReconcileError::PartialFailure { created, source, .. } => {
            assert_eq!(created["id"], json!("s-9"));
            assert!(matches!(*source, ReconcileError::Upstream { status: 500, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unresolved_site_name_stops_before_mutation() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/sites"), 200, json!([{"name": "katy", "id": "s-1"}]), None)
        .await;
    let session = mist.session().await;

    let err = apply(
        &session,
        &manifest(json!({"kind": "wlan", "ssid": "Yorke", "site_name": "Nowhere"})),
        NamePolicy::LastWins,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ReconcileError::ReferenceNotFound { kind: "site", .. }));
    assert!(err.to_string().contains("Nowhere"));
    assert!(mist.mutations().await.is_empty());
}

#[tokio::test]
async fn test_switch_config_put_body() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/sites"), 200, json!([{"name": "katy", "id": "s-1"}]), None)
        .await;
    mist.respond(
        "GET",
        &format!("orgs/{ORG}/inventory"),
        200,
        json!([{"name": "Katy-SW1", "id": "d-1", "type": "switch"}]),
        None,
    )
    .await;
    mist.respond("PUT", "sites/s-1/devices/d-1", 200, json!({"id": "d-1"}), None).await;
    let session = mist.session().await;

    let yaml = r#"
kind: switch
name: Katy-SW1
site_name: katy
networks:
  - name: home
    vlan_id: "91"
  - name: devops
    vlan_id: "101"
port_config:
  - name: ge-0/0/1
    profile: home
port_profiles:
  - name: home
    mode: access
    port_network: home
"#;
    let switch: Manifest = serde_yaml::from_str(yaml).unwrap();

    let result = apply(&session, &switch, NamePolicy::LastWins).await.unwrap();
    assert_eq!(result.action, Action::Updated);

    let requests = mist.server.received_requests().await.unwrap();
    let inventory = requests
        .iter()
        .find(|r| r.url.path() == format!("/api/v1/orgs/{ORG}/inventory"))
        .unwrap();
    assert_eq!(inventory.url.query(), Some("vc=true"));

    let mutations = mist.mutations().await;
    assert_eq!(mutations.len(), 1);
    let (verb, path, body) = &mutations[0];
    assert_eq!(verb, "PUT");
    assert_eq!(path, "/api/v1/sites/s-1/devices/d-1");
    assert_eq!(
        body["networks"],
        json!({"home": {"vlan_id": "91"}, "devops": {"vlan_id": "101"}})
    );
    assert_eq!(body["port_config"], json!({"ge-0/0/1": {"usage": "home"}}));
    assert_eq!(body["port_usages"]["home"]["mode"], json!("access"));
    assert!(body.get("site_name").is_none());
    assert!(body.get("port_profiles").is_none());
}

#[tokio::test]
async fn test_listing_error_is_upstream() {
    let mist = MockMist::start().await;
    mist.respond("GET", &format!("orgs/{ORG}/sitegroups"), 403, json!({"detail": "no"}), None).await;
    let session = mist.session().await;

    let err = apply(
        &session,
        &manifest(json!({"kind": "site_group", "name": "east"})),
        NamePolicy::LastWins,
    )
    .await
    .unwrap_err();

    match err {
        ReconcileError::Upstream { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, json!({"detail": "no"}));
        }
        other => panic!("unexpected error: {other}"),
    }
}
