mod common;
use common::{app_for, closed_base_url, FakeGraph, TEST_TOKEN};

use fb_ads_mcp::errors::GraphError;
use fb_ads_mcp::services::graph_options::{
    GraphOptions, InsightsOptions, ListOrText, TimeIncrement, TimeRange,
};
use serde_json::json;

const EMPTY_PAGE: &str = r#"{"data":[]}"#;

#[tokio::test]
async fn node_lookup_sends_token_and_comma_joined_fields() {
    let fake = FakeGraph::start(200, r#"{"id":"123","name":"Spring"}"#).await;
    let app = app_for(&fake.base_url);

    let body = app
        .campaigns
        .get_campaign_by_id(
            "123",
            &GraphOptions::with_fields(Some(ListOrText::list(["name", "status"]))),
        )
        .await
        .expect("campaign");

    assert_eq!(body, json!({"id": "123", "name": "Spring"}));
    assert_eq!(fake.last_path(), "/v22.0/123");
    let query = fake.last_query();
    assert_eq!(query.get("access_token").map(String::as_str), Some(TEST_TOKEN));
    assert_eq!(query.get("fields").map(String::as_str), Some("name,status"));
    assert_eq!(query.len(), 2);
}

#[tokio::test]
async fn edge_listing_json_encodes_filters_and_statuses() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);
    let filtering = json!([{"field": "spend", "operator": "GREATER_THAN", "value": 100}]);
    let options = GraphOptions {
        filtering: Some(filtering.clone()),
        effective_status: Some(ListOrText::list(["ACTIVE", "PAUSED"])),
        limit: Some(25),
        after: Some("CURSOR".to_string()),
        ..GraphOptions::default()
    };

    let body = app.ads.get_ads_by_adaccount("act_42", &options).await.expect("ads");

    assert_eq!(body, json!({"data": []}));
    assert_eq!(fake.last_path(), "/v22.0/act_42/ads");
    let query = fake.last_query();
    let decoded: serde_json::Value =
        serde_json::from_str(&query["filtering"]).expect("filtering is JSON");
    assert_eq!(decoded, filtering);
    let statuses: Vec<String> =
        serde_json::from_str(&query["effective_status"]).expect("statuses are JSON");
    assert_eq!(statuses, vec!["ACTIVE", "PAUSED"]);
    assert_eq!(query["limit"], "25");
    assert_eq!(query["after"], "CURSOR");
}

#[tokio::test]
async fn list_ad_accounts_uses_fixed_field_list() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);

    app.ad_accounts.list_ad_accounts().await.expect("accounts");

    assert_eq!(fake.last_path(), "/v22.0/me/adaccounts");
    assert_eq!(fake.last_query()["fields"], "name,account_id,id");
}

#[tokio::test]
async fn account_details_default_to_the_standard_field_set() {
    let fake = FakeGraph::start(200, r#"{"id":"act_1"}"#).await;
    let app = app_for(&fake.base_url);

    app.ad_accounts
        .get_details_of_ad_account("act_1", None)
        .await
        .expect("details");

    let fields = fake.last_query()["fields"].clone();
    assert!(fields.starts_with("name,business_name,"));
    assert!(fields.ends_with(",created_time,id"));
}

#[tokio::test]
async fn insights_prefer_explicit_range_and_drop_all_days() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);
    let options = InsightsOptions {
        date_preset: Some("last_30d".to_string()),
        time_range: Some(TimeRange::new("2024-01-01", "2024-01-31")),
        since: Some("2023-01-01".to_string()),
        time_increment: Some(TimeIncrement::Named("all_days".to_string())),
        breakdowns: Some(ListOrText::list(["age", "gender"])),
        default_summary: Some(true),
        use_account_attribution_setting: Some(false),
        ..InsightsOptions::default()
    };

    app.insights
        .get_campaign_insights("555", options)
        .await
        .expect("insights");

    assert_eq!(fake.last_path(), "/v22.0/555/insights");
    let query = fake.last_query();
    assert!(!query.contains_key("date_preset"));
    assert!(!query.contains_key("since"));
    assert!(!query.contains_key("time_increment"));
    assert!(!query.contains_key("use_account_attribution_setting"));
    let range: serde_json::Value = serde_json::from_str(&query["time_range"]).expect("range");
    assert_eq!(range, json!({"since": "2024-01-01", "until": "2024-01-31"}));
    assert_eq!(query["breakdowns"], "age,gender");
    assert_eq!(query["default_summary"], "true");
    assert_eq!(query["level"], "campaign");
}

#[tokio::test]
async fn insights_level_default_never_overrides_caller() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);
    let options = InsightsOptions {
        level: Some("ad".to_string()),
        date_preset: Some("last_7d".to_string()),
        time_increment: Some(TimeIncrement::Days(1)),
        ..InsightsOptions::default()
    };

    app.insights.get_adset_insights("777", options).await.expect("insights");

    let query = fake.last_query();
    assert_eq!(query["level"], "ad");
    assert_eq!(query["date_preset"], "last_7d");
    assert_eq!(query["time_increment"], "1");
}

#[tokio::test]
async fn activities_send_the_whole_time_window() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);
    let options = GraphOptions {
        time_range: Some(TimeRange::new("2024-02-01", "2024-02-10")),
        since: Some("2024-02-01".to_string()),
        until: Some("2024-02-10".to_string()),
        category: Some("AD".to_string()),
        ..GraphOptions::default()
    };

    app.activities
        .get_activities_by_adset("888", &options)
        .await
        .expect("activities");

    assert_eq!(fake.last_path(), "/v22.0/888/activities");
    let query = fake.last_query();
    assert_eq!(query["since"], "2024-02-01");
    assert_eq!(query["until"], "2024-02-10");
    assert_eq!(query["category"], "AD");
    let range: serde_json::Value = serde_json::from_str(&query["time_range"]).expect("range");
    assert_eq!(range["until"], "2024-02-10");
}

#[tokio::test]
async fn adsets_by_ids_query_the_api_root() {
    let fake = FakeGraph::start(200, r#"{"1":{"id":"1"},"2":{"id":"2"}}"#).await;
    let app = app_for(&fake.base_url);

    let body = app
        .adsets
        .get_adsets_by_ids(
            &["1".to_string(), "2".to_string()],
            &GraphOptions::with_fields(Some(ListOrText::list(["name"]))),
        )
        .await
        .expect("adsets");

    assert_eq!(body["2"]["id"], "2");
    assert_eq!(fake.last_path(), "/v22.0/");
    let query = fake.last_query();
    assert_eq!(query["ids"], "1,2");
    assert_eq!(query["fields"], "name");
}

#[tokio::test]
async fn creatives_edge_path() {
    let fake = FakeGraph::start(200, EMPTY_PAGE).await;
    let app = app_for(&fake.base_url);

    app.creatives
        .get_ad_creatives_by_ad_id("999", &GraphOptions::default())
        .await
        .expect("creatives");

    assert_eq!(fake.last_path(), "/v22.0/999/adcreatives");
    assert_eq!(fake.last_query().len(), 1);
}

#[tokio::test]
async fn pagination_url_is_fetched_without_added_parameters() {
    let fake = FakeGraph::start(200, r#"{"data":[{"id":"3"}]}"#).await;
    let app = app_for(&fake.base_url);
    let next = format!(
        "{}/act_1/ads?access_token=cursor-token&limit=2&after=QVFI",
        fake.base_url
    );

    let body = app
        .insights
        .fetch_pagination_url(&next)
        .await
        .expect("next page");

    assert_eq!(body, json!({"data": [{"id": "3"}]}));
    assert_eq!(
        fake.last_target(),
        "/v22.0/act_1/ads?access_token=cursor-token&limit=2&after=QVFI"
    );
}

#[tokio::test]
async fn structured_error_body_becomes_api_error() {
    let fake = FakeGraph::start(
        400,
        r#"{"error":{"message":"Invalid token","type":"OAuthException","code":190}}"#,
    )
    .await;
    let app = app_for(&fake.base_url);

    let err = app
        .ads
        .get_ad_by_id("1", None)
        .await
        .expect_err("api error");

    match err {
        GraphError::Api(detail) => {
            assert_eq!(detail.status, 400);
            assert_eq!(detail.message, "Invalid token");
            assert_eq!(detail.error_type, "OAuthException");
            assert_eq!(detail.code, 190);
            assert_eq!(detail.subcode, None);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn pagination_errors_are_normalized_too() {
    let fake = FakeGraph::start(
        400,
        r#"{"error":{"message":"Expired cursor","type":"GraphMethodException","code":100,"error_subcode":33}}"#,
    )
    .await;
    let app = app_for(&fake.base_url);

    let err = app
        .insights
        .fetch_pagination_url(&format!("{}/act_1/insights?after=x", fake.base_url))
        .await
        .expect_err("api error");

    match err {
        GraphError::Api(detail) => assert_eq!(detail.subcode, Some(33)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unstructured_error_body_becomes_http_status_error() {
    let fake = FakeGraph::start(503, "upstream unavailable").await;
    let app = app_for(&fake.base_url);

    let err = app
        .campaigns
        .get_campaigns_by_adaccount("act_1", &GraphOptions::default())
        .await
        .expect_err("status error");

    assert!(matches!(err, GraphError::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let fake = FakeGraph::start(200, "<html>not json</html>").await;
    let app = app_for(&fake.base_url);

    let err = app.ads.get_ad_by_id("1", None).await.expect_err("decode");

    assert!(matches!(err, GraphError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error_without_the_token() {
    let base = closed_base_url().await;
    let app = app_for(&base);

    let err = app.ads.get_ad_by_id("1", None).await.expect_err("transport");

    assert!(matches!(err, GraphError::Transport { .. }));
    assert!(!err.to_string().contains(TEST_TOKEN));
}
