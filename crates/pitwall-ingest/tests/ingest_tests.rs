//! End-to-end ingestion tests against mock catalog and document-store APIs.
//!
//! The document store side runs through the client's emulator mode, so no
//! credentials are involved.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pitwall_firestore::{FirestoreClient, FirestoreConfig};
use pitwall_ingest::Ingestor;
use pitwall_youtube::{YouTubeClient, YouTubeConfig};

const GOOD_DESCRIPTION: &str = "\
PB at Buttonwillow!

===
track: Buttonwillow
configuration: CW13
date: 06/03/2025
car: Hyperion
tag: v3
time: 1:12.123
driver: driver@example.com
===
";

const BAD_DATE_DESCRIPTION: &str = "\
===
track: Tsukuba
date: 2025-06-03
car: Hyperion
time: 58.2
driver: driver@example.com
===
";

fn youtube_client(base_url: String) -> Arc<YouTubeClient> {
    Arc::new(
        YouTubeClient::new(YouTubeConfig {
            api_key: "test-key".to_string(),
            base_url,
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        })
        .unwrap(),
    )
}

fn firestore_client(emulator: &MockServer) -> Arc<FirestoreClient> {
    Arc::new(
        FirestoreClient::new(FirestoreConfig {
            project_id: "demo-pitwall".to_string(),
            database_id: "(default)".to_string(),
            emulator_host: Some(emulator.address().to_string()),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        })
        .unwrap(),
    )
}

fn search_item(video_id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": {"videoId": video_id},
        "snippet": {"title": title}
    })
}

fn video_item(video_id: &str, title: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": video_id,
        "snippet": {"title": title, "description": description}
    })
}

#[tokio::test]
async fn ingest_upserts_one_record_and_tolerates_bad_items() {
    let youtube = MockServer::start().await;
    let store = MockServer::start().await;

    // Five uploads in the window: three lap-time attempts (one valid, one
    // without a metadata block, one with a malformed date), one raw footage
    // upload, and one unrecognized category.
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                search_item("vid-good", "Time Attack - Buttonwillow Run"),
                search_item("vid-nometa", "Time Attack - Laguna Practice"),
                search_item("vid-baddate", "Time Attack - Tsukuba Run"),
                search_item("vid-raw", "Raw Footage - Grid B Session"),
                search_item("vid-vlog", "Shop Day Vlog"),
            ]
        })))
        .expect(1)
        .mount(&youtube)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                video_item("vid-good", "Time Attack - Buttonwillow Run", GOOD_DESCRIPTION),
                video_item("vid-nometa", "Time Attack - Laguna Practice", "no block here"),
                video_item("vid-baddate", "Time Attack - Tsukuba Run", BAD_DATE_DESCRIPTION),
            ]
        })))
        .expect(1)
        .mount(&youtube)
        .await;

    // Driver lookup by email.
    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/demo-pitwall/databases/(default)/documents:runQuery",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "document": {
                    "name": "projects/demo-pitwall/databases/(default)/documents/User/user-1",
                    "fields": {"email": {"stringValue": "driver@example.com"}}
                }
            }
        ])))
        .mount(&store)
        .await;

    // The upsert lands exactly once, keyed by the video id.
    Mock::given(method("PATCH"))
        .and(path(
            "/v1/projects/demo-pitwall/databases/(default)/documents/TrackTime/vid-good",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/demo-pitwall/databases/(default)/documents/TrackTime/vid-good"
        })))
        .expect(1)
        .mount(&store)
        .await;

    let ingestor = Ingestor::new(
        youtube_client(youtube.uri()),
        firestore_client(&store),
        "UC-test-channel",
    );

    let summary = ingestor.ingest(Duration::from_secs(6 * 3600)).await.unwrap();

    assert_eq!(summary.videos_found, 5);
    assert_eq!(summary.upserted, 1);
    assert_eq!(summary.skipped, 2);

    // Inspect the upserted fields.
    let requests = store.received_requests().await.unwrap();
    let patches: Vec<_> = requests
        .iter()
        .filter(|r| r.method.to_string() == "PATCH")
        .collect();
    assert_eq!(patches.len(), 1, "only the valid upload may be upserted");

    let body: serde_json::Value = serde_json::from_slice(&patches[0].body).unwrap();
    let fields = &body["fields"];
    assert_eq!(fields["track"]["stringValue"], "buttonwillow");
    assert_eq!(fields["time"]["doubleValue"], 72.123);
    assert_eq!(
        fields["proof"]["stringValue"],
        "https://www.youtube.com/watch?v=vid-good"
    );
    assert_eq!(fields["userId"]["stringValue"], "user-1");
    assert_eq!(fields["car"]["stringValue"], "Hyperion");
}

#[tokio::test]
async fn ingest_with_no_uploads_is_a_no_op() {
    let youtube = MockServer::start().await;
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&youtube)
        .await;

    let ingestor = Ingestor::new(
        youtube_client(youtube.uri()),
        firestore_client(&store),
        "UC-test-channel",
    );

    let summary = ingestor.ingest(Duration::from_secs(6 * 3600)).await.unwrap();
    assert_eq!(summary.videos_found, 0);
    assert_eq!(summary.upserted, 0);
    assert!(store.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn catalog_failure_aborts_and_surfaces() {
    let youtube = MockServer::start().await;
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&youtube)
        .await;

    let ingestor = Ingestor::new(
        youtube_client(youtube.uri()),
        firestore_client(&store),
        "UC-test-channel",
    );

    let err = ingestor.ingest(Duration::from_secs(3600)).await.unwrap_err();
    assert!(matches!(err, pitwall_ingest::IngestError::YouTube(_)));
}

#[tokio::test]
async fn unknown_driver_skips_item_without_aborting() {
    let youtube = MockServer::start().await;
    let store = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [search_item("vid-good", "Time Attack - Buttonwillow Run")]
        })))
        .mount(&youtube)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                video_item("vid-good", "Time Attack - Buttonwillow Run", GOOD_DESCRIPTION)
            ]
        })))
        .mount(&youtube)
        .await;

    // No matching user: runQuery returns a read-time-only row.
    Mock::given(method("POST"))
        .and(path(
            "/v1/projects/demo-pitwall/databases/(default)/documents:runQuery",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"readTime": "2025-06-03T00:00:00Z"}])),
        )
        .mount(&store)
        .await;

    let ingestor = Ingestor::new(
        youtube_client(youtube.uri()),
        firestore_client(&store),
        "UC-test-channel",
    );

    let summary = ingestor.ingest(Duration::from_secs(3600)).await.unwrap();
    assert_eq!(summary.upserted, 0);
    assert_eq!(summary.skipped, 1);
}
