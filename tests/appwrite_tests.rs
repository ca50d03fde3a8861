// Appwrite client tests against a mock server

use mockito::{Matcher, Server, ServerGuard};
use pandal_route::models::{Area, CreatePandalRequest, CrowdLevel, PandalQuery};
use pandal_route::services::{AppwriteClient, AppwriteCollections, AppwriteError};
use serde_json::json;

const DOCUMENTS_PATH: &str = "/databases/test_db/collections/pandals/documents";

fn client_for(server: &ServerGuard) -> AppwriteClient {
    AppwriteClient::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "test_db".to_string(),
        AppwriteCollections {
            pandals: "pandals".to_string(),
        },
    )
    .unwrap()
}

fn kumartuli_document() -> serde_json::Value {
    json!({
        "$id": "6502f1c0a1b2",
        "$collectionId": "pandals",
        "$createdAt": "2024-10-01T10:00:00.000+00:00",
        "slug": "kumartuli-park",
        "name": "Kumartuli Park",
        "description": "Idol makers' quarter",
        "address": "Rabindra Sarani, Kumartuli",
        "latitude": 22.6007,
        "longitude": 88.3606,
        "rating": 4.6,
        "crowdLevel": "medium-high",
        "area": "north"
    })
}

#[tokio::test]
async fn test_list_pandals_skips_invalid_documents() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(Matcher::Any)
        .match_header("x-appwrite-key", "test_key")
        .match_header("x-appwrite-project", "test_project")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 3,
                "documents": [
                    kumartuli_document(),
                    { "$id": "broken", "name": "No coordinates" },
                    { "$id": "off-map", "name": "Off map", "latitude": 95.0, "longitude": 88.0 }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let page = client.list_pandals(&PandalQuery::default()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);

    let pandal = &page.items[0];
    assert_eq!(pandal.slug, "kumartuli-park");
    assert_eq!(pandal.crowd_level, CrowdLevel::MediumHigh);
    assert_eq!(pandal.area, Area::North);
    assert!(pandal.created_at.is_some());
}

#[tokio::test]
async fn test_get_pandal_falls_back_to_slug() {
    let mut server = Server::new_async().await;
    let by_id = server
        .mock("GET", format!("{}/kumartuli-park", DOCUMENTS_PATH).as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message":"Document not found","code":404}"#)
        .create_async()
        .await;
    let by_slug = server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "total": 1, "documents": [kumartuli_document()] }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let pandal = client.get_pandal("kumartuli-park").await.unwrap();

    by_id.assert_async().await;
    by_slug.assert_async().await;
    assert_eq!(pandal.id, "6502f1c0a1b2");
}

#[tokio::test]
async fn test_get_pandal_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", format!("{}/missing", DOCUMENTS_PATH).as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"total":0,"documents":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.get_pandal("missing").await;

    assert!(matches!(result, Err(AppwriteError::NotFound(_))));
}

#[tokio::test]
async fn test_unauthorized() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DOCUMENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.list_pandals(&PandalQuery::default()).await;

    assert!(matches!(result, Err(AppwriteError::Unauthorized)));
}

#[tokio::test]
async fn test_create_pandal_classifies_area() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", DOCUMENTS_PATH)
        .match_body(Matcher::PartialJson(json!({
            "data": {
                "slug": "ballygunge-cultural",
                "area": "south",
                "crowdLevel": "high"
            }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "$id": "new-id",
                "slug": "ballygunge-cultural",
                "name": "Ballygunge Cultural",
                "address": "Dover Lane, Ballygunge",
                "latitude": 22.5204,
                "longitude": 88.3650,
                "crowdLevel": "high",
                "area": "south"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let request = CreatePandalRequest {
        name: "Ballygunge Cultural".to_string(),
        slug: None,
        description: String::new(),
        address: "Dover Lane, Ballygunge".to_string(),
        latitude: 22.5204,
        longitude: 88.3650,
        rating: None,
        crowd_level: CrowdLevel::High,
        area: None,
        image_file_ids: vec![],
    };

    let pandal = client.create_pandal(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(pandal.id, "new-id");
    assert_eq!(pandal.area, Area::South);
}
