//! Integration tests for `OverpassClient` and `CafeSearch` using wiremock.

use cafe_core::Coordinate;
use cafe_places::{
    CafeSearch, Category, OverpassClient, PlacesError, PlacesQuery, SearchError, SearchRadii,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests whose Overpass `data` parameter queries the given radius.
struct AroundRadius(u32);

impl Match for AroundRadius {
    fn matches(&self, request: &Request) -> bool {
        let needle = format!("(around:{},", self.0);
        request
            .url
            .query_pairs()
            .any(|(k, v)| k == "data" && v.contains(&needle))
    }
}

fn test_client(server: &MockServer) -> OverpassClient {
    OverpassClient::with_base_url(5, "cafe-test/0.1", &format!("{}/api/interpreter", server.uri()))
        .expect("client construction should not fail")
}

fn center() -> Coordinate {
    Coordinate::new(51.5, -0.12).unwrap()
}

fn query(radius_m: u32) -> PlacesQuery {
    PlacesQuery {
        center: center(),
        radius_m,
        category: Category::cafe(),
    }
}

fn cafe_element(id: i64, name: Option<&str>) -> serde_json::Value {
    let mut tags = serde_json::Map::new();
    tags.insert("amenity".to_owned(), json!("cafe"));
    if let Some(name) = name {
        tags.insert("name".to_owned(), json!(name));
    }
    json!({"type": "node", "id": id, "lat": 51.5, "lon": -0.12, "tags": tags})
}

#[tokio::test]
async fn fetch_parses_elements() {
    let server = MockServer::start().await;
    let body = json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": 51.501,
                "lon": -0.121,
                "tags": {
                    "amenity": "cafe",
                    "name": "Blue Cup",
                    "addr:street": "Main St",
                    "addr:housenumber": "12"
                }
            },
            {
                "type": "way",
                "id": 2,
                "center": {"lat": 51.502, "lon": -0.122},
                "tags": {"amenity": "cafe"}
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/api/interpreter"))
        .and(AroundRadius(1000))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let records = test_client(&server)
        .fetch(&query(1000))
        .await
        .expect("should parse elements");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "1");
    assert_eq!(records[1].element_type, "way");
    assert_eq!(records[1].position(), (Some(51.502), Some(-0.122)));
}

#[tokio::test]
async fn fetch_maps_server_error_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch(&query(1000)).await;

    assert!(
        matches!(result, Err(PlacesError::UnexpectedStatus { status: 504, .. })),
        "expected UnexpectedStatus(504), got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_surfaces_runtime_remark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [],
            "remark": "runtime error: Query timed out in \"query\" at line 1 after 25 seconds."
        })))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch(&query(1000)).await;

    assert!(matches!(result, Err(PlacesError::Api(ref msg)) if msg.contains("timed out")));
}

#[tokio::test]
async fn fetch_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch(&query(1000)).await;

    assert!(matches!(result, Err(PlacesError::Deserialize { .. })));
}

#[tokio::test]
async fn search_falls_back_to_broad_radius() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(AroundRadius(1000))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": []})))
        .expect(1)
        .mount(&server)
        .await;

    let broad: Vec<_> = (1..=7)
        .map(|id| cafe_element(id, Some(&format!("Cafe {id}"))))
        .collect();
    Mock::given(method("GET"))
        .and(AroundRadius(5000))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": broad})))
        .expect(1)
        .mount(&server)
        .await;

    let search = CafeSearch::new(
        test_client(&server),
        SearchRadii {
            narrow_m: 1000,
            broad_m: 5000,
        },
        5,
    );
    let cafes = search.search(center()).await.expect("search should succeed");

    assert_eq!(cafes.len(), 5);
    assert_eq!(cafes[0].name, "Cafe 1");
    assert_eq!(cafes[4].id, "5");
}

#[tokio::test]
async fn search_drops_nameless_and_duplicate_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(AroundRadius(1000))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [
                cafe_element(1, Some("Blue Cup")),
                cafe_element(2, None),
                cafe_element(1, Some("Blue Cup Again")),
                cafe_element(3, Some("Red Mug")),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = CafeSearch::new(test_client(&server), SearchRadii::default(), 5);
    let cafes = search.search(center()).await.unwrap();

    let names: Vec<&str> = cafes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Blue Cup", "Red Mug"]);
}

#[tokio::test]
async fn search_failure_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let search = CafeSearch::new(test_client(&server), SearchRadii::default(), 5);
    let result = search.search(center()).await;

    assert!(matches!(
        result,
        Err(SearchError::SearchFailed {
            radius_m: 1000,
            source: PlacesError::UnexpectedStatus { status: 429, .. }
        })
    ));
}
