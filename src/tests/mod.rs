use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::client::{ApiClient, FetchError};
use crate::pipeline::{paginate, Filter, ListingPipeline, SearchOutcome};
use crate::records::{ContentType, Record};
use crate::render::StringContainer;

const BANKING_BODY: &str = r#"[{
    "title": "Clerk Exam",
    "organization": "State Bank",
    "category": "banking",
    "examDate": "2024-06-01"
}]"#;

// minimal single-purpose HTTP endpoint; serves the same canned response for
// every connection until the test runtime shuts down
async fn spawn_stub(status: u16, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    format!("http://{addr}")
}

// like spawn_stub, but also hands the request head back to the test
async fn spawn_capture_stub(body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel::<String>(4);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = [0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string()).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    (format!("http://{addr}"), rx)
}

fn page_of(titles: &[&str]) -> crate::pipeline::Page {
    let records = titles
        .iter()
        .map(|t| Record {
            id: None,
            title: t.to_string(),
            organization: "org".to_string(),
            description: None,
            category: None,
            apply_link: None,
            exam_date: None,
            release_date: None,
            posted_date: None,
            last_date: None,
        })
        .collect();
    paginate(records, 1, 10)
}

#[tokio::test]
async fn fetch_records_parses_the_collection() {
    let base = spawn_stub(200, BANKING_BODY).await;
    let api = ApiClient::new(&base, 5).unwrap();
    let records = api
        .fetch_records(ContentType::Jobs, &Filter::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Clerk Exam");
    assert_eq!(records[0].category.as_deref(), Some("banking"));
}

#[tokio::test]
async fn fetch_records_forwards_category_but_never_the_keyword() {
    let (base, mut requests) = spawn_capture_stub(BANKING_BODY).await;
    let api = ApiClient::new(&base, 5).unwrap();
    let filter = Filter {
        keyword: "clerk".to_string(),
        category: Some("banking".to_string()),
    };
    api.fetch_records(ContentType::AdmitCards, &filter)
        .await
        .unwrap();

    let head = requests.recv().await.unwrap();
    let request_line = head.lines().next().unwrap_or_default().to_string();
    assert!(request_line.starts_with("GET /admit-cards?category=banking"));
    assert!(!request_line.contains("clerk"));
    assert!(!request_line.contains("keyword"));
}

#[tokio::test]
async fn fetch_records_surfaces_non_2xx_statuses() {
    let base = spawn_stub(503, "[]").await;
    let api = ApiClient::new(&base, 5).unwrap();
    let err = api
        .fetch_records(ContentType::Jobs, &Filter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 503 }));
}

#[tokio::test]
async fn fetch_records_rejects_a_malformed_body() {
    let base = spawn_stub(200, r#"{"not": "an array"}"#).await;
    let api = ApiClient::new(&base, 5).unwrap();
    let err = api
        .fetch_records(ContentType::Jobs, &Filter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn fetch_records_reports_an_unreachable_collaborator() {
    // bind then immediately release a port so nothing is listening on it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(&format!("http://{addr}"), 2).unwrap();
    let err = api
        .fetch_records(ContentType::Jobs, &Filter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NetworkUnavailable { .. }));
}

#[tokio::test]
async fn delete_record_accepts_a_2xx_answer() {
    let base = spawn_stub(204, "").await;
    let api = ApiClient::new(&base, 5).unwrap();
    api.delete_record(ContentType::AdmitCards, "65ab")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_record_surfaces_a_missing_record() {
    let base = spawn_stub(404, "").await;
    let api = ApiClient::new(&base, 5).unwrap();
    let err = api
        .delete_record(ContentType::AdmitCards, "65ab")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 404 }));
}

#[tokio::test]
async fn search_renders_matching_records_with_derived_display_strings() {
    let base = spawn_stub(200, BANKING_BODY).await;
    let api = ApiClient::new(&base, 5).unwrap();
    let pipeline = ListingPipeline::new(api);
    let mut container = StringContainer::default();

    let filter = Filter {
        keyword: "clerk".to_string(),
        category: None,
    };
    let outcome = pipeline
        .search(ContentType::Jobs, &filter, 1, 10, &mut container)
        .await;

    match outcome {
        SearchOutcome::Rendered { page } => {
            assert_eq!(page.total_records, 1);
            assert_eq!(page.total_pages, 1);
        }
        other => panic!("expected a rendered page, got {other:?}"),
    }
    assert!(container.contents().contains("Clerk Exam"));
    assert!(container.contents().contains("Banking"));
    assert!(container.contents().contains("Jun 1, 2024"));
    assert!(pipeline.last_rendered().is_some());
}

#[tokio::test]
async fn search_with_no_matches_renders_the_placeholder() {
    let base = spawn_stub(200, BANKING_BODY).await;
    let api = ApiClient::new(&base, 5).unwrap();
    let pipeline = ListingPipeline::new(api);
    let mut container = StringContainer::default();

    let filter = Filter {
        keyword: "nurse".to_string(),
        category: None,
    };
    let outcome = pipeline
        .search(ContentType::Jobs, &filter, 1, 10, &mut container)
        .await;

    assert!(matches!(
        outcome,
        SearchOutcome::Rendered { ref page } if page.total_records == 0
    ));
    assert!(container.contents().contains("No results found"));
    assert!(!container.contents().contains("Clerk Exam"));
}

#[tokio::test]
async fn search_writes_fetch_failures_into_the_container() {
    let base = spawn_stub(500, "").await;
    let api = ApiClient::new(&base, 5).unwrap();
    let pipeline = ListingPipeline::new(api);
    let mut container = StringContainer::default();

    let outcome = pipeline
        .search(ContentType::AnswerKeys, &Filter::default(), 1, 10, &mut container)
        .await;

    assert!(matches!(outcome, SearchOutcome::Failed { .. }));
    assert!(container
        .contents()
        .contains("Error loading answer keys: unexpected HTTP status 500"));
}

#[tokio::test]
async fn a_stale_response_never_overwrites_a_newer_rendering() {
    // no fetch happens here; the race is exercised at the commit boundary
    let api = ApiClient::new("http://127.0.0.1:9", 1).unwrap();
    let pipeline = ListingPipeline::new(api);
    let mut container = StringContainer::default();

    // request #1 is issued, then request #2 supersedes it before it resolves
    let first = pipeline.begin();
    let second = pipeline.begin();

    let newer = pipeline.commit(
        second,
        Ok(page_of(&["fresh result"])),
        ContentType::Jobs,
        &mut container,
    );
    assert!(matches!(newer, SearchOutcome::Rendered { .. }));
    assert!(container.contents().contains("fresh result"));

    // #1 resolves late; it must be discarded, not rendered
    let stale = pipeline.commit(
        first,
        Ok(page_of(&["stale result"])),
        ContentType::Jobs,
        &mut container,
    );
    assert!(matches!(stale, SearchOutcome::Superseded));
    assert!(container.contents().contains("fresh result"));
    assert!(!container.contents().contains("stale result"));
}
