//! Integration tests for PageScrape using wiremock

use pagescrape::{fetch_page, scrape, Scraper, ScrapeError, DEFAULT_USER_AGENT};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Demo</title>
  <meta name="description" content="Demo page">
  <meta content="index, follow" name="robots">
  <script src="https://cdn.example.com/app.js"></script>
  <script>console.log("<p>not a paragraph?</p>")</script>
</head>
<body>
  <H1>Welcome</H1>
  <h2 class='sub'>To the
     demo</h2>
  <p>First paragraph.</p>
  <P class="note">Second
     paragraph.</P >
  <a href="https://x.com">X</a>
  <a class="c" href='/local'>Local link</a>
  <a href="https://x.com">X again</a>
  <img src="https://x.com" alt="same as link">
  <img alt="Logo" src="/logo.png" />
  <img src="/no-alt.png">
</body>
</html>"#;

#[tokio::test]
async fn test_scrape_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .mount(&mock_server)
        .await;

    let report = scrape(&format!("{}/", mock_server.uri())).await.unwrap();

    assert_eq!(report.status_code, 200);
    assert_eq!(report.content_type, Some("text/html".to_string()));
    assert_eq!(report.size, PAGE.len() as u64);
    assert!(report.truncated.is_none());

    let extraction = &report.extraction;
    let headings: Vec<_> = extraction.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(headings, vec!["Welcome", "To the demo"]);

    // The paragraph written inside the inline script is scanned too
    let paragraphs: Vec<_> = extraction
        .paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(
        paragraphs,
        vec!["not a paragraph?", "First paragraph.", "Second paragraph."]
    );

    assert_eq!(extraction.links.len(), 3);
    assert_eq!(extraction.links[1].href, "/local");
    assert_eq!(extraction.links[1].text, "Local link");

    assert_eq!(extraction.images.len(), 3);
    assert_eq!(extraction.images[1].alt, "Logo");
    assert_eq!(extraction.images[2].alt, "none");

    assert_eq!(extraction.scripts.len(), 1);
    assert_eq!(extraction.meta_tags.len(), 2);
    assert_eq!(extraction.meta_tags[1].name, "robots");
    assert_eq!(extraction.meta_tags[1].content, "index, follow");

    assert_eq!(
        extraction.urls.to_vec(),
        vec![
            "https://x.com",
            "/local",
            "/logo.png",
            "/no-alt.png",
            "https://cdn.example.com/app.js",
        ]
    );
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestAgent/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let scraper = Scraper::builder().user_agent("TestAgent/2.0").build();
    let report = scraper
        .scrape(&format!("{}/ua", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(report.status_code, 200);
    assert_eq!(report.extraction.paragraphs[0].text, "ok");
}

#[tokio::test]
async fn test_default_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
        .mount(&mock_server)
        .await;

    let page = fetch_page(&mock_server.uri()).await.unwrap();
    assert_eq!(page.status_code, 200);
    assert_eq!(page.body, "plain");
}

#[tokio::test]
async fn test_accept_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("accept", "text/html, application/xhtml+xml, */*;q=0.8"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<h1>ok</h1>", "text/html"))
        .mount(&mock_server)
        .await;

    let report = scrape(&mock_server.uri()).await.unwrap();
    assert_eq!(report.status_code, 200);
    assert_eq!(report.extraction.headings[0].text, "ok");
}

#[tokio::test]
async fn test_error_status_still_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_raw("<h1>Not Found</h1>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let report = scrape(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap();

    // 4xx is reported, not an error
    assert_eq!(report.status_code, 404);
    assert_eq!(report.extraction.headings[0].text, "Not Found");
}

#[tokio::test]
async fn test_body_size_limit_truncates() {
    let mock_server = MockServer::start().await;

    let body = format!("<p>kept</p>{}", "x".repeat(4096));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(&mock_server)
        .await;

    let scraper = Scraper::builder().max_body_bytes(64).build();
    let report = scraper.scrape(&mock_server.uri()).await.unwrap();

    assert_eq!(report.size, 64);
    assert_eq!(report.truncated, Some(true));
    assert_eq!(report.extraction.paragraphs[0].text, "kept");
}

#[tokio::test]
async fn test_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/html"))
        .mount(&mock_server)
        .await;

    let report = scrape(&mock_server.uri()).await.unwrap();
    assert!(report.extraction.is_empty());
    assert!(report.extraction.urls.is_empty());
}

#[tokio::test]
async fn test_text_report_and_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE, "text/html"))
        .mount(&mock_server)
        .await;

    let scraper = Scraper::builder().preview_chars(15).build();
    let report = scraper.scrape(&mock_server.uri()).await.unwrap();

    let text = scraper.render_text(&report);
    assert!(text.starts_with("=== SCRAPED DATA ===\n\n>> RAW HTML (truncated):\n<!DOCTYPE html>... [TRUNCATED]\n\n"));
    assert!(text.contains("- [link-2] href=\"https://x.com\" text=\"X again\""));
    assert!(text.contains("- [meta-0] name=\"description\" content=\"Demo page\""));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["extraction"]["images"][2]["alt"], "none");
    assert!(json["extraction"].get("raw_html").is_none());
}

#[tokio::test]
async fn test_connect_error() {
    // Nothing listens on port 9 (discard) on test machines
    let result = scrape("http://127.0.0.1:9/").await;
    assert!(matches!(
        result,
        Err(ScrapeError::ConnectError(_)) | Err(ScrapeError::RequestError(_))
    ));
}

/// Serve one response that promises `content_length` bytes but sends only
/// `body`, then drop the connection
fn serve_short_body(content_length: usize, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap_or(0) > 0 {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }

        let mut stream = reader.into_inner();
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n",
            content_length
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body.as_bytes());
        let _ = stream.flush();
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_body_error_before_any_bytes_fails() {
    let url = serve_short_body(100, "");

    let result = scrape(&url).await;
    assert!(matches!(result, Err(ScrapeError::RequestError(_))));
}

#[tokio::test]
async fn test_body_error_after_partial_content_truncates() {
    let url = serve_short_body(100, "<p>partial</p>");

    let report = scrape(&url).await.unwrap();
    assert_eq!(report.truncated, Some(true));
    assert_eq!(report.size, 14);
    assert_eq!(report.extraction.paragraphs[0].text, "partial");
}
