use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rs_opengraph::{fetch, fetch_with, Error, FetchResponse, HttpFetcher, Intent, Result};
use url::Url;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>はいさいナイト</title>
  <meta name="description" content="All Genre Music Party">
  <meta property="og:type" content="website">
  <meta property="og:image" content="/images/01.png">
</head>
<body></body>
</html>"#;

/// Serves `PAGE` after a fixed delay.
struct SlowFetcher {
    delay: Duration,
}

#[async_trait]
impl HttpFetcher for SlowFetcher {
    async fn get(&self, _url: &Url) -> Result<FetchResponse> {
        tokio::time::sleep(self.delay).await;
        Ok(FetchResponse::html(PAGE))
    }
}

/// Serves a fixed content type and body.
struct StaticFetcher {
    content_type: Option<&'static str>,
    body: &'static str,
}

#[async_trait]
impl HttpFetcher for StaticFetcher {
    async fn get(&self, _url: &Url) -> Result<FetchResponse> {
        Ok(FetchResponse {
            content_type: self.content_type.map(str::to_string),
            body: self.body.into(),
        })
    }
}

#[tokio::test]
async fn fetches_and_extracts_from_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(PAGE)
        .expect(1)
        .create_async()
        .await;

    let url = format!("{}/", server.url());
    let og = match fetch(&url).await {
        Ok(og) => og,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(og.title, "はいさいナイト");
    assert_eq!(og.description, "All Genre Music Party");
    assert_eq!(og.og_type, "website");
    assert_eq!(og.images.len(), 1);
    assert_eq!(og.favicon, "/favicon.ico");
    mock.assert_async().await;
}

#[tokio::test]
async fn fetched_page_resolves_against_source() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PAGE)
        .create_async()
        .await;

    let url = format!("{}/", server.url());
    let mut og = match fetch(&url).await {
        Ok(og) => og,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    assert_eq!(og.source_url, url);
    assert!(og.to_absolute().is_ok());

    let root = server.url();
    assert_eq!(og.images[0].url, format!("{root}/images/01.png"));
    assert_eq!(og.favicon, format!("{root}/favicon.ico"));
}

#[tokio::test]
async fn json_response_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"title":"nope"}"#)
        .create_async()
        .await;

    let err = match fetch(&format!("{}/api", server.url())).await {
        Ok(og) => panic!("expected error, got {og:?}"),
        Err(err) => err,
    };
    assert!(matches!(err, Error::UnsupportedContentType));
    assert_eq!(err.to_string(), "content type must be text/html");
}

#[tokio::test]
async fn custom_fetcher_content_type_is_checked() {
    let fetcher = StaticFetcher {
        content_type: Some("application/json"),
        body: "{}",
    };
    let intent = Intent::default().with_fetcher(Arc::new(fetcher));
    let result = fetch_with("http://example.com/", intent).await;
    assert!(matches!(result, Err(Error::UnsupportedContentType)));
}

#[tokio::test]
async fn undeclared_content_type_is_accepted() {
    let fetcher = StaticFetcher {
        content_type: None,
        body: r#"<meta property="og:site_name" content="Rendered">"#,
    };
    let intent = Intent::default().with_fetcher(Arc::new(fetcher));
    let og = fetch_with("http://example.com/", intent).await.ok();
    assert_eq!(og.map(|og| og.site_name).as_deref(), Some("Rendered"));
}

#[tokio::test]
async fn deadline_longer_than_fetch_succeeds() {
    let intent = Intent::default()
        .with_fetcher(Arc::new(SlowFetcher {
            delay: Duration::from_millis(300),
        }))
        .with_timeout(Duration::from_millis(500));
    let result = fetch_with("http://example.com/", intent).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn deadline_shorter_than_fetch_fails() {
    let intent = Intent::default()
        .with_fetcher(Arc::new(SlowFetcher {
            delay: Duration::from_millis(300),
        }))
        .with_timeout(Duration::from_millis(100));
    match fetch_with("http://example.com/", intent).await {
        Err(err) => {
            assert!(matches!(err, Error::DeadlineExceeded));
            assert!(err.to_string().contains("deadline exceeded"));
        }
        Ok(og) => panic!("expected deadline error, got {og:?}"),
    }
}

#[tokio::test]
async fn malformed_url_is_rejected_before_fetching() {
    let intent = Intent::default().with_fetcher(Arc::new(SlowFetcher {
        delay: Duration::from_secs(60),
    }));
    let result = fetch_with("htt p://xxx/yyy", intent).await;
    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/case/01")
        .with_status(404)
        .create_async()
        .await;

    let result = fetch(&format!("{}/case/01", server.url())).await;
    assert!(matches!(result, Err(Error::Fetch(_))));
}
