// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use csrf_relay::{Page, PageConfig};
use reqwest::Method;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn page_server(set_cookie: Option<&str>) -> MockServer {
    let server = MockServer::start().await;
    let mut document = ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string("<html><body>ok</body></html>");
    if let Some(cookie) = set_cookie {
        document = document.insert_header("set-cookie", cookie);
    }
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(document)
        .mount(&server)
        .await;
    server
}

async fn open(server: &MockServer) -> Page {
    let config = PageConfig::default().log_requests(false);
    Page::open(&format!("{}/", server.uri()), config).await.unwrap()
}

/// Requests carrying `name` get a 403 so a wrong attach shows up as a status
async fn reject_header(server: &MockServer, name: &'static str) {
    Mock::given(header_exists(name))
        .respond_with(ResponseTemplate::new(403))
        .mount(server)
        .await;
}

#[tokio::test]
async fn same_origin_post_carries_token() {
    let server = page_server(Some("csrftoken=tok123; Path=/")).await;
    Mock::given(method("POST"))
        .and(path("/api/items/"))
        .and(header("x-csrftoken", "tok123"))
        .and(header("cookie", "csrftoken=tok123"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let page = open(&server).await;
    assert_eq!(page.csrf_token().as_deref(), Some("tok123"));
    assert!(page.document().unwrap().is_success());

    let resp = page.post("/api/items/", "name=widget").await.unwrap();
    assert_eq!(resp.status_code(), 201);
}

#[tokio::test]
async fn cross_origin_post_gets_no_token_and_no_cookies() {
    let site = page_server(Some("csrftoken=tok123; Path=/")).await;
    let other = MockServer::start().await;
    reject_header(&other, "x-csrftoken").await;
    reject_header(&other, "cookie").await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&other)
        .await;

    let page = open(&site).await;
    assert!(page.csrf_token().is_some());

    let resp = page
        .post(&format!("{}/collect", other.uri()), "")
        .await
        .unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn missing_cookie_sends_no_header() {
    let server = page_server(None).await;
    reject_header(&server, "x-csrftoken").await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = open(&server).await;
    assert_eq!(page.csrf_token(), None);

    let resp = page.post("/api/", "").await.unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn http_only_token_is_invisible_to_the_page() {
    let server = page_server(Some("csrftoken=hidden; Path=/; HttpOnly")).await;
    reject_header(&server, "x-csrftoken").await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(header("cookie", "csrftoken=hidden"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = open(&server).await;
    assert_eq!(page.csrf_token(), None);

    let resp = page.post("/api/", "").await.unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn explicit_cross_domain_flag_suppresses_header() {
    let server = page_server(Some("csrftoken=tok123; Path=/")).await;
    reject_header(&server, "x-csrftoken").await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = open(&server).await;
    let resp = page
        .request(Method::POST, "/api/")
        .unwrap()
        .cross_domain(true)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn token_is_fixed_at_ready_time() {
    let server = page_server(Some("csrftoken=first; Path=/")).await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "csrftoken=second; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(header("x-csrftoken", "first"))
        .and(header("cookie", "csrftoken=second"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let page = open(&server).await;
    page.post("/login/", "").await.unwrap();

    let visible = page.cookie_jar().document_cookie(page.url());
    assert_eq!(visible.as_deref(), Some("csrftoken=second"));

    let resp = page.post("/api/", "").await.unwrap();
    assert_eq!(resp.status_code(), 200);
    assert_eq!(page.csrf_token().as_deref(), Some("first"));
}

#[tokio::test]
async fn percent_encoded_token_is_decoded() {
    let server = page_server(Some("csrftoken=abc%20def; Path=/")).await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(header("x-csrftoken", "abc def"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = open(&server).await;
    let resp = page.post("/api/", "").await.unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn json_and_form_posts_carry_token() {
    let server = page_server(Some("csrftoken=tok123; Path=/")).await;
    Mock::given(method("POST"))
        .and(header("x-csrftoken", "tok123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let page = open(&server).await;

    let resp = page
        .post_json("/api/items/", &serde_json::json!({"name": "widget"}))
        .await
        .unwrap();
    assert_eq!(resp.status_code(), 200);

    let mut form = std::collections::HashMap::new();
    form.insert("name".to_string(), "widget".to_string());
    let resp = page.post_form("/items/new/", &form).await.unwrap();
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn concurrent_requests_all_carry_token() {
    let server = page_server(Some("csrftoken=tok123; Path=/")).await;
    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(header("x-csrftoken", "tok123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let page = open(&server).await;
    let url = page.resolve("/api/").unwrap();
    let requests = (0..3)
        .map(|_| csrf_relay::Request::from_url(Method::POST, url.clone()))
        .collect();

    let results = page.client().execute_all(requests).await;
    assert_eq!(results.len(), 3);
    for result in results {
        assert_eq!(result.unwrap().status_code(), 200);
    }
}

#[tokio::test]
async fn cross_origin_set_cookie_is_not_stored() {
    let site = page_server(Some("csrftoken=tok123; Path=/")).await;
    let other = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collect"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "csrftoken=planted; Path=/"))
        .expect(1)
        .mount(&other)
        .await;

    let page = open(&site).await;
    page.post(&format!("{}/collect", other.uri()), "")
        .await
        .unwrap();

    let visible = page.cookie_jar().document_cookie(page.url());
    assert_eq!(visible.as_deref(), Some("csrftoken=tok123"));
    assert_eq!(page.cookie_jar().len(), 1);
}

#[tokio::test]
async fn overflowing_max_age_does_not_break_page_load() {
    let server = page_server(Some("csrftoken=tok123; Path=/; Max-Age=9223372036854775807")).await;
    let page = open(&server).await;
    assert_eq!(page.csrf_token().as_deref(), Some("tok123"));
}
