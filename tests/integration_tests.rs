//! Integration tests for the localized site
//!
//! These tests start the HTTP server on an ephemeral port and drive it with
//! a real HTTP client, covering page rendering, the SEO endpoint and locale
//! switching end to end.

use localized_site::{
    i18n::{LocaleRegistry, TranslationCatalog},
    seo::{FixedOrigin, SeoConfigProvider},
    server::{router, AppState},
};
use reqwest::{header, redirect::Policy, StatusCode};
use std::sync::Arc;

// ==================== Test Helpers ====================

const ORIGIN: &str = "https://acme.test";

/// Start the server and return its base URL
async fn spawn_app() -> String {
    let state = AppState::new(
        LocaleRegistry::builtin(),
        TranslationCatalog::builtin("en").expect("builtin catalogs"),
        SeoConfigProvider::new("Nuxt Starter", Arc::new(FixedOrigin(ORIGIN.to_string()))),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

// ==================== Page Rendering Tests ====================

#[tokio::test]
async fn test_health() {
    let base = spawn_app().await;
    let body = client()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_default_locale_page_head() {
    let base = spawn_app().await;
    let html = client()
        .get(format!("{}/privacy", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(r#"<html lang="en" dir="ltr">"#));
    assert!(html.contains("<title>Privacy Policy - Nuxt Starter</title>"));
    assert!(html.contains(r#"<link rel="canonical" href="https://acme.test/privacy">"#));
    assert!(html.contains(r#"<meta property="og:url" content="https://acme.test/privacy">"#));
}

#[tokio::test]
async fn test_prefixed_page_uses_locale() {
    let base = spawn_app().await;
    let html = client()
        .get(format!("{}/vi/terms", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(r#"<html lang="vi""#));
    assert!(html.contains("<title>Điều khoản dịch vụ - Nuxt Starter</title>"));
    assert!(html.contains(r#"<link rel="canonical" href="https://acme.test/vi/terms">"#));
    assert!(html.contains(r#"<span class="locale-current">Vietnamese</span>"#));
    assert!(html.contains(r#"<a href="/locale/en?path=%2Fvi%2Fterms" lang="en">English</a>"#));
}

#[tokio::test]
async fn test_unknown_page_gets_site_defaults() {
    let base = spawn_app().await;
    let html = client()
        .get(format!("{}/careers/open", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("<title>Nuxt Starter - Nuxt Starter</title>"));
    assert!(html.contains(
        r#"<meta property="og:image" content="https://acme.test/images/social/og-image.svg">"#
    ));
}

// ==================== SEO Endpoint Tests ====================

#[tokio::test]
async fn test_seo_endpoint_json() {
    let base = spawn_app().await;
    let json: serde_json::Value = client()
        .get(format!("{}/api/seo?path=/vi/sales", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["title"], "Kinh doanh");
    assert_eq!(json["html_lang"], "vi");
    assert_eq!(json["canonical"], "https://acme.test/vi/sales");
    assert_eq!(json["open_graph"]["type"], "website");
    assert_eq!(json["twitter"]["card"], "summary_large_image");
}

#[tokio::test]
async fn test_seo_endpoint_unknown_page_name() {
    let base = spawn_app().await;
    let json: serde_json::Value = client()
        .get(format!("{}/api/seo?path=/about&page=careers", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["title"], "Nuxt Starter");
    assert_eq!(json["canonical"], "https://acme.test/about");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let base = spawn_app().await;
    let http = client();
    http.get(format!("{}/", base)).send().await.unwrap();

    let json: serde_json::Value = http
        .get(format!("{}/api/metrics", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(json["hits"].as_u64().unwrap() > 0);
}

// ==================== Locale Switch Tests ====================

#[tokio::test]
async fn test_switch_locale_redirects_with_cookie() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/locale/vi?path=/pricing&ref=ad", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/vi/pricing?ref=ad");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("i18n_redirected=vi; Expires="));
    assert!(cookie.ends_with("; Path=/"));
}

#[tokio::test]
async fn test_switch_back_to_default_strips_prefix() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/locale/en?path=/vi/about", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/about");
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_switch_to_current_locale_sets_no_cookie() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/locale/vi?path=/vi/about", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/vi/about");
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_switch_to_unknown_locale_returns_to_page() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/locale/fr?path=/pricing", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/pricing");
    assert!(!response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_switch_rejects_offsite_return_path() {
    let base = spawn_app().await;
    let response = client()
        .get(format!("{}/locale/vi?path=//evil.example/x", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()[header::LOCATION], "/vi/");
}
