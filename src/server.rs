//! HTTP host: renders page heads, serves SEO metadata as JSON and performs
//! locale switches as cookie + redirect responses.
//!
//! Each request gets its own [`LocaleContext`], seeded from the locale prefix
//! of the requested path.

use crate::i18n::{
    CapabilityError, LocaleContext, LocaleCookie, LocalePersistence, LocaleRegistry, LocaleState,
    LocaleSwitcher, NavigationTarget, Navigator, PathLocaleCodec, SwitchOutcome,
    TranslationCatalog,
};
use crate::route::Route;
use crate::seo::{HeadMetadata, SeoConfigProvider, SeoMetadataComposer};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LocaleRegistry>,
    pub catalog: Arc<TranslationCatalog>,
    pub seo: Arc<SeoConfigProvider>,
}

impl AppState {
    pub fn new(
        registry: LocaleRegistry,
        catalog: TranslationCatalog,
        seo: SeoConfigProvider,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            catalog: Arc::new(catalog),
            seo: Arc::new(seo),
        }
    }

    /// Route and request-scoped locale for a site path.
    ///
    /// The route name is the first segment after the locale prefix, or
    /// `home` for the root.
    fn resolve(&self, path: &str, query: BTreeMap<String, String>) -> (Arc<LocaleContext>, Route) {
        let decoded = PathLocaleCodec::new(&self.registry).decode(path);
        let locale = decoded
            .locale_code
            .unwrap_or_else(|| self.registry.default_code().to_string());

        let segment = decoded
            .remainder
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        let name = if segment.is_empty() { "home" } else { segment };

        let route = Route {
            path: path.to_string(),
            query,
            name: Some(name.to_string()),
        };
        let state = Arc::new(LocaleContext::new(Arc::clone(&self.catalog), &locale));
        (state, route)
    }

    fn composer(&self, state: Arc<LocaleContext>) -> SeoMetadataComposer {
        SeoMetadataComposer::new(Arc::clone(&self.seo), state)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/seo", get(seo_metadata))
        .route("/api/metrics", get(lookup_metrics))
        .route("/locale/:code", get(switch_locale))
        .fallback(render_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until shutdown.
pub async fn serve(port: u16, state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct SeoQuery {
    path: String,
    page: Option<String>,
}

/// Head metadata for a path as JSON.
async fn seo_metadata(
    State(state): State<AppState>,
    Query(query): Query<SeoQuery>,
) -> Json<HeadMetadata> {
    let (locale, route) = state.resolve(&query.path, BTreeMap::new());
    let composer = state.composer(locale);

    let mut head: Option<HeadMetadata> = None;
    match query.page.as_deref() {
        Some(page) => composer.apply_for_page(Some(page), &route, &mut head),
        None => composer.apply(None, &route, &mut head),
    }

    Json(head.unwrap_or_else(|| composer.head_metadata(None, &route)))
}

async fn lookup_metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.metrics().report())
}

/// Every other path: an HTML shell carrying the page metadata and a
/// language picker.
async fn render_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Html<String> {
    let (locale, route) = state.resolve(uri.path(), query);
    let active = locale.current();
    let dir = state
        .registry
        .get_by_code(&active)
        .map(|l| l.dir.as_str())
        .unwrap_or("ltr");
    let picker = locale_picker(&state.registry, &active, &route);

    let mut head: Option<HeadMetadata> = None;
    state.composer(locale).apply(None, &route, &mut head);

    let tags = head.as_ref().map(HeadMetadata::render_tags).unwrap_or_default();
    let lang = head.map(|h| h.html_lang).unwrap_or_default();

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n{}</head>\n\
         <body>\n{}<div id=\"app\"></div>\n</body>\n</html>\n",
        html_escape::encode_double_quoted_attribute(&lang),
        dir,
        tags,
        picker
    ))
}

/// Links to `/locale/:code` for every registered locale, returning to the
/// current route.
fn locale_picker(registry: &LocaleRegistry, active: &str, route: &Route) -> String {
    let mut query = route.query.clone();
    query.insert("path".to_string(), route.path.clone());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<nav class=\"locale-picker\">\n<span class=\"locale-current\">{}</span>",
        html_escape::encode_text(registry.display_name(active))
    );
    for option in registry.options() {
        let href = build_location(
            &format!("/locale/{}", urlencoding::encode(&option.value)),
            &query,
        );
        let current = if option.value == active {
            " aria-current=\"true\""
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<a href=\"{}\" lang=\"{}\"{}>{}</a>",
            html_escape::encode_double_quoted_attribute(&href),
            html_escape::encode_double_quoted_attribute(&option.value),
            current,
            html_escape::encode_text(&option.label)
        );
    }
    out.push_str("</nav>\n");
    out
}

/// Captures the locale cookie for the response.
#[derive(Default)]
struct ResponseCookies {
    set_cookie: Mutex<Vec<String>>,
}

impl LocalePersistence for ResponseCookies {
    fn persist(&self, cookie: &LocaleCookie) -> Result<(), CapabilityError> {
        self.set_cookie
            .lock()
            .map_err(|_| CapabilityError::Persistence("cookie buffer poisoned".to_string()))?
            .push(cookie.header_value());
        Ok(())
    }
}

/// Turns a navigation into a redirect location.
#[derive(Default)]
struct RedirectNavigator {
    location: Mutex<Option<String>>,
}

impl Navigator for RedirectNavigator {
    fn navigate(
        &self,
        target: NavigationTarget,
        _replace: bool,
    ) -> BoxFuture<'_, Result<(), CapabilityError>> {
        async move {
            let location = build_location(&target.path, &target.query);
            *self
                .location
                .lock()
                .map_err(|_| CapabilityError::Navigation("redirect buffer poisoned".to_string()))? =
                Some(location);
            Ok(())
        }
        .boxed()
    }
}

/// `GET /locale/:code?path=/pricing&...` switches the locale of `path`.
///
/// Query parameters other than `path` are kept on the redirect. The browser
/// is sent back to `path` when the switch does not happen.
async fn switch_locale(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(mut query): Query<BTreeMap<String, String>>,
) -> Response {
    let path = safe_return_path(query.remove("path").as_deref());
    let (locale, route) = state.resolve(&path, query);

    let cookies = Arc::new(ResponseCookies::default());
    let navigator = Arc::new(RedirectNavigator::default());
    let switcher = LocaleSwitcher::new(Arc::clone(&state.registry), locale, navigator.clone())
        .with_persistence(cookies.clone());

    let outcome = switcher.switch_to(&code, &route).await;

    let location = match &outcome {
        SwitchOutcome::Switched { .. } => navigator
            .location
            .lock()
            .ok()
            .and_then(|mut location| location.take()),
        _ => None,
    }
    .unwrap_or_else(|| build_location(&route.path, &route.query));

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&location) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
        }
        Err(e) => {
            warn!("Unusable redirect location {:?}: {}", location, e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    }

    if matches!(outcome, SwitchOutcome::Switched { .. }) {
        let set_cookie = cookies
            .set_cookie
            .lock()
            .map(|cookies| cookies.clone())
            .unwrap_or_default();
        for cookie in set_cookie {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.append(header::SET_COOKIE, value);
            }
        }
    }

    (StatusCode::SEE_OTHER, headers).into_response()
}

/// Only site-relative paths are accepted as return targets.
fn safe_return_path(path: Option<&str>) -> String {
    match path {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

fn build_location(path: &str, query: &BTreeMap<String, String>) -> String {
    if query.is_empty() {
        return path.to_string();
    }

    let pairs: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{}?{}", path, pairs.join("&"))
}
