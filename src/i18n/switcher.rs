//! Locale switching: validate, update state, persist the preference, then
//! navigate to the same page under the new locale's prefix.
//!
//! Switching never fails from the caller's point of view. Unknown codes are
//! rejected with a warning; capability failures are logged and reported in
//! the returned [`SwitchOutcome`].

use crate::i18n::{CapabilityError, LocaleRegistry, LocaleState, PathLocaleCodec};
use crate::route::Route;
use chrono::{DateTime, Duration, Utc};
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Name of the cookie that remembers the chosen locale.
pub const LOCALE_COOKIE: &str = "i18n_redirected";

/// How long the locale preference is kept.
pub const LOCALE_COOKIE_DAYS: i64 = 365;

/// The persisted locale preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl LocaleCookie {
    /// Preference for `code`, written at `now`, scoped to the site root.
    pub fn new(code: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: LOCALE_COOKIE.to_string(),
            value: code.to_string(),
            expires: now + Duration::days(LOCALE_COOKIE_DAYS),
            path: "/".to_string(),
        }
    }

    /// Value for a `Set-Cookie` header.
    pub fn header_value(&self) -> String {
        format!(
            "{}={}; Expires={}; Path={}",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.path
        )
    }
}

/// Durable client-side storage for the locale preference.
pub trait LocalePersistence: Send + Sync {
    fn persist(&self, cookie: &LocaleCookie) -> Result<(), CapabilityError>;
}

/// Where to go after a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

/// Router primitive.
pub trait Navigator: Send + Sync {
    /// Navigate to `target`; `replace` swaps the current history entry
    /// instead of pushing a new one.
    fn navigate(
        &self,
        target: NavigationTarget,
        replace: bool,
    ) -> BoxFuture<'_, Result<(), CapabilityError>>;
}

/// Result of [`LocaleSwitcher::switch_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The code is not registered; nothing changed
    Rejected,

    /// The code is already active; nothing changed
    Unchanged,

    /// State updated and navigation to `path` completed
    Switched { path: String },

    /// A capability failed part-way; the error has been logged
    Failed(CapabilityError),
}

/// Orchestrates locale changes.
///
/// Switches on one switcher are serialized: a call made while another is in
/// flight waits for it, then re-checks against the locale it left active.
pub struct LocaleSwitcher {
    registry: Arc<LocaleRegistry>,
    state: Arc<dyn LocaleState>,
    persistence: Option<Arc<dyn LocalePersistence>>,
    navigator: Arc<dyn Navigator>,
    in_flight: Mutex<()>,
}

impl LocaleSwitcher {
    pub fn new(
        registry: Arc<LocaleRegistry>,
        state: Arc<dyn LocaleState>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            registry,
            state,
            persistence: None,
            navigator,
            in_flight: Mutex::new(()),
        }
    }

    /// Attach persistent storage. Without it the preference is not saved.
    pub fn with_persistence(mut self, persistence: Arc<dyn LocalePersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Switch the active locale to `new_code` and move `route` under it.
    pub async fn switch_to(&self, new_code: &str, route: &Route) -> SwitchOutcome {
        let _guard = self.in_flight.lock().await;

        if !self.registry.contains(new_code) {
            warn!("Invalid locale: {}", new_code);
            return SwitchOutcome::Rejected;
        }

        if self.state.current() == new_code {
            debug!("Locale '{}' already active", new_code);
            return SwitchOutcome::Unchanged;
        }

        match self.apply_switch(new_code, route).await {
            Ok(path) => {
                info!("Switched locale to '{}' ({})", new_code, path);
                SwitchOutcome::Switched { path }
            }
            Err(e) => {
                error!("Failed to switch locale: {}", e);
                SwitchOutcome::Failed(e)
            }
        }
    }

    async fn apply_switch(&self, new_code: &str, route: &Route) -> Result<String, CapabilityError> {
        self.state.set_locale(new_code).await?;

        if let Some(persistence) = &self.persistence {
            persistence.persist(&LocaleCookie::new(new_code, Utc::now()))?;
        }

        let codec = PathLocaleCodec::new(&self.registry);
        let remainder = codec.decode(&route.path).remainder;
        let path = codec.encode(&remainder, new_code, &route.path);

        let target = NavigationTarget {
            path: path.clone(),
            query: route.query.clone(),
        };
        self.navigator.navigate(target, true).await?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{LocaleContext, TranslationCatalog};
    use chrono::TimeZone;
    use futures::future::FutureExt;
    use std::sync::Mutex as StdMutex;
    use tracing_test::traced_test;

    // ==================== Test Doubles ====================

    #[derive(Default)]
    struct RecordingPersistence {
        written: StdMutex<Vec<LocaleCookie>>,
        fail: bool,
    }

    impl LocalePersistence for RecordingPersistence {
        fn persist(&self, cookie: &LocaleCookie) -> Result<(), CapabilityError> {
            if self.fail {
                return Err(CapabilityError::Persistence("storage full".to_string()));
            }
            self.written.lock().unwrap().push(cookie.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        calls: StdMutex<Vec<(NavigationTarget, bool)>>,
        fail: bool,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(
            &self,
            target: NavigationTarget,
            replace: bool,
        ) -> BoxFuture<'_, Result<(), CapabilityError>> {
            async move {
                // Give concurrent switches a chance to interleave.
                tokio::task::yield_now().await;
                if self.fail {
                    return Err(CapabilityError::Navigation("aborted".to_string()));
                }
                self.calls.lock().unwrap().push((target, replace));
                Ok(())
            }
            .boxed()
        }
    }

    struct UnloadableState;

    impl LocaleState for UnloadableState {
        fn current(&self) -> String {
            "en".to_string()
        }

        fn set_locale<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<(), CapabilityError>> {
            async move { Err(CapabilityError::LocaleUnavailable(code.to_string())) }.boxed()
        }

        fn translate(&self, key: &str) -> String {
            key.to_string()
        }
    }

    struct Fixture {
        state: Arc<LocaleContext>,
        persistence: Arc<RecordingPersistence>,
        navigator: Arc<RecordingNavigator>,
        switcher: LocaleSwitcher,
    }

    fn fixture_with(persistence: RecordingPersistence, navigator: RecordingNavigator) -> Fixture {
        let registry = Arc::new(LocaleRegistry::builtin());
        let catalog = Arc::new(TranslationCatalog::builtin("en").unwrap());
        let state = Arc::new(LocaleContext::new(catalog, "en"));
        let persistence = Arc::new(persistence);
        let navigator = Arc::new(navigator);

        let switcher = LocaleSwitcher::new(
            registry,
            state.clone() as Arc<dyn LocaleState>,
            navigator.clone() as Arc<dyn Navigator>,
        )
        .with_persistence(persistence.clone() as Arc<dyn LocalePersistence>);

        Fixture {
            state,
            persistence,
            navigator,
            switcher,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingPersistence::default(), RecordingNavigator::default())
    }

    // ==================== switch_to Tests ====================

    #[tokio::test]
    async fn test_switch_to_vietnamese_from_pricing() {
        let f = fixture();
        let route = Route::new("/pricing").with_query("ref", "ad");

        let outcome = f.switcher.switch_to("vi", &route).await;

        assert_eq!(
            outcome,
            SwitchOutcome::Switched {
                path: "/vi/pricing".to_string()
            }
        );
        assert_eq!(f.state.current(), "vi");

        let written = f.persistence.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].value, "vi");
        assert_eq!(written[0].path, "/");

        let calls = f.navigator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (target, replace) = &calls[0];
        assert_eq!(target.path, "/vi/pricing");
        assert_eq!(target.query.get("ref").map(String::as_str), Some("ad"));
        assert!(*replace);
    }

    #[tokio::test]
    async fn test_switch_back_to_default_strips_prefix() {
        let f = fixture();
        f.state.set_locale("vi").await.unwrap();

        let outcome = f.switcher.switch_to("en", &Route::new("/vi/about")).await;

        assert_eq!(
            outcome,
            SwitchOutcome::Switched {
                path: "/about".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_switch_from_root_prefixed_path() {
        let f = fixture();
        f.state.set_locale("vi").await.unwrap();

        let outcome = f.switcher.switch_to("en", &Route::new("/vi")).await;
        assert_eq!(outcome, SwitchOutcome::Switched { path: "/".to_string() });
    }

    #[tokio::test]
    async fn test_switch_to_current_locale_is_noop() {
        let f = fixture();

        let outcome = f.switcher.switch_to("en", &Route::new("/pricing")).await;

        assert_eq!(outcome, SwitchOutcome::Unchanged);
        assert!(f.persistence.written.lock().unwrap().is_empty());
        assert!(f.navigator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_switch_to_unknown_locale_is_rejected() {
        let f = fixture();

        let outcome = f.switcher.switch_to("fr", &Route::new("/pricing")).await;

        assert_eq!(outcome, SwitchOutcome::Rejected);
        assert!(logs_contain("Invalid locale: fr"));
        assert_eq!(f.state.current(), "en");
        assert!(f.persistence.written.lock().unwrap().is_empty());
        assert!(f.navigator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_navigation_failure_is_swallowed() {
        let f = fixture_with(
            RecordingPersistence::default(),
            RecordingNavigator {
                fail: true,
                ..Default::default()
            },
        );

        let outcome = f.switcher.switch_to("vi", &Route::new("/pricing")).await;

        assert!(matches!(outcome, SwitchOutcome::Failed(CapabilityError::Navigation(_))));
        // No rollback of the state change
        assert_eq!(f.state.current(), "vi");
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_navigation() {
        let f = fixture_with(
            RecordingPersistence {
                fail: true,
                ..Default::default()
            },
            RecordingNavigator::default(),
        );

        let outcome = f.switcher.switch_to("vi", &Route::new("/pricing")).await;

        assert!(matches!(outcome, SwitchOutcome::Failed(CapabilityError::Persistence(_))));
        assert!(f.navigator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_state_failure_skips_persistence_and_navigation() {
        let persistence = Arc::new(RecordingPersistence::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let switcher = LocaleSwitcher::new(
            Arc::new(LocaleRegistry::builtin()),
            Arc::new(UnloadableState),
            navigator.clone() as Arc<dyn Navigator>,
        )
        .with_persistence(persistence.clone() as Arc<dyn LocalePersistence>);

        let outcome = switcher.switch_to("vi", &Route::new("/")).await;

        assert_eq!(
            outcome,
            SwitchOutcome::Failed(CapabilityError::LocaleUnavailable("vi".to_string()))
        );
        assert!(persistence.written.lock().unwrap().is_empty());
        assert!(navigator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_switch_without_persistence_still_navigates() {
        let registry = Arc::new(LocaleRegistry::builtin());
        let catalog = Arc::new(TranslationCatalog::builtin("en").unwrap());
        let navigator = Arc::new(RecordingNavigator::default());
        let switcher = LocaleSwitcher::new(
            registry,
            Arc::new(LocaleContext::new(catalog, "en")),
            navigator.clone() as Arc<dyn Navigator>,
        );

        let outcome = switcher.switch_to("vi", &Route::new("/terms")).await;

        assert!(matches!(outcome, SwitchOutcome::Switched { .. }));
        assert_eq!(navigator.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_switches_are_serialized() {
        let f = fixture();
        let route = Route::new("/pricing");

        let (first, second) = tokio::join!(
            f.switcher.switch_to("vi", &route),
            f.switcher.switch_to("vi", &route)
        );

        let outcomes = [first, second];
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, SwitchOutcome::Switched { .. }))
                .count(),
            1
        );
        assert!(outcomes.contains(&SwitchOutcome::Unchanged));
        assert_eq!(f.persistence.written.lock().unwrap().len(), 1);
        assert_eq!(f.navigator.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_distinct_switches_last_write_wins() {
        let f = fixture();
        let route = Route::new("/pricing");

        let (first, second) = tokio::join!(
            f.switcher.switch_to("vi", &route),
            f.switcher.switch_to("en", &route)
        );

        assert!(matches!(first, SwitchOutcome::Switched { .. }));
        assert!(matches!(second, SwitchOutcome::Switched { .. }));
        assert_eq!(f.state.current(), "en");
        assert_eq!(f.persistence.written.lock().unwrap().last().unwrap().value, "en");
    }

    // ==================== LocaleCookie Tests ====================

    #[test]
    fn test_cookie_expires_in_one_year() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let cookie = LocaleCookie::new("vi", now);

        assert_eq!(cookie.name, "i18n_redirected");
        assert_eq!(cookie.expires, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_cookie_header_value() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();
        let cookie = LocaleCookie::new("vi", now);

        assert_eq!(
            cookie.header_value(),
            "i18n_redirected=vi; Expires=Thu, 15 Jan 2026 08:30:00 GMT; Path=/"
        );
    }
}
