use async_trait::async_trait;
use dashboard_lib::adapters::InMemorySessionStorage;
use axum::http::StatusCode;
use dashboard_lib::web::middleware::gate;
use dashboard_lib::web::session_provider::{AuthError, SessionProvider, SessionStatus, SESSION_KEY};
use legalvision_core::ports::{PortError, PortResult, SessionStorage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const LATENCY: Duration = Duration::from_millis(800);

fn provider_with(storage: Arc<dyn SessionStorage>) -> SessionProvider {
    SessionProvider::new(storage, LATENCY)
}

/// Answers reads only after a delay, like a slow disk.
struct SlowGet {
    inner: InMemorySessionStorage,
    delay: Duration,
}

#[async_trait]
impl SessionStorage for SlowGet {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.inner.remove(key).await
    }
}

/// Counts writes and can be told to fail them.
#[derive(Default)]
struct CountingStorage {
    inner: InMemorySessionStorage,
    writes: AtomicUsize,
    fail_writes: bool,
}

#[async_trait]
impl SessionStorage for CountingStorage {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(PortError::Unavailable("disk full".into()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key).await
    }
}

#[tokio::test(start_paused = true)]
async fn starts_uninitialized_and_resolves_to_unauthenticated() {
    let provider = provider_with(Arc::new(InMemorySessionStorage::new()));
    assert_eq!(provider.status().await, SessionStatus::Uninitialized);
    assert_eq!(provider.initialize().await, SessionStatus::Unauthenticated);
    assert!(provider.current_user().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn login_derives_name_after_simulated_latency() {
    let provider = provider_with(Arc::new(InMemorySessionStorage::new()));
    provider.initialize().await;

    let started = Instant::now();
    let session = provider.login("jane.doe@example.com", "anything").await.unwrap();
    assert!(started.elapsed() >= LATENCY);

    assert_eq!(session.name, "Jane Doe");
    assert!(provider.is_authenticated().await);
    assert_eq!(provider.current_user().await, Some(session));
}

#[tokio::test(start_paused = true)]
async fn login_uses_fixed_placeholders() {
    let provider = provider_with(Arc::new(InMemorySessionStorage::new()));
    provider.initialize().await;
    let session = provider.login("x@example.com", "pw").await.unwrap();
    assert_eq!(session.role, "Legal Analyst");
    assert_eq!(session.firm, "Perera & Associates");
}

#[tokio::test(start_paused = true)]
async fn empty_credentials_never_touch_storage() {
    let storage = Arc::new(CountingStorage::default());
    let provider = provider_with(storage.clone());
    provider.initialize().await;

    for (email, password) in [("", "pw"), ("a@b.c", ""), ("", "")] {
        let err = provider.login(email, password).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }
    assert_eq!(storage.writes.load(Ordering::SeqCst), 0);
    assert_eq!(provider.status().await, SessionStatus::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn storage_failure_is_distinct_and_leaves_user_signed_out() {
    let storage = Arc::new(CountingStorage {
        fail_writes: true,
        ..Default::default()
    });
    let provider = provider_with(storage);
    provider.initialize().await;

    let err = provider.login("jane@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(!provider.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn session_round_trips_through_storage() {
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let first = provider_with(storage.clone());
    first.initialize().await;
    let original = first.login("jane.doe@example.com", "pw").await.unwrap();

    // A new process reading the same store.
    let second = provider_with(storage);
    assert_eq!(second.initialize().await, SessionStatus::Authenticated);
    let restored = second.current_user().await.unwrap();
    assert_eq!(restored.id, original.id);
    assert_eq!(restored.name, original.name);
    assert_eq!(restored.email, original.email);
    assert_eq!(restored.role, original.role);
    assert_eq!(restored.firm, original.firm);
}

#[tokio::test(start_paused = true)]
async fn logout_then_initialize_yields_no_session() {
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let provider = provider_with(storage.clone());
    provider.initialize().await;
    provider.login("jane.doe@example.com", "pw").await.unwrap();

    provider.logout().await;
    assert_eq!(provider.status().await, SessionStatus::Unauthenticated);
    assert_eq!(storage.get(SESSION_KEY).await.unwrap(), None);

    assert_eq!(provider.initialize().await, SessionStatus::Unauthenticated);
}

#[tokio::test(start_paused = true)]
async fn malformed_record_is_treated_as_no_session() {
    let storage = Arc::new(InMemorySessionStorage::with_entry(SESSION_KEY, "{\"id\":"));
    let provider = provider_with(storage);
    assert_eq!(provider.initialize().await, SessionStatus::Unauthenticated);
    assert!(provider.current_user().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn teardown_forgets_memory_but_not_storage() {
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let provider = provider_with(storage.clone());
    provider.initialize().await;
    provider.login("a.b@example.com", "pw").await.unwrap();

    provider.teardown().await;
    assert_eq!(provider.status().await, SessionStatus::Uninitialized);
    assert!(storage.get(SESSION_KEY).await.unwrap().is_some());
    assert_eq!(provider.initialize().await, SessionStatus::Authenticated);
}

#[tokio::test(start_paused = true)]
async fn last_login_wins_the_single_slot() {
    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());
    let provider = provider_with(storage.clone());
    provider.initialize().await;
    provider.login("first@example.com", "pw").await.unwrap();
    provider.login("second.user@example.com", "pw").await.unwrap();

    let fresh = provider_with(storage);
    fresh.initialize().await;
    assert_eq!(fresh.current_user().await.unwrap().name, "Second User");
}

#[tokio::test(start_paused = true)]
async fn pending_restore_reports_loading_not_signed_out() {
    let storage = Arc::new(SlowGet {
        inner: InMemorySessionStorage::new(),
        delay: Duration::from_secs(2),
    });
    let provider = Arc::new(provider_with(storage));

    let restoring = tokio::spawn({
        let provider = provider.clone();
        async move { provider.initialize().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(provider.status().await, SessionStatus::Loading);
    assert_eq!(gate(provider.status().await), Err(StatusCode::SERVICE_UNAVAILABLE));
    assert!(provider.current_user().await.is_none());

    assert_eq!(restoring.await.unwrap(), SessionStatus::Unauthenticated);
    assert_eq!(gate(provider.status().await), Err(StatusCode::UNAUTHORIZED));
}

#[tokio::test(start_paused = true)]
async fn login_during_restore_waits_and_stays_consistent_with_storage() {
    let storage = Arc::new(SlowGet {
        inner: InMemorySessionStorage::new(),
        delay: Duration::from_secs(2),
    });
    let provider = Arc::new(provider_with(storage.clone()));

    let restoring = tokio::spawn({
        let provider = provider.clone();
        async move { provider.initialize().await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(provider.status().await, SessionStatus::Loading);

    let session = provider.login("jane.doe@example.com", "pw").await.unwrap();
    assert_eq!(restoring.await.unwrap(), SessionStatus::Unauthenticated);

    assert_eq!(provider.status().await, SessionStatus::Authenticated);
    assert_eq!(provider.current_user().await, Some(session));
    assert!(storage.inner.get(SESSION_KEY).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn login_before_any_restore_is_rejected_without_writing() {
    let storage = Arc::new(CountingStorage::default());
    let provider = provider_with(storage.clone());

    let err = provider.login("jane@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::NotReady));
    assert_eq!(storage.writes.load(Ordering::SeqCst), 0);
    assert_eq!(provider.status().await, SessionStatus::Uninitialized);
}
