use super::checker::BreachChecker;
use super::client::RangeClient;
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What a UI should show next to the password field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BreachStatus {
    #[default]
    Idle,
    Loading,
    Safe,
    Compromised { breach_count: u64 },
    Error(String),
}

/// Debounced breach lookups for a password that keeps changing.
///
/// Every [`update`](Self::update) cancels the lookup in flight and starts a
/// new generation. A result is only published while its generation is still
/// the current one, so the status never describes a previous password.
#[derive(Debug)]
pub struct BreachWatcher<C> {
    checker: Arc<BreachChecker<C>>,
    debounce: Duration,
    enabled: AtomicBool,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<CancellationToken>>,
    status: Arc<watch::Sender<BreachStatus>>,
}

impl<C: RangeClient + 'static> BreachWatcher<C> {
    pub fn new(checker: Arc<BreachChecker<C>>, debounce: Duration) -> Self {
        let (status, _) = watch::channel(BreachStatus::Idle);
        Self {
            checker,
            debounce,
            enabled: AtomicBool::new(true),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
            status: Arc::new(status),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BreachStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> BreachStatus {
        self.status.borrow().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disabling cancels any lookup in flight and resets the status to idle.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = in_flight.take() {
                previous.cancel();
            }
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.status.send_replace(BreachStatus::Idle);
        }
    }

    /// Schedules a lookup for `password` after the debounce period.
    ///
    /// Returns the spawned task, or `None` when nothing needs checking
    /// (blank password or watcher disabled). Must be called inside a Tokio
    /// runtime.
    pub fn update(&self, password: &SecretString) -> Option<JoinHandle<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = in_flight.take() {
            previous.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let trimmed = password.expose_secret().trim();
        if !self.is_enabled() || trimmed.is_empty() {
            self.status.send_replace(BreachStatus::Idle);
            return None;
        }

        let token = CancellationToken::new();
        *in_flight = Some(token.clone());
        self.status.send_replace(BreachStatus::Loading);

        let password = SecretString::new(trimmed.to_string().into());
        let checker = Arc::clone(&self.checker);
        let current = Arc::clone(&self.generation);
        let status = Arc::clone(&self.status);
        let debounce = self.debounce;

        Some(tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }

            let next = match checker.check(&password, Some(&token)).await {
                Ok(Some(result)) if result.is_breached() => BreachStatus::Compromised {
                    breach_count: result.breach_count,
                },
                Ok(Some(_)) => BreachStatus::Safe,
                Ok(None) => return,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Breach lookup failed: {}", e);
                    BreachStatus::Error(e.to_string())
                }
            };

            // Checked under the channel lock so a newer update cannot slip in between.
            status.send_if_modified(|slot| {
                if token.is_cancelled() || current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = next;
                true
            });
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::hasher::sha1_hex_upper;
    use crate::breach::testing::MockRangeClient;

    const DEBOUNCE: Duration = Duration::from_millis(450);

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string().into())
    }

    fn compromised_body(password: &str) -> String {
        format!("{}:37\r\n", &sha1_hex_upper(password)[5..])
    }

    fn watcher_for(client: MockRangeClient) -> BreachWatcher<MockRangeClient> {
        BreachWatcher::new(Arc::new(BreachChecker::new(client)), DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_compromised_after_debounce() {
        let client = MockRangeClient::with_body(compromised_body("password"));
        let watcher = watcher_for(client.clone());

        let handle = watcher.update(&secret("password")).unwrap();
        assert_eq!(watcher.status(), BreachStatus::Loading);
        handle.await.unwrap();

        assert_eq!(watcher.status(), BreachStatus::Compromised { breach_count: 37 });
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_only_check_last() {
        let client = MockRangeClient::with_body(compromised_body("password"));
        let watcher = watcher_for(client.clone());

        let first = watcher.update(&secret("password")).unwrap();
        let second = watcher.update(&secret("correct horse battery staple")).unwrap();
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(watcher.status(), BreachStatus::Safe);
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_never_published() {
        let client = MockRangeClient::with_body(compromised_body("password")).delayed(Duration::from_secs(2));
        let watcher = watcher_for(client.clone());
        let mut rx = watcher.subscribe();

        let first = watcher.update(&secret("password")).unwrap();
        // let the first lookup get past its debounce and into the request
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(100)).await;
        assert_eq!(client.requests().len(), 1);

        let second = watcher.update(&secret("a different one")).unwrap();
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(*rx.borrow_and_update(), BreachStatus::Safe);
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_password_is_idle() {
        let watcher = watcher_for(MockRangeClient::with_body(""));
        assert!(watcher.update(&secret("   ")).is_none());
        assert_eq!(watcher.status(), BreachStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_cancels_in_flight() {
        let client = MockRangeClient::with_body(compromised_body("password"));
        let watcher = watcher_for(client.clone());

        let handle = watcher.update(&secret("password")).unwrap();
        watcher.set_enabled(false);
        handle.await.unwrap();

        assert_eq!(watcher.status(), BreachStatus::Idle);
        assert!(client.requests().is_empty());
        assert!(watcher.update(&secret("password")).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_status() {
        let watcher = watcher_for(MockRangeClient::with_body("").failing());
        watcher.update(&secret("password")).unwrap().await.unwrap();
        assert!(matches!(watcher.status(), BreachStatus::Error(_)));
    }
}
