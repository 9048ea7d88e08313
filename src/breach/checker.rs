use super::cache::{parse_range_response, RangeCache, SuffixCounts};
use super::client::RangeClient;
use super::hasher::RangeKey;
use super::BreachError;
use crate::types::BreachResult;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Looks passwords up in a range service, caching one response per prefix.
///
/// Concurrent checks that share a prefix wait on the same request.
#[derive(Debug)]
pub struct BreachChecker<C> {
    client: C,
    cache: RangeCache,
}

impl<C: RangeClient> BreachChecker<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: RangeCache::new(),
        }
    }

    pub fn cache(&self) -> &RangeCache {
        &self.cache
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Breach count for `password`, or `None` if `token` was cancelled first.
    ///
    /// The empty password short-circuits to a zero count without a request.
    pub async fn check(
        &self,
        password: &SecretString,
        token: Option<&CancellationToken>,
    ) -> Result<Option<BreachResult>, BreachError> {
        let pwd = password.expose_secret();
        if pwd.is_empty() {
            return Ok(Some(BreachResult::default()));
        }
        if token.is_some_and(CancellationToken::is_cancelled) {
            return Ok(None);
        }

        let key = RangeKey::of(pwd);
        let counts = match token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(prefix = key.prefix(), "Breach check cancelled");
                    return Ok(None);
                }
                counts = self.suffix_counts(key.prefix()) => counts?,
            },
            None => self.suffix_counts(key.prefix()).await?,
        };

        if token.is_some_and(CancellationToken::is_cancelled) {
            return Ok(None);
        }

        Ok(Some(BreachResult {
            breach_count: counts.get(key.suffix()).copied().unwrap_or(0),
        }))
    }

    async fn suffix_counts(&self, prefix: &str) -> Result<Arc<SuffixCounts>, BreachError> {
        let slot = self.cache.slot(prefix);
        let counts = slot
            .get_or_try_init(|| async {
                #[cfg(feature = "tracing")]
                tracing::debug!(prefix, "Range cache miss");

                let body = self.client.fetch_range(prefix).await?;
                let counts = parse_range_response(&body);

                #[cfg(feature = "tracing")]
                tracing::info!(prefix, entries = counts.len(), "Range cached");

                Ok::<_, BreachError>(Arc::new(counts))
            })
            .await?;
        Ok(Arc::clone(counts))
    }
}
