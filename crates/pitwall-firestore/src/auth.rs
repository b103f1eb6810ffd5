//! Access-token handling for Firestore requests.
//!
//! Service-account tokens from gcp_auth are cached with a refresh margin and
//! refreshed under a write lock (double-checked so concurrent requests don't
//! stampede the token endpoint). When `FIRESTORE_EMULATOR_HOST` is set the
//! emulator's well-known `owner` token is used and no credentials are
//! required.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{FirestoreError, FirestoreResult};

/// Refresh the token this long before it expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative TTL when the token reply carries no expiry.
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// OAuth scope for Firestore/Datastore access.
pub const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Token the emulator accepts for any project.
const EMULATOR_TOKEN: &str = "owner";

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

enum Source {
    /// Fixed `owner` token; used against the emulator.
    Emulator,
    /// Cached service-account token.
    ServiceAccount {
        provider: Arc<dyn TokenProvider>,
        cache: RwLock<Option<CachedToken>>,
    },
}

/// Source of bearer tokens for Firestore requests.
pub struct TokenSource {
    source: Source,
}

impl TokenSource {
    /// Build a source from the service account configured in the
    /// environment (`GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn service_account() -> FirestoreResult<Self> {
        let service_account = CustomServiceAccount::from_env().map_err(|e| {
            FirestoreError::auth_error(format!("Failed to load service account: {}", e))
        })?;

        match service_account {
            Some(sa) => Ok(Self {
                source: Source::ServiceAccount {
                    provider: Arc::new(sa),
                    cache: RwLock::new(None),
                },
            }),
            None => Err(FirestoreError::auth_error(
                "GOOGLE_APPLICATION_CREDENTIALS not set. \
                 Set it to the path of your service account JSON file.",
            )),
        }
    }

    /// Fixed-token source for the emulator.
    pub fn emulator() -> Self {
        Self {
            source: Source::Emulator,
        }
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_token(&self) -> FirestoreResult<String> {
        match &self.source {
            Source::Emulator => Ok(EMULATOR_TOKEN.to_string()),
            Source::ServiceAccount { provider, cache } => {
                {
                    let cached = cache.read().await;
                    if let Some(token) = cached.as_ref() {
                        if token.is_valid() {
                            return Ok(token.access_token.clone());
                        }
                    }
                }

                let mut cached = cache.write().await;
                // Another task may have refreshed while we waited.
                if let Some(token) = cached.as_ref() {
                    if token.is_valid() {
                        return Ok(token.access_token.clone());
                    }
                }

                refresh(provider.as_ref(), &mut cached).await
            }
        }
    }

    /// Drop the cached token so the next request fetches a fresh one.
    pub async fn invalidate(&self) {
        if let Source::ServiceAccount { cache, .. } = &self.source {
            let mut cached = cache.write().await;
            *cached = None;
        }
    }
}

async fn refresh(
    provider: &dyn TokenProvider,
    cache: &mut Option<CachedToken>,
) -> FirestoreResult<String> {
    match provider.token(&[FIRESTORE_SCOPE]).await {
        Ok(token) => {
            let access_token = token.as_str().to_string();
            let now = Utc::now();
            let expires_at = if token.expires_at() > now {
                match (token.expires_at() - now).to_std() {
                    Ok(ttl) => Instant::now() + ttl,
                    Err(_) => Instant::now() + TOKEN_DEFAULT_TTL,
                }
            } else {
                // An already-expired reply forces a refresh on the next call.
                Instant::now()
            };

            *cache = Some(CachedToken {
                access_token: access_token.clone(),
                expires_at,
            });
            debug!("Refreshed Firestore access token");
            Ok(access_token)
        }
        Err(e) => {
            warn!("Firestore token refresh failed: {}", e);
            Err(FirestoreError::auth_error(format!(
                "Failed to obtain auth token: {}",
                e
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emulator_token_is_fixed() {
        let source = TokenSource::emulator();
        assert_eq!(source.get_token().await.unwrap(), "owner");
        source.invalidate().await;
        assert_eq!(source.get_token().await.unwrap(), "owner");
    }

    #[test]
    fn test_refresh_margin() {
        assert!(TOKEN_REFRESH_MARGIN < TOKEN_DEFAULT_TTL);
    }
}
