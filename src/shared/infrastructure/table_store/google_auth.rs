// Bearer tokens for the Sheets API.
//
// Google access tokens expire after about an hour, so the store asks for a
// token on every request. The service-account source mints and caches tokens
// itself and refreshes them before they expire.

use crate::shared::infrastructure::table_store::TableStoreError;
use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;
use std::sync::Arc;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, TableStoreError>;
}

/// A fixed token, e.g. one printed by `gcloud auth print-access-token`.
/// Only suitable for short local sessions.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, TableStoreError> {
        Ok(self.0.clone())
    }
}

/// Tokens minted from a service-account key file.
pub struct ServiceAccountTokens {
    provider: Arc<dyn TokenProvider>,
}

impl ServiceAccountTokens {
    pub fn from_file(path: &Path) -> Result<Self, gcp_auth::Error> {
        let account = CustomServiceAccount::from_file(path)?;
        Ok(Self {
            provider: Arc::new(account),
        })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, TableStoreError> {
        let token = self.provider.token(&[SHEETS_SCOPE]).await.map_err(|e| {
            tracing::error!(error = %e, "could not obtain a sheets access token");
            TableStoreError::Backend(format!("access token: {e}"))
        })?;
        Ok(token.as_str().to_string())
    }
}
