//! Cached store for invite codes (admin-only resource).

use std::sync::Arc;

use evotrack_client::error::ApiResult;
use evotrack_core::models::{CreateInviteCode, InviteCode};

use crate::api::RemoteApi;
use crate::cache::{require_enabled, Cache, CacheOptions, FetchResult, ListKey};
use crate::mutation::OptimisticContext;

pub struct InviteCodeStore {
    api: Arc<dyn RemoteApi>,
    opts: CacheOptions,
    list: Cache<ListKey, Vec<InviteCode>>,
}

impl InviteCodeStore {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self::with_options(api, CacheOptions::default())
    }

    pub fn with_options(api: Arc<dyn RemoteApi>, opts: CacheOptions) -> Self {
        Self {
            api,
            opts,
            list: Cache::new(),
        }
    }

    pub async fn list(&self) -> FetchResult<Vec<InviteCode>> {
        let api = Arc::clone(&self.api);
        let result = self
            .list
            .get_with(ListKey, self.opts, move || {
                let api = Arc::clone(&api);
                async move { api.list_invite_codes().await }
            })
            .await;
        require_enabled(result)
    }

    /// Generate a new code.  The server mints the code string, so the
    /// result is only inserted after confirmation.
    pub async fn create(&self, dto: &CreateInviteCode) -> ApiResult<InviteCode> {
        let created = self.api.create_invite_code(dto).await?;
        self.list.update(&ListKey, |codes| {
            codes.insert(0, created.clone());
        });
        self.list.invalidate(&ListKey);
        Ok(created)
    }

    /// Revoke a code optimistically.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let ctx = OptimisticContext::capture(&self.list, [ListKey]);
        self.list.update(&ListKey, |codes| {
            codes.retain(|c| c.id != id);
        });

        match self.api.delete_invite_code(id).await {
            Ok(()) => {
                self.list.invalidate(&ListKey);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(invite_code_id = %id, error = %err, "Invite code delete failed, rolling back");
                ctx.restore();
                Err(err)
            }
        }
    }
}
