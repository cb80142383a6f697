//! Cached store for intake-questionnaire answers.
//!
//! Same two-view shape as the aluno store: the full listing plus per-id
//! records, kept in sync by the same create/update/delete reconciliation
//! rules.

use std::sync::Arc;

use evotrack_client::error::ApiResult;
use evotrack_core::models::{CreateUserAnswer, UpdateUserAnswer, UserAnswer};
use evotrack_core::types::Id;

use crate::api::RemoteApi;
use crate::cache::{require_enabled, Cache, CacheOptions, FetchResult, ListKey};
use crate::mutation::OptimisticContext;

pub struct AnswerStore {
    api: Arc<dyn RemoteApi>,
    opts: CacheOptions,
    list: Cache<ListKey, Vec<UserAnswer>>,
    by_id: Cache<Id, UserAnswer>,
}

impl AnswerStore {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self::with_options(api, CacheOptions::default())
    }

    pub fn with_options(api: Arc<dyn RemoteApi>, opts: CacheOptions) -> Self {
        Self {
            api,
            opts,
            list: Cache::new(),
            by_id: Cache::new(),
        }
    }

    // -- reads --

    pub async fn list(&self) -> FetchResult<Vec<UserAnswer>> {
        let api = Arc::clone(&self.api);
        let result = self
            .list
            .get_with(ListKey, self.opts, move || {
                let api = Arc::clone(&api);
                async move { api.list_answers().await }
            })
            .await;
        require_enabled(result)
    }

    pub async fn get(&self, id: &str) -> FetchResult<UserAnswer> {
        let api = Arc::clone(&self.api);
        let id_owned = id.to_string();
        let result = self
            .by_id
            .get_with(id.to_string(), self.opts, move || {
                let api = Arc::clone(&api);
                let id = id_owned.clone();
                async move { api.get_answer(&id).await }
            })
            .await;
        require_enabled(result)
    }

    // -- mutations --

    /// Record a questionnaire submission.  The server assigns the id, so
    /// the confirmed record is prepended and seeded after the call.
    pub async fn create(&self, dto: &CreateUserAnswer) -> ApiResult<UserAnswer> {
        let created = self.api.create_answer(dto).await?;
        self.list.update(&ListKey, |answers| {
            answers.insert(0, created.clone());
        });
        self.by_id.insert(created.id.clone(), created.clone());
        self.list.invalidate(&ListKey);
        Ok(created)
    }

    pub async fn update(&self, id: &str, dto: &UpdateUserAnswer) -> ApiResult<UserAnswer> {
        let key = id.to_string();
        let list_ctx = OptimisticContext::capture(&self.list, [ListKey]);
        let id_ctx = OptimisticContext::capture(&self.by_id, [key.clone()]);

        self.list.update(&ListKey, |answers| {
            if let Some(answer) = answers.iter_mut().find(|a| a.id == key) {
                dto.apply_to(answer);
            }
        });
        self.by_id.update(&key, |answer| dto.apply_to(answer));

        match self.api.update_answer(id, dto).await {
            Ok(updated) => {
                self.list.update(&ListKey, |answers| {
                    if let Some(answer) = answers.iter_mut().find(|a| a.id == key) {
                        *answer = updated.clone();
                    }
                });
                self.by_id.insert(key.clone(), updated.clone());
                self.list.invalidate(&ListKey);
                self.by_id.invalidate(&key);
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(answer_id = %id, error = %err, "Answer update failed, rolling back");
                list_ctx.restore();
                id_ctx.restore();
                Err(err)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let key = id.to_string();
        let list_ctx = OptimisticContext::capture(&self.list, [ListKey]);
        let id_ctx = OptimisticContext::capture(&self.by_id, [key.clone()]);

        self.list.update(&ListKey, |answers| {
            answers.retain(|a| a.id != key);
        });
        self.by_id.remove(&key);

        match self.api.delete_answer(id).await {
            Ok(()) => {
                self.list.invalidate(&ListKey);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(answer_id = %id, error = %err, "Answer delete failed, rolling back");
                list_ctx.restore();
                id_ctx.restore();
                Err(err)
            }
        }
    }
}
