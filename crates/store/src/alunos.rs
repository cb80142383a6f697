//! Cached store for alunos.
//!
//! Keeps two views in sync: the full listing and per-id records.  Reads
//! go through the stale-while-revalidate cache; mutations edit both
//! views optimistically and reconcile with the server's response.

use std::sync::Arc;

use evotrack_client::error::{ApiError, ApiResult};
use evotrack_core::models::{Aluno, CreateAluno, UpdateAluno};
use evotrack_core::types::Id;

use crate::api::RemoteApi;
use crate::cache::{require_enabled, Cache, CacheOptions, FetchResult, ListKey};
use crate::mutation::OptimisticContext;

pub struct AlunoStore {
    api: Arc<dyn RemoteApi>,
    opts: CacheOptions,
    list: Cache<ListKey, Vec<Aluno>>,
    by_id: Cache<Id, Aluno>,
}

impl AlunoStore {
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

    /// All alunos visible to the current user.
    pub async fn list(&self) -> FetchResult<Vec<Aluno>> {
        let api = Arc::clone(&self.api);
        let result = self
            .list
            .get_with(ListKey, self.opts, move || {
                let api = Arc::clone(&api);
                async move { api.list_alunos().await }
            })
            .await;
        require_enabled(result)
    }

    /// One aluno by id.
    pub async fn get(&self, id: &str) -> FetchResult<Aluno> {
        let api = Arc::clone(&self.api);
        let id_owned = id.to_string();
        let result = self
            .by_id
            .get_with(id.to_string(), self.opts, move || {
                let api = Arc::clone(&api);
                let id = id_owned.clone();
                async move { api.get_aluno(&id).await }
            })
            .await;
        require_enabled(result)
    }

    /// The aluno record backed by the given user account.  The API has
    /// no dedicated endpoint for this, so it is a scan of the listing.
    pub async fn my_aluno(&self, user_id: &str) -> FetchResult<Aluno> {
        let alunos = self.list().await?;
        alunos
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| {
                Arc::new(ApiError::NotFound(format!(
                    "nenhum aluno para o usuário {user_id}"
                )))
            })
    }

    // -- mutations --

    /// Create an aluno.  There is no optimistic step (the server assigns
    /// the id); on success the new record is prepended to the cached
    /// listing and seeded by id, then the listing is marked stale so the
    /// next read reconciles with the server's ordering.
    pub async fn create(&self, dto: &CreateAluno) -> ApiResult<Aluno> {
        let created = self.api.create_aluno(dto).await?;
        if !self.list.update(&ListKey, |alunos| {
            alunos.insert(0, created.clone());
        }) {
            tracing::debug!("Aluno list not cached yet, skipping prepend");
        }
        self.by_id.insert(created.id.clone(), created.clone());
        self.list.invalidate(&ListKey);
        Ok(created)
    }

    /// Update an aluno optimistically.  The cached views show the merged
    /// record immediately; the server's response is authoritative and
    /// replaces the guess, or the views roll back on failure.
    pub async fn update(&self, id: &str, dto: &UpdateAluno) -> ApiResult<Aluno> {
        let key = id.to_string();
        let list_ctx = OptimisticContext::capture(&self.list, [ListKey]);
        let id_ctx = OptimisticContext::capture(&self.by_id, [key.clone()]);

        self.list.update(&ListKey, |alunos| {
            if let Some(aluno) = alunos.iter_mut().find(|a| a.id == key) {
                dto.apply_to(aluno);
            }
        });
        self.by_id.update(&key, |aluno| dto.apply_to(aluno));

        match self.api.update_aluno(id, dto).await {
            Ok(updated) => {
                self.list.update(&ListKey, |alunos| {
                    if let Some(aluno) = alunos.iter_mut().find(|a| a.id == key) {
                        *aluno = updated.clone();
                    }
                });
                self.by_id.insert(key.clone(), updated.clone());
                self.list.invalidate(&ListKey);
                self.by_id.invalidate(&key);
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(aluno_id = %id, error = %err, "Aluno update failed, rolling back");
                list_ctx.restore();
                id_ctx.restore();
                Err(err)
            }
        }
    }

    /// Delete an aluno optimistically: it disappears from the views at
    /// once and reappears if the server refuses.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let key = id.to_string();
        let list_ctx = OptimisticContext::capture(&self.list, [ListKey]);
        let id_ctx = OptimisticContext::capture(&self.by_id, [key.clone()]);

        self.list.update(&ListKey, |alunos| {
            alunos.retain(|a| a.id != key);
        });
        self.by_id.remove(&key);

        match self.api.delete_aluno(id).await {
            Ok(()) => {
                self.list.invalidate(&ListKey);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(aluno_id = %id, error = %err, "Aluno delete failed, rolling back");
                list_ctx.restore();
                id_ctx.restore();
                Err(err)
            }
        }
    }
}
