//! Cached store for professores.
//!
//! Same shape as the aluno store, with a longer freshness window: the
//! professor roster changes rarely, so listings are served for a full
//! minute before revalidation.

use std::sync::Arc;
use std::time::Duration;

use evotrack_client::error::ApiResult;
use evotrack_core::models::{CreateProfessor, Professor, UpdateProfessor};
use evotrack_core::types::Id;

use crate::api::RemoteApi;
use crate::cache::{require_enabled, Cache, CacheOptions, FetchResult, ListKey};
use crate::mutation::OptimisticContext;

/// Freshness window for professor listings.
pub const PROFESSOR_FRESH_FOR: Duration = Duration::from_secs(60);

pub struct ProfessorStore {
    api: Arc<dyn RemoteApi>,
    opts: CacheOptions,
    list: Cache<ListKey, Vec<Professor>>,
    by_id: Cache<Id, Professor>,
}

impl ProfessorStore {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self::with_options(
            api,
            CacheOptions {
                fresh_for: PROFESSOR_FRESH_FOR,
                ..CacheOptions::default()
            },
        )
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

    pub async fn list(&self) -> FetchResult<Vec<Professor>> {
        let api = Arc::clone(&self.api);
        let result = self
            .list
            .get_with(ListKey, self.opts, move || {
                let api = Arc::clone(&api);
                async move { api.list_professores().await }
            })
            .await;
        require_enabled(result)
    }

    pub async fn get(&self, id: &str) -> FetchResult<Professor> {
        let api = Arc::clone(&self.api);
        let id_owned = id.to_string();
        let result = self
            .by_id
            .get_with(id.to_string(), self.opts, move || {
                let api = Arc::clone(&api);
                let id = id_owned.clone();
                async move { api.get_professor(&id).await }
            })
            .await;
        require_enabled(result)
    }

    // -- mutations --

    pub async fn create(&self, dto: &CreateProfessor) -> ApiResult<Professor> {
        let created = self.api.create_professor(dto).await?;
        self.list.update(&ListKey, |professores| {
            professores.insert(0, created.clone());
        });
        self.by_id.insert(created.id.clone(), created.clone());
        self.list.invalidate(&ListKey);
        Ok(created)
    }

    pub async fn update(&self, id: &str, dto: &UpdateProfessor) -> ApiResult<Professor> {
        let key = id.to_string();
        let list_ctx = OptimisticContext::capture(&self.list, [ListKey]);
        let id_ctx = OptimisticContext::capture(&self.by_id, [key.clone()]);

        self.list.update(&ListKey, |professores| {
            if let Some(professor) = professores.iter_mut().find(|p| p.id == key) {
                dto.apply_to(professor);
            }
        });
        self.by_id.update(&key, |professor| dto.apply_to(professor));

        match self.api.update_professor(id, dto).await {
            Ok(updated) => {
                self.list.update(&ListKey, |professores| {
                    if let Some(professor) = professores.iter_mut().find(|p| p.id == key) {
                        *professor = updated.clone();
                    }
                });
                self.by_id.insert(key.clone(), updated.clone());
                self.list.invalidate(&ListKey);
                self.by_id.invalidate(&key);
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(professor_id = %id, error = %err, "Professor update failed, rolling back");
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

        self.list.update(&ListKey, |professores| {
            professores.retain(|p| p.id != key);
        });
        self.by_id.remove(&key);

        match self.api.delete_professor(id).await {
            Ok(()) => {
                self.list.invalidate(&ListKey);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(professor_id = %id, error = %err, "Professor delete failed, rolling back");
                list_ctx.restore();
                id_ctx.restore();
                Err(err)
            }
        }
    }
}
