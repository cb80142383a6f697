//! Cached store for measurement history.
//!
//! History listings are parameterized by aluno and by an optional
//! date-range/limit filter, so the cache key carries both.  Mutations
//! touch every cached listing of the affected aluno plus the "latest
//! measurement" entry, and invalidate them all once the server confirms.

use std::sync::Arc;

use evotrack_client::error::ApiResult;
use evotrack_core::history::{CreateMeasurement, HistoryFilter, MeasurementRecord, UpdateMeasurement};
use evotrack_core::types::Id;

use crate::api::RemoteApi;
use crate::cache::{require_enabled, Cache, CacheOptions, FetchResult};
use crate::mutation::OptimisticContext;

/// Cache key for one filtered history listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub aluno_id: Id,
    pub filter: HistoryFilter,
}

pub struct HistoryStore {
    api: Arc<dyn RemoteApi>,
    opts: CacheOptions,
    lists: Cache<HistoryKey, Vec<MeasurementRecord>>,
    latest: Cache<Id, MeasurementRecord>,
}

impl HistoryStore {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self::with_options(api, CacheOptions::default())
    }

    pub fn with_options(api: Arc<dyn RemoteApi>, opts: CacheOptions) -> Self {
        Self {
            api,
            opts,
            lists: Cache::new(),
            latest: Cache::new(),
        }
    }

    // -- reads --

    /// History listing for one aluno under the given filter.  Each
    /// distinct filter occupies its own cache entry.
    pub async fn list(
        &self,
        aluno_id: &str,
        filter: &HistoryFilter,
    ) -> FetchResult<Vec<MeasurementRecord>> {
        let key = HistoryKey {
            aluno_id: aluno_id.to_string(),
            filter: filter.clone(),
        };
        let api = Arc::clone(&self.api);
        let fetch_aluno = aluno_id.to_string();
        let fetch_filter = filter.clone();
        let result = self
            .lists
            .get_with(key, self.opts, move || {
                let api = Arc::clone(&api);
                let aluno_id = fetch_aluno.clone();
                let filter = fetch_filter.clone();
                async move { api.list_history(&aluno_id, &filter).await }
            })
            .await;
        require_enabled(result)
    }

    /// The most recent measurement for an aluno.
    pub async fn latest(&self, aluno_id: &str) -> FetchResult<MeasurementRecord> {
        let api = Arc::clone(&self.api);
        let fetch_aluno = aluno_id.to_string();
        let result = self
            .latest
            .get_with(aluno_id.to_string(), self.opts, move || {
                let api = Arc::clone(&api);
                let aluno_id = fetch_aluno.clone();
                async move { api.latest_history(&aluno_id).await }
            })
            .await;
        require_enabled(result)
    }

    // -- mutations --

    /// Record a new measurement.  The server assigns the id and the
    /// record timestamp default, so there is no optimistic step: the
    /// confirmed record is inserted into the unfiltered listing and every
    /// cached view of the aluno is marked stale.
    pub async fn create(&self, dto: &CreateMeasurement) -> ApiResult<MeasurementRecord> {
        let created = self.api.create_history(dto).await?;
        let aluno_id = created.aluno_id.clone();

        let unfiltered = HistoryKey {
            aluno_id: aluno_id.clone(),
            filter: HistoryFilter::default(),
        };
        self.lists.update(&unfiltered, |records| {
            records.insert(0, created.clone());
        });
        if self
            .latest
            .get(&aluno_id)
            .map(|current| created.data_registro >= current.data_registro)
            .unwrap_or(false)
        {
            self.latest.insert(aluno_id.clone(), created.clone());
        }

        self.invalidate_aluno(&aluno_id);
        Ok(created)
    }

    /// Edit a measurement optimistically across every cached listing of
    /// the aluno.
    pub async fn update(
        &self,
        aluno_id: &str,
        id: &str,
        dto: &UpdateMeasurement,
    ) -> ApiResult<MeasurementRecord> {
        let latest_key = aluno_id.to_string();
        let list_keys = self.lists.keys_matching(|k| k.aluno_id == aluno_id);
        let lists_ctx = OptimisticContext::capture(&self.lists, list_keys.clone());
        let latest_ctx = OptimisticContext::capture(&self.latest, [latest_key.clone()]);

        for key in &list_keys {
            self.lists.update(key, |records| {
                if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                    dto.apply_to(record);
                }
            });
        }
        self.latest.update(&latest_key, |record| {
            if record.id == id {
                dto.apply_to(record);
            }
        });

        match self.api.update_history(id, dto).await {
            Ok(updated) => {
                for key in &list_keys {
                    self.lists.update(key, |records| {
                        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                            *record = updated.clone();
                        }
                    });
                }
                self.latest.update(&latest_key, |record| {
                    if record.id == id {
                        *record = updated.clone();
                    }
                });
                self.invalidate_aluno(aluno_id);
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(historico_id = %id, error = %err, "Measurement update failed, rolling back");
                lists_ctx.restore();
                latest_ctx.restore();
                Err(err)
            }
        }
    }

    /// Remove a measurement optimistically.  The cached "latest" entry is
    /// dropped when it is the one being deleted, since the new latest is
    /// only known server-side.
    pub async fn delete(&self, aluno_id: &str, id: &str) -> ApiResult<()> {
        let latest_key = aluno_id.to_string();
        let list_keys = self.lists.keys_matching(|k| k.aluno_id == aluno_id);
        let lists_ctx = OptimisticContext::capture(&self.lists, list_keys.clone());
        let latest_ctx = OptimisticContext::capture(&self.latest, [latest_key.clone()]);

        for key in &list_keys {
            self.lists.update(key, |records| {
                records.retain(|r| r.id != id);
            });
        }
        if self
            .latest
            .get(&latest_key)
            .map(|record| record.id == id)
            .unwrap_or(false)
        {
            self.latest.remove(&latest_key);
        }

        match self.api.delete_history(id).await {
            Ok(()) => {
                self.invalidate_aluno(aluno_id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(historico_id = %id, error = %err, "Measurement delete failed, rolling back");
                lists_ctx.restore();
                latest_ctx.restore();
                Err(err)
            }
        }
    }

    /// Mark every cached view of one aluno's history stale.
    fn invalidate_aluno(&self, aluno_id: &str) {
        self.lists.invalidate_matching(|k| k.aluno_id == aluno_id);
        self.latest.invalidate(&aluno_id.to_string());
    }
}
