//! Optimistic-mutation behavior of the aluno store: speculative edits,
//! server reconciliation, and rollback on failure.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use assert_matches::assert_matches;

use evotrack_client::error::ApiError;
use evotrack_core::models::{CreateAluno, UpdateAluno};
use evotrack_store::alunos::AlunoStore;

use common::{base_time, sample_aluno, StubApi};

fn store_with(alunos: Vec<evotrack_core::models::Aluno>) -> (Arc<StubApi>, AlunoStore) {
    let api = Arc::new(StubApi::with_alunos(alunos));
    let store = AlunoStore::new(Arc::clone(&api) as Arc<dyn evotrack_store::api::RemoteApi>);
    (api, store)
}

#[tokio::test]
async fn list_is_fetched_once_and_then_served_from_cache() {
    let (api, store) = store_with(vec![sample_aluno("a1", "u1")]);

    let first = store.list().await.unwrap();
    let second = store.list().await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second[0].id, "a1");
    assert_eq!(api.list_aluno_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn update_applies_the_server_response_not_the_optimistic_guess() {
    let (_, store) = store_with(vec![sample_aluno("a1", "u1"), sample_aluno("a2", "u2")]);
    store.list().await.unwrap();

    let dto = UpdateAluno {
        peso_kg: Some(77.5),
        ..Default::default()
    };
    let updated = store.update("a1", &dto).await.unwrap();

    // The stub stamps updated_at server-side; the cache must hold the
    // server's record, not the locally merged one.
    assert_eq!(updated.peso_kg, Some(77.5));
    assert!(updated.updated_at > base_time());

    let cached = store.list().await.unwrap();
    let a1 = cached.iter().find(|a| a.id == "a1").unwrap();
    assert_eq!(a1.peso_kg, Some(77.5));
    assert_eq!(a1.updated_at, updated.updated_at);

    let by_id = store.get("a1").await.unwrap();
    assert_eq!(by_id.updated_at, updated.updated_at);
}

#[tokio::test]
async fn failed_update_rolls_back_every_cached_view() {
    let (api, store) = store_with(vec![sample_aluno("a1", "u1")]);
    store.list().await.unwrap();
    store.get("a1").await.unwrap();

    api.fail_writes.store(1, Ordering::SeqCst);
    let dto = UpdateAluno {
        peso_kg: Some(999.0),
        ..Default::default()
    };
    let err = store.update("a1", &dto).await.unwrap_err();
    assert_matches!(err, ApiError::Validation(_));

    let cached = store.list().await.unwrap();
    assert_eq!(cached[0].peso_kg, Some(80.0));
    let by_id = store.get("a1").await.unwrap();
    assert_eq!(by_id.peso_kg, Some(80.0));
}

#[tokio::test]
async fn create_prepends_to_the_listing_and_seeds_the_by_id_view() {
    let (api, store) = store_with(vec![sample_aluno("a1", "u1")]);
    store.list().await.unwrap();

    let dto = CreateAluno {
        nome: "Novo Aluno".into(),
        email: "novo@example.com".into(),
        password: "senha123".into(),
        professor_id: "p9".into(),
        telefone: None,
        altura_cm: Some(182.0),
        peso_kg: Some(90.0),
        idade: None,
        cintura_cm: None,
        quadril_cm: None,
        pescoco_cm: None,
        alimentos_quer_diario: None,
        alimentos_nao_comem: None,
        alergias_alimentares: None,
        suplementos_consumidos: None,
        dores_articulares: None,
        dias_treino_semana: None,
        frequencia_horarios_refeicoes: None,
    };
    let created = store.create(&dto).await.unwrap();
    assert_eq!(created.professor_id, "p9");

    let cached = store.list().await.unwrap();
    assert_eq!(cached[0].id, created.id);

    // Seeded by id: no extra fetch needed.
    let by_id = store.get(&created.id).await.unwrap();
    assert_eq!(by_id.peso_kg, Some(90.0));
    assert_eq!(api.list_aluno_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn delete_removes_immediately_and_restores_on_failure() {
    let (api, store) = store_with(vec![sample_aluno("a1", "u1"), sample_aluno("a2", "u2")]);
    store.list().await.unwrap();

    api.fail_writes.store(1, Ordering::SeqCst);
    let err = store.delete("a1").await.unwrap_err();
    assert_matches!(err, ApiError::Validation(_));

    let cached = store.list().await.unwrap();
    assert_eq!(cached.len(), 2);

    store.delete("a1").await.unwrap();
    let cached = store.list().await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, "a2");

    // The by-id entry is gone too: the next read goes to the server,
    // which no longer knows the aluno.
    let err = store.get("a1").await.unwrap_err();
    assert_matches!(err.as_ref(), ApiError::NotFound(_));
}

#[tokio::test]
async fn my_aluno_scans_the_listing_by_user_account() {
    let (_, store) = store_with(vec![sample_aluno("a1", "u1"), sample_aluno("a2", "u2")]);

    let mine = store.my_aluno("u2").await.unwrap();
    assert_eq!(mine.id, "a2");

    let missing = store.my_aluno("u9").await.unwrap_err();
    assert_matches!(missing.as_ref(), ApiError::NotFound(_));
}
