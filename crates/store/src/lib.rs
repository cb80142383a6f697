//! Remote collection cache for the coaching API.
//!
//! Serves server-owned collections with minimal redundant traffic while
//! keeping the UI responsive to mutations before server confirmation:
//!
//! - [`cache::Cache`] — generic stale-while-revalidate cache with
//!   request coalescing, retries, and targeted invalidation;
//! - [`mutation::OptimisticContext`] — pre-mutation snapshots used to
//!   roll back speculative writes when the remote call fails;
//! - per-resource stores ([`alunos::AlunoStore`],
//!   [`professores::ProfessorStore`], [`invite_codes::InviteCodeStore`],
//!   [`answers::AnswerStore`], [`history::HistoryStore`]) wiring cache
//!   and transport together with each resource's reconciliation rules.
//!
//! The transport is abstracted behind [`api::RemoteApi`] so stores can be
//! exercised against an in-memory stub in tests.

pub mod alunos;
pub mod answers;
pub mod api;
pub mod cache;
pub mod history;
pub mod invite_codes;
pub mod mutation;
pub mod professores;
