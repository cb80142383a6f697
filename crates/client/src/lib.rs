//! HTTP client for the coaching REST API.
//!
//! Wraps the API behind [`ApiClient`](api::ApiClient): a shared
//! [`reqwest`] client with a fixed request timeout, bearer-credential
//! session state with coalesced 401 teardown, the error taxonomy the rest
//! of the workspace consumes, and typed per-resource endpoint wrappers.

pub mod alunos;
pub mod answers;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod historico;
pub mod invite_codes;
pub mod professores;
pub mod session;
