//! # DeepGuard HTTP
//!
//! axum transport for the DeepGuard analysis service. Thin glue: handlers
//! validate the request envelope, call the analysis pipeline, and map the
//! error taxonomy onto status codes. All analysis semantics live in
//! `deepguard-detect` and `deepguard-core`.

pub mod runtime;

pub use runtime::HttpRuntime;
