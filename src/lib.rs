//! # Soundcollide
//!
//! `soundcollide` is a small HTTP backend for registering user profiles and
//! attaching projects to existing users, backed by `PostgreSQL`.
//!
//! ## Request flow
//!
//! Every request is validated before the database is touched. Valid requests
//! reach the [`storage::Store`], which acquires a pooled connection for the
//! duration of a single logical operation and releases it on every exit path.
//!
//! ## Status codes
//!
//! - `400 Bad Request`: missing field, invalid password/confirmation, invalid zipcode.
//! - `404 Not Found`: unknown profile id or unknown username.
//! - `409 Conflict`: username or email already registered.
//! - `500 Internal Server Error`: any other database failure; details are only logged.
//!
//! ## Schema
//!
//! Tables live in versioned SQL files under `migrations/`, applied with
//! `soundcollide migrate` or `soundcollide --migrate`.

pub mod api;
pub mod cli;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
