//! gitview Core
//!
//! Core types and view-state logic for the gitview repository explorer.
//!
//! This crate contains:
//! - Domain types: Repository, Branch, Commit, pagination summaries
//! - DTOs: wire shapes returned by the backend API
//! - Session: the token capability and the login/dashboard route gate
//! - Explorer: the per-repository view-state machine, free of any I/O

pub mod domain;
pub mod dto;
pub mod explorer;
pub mod session;
