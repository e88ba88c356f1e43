//! Core domain types
//!
//! Flat records mirrored from backend responses. Nothing here is created
//! locally; every value comes out of a DTO conversion.

pub mod branch;
pub mod commit;
pub mod page;
pub mod repository;
pub mod user;

pub use branch::Branch;
pub use commit::Commit;
pub use page::{RepoPage, RepoStats};
pub use repository::{RepoId, Repository, Visibility};
pub use user::User;
