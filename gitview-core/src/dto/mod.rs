//! Data Transfer Objects for the backend API
//!
//! The backend passes the hosting provider's JSON through mostly untouched,
//! so these DTOs mirror the provider's nested shapes. Each one converts into
//! a flat domain type with `From`.

pub mod branch;
pub mod commit;
pub mod repository;
pub mod user;
