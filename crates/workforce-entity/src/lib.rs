//! # workforce-entity
//!
//! Domain entity models for Workforce. Every struct in this crate
//! represents a database table row, a joined read model, or an input
//! value object. Row types derive `sqlx::FromRow` and serialize with
//! camelCase field names.

pub mod account;
pub mod department;
pub mod employee;
pub mod leave;
pub mod salary;
