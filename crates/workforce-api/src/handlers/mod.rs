//! Route handlers organized by domain.

pub mod auth;
pub mod department;
pub mod employee;
pub mod health;
pub mod leave;
pub mod salary;
pub mod setting;
