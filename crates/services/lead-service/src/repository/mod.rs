//! Repository layer for data access.

pub mod entities;
mod lead_repository;

pub use lead_repository::{LeadRepository, LeadStore};

#[cfg(any(test, feature = "test-utils"))]
pub use lead_repository::MockLeadRepository;
