//! Application services layer - lead use cases.

mod lead_service;

pub use lead_service::{LeadManager, LeadService};
