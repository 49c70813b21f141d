//! Domain layer - the lead entity and its wire representations.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! Both the store mapping and the HTTP layer build on the types defined here.

pub mod constants;
pub mod lead;

pub use constants::*;
pub use lead::{Lead, LeadSubmission, SubmittedLead};
