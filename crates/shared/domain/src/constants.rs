//! Domain-level constants.
//!
//! These constants define the defaults applied to lead requests.

// =============================================================================
// Listing
// =============================================================================

/// Number of leads returned when the `limit` query parameter is absent
pub const DEFAULT_LEAD_LIMIT: u64 = 50;
