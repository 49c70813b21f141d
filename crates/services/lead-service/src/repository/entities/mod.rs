//! SeaORM entities.

pub mod lead;
