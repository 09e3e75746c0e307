//! Test suite for the pipeline model
//!
//! This module organizes tests into logical groups: the status aggregation
//! contract, the authoring-side model, and property-based invariants.
