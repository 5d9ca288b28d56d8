// src/ui/widgets/mod.rs

// Module declarations for all UI widgets.
pub mod footer;      // Key hints for the current state.
pub mod input;       // The target domain input field.
pub mod lookup_view; // Property/value view of a single-domain lookup.
pub mod results;     // The streaming scan results table.
pub mod summary;     // Progress gauge and per-verdict counts.
