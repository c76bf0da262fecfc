//! Multilingual chat relay server library.
//!
//! Participants share one conversation while each of them reads it in their
//! own preferred language: originals are persisted verbatim, and every
//! delivered copy (history on join, live messages) is translated per
//! recipient.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
