//! Transfers per-vertex skin weights from a mesh surface onto the points
//! of a stylized stroke object.
//!
//! The scene model in [`scene`] stands in for a host application's scene
//! graph: surfaces carry rest and per-frame poses plus named weight
//! channels, stroke objects carry layered, per-frame drawings. The two
//! operations are [`transfer::transfer`] and [`delete::delete_weights`].
//!
//! The nearest-reference search is a linear scan with no spatial index.
//! This is a one-shot authoring tool, not a per-frame runtime path.

#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod delete;
pub mod nearest;
pub mod pose;
pub mod scene;
pub mod sink;
pub mod sk_error;
pub mod transfer;
pub mod types;
mod util;

// Re-exports
pub use {
    sk_error::SkError,
    types::{PoseMode, SearchMode, TransferSettings},
};
