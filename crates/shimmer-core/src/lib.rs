//! Core abstractions for shimmer.
//!
//! This crate provides the pieces shared by every shimmer integration:
//! - [`Signal`] / [`VetoSignal`] for decoupled, ordered event dispatch
//! - [`ShimmerError`] and the crate-wide [`Result`] alias
//! - [`Options`] for configuring a UI host

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Slot identities are addresses by definition
#![allow(clippy::fn_to_numeric_cast)]

pub mod error;
pub mod options;
pub mod signal;

pub use error::{Result, ShimmerError};
pub use options::Options;
pub use signal::{Broadcast, Emission, Signal, Slot, SlotId, Veto, VetoSignal};

// Re-export glam types for convenience
pub use glam::{IVec2, Mat4, UVec2, Vec2, Vec4};
