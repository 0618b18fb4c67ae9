//!
//! # Admission
//!
//! Validation run by the API server before an object is written.
//! Each resource kind may have one admitter; kinds without one are admitted.
//!
mod error;
mod request;
mod admitter;
pub mod management;

pub use error::AdmissionError;
pub use request::{AdmissionRequest, Operation};
pub use admitter::{Admitter, AdmissionRegistry};
pub use management::register_management_v3;
