mod endpoints;
mod suite;

pub use endpoints::{Constructor, EndPointObjs, Mutation, validate_endpoints};
pub use suite::IntegrationSuite;
