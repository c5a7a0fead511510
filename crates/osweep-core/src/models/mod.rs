pub mod types;

// Public API exports
pub use types::{Candidate, Credentials, Image, Instance, Keypair, Resource, ResourceKind};
