//! AWS Secrets Manager backend.
//!
//! Enabled via the `aws` feature (on by default).

mod convert;
mod store;

pub use store::AwsSecretsStore;
