mod trait_store;
mod types;

pub use trait_store::{SecretStore, StoreError};
pub use types::*;
