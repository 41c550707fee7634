#![forbid(unsafe_code)]

//! Secret naming and config-tree folding for secretree.
//!
//! Nothing here talks to a secret store: this crate only knows how a flat,
//! delimited secret name maps onto a path in a nested configuration tree, and
//! which names belong to a given namespace/environment scope.

pub mod codec;
pub mod error;
pub mod filter;
pub mod identity;
pub mod options;
pub mod tree;

pub use crate::codec::{decode, encode, split_key, strip_scope};
pub use crate::error::OptionsError;
pub use crate::filter::ScopeFilter;
pub use crate::identity::SecretIdentity;
pub use crate::options::{
    NamespaceSpec, RawStoreOptions, StoreOptions, StoreOptionsBuilder, DEFAULT_DELIMITER,
    DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_REGION, DEFAULT_SECRET_MAX_OUTPUT_BYTES,
    ENVIRONMENT_ENV_VAR, REGION_ENV_VAR,
};
pub use crate::tree::{flatten, is_intermediate, parse_value, unflatten, ConfigTree, ConfigValue, FlatEntry};
