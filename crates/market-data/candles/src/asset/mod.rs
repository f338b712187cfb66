//! Asset taxonomy and settings validation
//!
//! The aggregation engine never validates settings itself; callers that
//! manage asset configuration use this module directly.

pub mod settings;
pub mod types;

pub use settings::{
    AssetAddress, AssetAddressParsed, AssetSettings, UnboundAssetAddress, ValidationError,
};
pub use types::{AssetStateConfig, AssetType, DataType};
