//! Asset settings and their validation rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::AssetType;

/// Date format of `min_data_date`
pub const MIN_DATA_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted `decimals` value
pub const MAX_DECIMALS: i8 = 12;

/// Asset settings rule violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Asset name not in the taxonomy
    #[error("Unknown asset type: {0}")]
    UnknownAsset(String),

    /// Book-depth query on another asset kind
    #[error("Asset {0} is not a book depth asset")]
    NotBookDepth(AssetType),

    /// Containing set has no ID
    #[error("Set ID must not be empty")]
    EmptySetId,

    /// One of the set ID segments is blank
    #[error("Set ID segment {index} is empty")]
    EmptySetIdSegment {
        /// Position of the blank segment
        index: usize,
    },

    /// Upstream-sourced asset declares dependencies
    #[error("Asset {0} does not accept dependencies")]
    UnexpectedDependencies(AssetType),

    /// Derived asset declares no dependencies
    #[error("Asset {0} requires at least one dependency")]
    MissingDependencies(AssetType),

    /// A dependency address is blank
    #[error("Dependency {index} has an empty address")]
    EmptyDependency {
        /// Position of the blank dependency
        index: usize,
    },

    /// `min_data_date` is not an ISO date
    #[error("Invalid min_data_date {value:?}: {reason}")]
    InvalidMinDataDate {
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },

    /// `min_data_date` set on an asset with dependencies
    #[error("min_data_date should be empty when dependencies are present")]
    MinDataDateWithDependencies,

    /// `decimals` outside `[0, 12]`
    #[error("decimals out of range: {0}")]
    DecimalsOutOfRange(i8),
}

/// Address of another asset, as stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetAddress(pub String);

/// Asset address as configured, before it is bound to a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnboundAssetAddress {
    /// Asset kind
    pub asset_type: AssetType,
    /// Assets this one is derived from
    #[serde(default)]
    pub dependencies: Vec<AssetAddress>,
    /// Kind-specific arguments
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Asset address bound to its containing set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAddressParsed {
    /// Containing set ID segments
    pub set_id: Vec<String>,
    /// Asset kind
    pub asset_type: AssetType,
    /// Assets this one is derived from
    pub dependencies: Vec<AssetAddress>,
    /// Kind-specific arguments
    pub arguments: Vec<String>,
}

/// Per-asset settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Unbound address
    pub address: UnboundAssetAddress,
    /// First date with data, `YYYY-MM-DD`; empty for derived assets
    #[serde(default)]
    pub min_data_date: String,
    /// Display decimals, `0..=12`
    pub decimals: i8,
}

impl UnboundAssetAddress {
    /// Bind the address to `set_id`
    #[must_use]
    pub fn with_set_id(&self, set_id: &[String]) -> AssetAddressParsed {
        AssetAddressParsed {
            set_id: set_id.to_vec(),
            asset_type: self.asset_type,
            dependencies: self.dependencies.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

impl AssetAddressParsed {
    /// Whether the address declares dependencies
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Check the address against its set and the asset taxonomy
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.set_id.is_empty() {
            return Err(ValidationError::EmptySetId);
        }
        if let Some(index) = self.set_id.iter().position(|segment| segment.trim().is_empty()) {
            return Err(ValidationError::EmptySetIdSegment { index });
        }

        if self.asset_type.requires_dependencies() {
            if !self.has_dependencies() {
                return Err(ValidationError::MissingDependencies(self.asset_type));
            }
        } else if self.has_dependencies() {
            return Err(ValidationError::UnexpectedDependencies(self.asset_type));
        }

        if let Some(index) = self
            .dependencies
            .iter()
            .position(|dependency| dependency.0.trim().is_empty())
        {
            return Err(ValidationError::EmptyDependency { index });
        }
        Ok(())
    }
}

impl AssetSettings {
    /// Validate settings relative to the containing set
    pub fn validate(&self, set_id: &[String]) -> Result<(), ValidationError> {
        let address = self.address.with_set_id(set_id);
        address.validate()?;

        if !address.has_dependencies() {
            self.min_data_date()?;
        } else if !self.min_data_date.is_empty() {
            return Err(ValidationError::MinDataDateWithDependencies);
        }

        if !(0..=MAX_DECIMALS).contains(&self.decimals) {
            return Err(ValidationError::DecimalsOutOfRange(self.decimals));
        }
        Ok(())
    }

    /// Parsed `min_data_date`
    pub fn min_data_date(&self) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(&self.min_data_date, MIN_DATA_DATE_FORMAT).map_err(|err| {
            ValidationError::InvalidMinDataDate {
                value: self.min_data_date.clone(),
                reason: err.to_string(),
            }
        })
    }
}
