//! Wire contract: operations, request/response payloads and query errors.
//!
//! # Operations
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | `getAssetPrice` | [`AssetIdRequest`] | [`PriceResponse`] |
//! | `getAssetClassification` | [`AssetIdRequest`] | [`ClassificationResponse`] |
//! | `getAssetBaskets` | [`BasketRequest`] | [`BasketResponse`] |
//! | `getAssetResearchData` | [`AssetIdRequest`] | [`ResearchResponse`] |
//!
//! All field names are camelCase on the wire.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AssetId, BasketCriteria, Classification, PriceSnapshot, ResearchInfo};

/// Query operation exposed at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "getAssetPrice")]
    Price,
    #[serde(rename = "getAssetClassification")]
    Classification,
    #[serde(rename = "getAssetBaskets")]
    Baskets,
    #[serde(rename = "getAssetResearchData")]
    Research,
}

impl Operation {
    pub const ALL: [Self; 4] = [
        Self::Price,
        Self::Classification,
        Self::Baskets,
        Self::Research,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "getAssetPrice",
            Self::Classification => "getAssetClassification",
            Self::Baskets => "getAssetBaskets",
            Self::Research => "getAssetResearchData",
        }
    }

    /// Short name used by the command-line front end.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Classification => "classification",
            Self::Baskets => "baskets",
            Self::Research => "research",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == trimmed || op.short_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| QueryError::invalid_request(format!("unknown operation '{trimmed}'")))
    }
}

/// Query error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    /// Malformed or missing request field, caught before delegation.
    InvalidRequest,
    /// Malformed or inconsistent basket bound.
    InvalidCriteria,
    /// Unknown asset id, or a known asset without the requested data block.
    NotFound,
    Internal,
}

/// Structured failure returned by every query operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    kind: QueryErrorKind,
    message: String,
}

impl QueryError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::InvalidCriteria,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> QueryErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Pure reads are safe to re-issue, but only an internal failure can
    /// produce a different outcome on retry.
    pub const fn retryable(&self) -> bool {
        matches!(self.kind, QueryErrorKind::Internal)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            QueryErrorKind::InvalidRequest => "query.invalid_request",
            QueryErrorKind::InvalidCriteria => "query.invalid_criteria",
            QueryErrorKind::NotFound => "query.not_found",
            QueryErrorKind::Internal => "query.internal",
        }
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for QueryError {}

/// Request payload for the three single-asset lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetIdRequest {
    pub asset_id: AssetId,
}

impl AssetIdRequest {
    pub fn new(asset_id: &str) -> Result<Self, QueryError> {
        let asset_id = AssetId::parse(asset_id)
            .map_err(|error| QueryError::invalid_request(format!("assetId: {error}")))?;
        Ok(Self { asset_id })
    }
}

/// Request payload for basket search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasketRequest {
    pub criteria: BasketCriteria,
}

impl BasketRequest {
    pub fn new(criteria: BasketCriteria) -> Self {
        Self { criteria }
    }
}

/// One line of a batched request stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub operation: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub asset_id: AssetId,
    #[serde(flatten)]
    pub price: PriceSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    pub asset_id: AssetId,
    #[serde(flatten)]
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResponse {
    pub asset_id: AssetId,
    #[serde(flatten)]
    pub research: ResearchInfo,
}

/// Basket search result.
///
/// `totalCount` is derived from `assetIds` and cannot be set on its own;
/// decoding a payload whose count disagrees with its id list fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBasketResponse")]
pub struct BasketResponse {
    asset_ids: Vec<AssetId>,
    total_count: usize,
}

impl BasketResponse {
    pub fn new(asset_ids: Vec<AssetId>) -> Self {
        let total_count = asset_ids.len();
        Self {
            asset_ids,
            total_count,
        }
    }

    pub fn asset_ids(&self) -> &[AssetId] {
        &self.asset_ids
    }

    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn into_asset_ids(self) -> Vec<AssetId> {
        self.asset_ids
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBasketResponse {
    asset_ids: Vec<AssetId>,
    total_count: usize,
}

impl TryFrom<RawBasketResponse> for BasketResponse {
    type Error = String;

    fn try_from(raw: RawBasketResponse) -> Result<Self, Self::Error> {
        if raw.total_count != raw.asset_ids.len() {
            return Err(format!(
                "totalCount {} does not match {} assetIds",
                raw.total_count,
                raw.asset_ids.len()
            ));
        }
        Ok(Self::new(raw.asset_ids))
    }
}
