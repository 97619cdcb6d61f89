//! # Domain Models
//!
//! Canonical domain types for assetq.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AssetId`] | Trimmed, opaque asset identifier |
//! | [`AssetRecord`] | One instrument with its price, classification and research blocks |
//! | [`PriceSnapshot`] | Current price, previous close, change and volume |
//! | [`Classification`] | Sector, industry, market-cap bucket, geography, asset type |
//! | [`ResearchInfo`] | Fundamentals and analyst consensus |
//! | [`ConsensusRating`] | `Strong Buy` through `Strong Sell` |
//! | [`UtcDateTime`] | RFC3339 timestamp normalized to UTC |
//!
//! Constructors validate their invariants and return [`ValidationError`](crate::ValidationError)
//! on failure; values decoded from a snapshot file are validated when the
//! [`AssetUniverse`](crate::AssetUniverse) is built.

mod asset_id;
mod models;
mod timestamp;

pub use asset_id::AssetId;
pub use models::{AssetRecord, Classification, ConsensusRating, PriceSnapshot, ResearchInfo};
pub use timestamp::UtcDateTime;
