//! # assetq Core
//!
//! Query contract between an orchestrating caller and a market-data backend.
//!
//! ## Overview
//!
//! Four read-only operations are answered from an immutable universe snapshot:
//!
//! - **Price**: current price snapshot of one asset
//! - **Classification**: sector, industry, market-cap bucket, geography, type
//! - **Research**: fundamentals and analyst consensus
//! - **Baskets**: every asset matching a set of criteria, in canonical order
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`basket`] | Criteria matching over the universe |
//! | [`config`] | Service configuration and `ASSETQ_*` environment variables |
//! | [`contract`] | Operations, request/response payloads, query errors |
//! | [`criteria`] | Basket criteria, price-range grammar, criteria policy |
//! | [`domain`] | Asset records and validated value types |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Validation and loading errors |
//! | [`lookup`] | Single-asset lookups |
//! | [`service`] | The [`QueryService`] façade |
//! | [`universe`] | Universe snapshots and the swap handle |
//!
//! ## Quick Start
//!
//! ```rust
//! use assetq_core::{
//!     AssetUniverse, BasketCriteria, BasketRequest, QueryService, ServiceConfig, UniverseHandle,
//! };
//!
//! let universe = AssetUniverse::from_json_str(r#"{
//!     "assets": [
//!         { "assetId": "AAPL",
//!           "classification": { "sector": "Technology", "industry": "Consumer Electronics",
//!                               "marketCap": "Large Cap", "geography": "United States",
//!                               "assetType": "Common Stock" } }
//!     ]
//! }"#)?;
//! let service = QueryService::new(UniverseHandle::new(universe), ServiceConfig::default());
//!
//! let request = BasketRequest::new(BasketCriteria::new().with_sector("Technology"));
//! let basket = service.baskets(&request)?;
//! assert_eq!(basket.total_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  QueryService   │  decode ─ dispatch ─ envelope
//! └────────┬────────┘
//!          │ one snapshot per call
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Lookups         │     │ BasketSearch     │
//! │ price/class/res │     │ compiled criteria│
//! └────────┬────────┘     └────────┬─────────┘
//!          └───────────┬───────────┘
//!                      ▼
//!            ┌──────────────────┐
//!            │ AssetUniverse    │  swapped whole by UniverseHandle
//!            └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Query operations return [`QueryError`]:
//!
//! ```rust
//! use assetq_core::{QueryError, QueryErrorKind};
//!
//! fn describe(error: &QueryError) -> &'static str {
//!     match error.kind() {
//!         QueryErrorKind::InvalidRequest => "fix the request shape",
//!         QueryErrorKind::InvalidCriteria => "fix the basket bounds",
//!         QueryErrorKind::NotFound => "unknown asset",
//!         QueryErrorKind::Internal => "retry later",
//!     }
//! }
//! ```

pub mod basket;
pub mod config;
pub mod contract;
pub mod criteria;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod lookup;
pub mod service;
pub mod universe;

pub use basket::BasketSearch;
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use contract::{
    AssetIdRequest, BasketRequest, BasketResponse, ClassificationResponse, Operation,
    PriceResponse, QueryError, QueryErrorKind, ResearchResponse, ServiceRequest,
};
pub use criteria::{
    BasketCriteria, CompiledCriteria, CriteriaError, CriteriaPolicy, Criterion, PriceRange,
};
pub use domain::{
    AssetId, AssetRecord, Classification, ConsensusRating, PriceSnapshot, ResearchInfo,
    UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, RequestId, SchemaVersion};
pub use error::{CoreError, ValidationError};
pub use lookup::{AssetLookup, ClassificationLookup, PriceLookup, ResearchLookup};
pub use service::QueryService;
pub use universe::{AssetUniverse, UniverseFile, UniverseHandle, UniverseSnapshot};
