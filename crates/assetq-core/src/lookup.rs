//! Single-asset lookups over a universe snapshot.

use crate::{
    AssetId, AssetRecord, AssetUniverse, ClassificationResponse, Operation, PriceResponse,
    QueryError, ResearchResponse,
};

/// Resolves one block of one asset record.
///
/// Every lookup shares the same contract: an id absent from the universe,
/// or a record without the requested block, fails with `NotFound`. The
/// returned value is an owned copy.
pub trait AssetLookup {
    type Output;

    const OPERATION: Operation;

    /// Name of the record block this lookup reads, used in error messages.
    const BLOCK: &'static str;

    fn extract(record: &AssetRecord) -> Option<Self::Output>;

    fn lookup(universe: &AssetUniverse, asset_id: &AssetId) -> Result<Self::Output, QueryError> {
        let record = universe.get(asset_id).ok_or_else(|| {
            QueryError::not_found(format!("asset '{asset_id}' is not in the universe"))
        })?;

        Self::extract(record).ok_or_else(|| {
            QueryError::not_found(format!("no {} data for '{asset_id}'", Self::BLOCK))
        })
    }
}

pub struct PriceLookup;

impl AssetLookup for PriceLookup {
    type Output = PriceResponse;

    const OPERATION: Operation = Operation::Price;
    const BLOCK: &'static str = "price";

    fn extract(record: &AssetRecord) -> Option<Self::Output> {
        record.price.as_ref().map(|price| PriceResponse {
            asset_id: record.asset_id.clone(),
            price: price.clone(),
        })
    }
}

pub struct ClassificationLookup;

impl AssetLookup for ClassificationLookup {
    type Output = ClassificationResponse;

    const OPERATION: Operation = Operation::Classification;
    const BLOCK: &'static str = "classification";

    fn extract(record: &AssetRecord) -> Option<Self::Output> {
        record
            .classification
            .as_ref()
            .map(|classification| ClassificationResponse {
                asset_id: record.asset_id.clone(),
                classification: classification.clone(),
            })
    }
}

pub struct ResearchLookup;

impl AssetLookup for ResearchLookup {
    type Output = ResearchResponse;

    const OPERATION: Operation = Operation::Research;
    const BLOCK: &'static str = "research";

    fn extract(record: &AssetRecord) -> Option<Self::Output> {
        record.research.as_ref().map(|research| ResearchResponse {
            asset_id: record.asset_id.clone(),
            research: research.clone(),
        })
    }
}
