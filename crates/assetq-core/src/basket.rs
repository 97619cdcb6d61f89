//! Basket search: criteria matching over the asset universe.

use crate::{
    AssetUniverse, BasketCriteria, BasketResponse, CompiledCriteria, CriteriaPolicy, Criterion,
    QueryError,
};

/// Selects the assets that satisfy every populated criteria field.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasketSearch {
    policy: CriteriaPolicy,
}

impl BasketSearch {
    pub const fn new(policy: CriteriaPolicy) -> Self {
        Self { policy }
    }

    /// Validate `criteria` and scan the universe.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCriteria` when a populated field is malformed. An
    /// empty result is not an error.
    pub fn search(
        &self,
        universe: &AssetUniverse,
        criteria: &BasketCriteria,
    ) -> Result<BasketResponse, QueryError> {
        let compiled = criteria.compile(&self.policy)?;
        tracing::debug!(
            fields = ?compiled.criteria().iter().map(Criterion::field).collect::<Vec<_>>(),
            "criteria compiled"
        );
        Ok(Self::scan(universe, &compiled))
    }

    /// Results follow the universe's canonical order.
    pub fn scan(universe: &AssetUniverse, criteria: &CompiledCriteria) -> BasketResponse {
        let asset_ids = universe
            .iter()
            .filter(|record| criteria.matches(record))
            .map(|record| record.asset_id.clone())
            .collect();
        BasketResponse::new(asset_ids)
    }
}
