//! Query façade exposing the four operations.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::lookup::{AssetLookup, ClassificationLookup, PriceLookup, ResearchLookup};
use crate::{
    AssetIdRequest, BasketRequest, BasketResponse, BasketSearch, ClassificationResponse,
    CoreError, Envelope, EnvelopeMeta, Operation, PriceResponse, QueryError, QueryErrorKind,
    ResearchResponse, ServiceConfig, ServiceRequest, UniverseHandle, UniverseSnapshot,
};

/// Composes the lookups and basket search over a shared universe handle.
///
/// Every call pins one universe snapshot for its whole duration. The service
/// is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct QueryService {
    universe: UniverseHandle,
    basket: BasketSearch,
    config: ServiceConfig,
}

impl QueryService {
    pub fn new(universe: UniverseHandle, config: ServiceConfig) -> Self {
        Self {
            universe,
            basket: BasketSearch::new(config.policy),
            config,
        }
    }

    /// Build a service from configuration, loading the configured snapshot
    /// file if one is set.
    pub fn from_config(config: ServiceConfig) -> Result<Self, CoreError> {
        let universe = match &config.universe_path {
            Some(path) => crate::AssetUniverse::from_path(path)?,
            None => crate::AssetUniverse::empty(),
        };
        Ok(Self::new(UniverseHandle::new(universe), config))
    }

    pub fn universe(&self) -> &UniverseHandle {
        &self.universe
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn price(&self, request: &AssetIdRequest) -> Result<PriceResponse, QueryError> {
        Self::lookup::<PriceLookup>(&self.universe.snapshot()?, request)
    }

    pub fn classification(
        &self,
        request: &AssetIdRequest,
    ) -> Result<ClassificationResponse, QueryError> {
        Self::lookup::<ClassificationLookup>(&self.universe.snapshot()?, request)
    }

    pub fn research(&self, request: &AssetIdRequest) -> Result<ResearchResponse, QueryError> {
        Self::lookup::<ResearchLookup>(&self.universe.snapshot()?, request)
    }

    pub fn baskets(&self, request: &BasketRequest) -> Result<BasketResponse, QueryError> {
        self.search(&self.universe.snapshot()?, request)
    }

    fn search(
        &self,
        snapshot: &UniverseSnapshot,
        request: &BasketRequest,
    ) -> Result<BasketResponse, QueryError> {
        let response = self.basket.search(snapshot, &request.criteria)?;
        tracing::debug!(
            operation = %Operation::Baskets,
            criteria = ?request.criteria,
            matched = response.total_count(),
            universe = snapshot.len(),
            snapshot_version = snapshot.version(),
            "basket search complete"
        );
        Ok(response)
    }

    fn lookup<L: AssetLookup>(
        snapshot: &UniverseSnapshot,
        request: &AssetIdRequest,
    ) -> Result<L::Output, QueryError> {
        let output = L::lookup(snapshot, &request.asset_id)?;
        tracing::debug!(
            operation = %L::OPERATION,
            asset_id = %request.asset_id,
            snapshot_version = snapshot.version(),
            "lookup complete"
        );
        Ok(output)
    }

    /// Transport entry point: decode `payload`, dispatch, and wrap the
    /// outcome in an envelope. Every failure is reported through `errors`.
    pub fn handle(&self, operation: Operation, payload: Value) -> Envelope<Value> {
        let started = Instant::now();
        let mut meta = EnvelopeMeta::new(self.config.schema_version.clone(), Some(operation));

        let result = match self.universe.snapshot() {
            Ok(snapshot) => {
                meta = meta.with_snapshot_version(snapshot.version());
                self.dispatch(&snapshot, operation, payload)
            }
            Err(error) => Err(error),
        };

        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let meta = meta.with_latency(latency_ms);

        match result {
            Ok(data) => {
                tracing::info!(%operation, latency_ms, "query served");
                Envelope::success(meta, data)
            }
            Err(error) => {
                log_failure(operation, &error);
                Envelope::failure(meta, &error)
            }
        }
    }

    fn dispatch(
        &self,
        snapshot: &UniverseSnapshot,
        operation: Operation,
        payload: Value,
    ) -> Result<Value, QueryError> {
        match operation {
            Operation::Price => {
                let request = decode(operation, payload)?;
                encode(Self::lookup::<PriceLookup>(snapshot, &request))
            }
            Operation::Classification => {
                let request = decode(operation, payload)?;
                encode(Self::lookup::<ClassificationLookup>(snapshot, &request))
            }
            Operation::Baskets => {
                let request = decode(operation, payload)?;
                encode(self.search(snapshot, &request))
            }
            Operation::Research => {
                let request = decode(operation, payload)?;
                encode(Self::lookup::<ResearchLookup>(snapshot, &request))
            }
        }
    }

    /// Handle one batched request whose operation is still a raw string.
    pub fn handle_request(&self, request: ServiceRequest) -> Envelope<Value> {
        match request.operation.parse::<Operation>() {
            Ok(operation) => self.handle(operation, request.payload),
            Err(error) => {
                tracing::warn!(operation = %request.operation, code = error.code(), "{}", error.message());
                Envelope::failure(
                    EnvelopeMeta::new(self.config.schema_version.clone(), None),
                    &error,
                )
            }
        }
    }
}

fn decode<T: DeserializeOwned>(operation: Operation, payload: Value) -> Result<T, QueryError> {
    if !payload.is_object() {
        return Err(QueryError::invalid_request(format!(
            "{operation} payload must be a JSON object"
        )));
    }
    serde_json::from_value(payload)
        .map_err(|error| QueryError::invalid_request(format!("{operation}: {error}")))
}

fn encode<T: Serialize>(result: Result<T, QueryError>) -> Result<Value, QueryError> {
    let data = result?;
    serde_json::to_value(data)
        .map_err(|error| QueryError::internal(format!("failed to encode response: {error}")))
}

fn log_failure(operation: Operation, error: &QueryError) {
    match error.kind() {
        QueryErrorKind::Internal => {
            tracing::error!(%operation, code = error.code(), "{}", error.message());
        }
        _ => {
            tracing::warn!(%operation, code = error.code(), "{}", error.message());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AssetId, AssetRecord, AssetUniverse, BasketCriteria, Classification};

    fn service() -> QueryService {
        let universe = AssetUniverse::new(vec![AssetRecord::new(AssetId::parse("AAPL").expect("id"))
            .with_classification(
                Classification::new(
                    "Technology",
                    "Software",
                    "Large Cap",
                    "United States",
                    "Common Stock",
                )
                .expect("classification"),
            )])
        .expect("universe");
        QueryService::new(UniverseHandle::new(universe), ServiceConfig::default())
    }

    #[test]
    fn typed_baskets_delegates_to_search() {
        let response = service()
            .baskets(&BasketRequest::new(BasketCriteria::new().with_sector("Technology")))
            .expect("search");
        assert_eq!(response.total_count(), 1);
    }

    #[test]
    fn handle_wraps_success() {
        let envelope = service().handle(Operation::Classification, json!({ "assetId": " AAPL " }));

        assert!(envelope.is_success());
        assert_eq!(envelope.meta.snapshot_version, Some(1));
        let data = envelope.data.expect("data");
        assert_eq!(data["assetId"], "AAPL");
        assert_eq!(data["industry"], "Software");
    }

    #[test]
    fn handle_rejects_non_object_payload() {
        let envelope = service().handle(Operation::Price, json!("AAPL"));
        assert_eq!(envelope.errors[0].code, "query.invalid_request");
    }

    #[test]
    fn handle_request_rejects_unknown_operation() {
        let envelope = service().handle_request(ServiceRequest {
            operation: String::from("getAssetNews"),
            payload: json!({}),
        });
        assert_eq!(envelope.errors[0].code, "query.invalid_request");
        assert!(envelope.meta.operation.is_none());
    }
}
