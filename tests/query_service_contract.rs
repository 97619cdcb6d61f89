//! Contract tests for the query service.
//!
//! Each operation is exercised both through its typed method and through the
//! enveloped transport entry point, against the bundled universe fixture.

use std::io::Write;

use assetq_core::{
    AssetIdRequest, BasketCriteria, BasketRequest, ConsensusRating, Operation, QueryErrorKind,
    QueryService, ServiceConfig, ServiceConfigBuilder, ServiceRequest,
};
use serde_json::{json, Value};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/universe.json");

fn service() -> QueryService {
    let config = ServiceConfigBuilder::new()
        .with_universe_path(FIXTURE)
        .build();
    QueryService::from_config(config).expect("fixture universe should load")
}

fn request(id: &str) -> AssetIdRequest {
    AssetIdRequest::new(id).expect("valid asset id")
}

// =============================================================================
// Typed operations
// =============================================================================

#[test]
fn get_asset_price_returns_the_snapshot_for_a_known_asset() {
    let response = service().price(&request("AAPL")).expect("AAPL is priced");

    assert_eq!(response.asset_id.as_str(), "AAPL");
    assert_eq!(response.price.current_price, 150.25);
    assert_eq!(response.price.volume, 45_678_900);
}

#[test]
fn get_asset_classification_returns_all_five_fields() {
    let response = service()
        .classification(&request("JPM"))
        .expect("JPM is classified");

    assert_eq!(response.classification.sector, "Financials");
    assert_eq!(response.classification.industry, "Banks");
    assert_eq!(response.classification.market_cap, "Large Cap");
    assert!(!response.classification.geography.is_empty());
    assert!(!response.classification.asset_type.is_empty());
}

#[test]
fn get_asset_research_data_returns_fundamentals_and_consensus() {
    let response = service().research(&request("AAPL")).expect("AAPL has research");

    assert_eq!(response.research.revenue_growth, 45.2);
    assert_eq!(response.research.consensus_rating, ConsensusRating::StrongBuy);
    assert!(!response.research.risk_factors.is_empty());
}

#[test]
fn unknown_asset_is_not_found_for_every_single_asset_lookup() {
    let service = service();
    let unknown = request("UNKNOWN");

    let errors = [
        service.price(&unknown).expect_err("price must fail"),
        service.classification(&unknown).expect_err("classification must fail"),
        service.research(&unknown).expect_err("research must fail"),
    ];

    for error in errors {
        assert_eq!(error.kind(), QueryErrorKind::NotFound);
        assert_eq!(error.code(), "query.not_found");
        assert!(error.message().contains("UNKNOWN"));
    }
}

#[test]
fn missing_research_block_is_not_found() {
    let error = service()
        .research(&request("VOO"))
        .expect_err("VOO has no research data");

    assert_eq!(error.kind(), QueryErrorKind::NotFound);
    assert_eq!(error.message(), "no research data for 'VOO'");
}

#[test]
fn asset_ids_are_trimmed_and_matched_exactly() {
    let service = service();

    let response = service.price(&request(" MSFT ")).expect("surrounding whitespace is trimmed");
    assert_eq!(response.asset_id.as_str(), "MSFT");

    let error = service.price(&request("msft")).expect_err("ids are case-sensitive");
    assert_eq!(error.kind(), QueryErrorKind::NotFound);
}

#[test]
fn absent_ids_in_any_notation_are_not_found() {
    let service = service();

    for id in ["7203.T", "^GSPC", "BRK/B", "ABCDEFGHIJKLMNOP"] {
        let envelope = service.handle(Operation::Price, json!({ "assetId": id }));
        assert_eq!(envelope.errors[0].code, "query.not_found", "{id}");
    }
}

#[test]
fn malformed_asset_id_is_an_invalid_request() {
    let error = AssetIdRequest::new("").expect_err("empty id must fail");
    assert_eq!(error.kind(), QueryErrorKind::InvalidRequest);
}

#[test]
fn get_asset_baskets_reports_ids_and_count() {
    let response = service()
        .baskets(&BasketRequest::new(
            BasketCriteria::new()
                .with_sector("Technology")
                .with_min_growth(20.0),
        ))
        .expect("valid criteria");

    let ids: Vec<&str> = response.asset_ids().iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["AAPL", "NVDA"]);
    assert_eq!(response.total_count(), 2);
}

// =============================================================================
// Enveloped transport
// =============================================================================

#[test]
fn envelope_for_price_carries_wire_field_names() {
    let envelope = service().handle(Operation::Price, json!({ "assetId": "AAPL" }));

    assert!(envelope.is_success());
    let wire = serde_json::to_value(&envelope).expect("envelope serializes");
    assert_eq!(wire["meta"]["operation"], "getAssetPrice");
    assert_eq!(wire["meta"]["snapshotVersion"], 1);
    assert_eq!(wire["data"]["assetId"], "AAPL");
    assert_eq!(wire["data"]["currentPrice"], 150.25);
    assert_eq!(wire["data"]["lastUpdated"], "2024-01-29T15:30:00Z");
    assert_eq!(wire["errors"], json!([]));
}

#[test]
fn envelope_for_baskets_carries_total_count() {
    let envelope = service().handle(
        Operation::Baskets,
        json!({ "criteria": { "sector": "Energy" } }),
    );

    let data = envelope.data.expect("empty basket is still data");
    assert_eq!(data["assetIds"], json!([]));
    assert_eq!(data["totalCount"], 0);
}

#[test]
fn envelope_for_research_uses_wire_rating_names() {
    let envelope = service().handle(Operation::Research, json!({ "assetId": "PLUG" }));

    let data = envelope.data.expect("PLUG has research");
    assert_eq!(data["consensusRating"], "Sell");
    assert_eq!(data["revenueGrowth"], -12.5);
}

#[test]
fn unknown_asset_envelope_is_a_non_retryable_not_found() {
    let envelope = service().handle(Operation::Price, json!({ "assetId": "UNKNOWN" }));

    assert!(envelope.data.is_none());
    assert_eq!(envelope.errors.len(), 1);
    assert_eq!(envelope.errors[0].code, "query.not_found");
    assert!(!envelope.errors[0].retryable);
}

#[test]
fn missing_payload_fields_are_invalid_requests() {
    let service = service();

    let cases: [(Operation, Value); 3] = [
        (Operation::Price, json!({})),
        (Operation::Baskets, json!({})),
        (Operation::Classification, json!({ "assetId": 42 })),
    ];

    for (operation, payload) in cases {
        let envelope = service.handle(operation, payload);
        assert_eq!(envelope.errors[0].code, "query.invalid_request", "{operation}");
    }
}

#[test]
fn unknown_criteria_keys_are_invalid_requests() {
    let service = service();

    for criteria in [
        json!({ "sectr": "Energy" }),
        json!({ "min_growth": 1000 }),
        json!({ "sector": "Technology", "maxPe": 30 }),
    ] {
        let envelope = service.handle(Operation::Baskets, json!({ "criteria": criteria }));
        assert!(envelope.data.is_none(), "{criteria}");
        assert_eq!(envelope.errors[0].code, "query.invalid_request", "{criteria}");
    }
}

#[test]
fn unknown_lookup_fields_are_invalid_requests() {
    let envelope = service().handle(
        Operation::Research,
        json!({ "assetId": "AAPL", "includeNews": true }),
    );

    assert_eq!(envelope.errors[0].code, "query.invalid_request");
}

#[test]
fn inverted_price_range_envelope_is_invalid_criteria() {
    let envelope = service().handle(
        Operation::Baskets,
        json!({ "criteria": { "priceRange": "200-100" } }),
    );

    assert_eq!(envelope.errors[0].code, "query.invalid_criteria");
}

#[test]
fn batched_requests_accept_short_operation_names() {
    let service = service();
    let line = r#"{"operation":"classification","payload":{"assetId":"NVDA"}}"#;
    let request: ServiceRequest = serde_json::from_str(line).expect("valid request line");

    let envelope = service.handle_request(request);

    assert_eq!(envelope.meta.operation, Some(Operation::Classification));
    assert_eq!(envelope.data.expect("data")["industry"], "Semiconductors");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn service_without_a_universe_path_starts_empty() {
    let service = QueryService::from_config(ServiceConfig::default()).expect("empty universe");

    let error = service.price(&request("AAPL")).expect_err("nothing loaded");
    assert_eq!(error.kind(), QueryErrorKind::NotFound);
}

#[test]
fn schema_version_from_config_is_stamped_on_envelopes() {
    let config = ServiceConfigBuilder::new()
        .with_universe_path(FIXTURE)
        .with_schema_version("v2.1.0")
        .expect("valid schema version")
        .build();
    let service = QueryService::from_config(config).expect("fixture universe should load");

    let envelope = service.handle(Operation::Price, json!({ "assetId": "AAPL" }));
    assert_eq!(envelope.meta.schema_version.as_str(), "v2.1.0");
}

#[test]
fn universe_can_be_loaded_from_a_temporary_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"assets":[{{"assetId":"XOM","classification":{{"sector":"Energy","industry":"Oil & Gas","marketCap":"Large Cap","geography":"United States","assetType":"Common Stock"}}}}]}}"#
    )
    .expect("write universe");

    let config = ServiceConfigBuilder::new()
        .with_universe_path(file.path())
        .build();
    let service = QueryService::from_config(config).expect("temp universe should load");

    let response = service
        .baskets(&BasketRequest::new(BasketCriteria::new().with_sector("Energy")))
        .expect("valid criteria");
    assert_eq!(response.total_count(), 1);
}

#[test]
fn missing_universe_file_is_an_io_error() {
    let config = ServiceConfigBuilder::new()
        .with_universe_path("/definitely/not/here/universe.json")
        .build();

    let error = QueryService::from_config(config).expect_err("missing file must fail");
    assert!(matches!(error, assetq_core::CoreError::Io { .. }));
}
