use assetq_core::{Envelope, Operation, QueryService};
use serde_json::{json, Value};

use crate::cli::AssetArgs;

pub fn price(args: &AssetArgs, service: &QueryService) -> Envelope<Value> {
    run(Operation::Price, args, service)
}

pub fn classification(args: &AssetArgs, service: &QueryService) -> Envelope<Value> {
    run(Operation::Classification, args, service)
}

pub fn research(args: &AssetArgs, service: &QueryService) -> Envelope<Value> {
    run(Operation::Research, args, service)
}

// The raw id goes through the same payload decoding a transport caller gets.
fn run(operation: Operation, args: &AssetArgs, service: &QueryService) -> Envelope<Value> {
    service.handle(operation, json!({ "assetId": args.asset_id }))
}
