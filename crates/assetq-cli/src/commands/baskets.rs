use assetq_core::{BasketCriteria, BasketRequest, Envelope, Operation, QueryService};
use serde_json::Value;

use crate::cli::BasketArgs;
use crate::error::CliError;

pub fn run(args: &BasketArgs, service: &QueryService) -> Result<Envelope<Value>, CliError> {
    let criteria = criteria_from_args(args);
    let unfiltered = criteria.is_empty();

    let payload = serde_json::to_value(BasketRequest::new(criteria))?;
    let mut envelope = service.handle(Operation::Baskets, payload);

    if unfiltered && envelope.is_success() {
        envelope
            .meta
            .push_warning("no criteria supplied; returning the whole universe");
    }

    Ok(envelope)
}

fn criteria_from_args(args: &BasketArgs) -> BasketCriteria {
    BasketCriteria {
        sector: args.sector.clone(),
        industry: args.industry.clone(),
        market_cap: args.market_cap.clone(),
        price_range: args.price_range.clone(),
        min_growth: args.min_growth,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn basket_args(argv: &[&str]) -> BasketArgs {
        let cli = Cli::try_parse_from(argv).expect("arguments should parse");
        match cli.command {
            Command::Baskets(args) => args,
            other => panic!("expected baskets command, got {other:?}"),
        }
    }

    #[test]
    fn flags_map_onto_criteria() {
        let args = basket_args(&[
            "assetq",
            "baskets",
            "--sector",
            "Technology",
            "--market-cap",
            "Large Cap",
            "--price-range",
            "<100",
            "--min-growth",
            "-5",
        ]);

        let criteria = criteria_from_args(&args);
        assert_eq!(criteria.sector.as_deref(), Some("Technology"));
        assert_eq!(criteria.market_cap.as_deref(), Some("Large Cap"));
        assert_eq!(criteria.price_range.as_deref(), Some("<100"));
        assert_eq!(criteria.min_growth, Some(-5.0));
        assert!(criteria.industry.is_none());
    }

    #[test]
    fn no_flags_means_empty_criteria() {
        let args = basket_args(&["assetq", "baskets"]);
        assert!(criteria_from_args(&args).is_empty());
    }
}
