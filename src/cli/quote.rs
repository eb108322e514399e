//! Pricing commands: quote, fee, eval

use super::util::print_json;
use super::{FeeArgs, QuoteArgs};
use order_price::*;

pub fn cmd_quote(args: &QuoteArgs) -> Result<()> {
    let config = PricingConfig::load(args.config.as_deref())?;
    let calculator = PriceCalculator::from_config(&config);
    let form = fill_form(&config, args)?;

    let result = form.quote(&calculator);

    if args.json {
        print_json(&result)?;
    } else {
        let today = chrono::Local::now().date_naive();
        print!("{}", render_quote(&result, today));
    }
    Ok(())
}

/// Enter the arguments into a form the way an operator would
fn fill_form(config: &PricingConfig, args: &QuoteArgs) -> Result<OrderForm> {
    let mut form = OrderForm::new(config);

    if let Some(rate) = &args.rate {
        form.set_exchange_rate(rate);
    }
    form.set_order_total(&args.total)?;
    if let Some(qty) = &args.qty {
        form.set_quantity(qty);
    }

    let sizes = [
        (SizeField::Weight, &args.weight),
        (SizeField::Length, &args.length),
        (SizeField::Width, &args.width),
        (SizeField::Height, &args.height),
    ];
    for (field, value) in sizes {
        if let Some(text) = value {
            form.set_size(field, text);
            form.finish_editing(field);
        }
    }

    let fees = [
        (FeeField::SellerShipYen, &args.seller_ship),
        (FeeField::ShipJpVnVnd, &args.ship_jp_vn),
        (FeeField::ShipLocalVnd, &args.ship_local),
        (FeeField::SurchargeVnd, &args.surcharge),
    ];
    for (field, value) in fees {
        if let Some(text) = value {
            form.set_fee(field, text);
        }
    }

    Ok(form)
}

pub fn cmd_fee(args: &FeeArgs) -> Result<()> {
    let config = PricingConfig::load(args.config.as_deref())?;
    let total = normalize::non_negative(evaluate(&args.total)?);
    let fee = config.service_fee.compute(total, args.qty);

    if args.json {
        print_json(&fee)?;
    } else {
        println!("{}¥ ({})", format_number(fee.fee_yen), fee.tier);
    }
    Ok(())
}

pub fn cmd_eval(expression: &str) -> Result<()> {
    let value = evaluate(expression)?;
    println!("{}", format_number(value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(total: &str) -> QuoteArgs {
        QuoteArgs {
            total: total.to_string(),
            ..QuoteArgs::default()
        }
    }

    #[test]
    fn test_fill_form_matches_direct_calculation() {
        let config = PricingConfig::default();
        let form = fill_form(
            &config,
            &QuoteArgs {
                qty: Some("2".into()),
                length: Some("30".into()),
                width: Some("20".into()),
                height: Some("15".into()),
                ship_jp_vn: Some("200000".into()),
                ship_local: Some("30000".into()),
                ..args("10000")
            },
        )
        .unwrap();

        let result = form.quote(&PriceCalculator::from_config(&config));
        assert_eq!(result.exchange_rate, 180.0);
        assert_eq!(result.total_vnd, 2_174_000.0);
        assert_eq!(result.volumetric_weight_kg(), 1.5);
    }

    #[test]
    fn test_rate_override() {
        let config = PricingConfig::default();
        let form = fill_form(
            &config,
            &QuoteArgs {
                rate: Some("150".into()),
                ..args("30000")
            },
        )
        .unwrap();
        let result = form.quote(&PriceCalculator::default());
        assert_eq!(result.price_vnd, 4_590_000.0);
    }

    #[test]
    fn test_bad_total_is_reported() {
        let err = fill_form(&PricingConfig::default(), &args("12*(")).unwrap_err();
        assert!(matches!(err, Error::Expression(ExprError::UnexpectedEnd)));
    }
}
