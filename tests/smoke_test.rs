//! Smoke test to verify basic functionality

use order_price::{render_quote, OrderForm, PriceCalculator, PricingConfig, SizeField};

#[test]
fn smoke_test_form_to_rendered_quote() {
    let config = PricingConfig::from_yaml(&PricingConfig::default().to_yaml().unwrap()).unwrap();
    let calculator = PriceCalculator::from_config(&config);

    let mut form = OrderForm::new(&config);
    form.set_order_total("1000+500*2").unwrap();
    form.set_quantity("3");
    form.set_size(SizeField::Length, "40");
    form.set_size(SizeField::Width, "30");
    form.set_size(SizeField::Height, "20");

    let result = form.quote(&calculator);
    // Basic sanity checks
    assert!(result.total_vnd >= result.price_vnd);
    assert!(result.service_fee_yen > 0.0);
    assert!(result.volumetric_weight_kg() > 0.0);
    assert!(!result.bulk_quote_required);

    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let text = render_quote(&result, date);
    assert!(text.contains("TOTAL"));
}
