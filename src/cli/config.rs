//! Config and schema CLI commands

use super::util::print_json;
use super::ConfigAction;
use order_price::*;

pub fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { config } => {
            let config = PricingConfig::load(config.as_deref())?;
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        ConfigAction::Check { config } => {
            PricingConfig::load(config.as_deref())?;
            println!("✓ Configuration is valid");
            Ok(())
        }
        ConfigAction::Schema { name } => match name.as_str() {
            "config" => print_json(&schemars::schema_for!(PricingConfig)),
            "result" => print_json(&schemars::schema_for!(CalculationResult)),
            other => Err(format!(
                "Unknown schema: {}. Use 'config' or 'result'.",
                other
            )
            .into()),
        },
    }
}
