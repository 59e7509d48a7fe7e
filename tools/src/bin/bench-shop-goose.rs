use std::error::Error;

use goose::prelude::*;
use shop_loadtest::{
    LoadtestConfig, init_log,
    scenarios::{sequential_shopper, weighted_browser},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_log();
    let config = LoadtestConfig::load()?.install();
    tracing::info!("use {config:?}");
    // Pick one with `--scenarios sequentialshopper` or `weightedbrowser`.
    GooseAttack::initialize()?
        .register_scenario(sequential_shopper(config)?)
        .register_scenario(weighted_browser(config)?)
        .set_default(GooseDefault::Host, config.host.as_str())?
        .execute()
        .await?;
    Ok(())
}
