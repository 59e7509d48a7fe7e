use std::{sync::OnceLock, time::Duration};

use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct LoadtestConfig {
    /// Base URL of the shop under test.
    #[envconfig(from = "SHOP_HOST", default = "http://localhost:80")]
    pub host: String,

    #[envconfig(from = "SHOP_WAIT_MIN_MS", default = "1000")]
    pub wait_min_ms: u64,

    #[envconfig(from = "SHOP_WAIT_MAX_MS", default = "3000")]
    pub wait_max_ms: u64,

    /// Upper bound of the random quantity sent with `PUT /my/cart/add`.
    #[envconfig(from = "SHOP_MAX_QUANTITY", default = "10")]
    pub max_quantity: u32,

    #[envconfig(from = "SHOP_MIN_CART_ADDS", default = "4")]
    pub min_cart_adds: u32,

    #[envconfig(from = "SHOP_MAX_CART_ADDS", default = "50")]
    pub max_cart_adds: u32,

    /// Probability that a trip cancels the order it just placed.
    #[envconfig(from = "SHOP_CANCEL_CHANCE", default = "0.5")]
    pub cancel_chance: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvError(#[from] envconfig::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl Default for LoadtestConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:80".to_string(),
            wait_min_ms: 1000,
            wait_max_ms: 3000,
            max_quantity: 10,
            min_cart_adds: 4,
            max_cart_adds: 50,
            cancel_chance: 0.5,
        }
    }
}

static ACTIVE: OnceLock<LoadtestConfig> = OnceLock::new();

impl LoadtestConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let conf = Self::init_from_env()?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "SHOP_HOST cannot be empty".into(),
            ));
        }
        if self.wait_min_ms > self.wait_max_ms {
            return Err(ConfigError::ValidationError(format!(
                "wait range is inverted: {}ms > {}ms",
                self.wait_min_ms, self.wait_max_ms
            )));
        }
        if self.max_quantity == 0 {
            return Err(ConfigError::ValidationError(
                "SHOP_MAX_QUANTITY must be at least 1".into(),
            ));
        }
        if self.min_cart_adds > self.max_cart_adds {
            return Err(ConfigError::ValidationError(format!(
                "cart add range is inverted: {} > {}",
                self.min_cart_adds, self.max_cart_adds
            )));
        }
        if !(0.0..=1.0).contains(&self.cancel_chance) {
            return Err(ConfigError::ValidationError(format!(
                "SHOP_CANCEL_CHANCE must be within [0, 1], got {}",
                self.cancel_chance
            )));
        }
        Ok(())
    }

    pub fn wait_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.wait_min_ms),
            Duration::from_millis(self.wait_max_ms),
        )
    }

    /// Makes this config visible to goose transactions, which are plain
    /// function pointers. Only the first call wins.
    pub fn install(self) -> &'static LoadtestConfig {
        ACTIVE.get_or_init(|| self)
    }

    /// The installed config, or the defaults when none was installed.
    pub fn active() -> &'static LoadtestConfig {
        ACTIVE.get_or_init(LoadtestConfig::default)
    }
}
