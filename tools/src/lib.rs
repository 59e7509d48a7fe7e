use std::{path::Path, sync::Mutex};

pub mod client;
pub mod config;
pub mod faker;
pub mod instance;
pub mod session;
pub mod trip;

#[cfg(feature = "loadtest")]
pub mod scenarios;
#[cfg(feature = "loadtest")]
pub mod shopper;
#[cfg(feature = "loadtest")]
pub mod transactions;

pub use client::{ClientError, ShopClient};
pub use config::{ConfigError, LoadtestConfig};
pub use session::{SessionError, SessionPhase, SessionState, SessionToken};

/// Name of the env var holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "SHOP_LOG";

pub fn init_log() {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{
        EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV)
                .from_env_lossy(),
        )
        .init();
}

/// Console logging off unless `SHOP_LOG` says otherwise, so it does not
/// fight with the bench report. When `request_log` is given, every request
/// and response line is appended to that file.
pub fn init_bench_log(request_log: Option<&Path>) -> std::io::Result<()> {
    use tracing_subscriber::{
        EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt,
    };
    let file_layer = match request_log {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(EnvFilter::new(format!(
                        "{}=debug",
                        client::REQUEST_LOG_TARGET
                    ))),
            )
        }
        None => None,
    };
    let console_filter = std::env::var(LOG_ENV)
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(console_filter))
        .with(file_layer)
        .init();
    Ok(())
}

pub fn setup_runtime(
    threads: Option<usize>,
) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = threads {
        builder.worker_threads(threads.max(1));
    }
    builder.enable_all().build()
}

#[cfg(feature = "loadtest")]
pub fn to_status(err: &ClientError) -> rlt::Status {
    match err {
        ClientError::ApiError { status, .. } if *status >= 500 => {
            rlt::Status::server_error(*status as i64)
        }
        ClientError::ApiError { status, .. } => {
            rlt::Status::client_error(*status as i64)
        }
        ClientError::MissingSessionCookie => rlt::Status::client_error(1),
        ClientError::SerializationError(_) => rlt::Status::client_error(2),
        ClientError::RequestFailed(e) => match e.status() {
            Some(code) => rlt::Status::error(code.as_u16() as i64),
            None => rlt::Status::error(0),
        },
    }
}
