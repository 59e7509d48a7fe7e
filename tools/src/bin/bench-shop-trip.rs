use std::path::PathBuf;

use clap::Parser;
use rlt::cli::BenchCli;
use shop_loadtest::{
    LoadtestConfig, init_bench_log,
    instance::load_instances,
    setup_runtime,
    shopper::TripBench,
};
use tracing::info;

#[derive(Parser, Clone, Debug)]
pub struct Opts {
    /// JSON file listing the instances to spread trips over,
    /// e.g. `[{"ip": "10.0.0.5", "port": 80}]`.
    #[arg(long, conflicts_with = "host")]
    pub config: Option<PathBuf>,
    /// Single target URL. Defaults to `SHOP_HOST`.
    #[arg(long)]
    pub host: Option<String>,
    /// File receiving one line per request and response.
    #[arg(long)]
    pub log: Option<PathBuf>,
    /// Number of threads to use for the benchmark.
    #[arg(short, long)]
    pub threads: Option<usize>,
    /// Embed BenchCli into this Opts.
    #[command(flatten)]
    pub bench_opts: BenchCli,
}

fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();
    init_bench_log(opts.log.as_deref())?;
    info!("use {opts:?}");
    let config = LoadtestConfig::load()?;
    let rt = setup_runtime(opts.threads)?;
    rt.block_on(async {
        let targets = match &opts.config {
            Some(path) => load_instances(path)
                .await?
                .iter()
                .map(|i| i.base_url())
                .collect(),
            None => {
                vec![opts.host.clone().unwrap_or_else(|| config.host.clone())]
            }
        };
        for target in &targets {
            info!("using instance {target}");
        }
        let bench = TripBench::new(targets, config)?;
        info!("spreading trips over {} instances", bench.target_count());
        rlt::cli::run(opts.bench_opts, bench).await
    })
}
