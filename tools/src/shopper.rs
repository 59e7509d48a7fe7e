use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use rlt::{BenchSuite, IterInfo, IterReport};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    client::ShopClient,
    config::LoadtestConfig,
    instance::RoundRobin,
    session::SessionState,
    to_status,
    trip::run_trip,
};

/// rlt suite where every iteration is one full trip. Targets are used in
/// turn across all workers.
#[derive(Clone)]
pub struct TripBench {
    targets: Arc<RoundRobin<ShopClient>>,
    config: LoadtestConfig,
}

impl TripBench {
    pub fn new(
        base_urls: impl IntoIterator<Item = String>,
        config: LoadtestConfig,
    ) -> anyhow::Result<Self> {
        let clients = base_urls
            .into_iter()
            .map(ShopClient::new)
            .collect::<Result<Vec<_>, _>>()?;
        let targets = RoundRobin::new(clients)
            .ok_or_else(|| anyhow::anyhow!("no target to bench"))?;
        Ok(Self {
            targets: Arc::new(targets),
            config,
        })
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// One trip against the next target. A refused register or login is
    /// reported through the status and leaves the worker anonymous.
    pub async fn trip(&self, state: &mut TripState) -> IterReport {
        let client = self.targets.next();
        let t = Instant::now();
        let res =
            run_trip(client, &self.config, &mut state.session, &mut state.rng)
                .await;
        let duration = t.elapsed();
        match res {
            Ok(report) => {
                debug!("trip on {} done: {:?}", client.base_url(), report);
                IterReport {
                    duration,
                    status: rlt::Status::success(200),
                    bytes: 0,
                    items: report.requests,
                }
            }
            Err(err) => {
                debug!("trip on {} aborted: {}", client.base_url(), err);
                state.session.logout();
                IterReport {
                    duration,
                    status: to_status(&err),
                    bytes: 0,
                    items: 0,
                }
            }
        }
    }
}

pub struct TripState {
    rng: StdRng,
    session: SessionState,
}

#[async_trait::async_trait]
impl BenchSuite for TripBench {
    type WorkerState = TripState;

    async fn state(&self, _: u32) -> anyhow::Result<Self::WorkerState> {
        Ok(TripState {
            rng: StdRng::from_os_rng(),
            session: SessionState::default(),
        })
    }

    async fn bench(
        &mut self,
        state: &mut Self::WorkerState,
        _: &IterInfo,
    ) -> anyhow::Result<IterReport> {
        Ok(self.trip(state).await)
    }
}
