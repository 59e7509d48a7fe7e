mod common;

use common::spawn_shop;
use rlt::BenchSuite;
use shop_loadtest::{LoadtestConfig, shopper::TripBench};

fn short_trips() -> LoadtestConfig {
    LoadtestConfig {
        min_cart_adds: 2,
        max_cart_adds: 3,
        cancel_chance: 0.0,
        ..Default::default()
    }
}

#[tokio::test]
async fn trips_alternate_between_targets() {
    let (first_url, first) = spawn_shop().await;
    let (second_url, second) = spawn_shop().await;
    let bench = TripBench::new([first_url, second_url], short_trips()).unwrap();
    assert_eq!(bench.target_count(), 2);
    let mut state = bench.state(0).await.unwrap();

    for _ in 0..4 {
        let report = bench.trip(&mut state).await;
        assert_eq!(report.status, rlt::Status::success(200));
        assert!(report.items > 0);
    }

    for shop in [&first, &second] {
        let shop = shop.lock().unwrap();
        assert_eq!(shop.account_count(), 2);
        assert_eq!(shop.logouts, 2);
    }
}

#[tokio::test]
async fn refused_register_reports_server_error() {
    let (url, shop) = spawn_shop().await;
    shop.lock().unwrap().refuse_register = true;
    let bench = TripBench::new([url], short_trips()).unwrap();
    let mut state = bench.state(0).await.unwrap();

    let report = bench.trip(&mut state).await;

    assert_eq!(report.status, rlt::Status::server_error(503));
    assert_eq!(report.items, 0);
    let shop = shop.lock().unwrap();
    assert_eq!(shop.catalog_requests, 0);
    assert_eq!(shop.logouts, 0);
}

#[test]
fn no_target_is_an_error() {
    let targets: Vec<String> = Vec::new();
    assert!(TripBench::new(targets, short_trips()).is_err());
}
