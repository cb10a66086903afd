use super::*;
use rand::Rng;
use std::time::Duration;

#[test]
fn seeded_rng_is_reproducible() {
    let a = SharedRng::from_seed(Some(5));
    let b = SharedRng::from_seed(Some(5));
    let xs: Vec<u32> = (0..8).map(|_| a.with(|rng| rng.random())).collect();
    let ys: Vec<u32> = (0..8).map(|_| b.with(|rng| rng.random())).collect();
    assert_eq!(xs, ys);
}

#[test]
fn clones_share_the_same_generator() {
    let a = SharedRng::from_seed(Some(5));
    let b = a.clone();
    let fresh = SharedRng::from_seed(Some(5));

    let first: u32 = a.with(|rng| rng.random());
    let second: u32 = b.with(|rng| rng.random());
    let fresh_first: u32 = fresh.with(|rng| rng.random());
    let fresh_second: u32 = fresh.with(|rng| rng.random());
    assert_eq!((first, second), (fresh_first, fresh_second));
}

#[tokio::test]
async fn new_state_starts_without_sessions() {
    let state = test_helpers::test_app_state();
    assert!(state.sessions().count().await == 0);
    assert!(state.pool.is_none());
}

#[tokio::test]
async fn login_delay_comes_from_config() {
    let state = test_helpers::test_app_state();
    let start = tokio::time::Instant::now();
    let token = test_helpers::login(&state, "a@b.c").await;
    assert!(start.elapsed() >= state.config.login_delay);
    assert!(state.sessions().is_authenticated(Some(&token)).await);
}

#[tokio::test(start_paused = true)]
async fn session_idle_timeout_comes_from_config() {
    let config = AppConfig { session_idle_timeout: Duration::from_secs(60), ..AppConfig::default() };
    let state = test_helpers::test_app_state_with_config(config);
    let token = test_helpers::login(&state, "a@b.c").await;

    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(!state.sessions().is_authenticated(Some(&token)).await);
}
