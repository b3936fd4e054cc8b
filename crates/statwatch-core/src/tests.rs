use crate::checks::{self, Warning};
use crate::engine::{Notice, WatchEngine};
use crate::sample::MetricSample;
use crate::source::{FetchError, StatsSource};
use async_trait::async_trait;
use std::collections::VecDeque;

fn sample(values: [f64; 7]) -> MetricSample {
    MetricSample {
        load_average: values[0],
        total_memory: values[1],
        used_memory: values[2],
        total_disk: values[3],
        used_disk: values[4],
        total_bandwidth: values[5],
        used_bandwidth: values[6],
    }
}

fn rendered<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Replays a canned sequence of fetch outcomes.
struct ScriptedSource {
    outcomes: VecDeque<Result<String, FetchError>>,
}

impl ScriptedSource {
    fn new(outcomes: Vec<Result<String, FetchError>>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    async fn fetch_raw(&mut self) -> Result<String, FetchError> {
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }
}

#[test]
fn quiet_sample_produces_no_warnings() {
    let warnings = checks::evaluate(&sample([10.0, 1000.0, 100.0, 1000.0, 100.0, 1000.0, 100.0]));
    assert!(warnings.is_empty());
}

#[test]
fn values_exactly_on_their_limits_stay_quiet() {
    // load 30.0, memory 80%, disk 90%, network 90%
    let warnings = checks::evaluate(&sample([30.0, 100.0, 80.0, 100.0, 90.0, 100.0, 90.0]));
    assert!(warnings.is_empty());
}

#[test]
fn high_load_fires_alone() {
    let warnings = checks::evaluate(&sample([31.0, 1000.0, 100.0, 1000.0, 100.0, 1000.0, 100.0]));
    assert_eq!(rendered(&warnings), vec!["Load Average is too high: 31.00"]);
}

#[test]
fn high_memory_reports_used_percent() {
    let warnings = checks::evaluate(&sample([0.0, 100.0, 85.0, 100.0, 50.0, 100.0, 50.0]));
    assert_eq!(rendered(&warnings), vec!["Memory usage too high: 85.00%"]);
}

#[test]
fn low_disk_reports_free_megabytes() {
    let warnings = checks::evaluate(&sample([
        0.0,
        100.0,
        50.0,
        1_000_000_000.0,
        950_000_000.0,
        100.0,
        50.0,
    ]));
    assert_eq!(
        rendered(&warnings),
        vec!["Free disk space is too low: 50 Mb left"]
    );
}

#[test]
fn low_bandwidth_reports_free_mbit() {
    let warnings = checks::evaluate(&sample([
        0.0,
        100.0,
        50.0,
        100.0,
        50.0,
        1_000_000_000.0,
        950_000_000.0,
    ]));
    assert_eq!(
        rendered(&warnings),
        vec!["Network bandwidth usage high: 500.00 Mbit/s available"]
    );
}

#[test]
fn every_check_can_fire_on_one_sample() {
    let warnings = checks::evaluate(&sample([
        42.5,
        8_000_000_000.0,
        6_800_000_000.0,
        1_000_000_000_000.0,
        950_000_000_000.0,
        1_000_000_000.0,
        950_000_000.0,
    ]));
    assert_eq!(
        rendered(&warnings),
        vec![
            "Load Average is too high: 42.50",
            "Memory usage too high: 85.00%",
            "Free disk space is too low: 50000 Mb left",
            "Network bandwidth usage high: 500.00 Mbit/s available",
        ]
    );
}

#[test]
fn zero_totals_follow_float_semantics() {
    // 0/0 is NaN, NaN comparisons are false, so nothing fires.
    let nan_ratio = checks::evaluate(&sample([0.0, 0.0, 0.0, 1000.0, 100.0, 1000.0, 100.0]));
    assert!(nan_ratio.is_empty());

    // 5/0 is +inf, which clears any finite limit.
    let inf_ratio = checks::evaluate(&sample([0.0, 0.0, 5.0, 1000.0, 100.0, 1000.0, 100.0]));
    assert_eq!(inf_ratio.len(), 1);
    assert!(matches!(inf_ratio[0], Warning::HighMemory { .. }));
}

#[test]
fn failures_stay_silent_until_the_limit() {
    let mut engine = WatchEngine::new();

    let first = engine.cycle(Err(FetchError::Transport("connection refused".to_string())));
    assert!(first.is_empty());
    let second = engine.cycle(Err(FetchError::Transport("connection refused".to_string())));
    assert!(second.is_empty());

    assert_eq!(engine.consecutive_failures(), 2);
}

#[test]
fn third_failure_prints_the_fetch_notice() {
    let mut engine = WatchEngine::new();
    engine.cycle(Err(FetchError::Status(500)));
    engine.cycle(Err(FetchError::Status(500)));

    let notices = engine.cycle(Err(FetchError::Status(500)));
    assert_eq!(notices, vec![Notice::FetchFailure]);
    assert_eq!(
        rendered(&notices),
        vec!["Unable to fetch server statistic."]
    );
}

#[test]
fn failure_notice_repeats_while_the_host_stays_down() {
    let mut engine = WatchEngine::new();
    for _ in 0..3 {
        engine.cycle(Err(FetchError::Transport("no route".to_string())));
    }

    // streak keeps growing past the limit, one notice per cycle
    let fourth = engine.cycle(Err(FetchError::Transport("no route".to_string())));
    assert_eq!(fourth, vec![Notice::FetchFailure]);
    let fifth = engine.cycle(Err(FetchError::Transport("no route".to_string())));
    assert_eq!(fifth, vec![Notice::FetchFailure]);
    assert_eq!(engine.consecutive_failures(), 5);
}

#[test]
fn mixed_failure_categories_share_one_streak() {
    let mut engine = WatchEngine::new();

    assert!(engine
        .cycle(Err(FetchError::Transport("dns failure".to_string())))
        .is_empty());
    assert!(engine.cycle(Err(FetchError::Status(503))).is_empty());

    // a body that fetches fine but does not parse counts the same
    let notices = engine.cycle(Ok("not,a,stats,line".to_string()));
    assert_eq!(notices, vec![Notice::FetchFailure]);
}

#[test]
fn unreadable_body_counts_toward_the_streak() {
    let mut engine = WatchEngine::new();
    engine.cycle(Err(FetchError::Body("connection reset".to_string())));
    assert_eq!(engine.consecutive_failures(), 1);
}

#[test]
fn success_resets_the_streak() {
    let mut engine = WatchEngine::new();
    engine.cycle(Err(FetchError::Status(502)));
    engine.cycle(Err(FetchError::Status(502)));
    assert_eq!(engine.consecutive_failures(), 2);

    let healthy = engine.cycle(Ok("1.0,1000,100,1000,100,1000,100".to_string()));
    assert!(healthy.is_empty());
    assert_eq!(engine.consecutive_failures(), 0);

    // the next failure starts a fresh streak
    assert!(engine
        .cycle(Err(FetchError::Status(502)))
        .is_empty());
    assert_eq!(engine.consecutive_failures(), 1);
}

#[test]
fn successful_cycle_reports_threshold_breaches() {
    let mut engine = WatchEngine::new();
    let notices = engine.cycle(Ok("31,1000,100,1000,100,1000,100".to_string()));
    assert_eq!(rendered(&notices), vec!["Load Average is too high: 31.00"]);
}

#[tokio::test]
async fn poll_drives_cycles_through_a_source() {
    let mut source = ScriptedSource::new(vec![
        Err(FetchError::Transport("connection refused".to_string())),
        Err(FetchError::Status(500)),
        Ok("31,1000,100,1000,100,1000,100".to_string()),
        Err(FetchError::Transport("connection refused".to_string())),
    ]);
    let mut engine = WatchEngine::new();

    assert!(engine.poll(&mut source).await.is_empty());
    assert!(engine.poll(&mut source).await.is_empty());

    let recovered = engine.poll(&mut source).await;
    assert_eq!(rendered(&recovered), vec!["Load Average is too high: 31.00"]);
    assert_eq!(engine.consecutive_failures(), 0);

    assert!(engine.poll(&mut source).await.is_empty());
    assert_eq!(engine.consecutive_failures(), 1);
}

#[tokio::test]
async fn poll_reports_a_sustained_outage() {
    let mut source = ScriptedSource::new(vec![
        Err(FetchError::Transport("connection refused".to_string())),
        Err(FetchError::Transport("connection refused".to_string())),
        Err(FetchError::Transport("connection refused".to_string())),
    ]);
    let mut engine = WatchEngine::new();

    assert!(engine.poll(&mut source).await.is_empty());
    assert!(engine.poll(&mut source).await.is_empty());
    assert_eq!(
        engine.poll(&mut source).await,
        vec![Notice::FetchFailure]
    );
}
