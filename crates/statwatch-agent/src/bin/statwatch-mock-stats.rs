use anyhow::{anyhow, bail, Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::env;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const HEALTHY_LINE: &str =
    "1.5,8000000000,2000000000,1000000000000,200000000000,1000000000,100000000";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Scenario {
    Healthy,
    Load,
    Memory,
    Disk,
    Network,
    Overload,
    Garbage,
    Short,
    Error,
    Flaky,
}

impl Scenario {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "healthy" => Ok(Self::Healthy),
            "load" => Ok(Self::Load),
            "memory" => Ok(Self::Memory),
            "disk" => Ok(Self::Disk),
            "network" => Ok(Self::Network),
            "overload" => Ok(Self::Overload),
            "garbage" => Ok(Self::Garbage),
            "short" => Ok(Self::Short),
            "error" => Ok(Self::Error),
            "flaky" => Ok(Self::Flaky),
            _ => bail!("unknown scenario: {value}"),
        }
    }

    fn names() -> &'static [&'static str] {
        &[
            "healthy", "load", "memory", "disk", "network", "overload", "garbage", "short",
            "error", "flaky",
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Load => "load",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Network => "network",
            Self::Overload => "overload",
            Self::Garbage => "garbage",
            Self::Short => "short",
            Self::Error => "error",
            Self::Flaky => "flaky",
        }
    }

    /// Body for one hit, or `None` to answer with a 500. `flaky`
    /// alternates between the two so a watching agent never builds a
    /// streak of three.
    fn stats_line(self, hit: u64) -> Option<&'static str> {
        match self {
            Self::Healthy => Some(HEALTHY_LINE),
            Self::Load => Some(
                "42.5,8000000000,2000000000,1000000000000,200000000000,1000000000,100000000",
            ),
            Self::Memory => Some(
                "1.5,8000000000,6800000000,1000000000000,200000000000,1000000000,100000000",
            ),
            Self::Disk => Some(
                "1.5,8000000000,2000000000,1000000000000,950000000000,1000000000,100000000",
            ),
            Self::Network => Some(
                "1.5,8000000000,2000000000,1000000000000,200000000000,1000000000,950000000",
            ),
            Self::Overload => Some(
                "42.5,8000000000,6800000000,1000000000000,950000000000,1000000000,950000000",
            ),
            Self::Garbage => Some(
                "1.5,8000000000,two billion,1000000000000,200000000000,1000000000,100000000",
            ),
            Self::Short => {
                Some("1.5,8000000000,2000000000,1000000000000,200000000000,1000000000")
            }
            Self::Error => None,
            Self::Flaky => {
                if hit % 2 == 0 {
                    None
                } else {
                    Some(HEALTHY_LINE)
                }
            }
        }
    }
}

#[derive(Debug)]
struct Config {
    listen: SocketAddr,
    scenario: Scenario,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            scenario: Scenario::Healthy,
        }
    }
}

enum CliAction {
    Run(Config),
    Help,
    ListScenarios,
}

fn usage() {
    println!(
        "Usage:\n  statwatch-mock-stats [options]\n\nServes GET /_stats with a canned body so a locally built agent\npointed at the listen address prints predictable warnings.\n\nOptions:\n  --listen <addr:port>  bind address (default: 127.0.0.1:8080)\n  --scenario <name>     healthy|load|memory|disk|network|overload|garbage|short|error|flaky (default: healthy)\n  --list-scenarios      print supported scenarios\n  -h, --help            show this help"
    );
}

fn parse_cli() -> Result<CliAction> {
    let mut config = Config::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "--list-scenarios" => return Ok(CliAction::ListScenarios),
            "--listen" => {
                let value = next_value(&mut args, "--listen")?;
                config.listen = value
                    .parse()
                    .with_context(|| format!("invalid listen address: {value}"))?;
            }
            "--scenario" => {
                let value = next_value(&mut args, "--scenario")?;
                config.scenario = Scenario::parse(&value)?;
            }
            _ => bail!("unknown argument: {arg}"),
        }
    }

    Ok(CliAction::Run(config))
}

fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

struct MockState {
    scenario: Scenario,
    hits: AtomicU64,
}

async fn serve_stats(State(state): State<Arc<MockState>>) -> (StatusCode, String) {
    let hit = state.hits.fetch_add(1, Ordering::Relaxed);
    match state.scenario.stats_line(hit) {
        Some(line) => {
            println!(
                "[mock-stats][200] hit={hit} scenario={} body={line}",
                state.scenario.as_str()
            );
            (StatusCode::OK, line.to_string())
        }
        None => {
            println!(
                "[mock-stats][500] hit={hit} scenario={}",
                state.scenario.as_str()
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "mock upstream failure\n".to_string(),
            )
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let state = Arc::new(MockState {
        scenario: config.scenario,
        hits: AtomicU64::new(0),
    });
    let app = Router::new()
        .route("/_stats", get(serve_stats))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    println!(
        "[mock-stats] listening on http://{}/_stats scenario={}",
        listener.local_addr()?,
        config.scenario.as_str()
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    match parse_cli()? {
        CliAction::Help => {
            usage();
            Ok(())
        }
        CliAction::ListScenarios => {
            for name in Scenario::names() {
                println!("{name}");
            }
            Ok(())
        }
        CliAction::Run(config) => run(config).await,
    }
}
