use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use disha_ai::config::AppConfig;
use disha_ai::engine::results::{build_results_view, ResultsBundle};
use disha_ai::engine::simulator::catalog::{seed_scenarios, CatalogSet};
use disha_ai::engine::simulator::export::export_summary;
use disha_ai::engine::simulator::perturb::auto_experiment;
use disha_ai::engine::simulator::rewards::{badges_for, total_points};
use disha_ai::engine::simulator::session::InMemorySessions;
use disha_ai::engine::simulator::store::ScenarioStore;
use disha_ai::error::AppError;
use disha_ai::http::{engine_router, EngineState};
use disha_ai::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Disha Guidance Engine",
    about = "Run the career scenario engine as a service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate and rank a raw results bundle
    Results {
        #[command(subcommand)]
        command: ResultsCommand,
    },
    /// Explore what-if scenarios offline
    Scenarios {
        #[command(subcommand)]
        command: ScenariosCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ResultsCommand {
    /// Run a bundle JSON file through the validation pipeline
    View(ResultsViewArgs),
}

#[derive(Args, Debug)]
struct ResultsViewArgs {
    /// Path to a JSON file with streamScores/careers/colleges
    #[arg(long)]
    bundle: PathBuf,
}

#[derive(Subcommand, Debug)]
enum ScenariosCommand {
    /// Run seeded auto-experiments over the default scenarios and print the text summary
    Summary(ScenariosSummaryArgs),
}

#[derive(Args, Debug)]
struct ScenariosSummaryArgs {
    /// RNG seed; omit for a different roll each run
    #[arg(long)]
    seed: Option<u64>,
    /// Number of duplicated-and-perturbed scenarios to add
    #[arg(long, default_value_t = 2)]
    experiments: u32,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Results {
            command: ResultsCommand::View(args),
        } => run_results_view(args),
        Command::Scenarios {
            command: ScenariosCommand::Summary(args),
        } => run_scenarios_summary(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let engine = EngineState {
        sessions: Arc::new(InMemorySessions::new()),
        catalogs: Arc::new(CatalogSet::standard()),
        default_magnitude: config.simulator.experiment_magnitude,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops)
        .merge(engine_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "guidance engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_results_view(args: ResultsViewArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.bundle)?;
    let bundle: ResultsBundle = serde_json::from_str(&raw)?;

    let view = build_results_view(&bundle);

    println!(
        "{}",
        serde_json::to_string_pretty(&view).expect("view model serializes")
    );

    if view.is_empty() {
        println!();
        println!("Nothing validated; clients should fall back to the retry surface.");
    } else if !view.issues.is_empty() {
        println!();
        println!("Dropped input:");
        for issue in &view.issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}

fn run_scenarios_summary(args: ScenariosSummaryArgs) -> Result<(), AppError> {
    let catalogs = CatalogSet::standard();
    let mut store = ScenarioStore::initialize(seed_scenarios())?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..args.experiments {
        store.duplicate_active();
        auto_experiment(
            &mut store,
            &catalogs,
            disha_ai::config::SimulatorConfig::DEFAULT_MAGNITUDE,
            &mut rng,
        );
    }

    print!("{}", export_summary(store.scenarios()));

    let points = total_points(store.scenarios());
    println!("---");
    println!("Total Points: {points}");
    let badges = badges_for(points);
    if badges.is_empty() {
        println!("Badges: none yet");
    } else {
        let labels: Vec<&str> = badges.iter().map(|badge| badge.label()).collect();
        println!("Badges: {}", labels.join(", "));
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
