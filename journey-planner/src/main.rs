use std::process::ExitCode;
use std::sync::Arc;

use journey_planner::cache::{CacheConfig, CachedCatalog};
use journey_planner::catalog::StaticTimetable;
use journey_planner::domain::{OptimizationMode, StationCode};
use journey_planner::planner::{JourneyService, PlanRequest, Planner, SearchConfig};
use journey_planner::scoring::{FacilityTable, Scorers};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: journey-planner SOURCE DESTINATION [duration|cost|comfort]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(source), Some(destination)) = (args.next(), args.next()) else {
        return Err(USAGE.into());
    };
    let mode: OptimizationMode = match args.next() {
        Some(mode) => mode.parse()?,
        None => OptimizationMode::MinimumDuration,
    };

    // Schedule data and optional config from the environment
    let timetable_path =
        std::env::var("JOURNEY_TIMETABLE").map_err(|_| "JOURNEY_TIMETABLE not set")?;
    let timetable = Arc::new(StaticTimetable::from_json_file(&timetable_path)?);
    eprintln!("Loaded {} legs from {timetable_path}", timetable.leg_count());

    let config = match std::env::var("JOURNEY_CONFIG") {
        Ok(path) => serde_json::from_str::<SearchConfig>(&std::fs::read_to_string(path)?)?,
        Err(_) => SearchConfig::default(),
    };

    let mut scorers = Scorers::neutral();
    if let Ok(path) = std::env::var("JOURNEY_FACILITIES") {
        let facilities = FacilityTable::from_json_str(&std::fs::read_to_string(path)?)?;
        scorers = scorers.with_comfort(Arc::new(facilities));
    }

    let catalog = CachedCatalog::new(Arc::clone(&timetable), &CacheConfig::default());
    let service = JourneyService::new(Planner::new(catalog, timetable, scorers, config));

    let request = PlanRequest::new(
        StationCode::parse(&source)?,
        StationCode::parse(&destination)?,
        mode,
    );
    let plan = service.plan_journey(request).await?;

    if plan.cap_reached {
        eprintln!("Warning: route cap reached, results may be incomplete");
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
