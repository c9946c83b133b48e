use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use prisim::model::projection::{FacilityModel, PlannedRelease, ProjectionConfig};
use prisim::{Cohort, Compartment, SpreadIntensity, NUM_COHORTS};

// Mid-size facility defaults used when a request omits the roster:
// one entry per cohort, staff last.
const DEFAULT_POPULATIONS: [f64; NUM_COHORTS] =
    [10.0, 25.0, 600.0, 220.0, 130.0, 50.0, 12.0, 3.0, 250.0];
const DEFAULT_SEED_INFECTIONS: f64 = 10.0;

#[derive(Debug, Deserialize)]
struct RunRequest {
    populations: Option<Vec<f64>>,
    initial_infections: Option<Vec<f64>>,
    num_days: Option<usize>,
    dorm_fraction: Option<f64>,
    occupancy: Option<f64>,
    spread: Option<SpreadIntensity>,
    turnover: Option<f64>,
    planned_releases: Option<Vec<PlannedRelease>>,
    start_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    return_code: i32,
    num_days: usize,
    start_date: NaiveDate,
    start_population: f64,
    end_population: f64,
    total_fatalities: f64,
    peak_infectious_day: usize,
    peak_infectious: f64,
    peak_hospitalized_day: usize,
    peak_hospitalized: f64,
    peak_icu_day: usize,
    peak_icu: f64,
    population_timeline: Vec<[f64; 2]>,
    infectious_timeline: Vec<[f64; 2]>,
    hospitalized_timeline: Vec<[f64; 2]>,
    icu_timeline: Vec<[f64; 2]>,
    fatalities_timeline: Vec<[f64; 2]>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/run_projection", post(run_projection));

    let addr: SocketAddr = format!("{}:{}", host, port).parse().expect("invalid HOST/PORT");
    println!("[prisim-api] listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server failed");
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn run_projection(Json(req): Json<RunRequest>) -> impl IntoResponse {
    // The day loop is pure CPU work; keep it off the async workers.
    let join = tokio::task::spawn_blocking(move || run_projection_sync(req));

    match join.await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp)).into_response(),
        Ok(Err((code, body))) => (code, Json(body)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"return_code": 2, "error": format!("join error: {e}")})),
        )
            .into_response(),
    }
}

fn run_projection_sync(req: RunRequest) -> Result<RunResponse, (StatusCode, serde_json::Value)> {
    let populations = req
        .populations
        .unwrap_or_else(|| DEFAULT_POPULATIONS.to_vec());
    let initial_infections = req.initial_infections.unwrap_or_else(|| {
        let mut seed = vec![0.0; NUM_COHORTS];
        seed[Cohort::Age20To44.index()] = DEFAULT_SEED_INFECTIONS;
        seed
    });
    let num_days = req.num_days.unwrap_or(90).max(1);
    let start_date = req
        .start_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let cfg = ProjectionConfig {
        populations,
        initial_infections,
        num_days,
        dorm_fraction: req.dorm_fraction.unwrap_or(0.5).clamp(0.0, 1.0),
        occupancy: req.occupancy.unwrap_or(1.0).clamp(0.0, 1.0),
        spread: req.spread.unwrap_or(SpreadIntensity::Moderate),
        turnover: req.turnover.unwrap_or(0.0).max(0.0),
        planned_releases: req.planned_releases,
        start_date,
    };

    let model = FacilityModel::new(cfg).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            json!({"return_code": 1, "error": format!("invalid projection config: {e}")}),
        )
    })?;

    let projection = model.project();

    let timeline = |compartment: Compartment| -> Vec<[f64; 2]> {
        projection
            .daily_totals(compartment)
            .into_iter()
            .enumerate()
            .map(|(day, value)| [day as f64, value])
            .collect()
    };

    let population_timeline: Vec<[f64; 2]> = projection
        .total_population_by_day
        .iter()
        .enumerate()
        .map(|(day, value)| [day as f64, *value])
        .collect();

    let (peak_infectious_day, peak_infectious) = projection.peak(Compartment::Infectious);
    let (peak_hospitalized_day, peak_hospitalized) = projection.peak(Compartment::Hospitalized);
    let (peak_icu_day, peak_icu) = projection.peak(Compartment::Icu);
    let total_fatalities = projection
        .grid
        .facility_total(Compartment::Fatalities, num_days - 1);

    let start_population = population_timeline.first().map(|[_, v]| *v).unwrap_or(0.0);
    let end_population = population_timeline
        .last()
        .map(|[_, v]| *v)
        .unwrap_or(start_population);

    log::info!(
        "projection complete: {} days, peak infectious {:.1} on day {}",
        num_days,
        peak_infectious,
        peak_infectious_day
    );

    Ok(RunResponse {
        return_code: 0,
        num_days,
        start_date,
        start_population,
        end_population,
        total_fatalities,
        peak_infectious_day,
        peak_infectious,
        peak_hospitalized_day,
        peak_hospitalized,
        peak_icu_day,
        peak_icu,
        infectious_timeline: timeline(Compartment::Infectious),
        hospitalized_timeline: timeline(Compartment::Hospitalized),
        icu_timeline: timeline(Compartment::Icu),
        fatalities_timeline: timeline(Compartment::Fatalities),
        population_timeline,
    })
}
