//! Single binary web server: tournament engine behind a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    advance_phase, assign_roster, record_final_result, record_result, DecisionPolicy, Fixture,
    OperatorChoice, Tournament, TournamentId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID (sessioned). Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default = "default_team_count")]
    team_count: usize,
}

fn default_team_count() -> usize {
    4
}

#[derive(Deserialize)]
struct PolicyBody {
    policy: DecisionPolicy,
}

#[derive(Deserialize)]
struct RosterBody {
    pool_one: Vec<String>,
    pool_two: Vec<String>,
    /// Optional seed for a reproducible draw; otherwise the thread RNG is used.
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct RecordResultBody {
    home_team: String,
    away_team: String,
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct AdvanceBody {
    choice: OperatorChoice,
}

#[derive(Deserialize)]
struct FinalResultBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct ResetBody {
    team_count: usize,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let team_count = body
        .as_ref()
        .map(|b| b.team_count)
        .unwrap_or_else(default_team_count);
    let tournament = match Tournament::new(team_count) {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament),
        None => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Set the decision policy (tournament must be in Setup).
#[put("/api/tournaments/{id}/policy")]
async fn api_set_policy(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<PolicyBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.set_policy(body.policy) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Assign players to teams and open the league (tournament must be in Setup).
#[post("/api/tournaments/{id}/roster")]
async fn api_assign_roster(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RosterBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let result = match body.seed {
        Some(seed) => assign_roster(
            t,
            &body.pool_one,
            &body.pool_two,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => assign_roster(t, &body.pool_one, &body.pool_two, &mut rand::thread_rng()),
    };
    match result {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Get the round-robin schedule (rounds with fixtures).
#[get("/api/tournaments/{id}/schedule")]
async fn api_get_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament.rounds)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Get the current points table, sorted by points then run rate.
#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.tournament.standings())
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Get the qualification signal (certified + top two).
#[get("/api/tournaments/{id}/qualification")]
async fn api_get_qualification(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.tournament.qualification())
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Record or correct a league score (tournament must be in League).
#[put("/api/tournaments/{id}/results")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let fixture = Fixture::new(body.home_team.clone(), body.away_team.clone());
    match record_result(t, &fixture, body.home_score, body.away_score) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Answer a decision gate: continue the league or move to the final.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_phase(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AdvanceBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match advance_phase(t, body.choice) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record the score of the final (tournament must be in Final).
#[put("/api/tournaments/{id}/final")]
async fn api_record_final(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<FinalResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match record_final_result(t, body.home_score, body.away_score) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Reset to Setup with a fresh roster; discards all recorded results.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_roster(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ResetBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.reset_roster(body.team_count) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for 12h)",
                    removed
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_set_policy)
            .service(api_assign_roster)
            .service(api_get_schedule)
            .service(api_get_standings)
            .service(api_get_qualification)
            .service(api_record_result)
            .service(api_advance_phase)
            .service(api_record_final)
            .service(api_reset_roster)
    })
    .bind(bind)?
    .run()
    .await
}
