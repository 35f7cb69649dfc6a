//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (e.g. data).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use double_elim_web::{
    rebuild_bracket, storage, BracketDb, MatchId, Team, TeamId, TournamentMeta,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// In-memory id for one tournament instance.
type TournamentId = Uuid;

/// Per-tournament entry: roster + generated record + last activity time
/// (for auto-cleanup).
struct TournamentEntry {
    participants: Vec<TeamId>,
    db: BracketDb,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Tournament as returned by the API: instance id + roster + the db record.
#[derive(serde::Serialize)]
struct TournamentResponse<'a> {
    id: TournamentId,
    participants: &'a [TeamId],
    #[serde(flatten)]
    db: &'a BracketDb,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    meta: TournamentMeta,
    /// Ordered participant ids; order decides first-round pairing.
    participants: Vec<TeamId>,
    /// Optional display metadata for (a subset of) the participants.
    #[serde(default)]
    teams: Vec<Team>,
}

#[derive(Deserialize)]
struct SetScoreBody {
    match_id: MatchId,
    score_1: u32,
    score_2: u32,
}

#[derive(Deserialize)]
struct SetParticipantsBody {
    participants: Vec<TeamId>,
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
        service: "double-elim-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a tournament and build its bracket immediately (returns it with id;
/// client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let bracket = match rebuild_bracket(&body.participants, &[]) {
        Ok(bracket) => bracket,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let teams: HashMap<TeamId, Team> = body.teams.into_iter().map(|t| (t.id.clone(), t)).collect();
    let db = BracketDb::new(body.meta, teams, bracket);
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(TournamentResponse {
        id,
        participants: &body.participants,
        db: &db,
    });
    g.insert(
        id,
        TournamentEntry {
            participants: body.participants,
            db,
            last_activity: Instant::now(),
        },
    );
    response
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
            HttpResponse::Ok().json(TournamentResponse {
                id: path.id,
                participants: &entry.participants,
                db: &entry.db,
            })
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Record a score for one match, then rebuild the bracket so winners advance
/// and losers drop. The current record is the merge source, so every other
/// recorded score survives.
#[put("/api/tournaments/{id}/score")]
async fn api_set_score(state: AppState, path: Path<TournamentPath>, body: Json<SetScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let target = match entry.db.bracket.iter_mut().find(|m| m.id == body.match_id) {
        Some(m) => m,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "Match not found" })),
    };
    target.score_1 = body.score_1;
    target.score_2 = body.score_2;
    match rebuild_bracket(&entry.participants, &entry.db.bracket) {
        Ok(bracket) => {
            entry.db.bracket = bracket;
            entry.db.updated_at = Utc::now();
            HttpResponse::Ok().json(TournamentResponse {
                id: path.id,
                participants: &entry.participants,
                db: &entry.db,
            })
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Replace the roster and rebuild. Scores keep following their match ids, so
/// results recorded before the edit survive where the shape allows.
#[put("/api/tournaments/{id}/participants")]
async fn api_set_participants(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetParticipantsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match rebuild_bracket(&body.participants, &entry.db.bracket) {
        Ok(bracket) => {
            entry.participants = body.into_inner().participants;
            entry.db.bracket = bracket;
            entry.db.updated_at = Utc::now();
            HttpResponse::Ok().json(TournamentResponse {
                id: path.id,
                participants: &entry.participants,
                db: &entry.db,
            })
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Bulk-import team display metadata from a CSV body (`id,name,logo`).
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let teams = match storage::import_teams_csv(body.as_bytes()) {
        Ok(teams) => teams,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    for team in teams {
        entry.db.teams.insert(team.id.clone(), team);
    }
    entry.db.updated_at = Utc::now();
    HttpResponse::Ok().json(TournamentResponse {
        id: path.id,
        participants: &entry.participants,
        db: &entry.db,
    })
}

/// Build a tournament from the data directory: config + team files + any
/// previously generated record (so recorded scores are restored).
#[post("/api/tournaments/load")]
async fn api_load_tournament(state: AppState) -> HttpResponse {
    let dir = data_dir();
    let config = match storage::load_config(&dir.join("tournament.json")) {
        Ok(config) => config,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let teams = match storage::load_teams(&dir.join("teams")) {
        Ok(teams) => teams,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    };
    let previous = storage::load_previous_bracket(&dir.join("generated/db.json")).unwrap_or_default();
    let bracket = match rebuild_bracket(&config.participants, &previous) {
        Ok(bracket) => bracket,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let db = BracketDb::new(config.meta, teams, bracket);
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(TournamentResponse {
        id,
        participants: &config.participants,
        db: &db,
    });
    g.insert(
        id,
        TournamentEntry {
            participants: config.participants,
            db,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Write the tournament's db record to the data directory for the static
/// presentation layer.
#[post("/api/tournaments/{id}/save")]
async fn api_save_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let out = data_dir().join("generated/db.json");
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match storage::write_db(&out, &entry.db) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "saved": out.display().to_string() })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn data_dir() -> PathBuf {
    std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
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
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_load_tournament)
            .service(api_get_tournament)
            .service(api_set_score)
            .service(api_set_participants)
            .service(api_import_teams)
            .service(api_save_tournament)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
