use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use flowchain::database::schema;
use flowchain::web::middleware::auth as auth_middleware;
use flowchain::web::routes::{
    activity, admin, assistant, leaderboard, participants, payments, payouts, referrals, support,
};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Verbind met de Database; zonder DATABASE_URL draait de demo-store
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    println!("Verbinden met database: {}", db_url);

    // A pooled :memory: database is per-connection; the demo store needs a
    // single connection so every handler sees the same data.
    let pool = if db_url == "sqlite::memory:" {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await
            .expect("Kan niet verbinden met DB")
    } else {
        SqlitePoolOptions::new()
            .connect(&db_url)
            .await
            .expect("Kan niet verbinden met DB")
    };

    schema::init(&pool).await.expect("Kan schema niet aanmaken");

    // 3. Public routes: registration, logins, leaderboard, referral lookup
    let public_routes = Router::new()
        .route(
            "/api/health",
            get(|| async { Json(json!({ "success": true, "status": "ok" })) }),
        )
        .route(
            "/api/participants/register",
            post(participants::register_handler),
        )
        .route("/api/participants/login", post(participants::login_handler))
        .route("/api/admin/login", post(admin::login_handler))
        .route("/api/leaderboard", get(leaderboard::leaderboard_handler))
        .route("/api/referrals/:code", get(referrals::lookup_handler));

    // 4. Participant routes onder één bearer-gate
    let participant_routes = Router::new()
        .route(
            "/api/participants/profile",
            get(participants::profile_handler),
        )
        .route("/api/payments/submit", post(payments::submit_handler))
        .route("/api/payments/status", get(payments::status_handler))
        .route("/api/payouts/request", post(payouts::request_handler))
        .route("/api/payouts/status", get(payouts::status_handler))
        .route(
            "/api/support/tickets",
            post(support::create_ticket_handler).get(support::list_tickets_handler),
        )
        .route(
            "/api/activity",
            post(activity::append_handler).get(activity::fetch_handler),
        )
        .route("/api/assistant/chat", post(assistant::chat_handler))
        .layer(middleware::from_fn(auth_middleware::require_auth));

    // 5. Back-office routes achter de admin-token gate
    let admin_routes = Router::new()
        .route(
            "/api/admin/participants",
            get(admin::list_participants_handler),
        )
        .route("/api/admin/payments", get(payments::admin_list_handler))
        .route(
            "/api/admin/payments/review",
            post(payments::review_handler),
        )
        .route("/api/admin/payouts", get(payouts::admin_list_handler))
        .route(
            "/api/admin/payouts/process",
            post(payouts::process_handler),
        )
        .route("/api/admin/support", get(support::admin_list_handler))
        .route(
            "/api/admin/support/respond",
            post(support::respond_handler),
        )
        .route("/api/admin/activity", get(activity::admin_fetch_handler))
        .route(
            "/api/admin/check-expired",
            post(admin::check_expired_handler),
        )
        .route(
            "/api/admin/risk/recompute",
            post(admin::recompute_risk_handler),
        )
        .route("/api/admin/stats", get(admin::stats_handler))
        .layer(middleware::from_fn(auth_middleware::require_admin));

    // 6. Bouw de hele applicatie
    let app = Router::new()
        .merge(public_routes)
        .merge(participant_routes)
        .merge(admin_routes)
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool);

    // 7. Start de server (met fallback poort)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Kan host/port niet parsen");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Kan fallback niet parsen");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Kan niet binden op fallback poort")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 FlowChain API draait op http://{}", bound_addr);
    println!("📍 Dashboard wijst naar http://{}/api", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
