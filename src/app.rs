/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (Trace/CORS → gate → policy の順)
 * - axum::serve() で起動
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, http::HeaderValue, middleware::from_fn_with_state};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::auth::{access, policy};
use crate::services::principal::DbPrincipalResolver;
use crate::services::token::TokenCodec;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,tasteit=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // Config errors (missing secret/ttl etc.) abort startup here,
    // before anything listens.
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let tokens = TokenCodec::new(&config.jwt_secret, config.jwt_ttl_seconds)?;
    let principals = Arc::new(DbPrincipalResolver::new(db.clone()));

    Ok(AppState::new(
        db,
        tokens,
        policy::PolicyTable::standard(),
        principals,
    ))
}

fn build_router(state: AppState, config: &Config) -> Result<Router> {
    let cors = if config.cors_allowed_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = config
            .cors_allowed_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid CORS origin")?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Layer order (request side): Trace → CORS → gate → policy → handler.
    // The gate must run before the policy so the policy only reads AuthCtx.
    let router = Router::new()
        .nest("/api/1", api::v1::routes())
        .layer(from_fn_with_state(state.clone(), policy::authorize))
        .layer(from_fn_with_state(state.clone(), access::authenticate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
