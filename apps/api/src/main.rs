use anyhow::Context;
use http::{HeaderValue, Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use vibe_index_api::{
    config::Config,
    domain::{project::repository::ProjectRepository, social::repository::LikeRepository},
    infrastructure::{
        cache::{memory_store::MemoryStore, redis_store::RedisStore, traits::EphemeralStore},
        database::pool::create_pool,
        repositories::{
            in_memory::InMemoryRepository, sqlx_project_repository::SqlxProjectRepository,
            sqlx_social_repository::SqlxSocialRepository,
        },
    },
    presentation::http::{routes::create_router, state::AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG wins when set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,vibe_index_api=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let (db, project_repo, like_repo) = match &config.database_url {
        Some(url) => {
            let db = create_pool(url, config.database_max_connections).await?;
            let mut migrator = sqlx::migrate!("./migrations");
            migrator.set_ignore_missing(config.ignore_missing_migrations);
            migrator.run(&db).await.context("running migrations")?;
            let projects: Arc<dyn ProjectRepository> =
                Arc::new(SqlxProjectRepository::new(db.clone()));
            let likes: Arc<dyn LikeRepository> = Arc::new(SqlxSocialRepository::new(db.clone()));
            (Some(db), projects, likes)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, projects are kept in memory");
            let repo = Arc::new(if config.seed_demo_projects {
                InMemoryRepository::with_demo_projects(chrono::Utc::now())
            } else {
                InMemoryRepository::new()
            });
            let projects: Arc<dyn ProjectRepository> = repo.clone();
            let likes: Arc<dyn LikeRepository> = repo;
            (None, projects, likes)
        }
    };

    match project_repo.count().await {
        Ok(count) => tracing::info!(projects = count, "Project store ready"),
        Err(e) => tracing::warn!("Could not count projects at startup: {}", e),
    }

    let store: Arc<dyn EphemeralStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::connect(redis::Client::open(url.as_str())?).await?),
        None => {
            tracing::warn!("REDIS_URL not set, cache and counters are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let cors = cors_layer(&config.allowed_origins);
    let state = AppState::new(config.clone(), db, project_repo, like_repo, store);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Vibe Index listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-session-id"),
        ])
        .max_age(Duration::from_secs(3600));

    if cfg!(debug_assertions) {
        return base.allow_origin(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
