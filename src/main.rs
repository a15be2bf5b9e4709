use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_dash::config::AppConfig;
use weather_dash::db::{init_db, Database};
use weather_dash::router;
use weather_dash::state::AppState;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_dash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let addr = config.bind_addr;
    let server = Server::bind(&addr).max_workers(config.max_workers);
    let state = AppState { db, config };

    tracing::info!(%addr, "starting server");
    if let Err(e) = server.serve(move |req, _info| router::respond(req, &state)) {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
