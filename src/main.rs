use tracing::info;

use todo_app::api::router;
use todo_app::config::Config;
use todo_app::db;
use todo_app::state::AppState;
use todo_app::telemetry::init_tracing;

fn use_test_db() -> bool {
    std::env::args().any(|a| a == "--test-db")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("todo_app=debug");

    let mut config = Config::new_from_env()?;
    if use_test_db() {
        info!("using TEST_DATABASE_URL");
        config = config.use_test_database();
    }

    let pool = db::connect_with_config(&config).await?;
    db::init_schema(&pool).await?;

    let state = AppState { db: pool.clone() };

    let app = router(state);

    let addr = config.bind_addr;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
