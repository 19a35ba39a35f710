use college_api::{app, config, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting College API in {:?} mode", config.environment);

    let pool = database::connect(&config.database).await?;
    database::init_schema(&pool).await?;

    let app = app(pool);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("🚀 College API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
