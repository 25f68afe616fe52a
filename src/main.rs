use clap::Parser;
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use std::sync::Arc;

use reclamo_backend::api::{AuthApi, ComplaintsApi, HealthApi};
use reclamo_backend::app_data::AppData;
use reclamo_backend::cli::{execute_command, Cli};
use reclamo_backend::config::{init_database, init_logging, migrate_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let db = init_database().await?;

    let jwt_secret = std::env::var("JWT_SECRET")?;
    let password_pepper = std::env::var("PASSWORD_PEPPER")?;
    let app_data = AppData::init(db, jwt_secret, password_pepper);

    if let Some(command) = cli.command {
        return execute_command(command, &app_data).await;
    }

    // Default: run migrations and serve
    migrate_database(&app_data.db).await?;

    let auth_api = AuthApi::new(
        Arc::clone(&app_data.credential_store),
        Arc::clone(&app_data.token_service),
    );
    let complaints_api = ComplaintsApi::new(
        Arc::clone(&app_data.complaint_store),
        Arc::clone(&app_data.engine),
        Arc::clone(&app_data.token_service),
        app_data.areas.clone(),
    );

    let health_api = HealthApi::new(app_data.db.clone());
    let api_service = OpenApiService::new(
        (health_api, auth_api, complaints_api),
        "Reclamo API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");
    let swagger_ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/docs", swagger_ui);

    tracing::info!("listening on 0.0.0.0:3000");
    Server::new(TcpListener::bind("0.0.0.0:3000"))
        .run(app)
        .await?;

    Ok(())
}
