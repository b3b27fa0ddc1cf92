use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, http::header, web};
use std::{path::Path, sync::Arc};
use tarot_relay::{AppState, config::Config, handlers, logging, upstream::OpenAiClient};

/* ---------- main ---------- */
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logger();

    // Refuse to start without a credential.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let client = OpenAiClient::new(config.api_key.clone(), config.base_url.clone());
    let app_state = web::Data::new(AppState {
        client: Arc::new(client),
        model: config.model.clone(),
        locale: config.locale,
    });

    let static_dir = config.static_dir.clone();
    let serve_static = Path::new(&static_dir).is_dir();
    if !serve_static {
        tracing::warn!(dir = %static_dir, "Static directory not found, serving the API only");
    }

    let cors_origin = config.cors_allowed_origin.clone();

    tracing::info!(
        model = %config.model,
        locale = %config.locale,
        "Tarot app server running on http://localhost:{}",
        config.port
    );

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600),
            None => Cors::permissive(),
        };

        let app = App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(handlers::configure);

        if serve_static {
            app.service(Files::new("/", &static_dir).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
