use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use mcqgen_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config.clone());

    log::info!(
        "starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .service(handlers::generate_mcq)
            .service(handlers::generation_stats)
            .service(handlers::health_check)
            .service(handlers::readiness_check)
            .service(handlers::liveness_check)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
