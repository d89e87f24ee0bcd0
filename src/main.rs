use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use actix_web_actors::ws;
use tracing::info;

use tianjiu_backend::config::AppConfig;
use tianjiu_backend::state::AppState;
use tianjiu_backend::ws::WsSession;

mod telemetry;

async fn ws_route(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    ws::start(WsSession::new(state.get_ref().clone()), &req, stream)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init();

    let config = AppConfig::from_env();
    let state = AppState::new(config.clone());
    info!(host = %config.host, port = config.port, "starting tianjiu server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route("/health", web::get().to(health))
            .route("/ws", web::get().to(ws_route))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
