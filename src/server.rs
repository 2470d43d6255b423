use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway_state::GatewayState;
use crate::io_struct::PromptInput;
use crate::weather;
use actix_web::{HttpRequest, HttpResponse, HttpServer, error, get, post, web};

#[get("/health")]
pub async fn health(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[get("/weatherforecast")]
pub async fn weather_forecast(_req: HttpRequest) -> HttpResponse {
    let today = chrono::Local::now().date_naive();
    HttpResponse::Ok().json(weather::forecast(today, &mut rand::rng()))
}

#[post("/mcp-agent")]
pub async fn mcp_agent(
    req: web::Json<PromptInput>,
    app_state: web::Data<GatewayState>,
) -> HttpResponse {
    let envelope = app_state.buffered_chat(req.into_inner().prompt).await;
    HttpResponse::Ok().json(envelope)
}

#[post("/mcp-agent-stream")]
pub async fn mcp_agent_stream(
    req: web::Json<PromptInput>,
    app_state: web::Data<GatewayState>,
) -> Result<HttpResponse, GatewayError> {
    app_state.stream_chat(req.into_inner().prompt).await
}

#[post("/mcp-agent-rag")]
pub async fn mcp_agent_rag(
    req: web::Json<PromptInput>,
    app_state: web::Data<GatewayState>,
) -> HttpResponse {
    let envelope = app_state.rag_chat(req.into_inner().prompt).await;
    HttpResponse::Ok().json(envelope)
}

// Malformed or missing `prompt` becomes a structured 400.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body: {}", err);
    GatewayError::BadRequest(err.to_string()).into()
}

/// Body extractor settings for the gateway routes. The content type is not
/// enforced so plain `curl -d` callers work.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(json_error_handler)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(weather_forecast)
        .service(mcp_agent)
        .service(mcp_agent_stream)
        .service(mcp_agent_rag);
}

pub async fn startup(config: GatewayConfig, state: GatewayState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    let max_payload_size = config.max_payload_size;

    log::info!(
        "Serving gateway on {}:{} -> {} (model {})",
        config.host,
        config.port,
        app_state.backend.url(),
        app_state.backend.model()
    );

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .app_data(json_config(max_payload_size))
            .configure(routes)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
