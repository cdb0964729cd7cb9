use std::{collections::BTreeMap, net::SocketAddr};

use actix_web::{
    dev::Server,
    get,
    http::header::{self, ContentType},
    middleware::Logger,
    web::{self, Data, Query, ServiceConfig},
    App, HttpRequest, HttpResponse, HttpResponseBuilder, HttpServer,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use crate::{
    auth::{Credential, Credentials},
    constants::*,
    engine::{UpdateEngine, UpdateRequest},
    env::Env,
    peer::client_ip,
    record::Record,
    store::Store,
};

pub struct State {
    pub engine: UpdateEngine,
    pub credentials: Credentials,
    pub trust_proxy: bool,
}

impl State {
    pub fn new(env: &Env) -> Self {
        Self {
            engine: UpdateEngine::new(Store::new(), env.require_fqdn),
            credentials: env.credentials.clone(),
            trust_proxy: env.trust_proxy,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
    records: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordsResponse {
    total_records: usize,
    records: BTreeMap<String, Record>,
    last_update: DateTime<Utc>,
}

fn plaintext(mut response: HttpResponseBuilder, body: String) -> HttpResponse {
    response.content_type(ContentType::plaintext()).body(body)
}

fn badauth() -> HttpResponse {
    let mut response = HttpResponse::Unauthorized();
    response.insert_header((
        header::WWW_AUTHENTICATE,
        format!("Basic realm=\"{}\"", AUTH_REALM),
    ));

    plaintext(response, "badauth".to_string())
}

fn authorize(request: &HttpRequest, data: &State) -> Result<Credential, HttpResponse> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    data.credentials.authorize(header).map_err(|err| {
        warn!(
            "Rejected `{} {}`: {}.",
            request.method(),
            request.path(),
            err
        );
        badauth()
    })
}

fn query_params(request: &HttpRequest) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::from_query(request.query_string())
        .map(Query::into_inner)
        .unwrap_or_default()
}

fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

async fn update(request: HttpRequest, data: Data<State>) -> HttpResponse {
    let credential = match authorize(&request, &data) {
        Ok(credential) => credential,
        Err(response) => return response,
    };

    let params = query_params(&request);
    let fallback_ip = client_ip(&request, data.trust_proxy);
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN_USER_AGENT);

    let result = data
        .engine
        .update(UpdateRequest {
            hostname: first_param(&params, "hostname"),
            claimed_ip: first_param(&params, "myip"),
            fallback_ip: fallback_ip.as_deref(),
            user_agent,
            method: request.method().as_str(),
            caller: &credential.username,
        })
        .await;

    plaintext(HttpResponse::Ok(), result.to_string())
}

#[get("/health")]
async fn health(data: Data<State>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        timestamp: Utc::now(),
        records: data.engine.store().len().await,
    })
}

#[get("/admin/records")]
async fn admin_records(request: HttpRequest, data: Data<State>) -> HttpResponse {
    if let Err(response) = authorize(&request, &data) {
        return response;
    }

    let records = data.engine.store().snapshot().await;

    HttpResponse::Ok().json(RecordsResponse {
        total_records: records.len(),
        records,
        last_update: Utc::now(),
    })
}

async fn not_found() -> HttpResponse {
    plaintext(HttpResponse::NotFound(), "not found".to_string())
}

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(health).service(admin_records);

    for path in UPDATE_ROUTES {
        cfg.service(
            web::resource(path)
                .route(web::get().to(update))
                .route(web::post().to(update))
                .default_service(web::to(not_found)),
        );
    }
}

pub fn start_api_server(addr: SocketAddr, data: Data<State>) -> Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .configure(routes)
            .default_service(web::to(not_found))
    })
    .disable_signals()
    .bind(addr)
    .context(format!("Failed to bind API server to `{}`.", addr))?
    .run();

    Ok(server)
}
