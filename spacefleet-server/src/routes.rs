//! HTTP handlers for SpaceFleet server.

use std::sync::Arc;

use actix_web::error::{BlockingError, InternalError};
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::{Deserialize, Serialize};
use spacefleet_core::{
    FleetError, PageRequest, Ship, ShipCriteria, ShipDraft, ShipOrder, ShipPatch, ShipService,
    ShipStore, ShipType, check_ship_id,
};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::openapi::ApiDoc;

/// Store handle shared by every worker.
pub type SharedStore = Arc<dyn ShipStore + Send + Sync>;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship operations over the configured store.
    pub service: ShipService<SharedStore>,
}

impl AppState {
    /// Wrap a store in application state.
    pub fn new(store: SharedStore) -> Self {
        Self {
            service: ShipService::new(store),
        }
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters accepted by the ship listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipListQuery {
    /// Case-sensitive substring of the ship name.
    pub name: Option<String>,
    /// Case-sensitive substring of the home planet.
    pub planet: Option<String>,
    /// Exact ship class.
    pub ship_type: Option<ShipType>,
    /// Production date strictly after this epoch millisecond.
    pub after: Option<i64>,
    /// Production date strictly before this epoch millisecond.
    pub before: Option<i64>,
    /// Exact usage flag.
    #[serde(rename = "isUsed")]
    pub is_used: Option<bool>,
    /// Inclusive lower speed bound.
    pub min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    pub max_speed: Option<f64>,
    /// Inclusive lower crew bound.
    pub min_crew_size: Option<i32>,
    /// Inclusive upper crew bound.
    pub max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    pub min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    pub max_rating: Option<f64>,
    /// Sort key, `ID` when omitted.
    pub order: Option<ShipOrder>,
    /// Zero-based page index, 0 when omitted.
    pub page_number: Option<u32>,
    /// Page size, 3 when omitted.
    pub page_size: Option<u32>,
}

impl ShipListQuery {
    /// Split the query into filter criteria, sort key, and page selection.
    pub fn into_parts(self) -> (ShipCriteria, ShipOrder, PageRequest) {
        let criteria = ShipCriteria {
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            after: self.after,
            before: self.before,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        };
        let order = self.order.unwrap_or_default();
        let page = PageRequest::new(self.page_number, self.page_size);
        (criteria, order, page)
    }
}

/// Register every ship route plus the extractor error handlers.
///
/// `/rest/ships/count` is registered ahead of `/rest/ships/{id}` so the
/// literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(count_ships)
        .service(list_ships)
        .service(create_ship)
        .service(get_ship)
        .service(update_ship)
        .service(delete_ship)
        .service(openapi_json);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("invalid ship payload: {err}"));
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("invalid query parameters: {err}"));
        InternalError::from_response(err, response).into()
    })
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { message })
}

/// Map a core error onto its HTTP status.
pub fn error_response(err: &FleetError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    match err {
        FleetError::BadRequest(_) => HttpResponse::BadRequest().json(body),
        FleetError::NotFound(_) => HttpResponse::NotFound().json(body),
        FleetError::Storage(_) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T>(
    result: Result<spacefleet_core::Result<T>, BlockingError>,
    ok: impl FnOnce(T) -> HttpResponse,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => ok(value),
        Ok(Err(err)) => error_response(&err),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse {
            message: format!("ship task failed: {err}"),
        }),
    }
}

fn parse_ship_id(raw: &str) -> Result<i64, FleetError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| FleetError::bad_request(format!("ship id must be an integer, got {raw:?}")))?;
    check_ship_id(id)
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipListQuery),
    responses(
        (status = 200, description = "Filtered, sorted page of ships", body = [Ship]),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filters, sorted and paged.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipListQuery>,
) -> impl Responder {
    let (criteria, order, page) = query.into_inner().into_parts();
    let service = state.service.clone();
    let result = web::block(move || service.list(&criteria, order, page)).await;
    respond(result, |ships| HttpResponse::Ok().json(ships))
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipCriteria),
    responses(
        (status = 200, description = "Number of ships matching the filters", body = usize),
        (status = 400, description = "Malformed query parameters", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filters, ignoring order and paging.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipCriteria>,
) -> impl Responder {
    let criteria = query.into_inner();
    let service = state.service.clone();
    let result = web::block(move || service.count(&criteria)).await;
    respond(result, |count| HttpResponse::Ok().json(count))
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = ShipDraft,
    responses(
        (status = 200, description = "Ship created", body = Ship),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<ShipDraft>,
) -> impl Responder {
    let draft = payload.into_inner();
    let service = state.service.clone();
    let result = web::block(move || service.create(draft)).await;
    respond(result, |ship| {
        log::info!("created ship {} ({})", ship.id, ship.name);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship", body = Ship),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let service = state.service.clone();
    let result = web::block(move || service.get(id)).await;
    respond(result, |ship| HttpResponse::Ok().json(ship))
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipPatch,
    responses(
        (status = 200, description = "Ship updated", body = Ship),
        (status = 400, description = "Invalid identifier or field", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update to a ship.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipPatch>,
) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let patch = payload.into_inner();
    let service = state.service.clone();
    let result = web::block(move || service.update(id, patch)).await;
    respond(result, |ship| {
        log::info!("updated ship {}", ship.id);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_ship_id(&path.into_inner()) {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    let service = state.service.clone();
    let result = web::block(move || service.delete(id)).await;
    respond(result, |()| {
        log::info!("deleted ship {id}");
        HttpResponse::Ok().finish()
    })
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
