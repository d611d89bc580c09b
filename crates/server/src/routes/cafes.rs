use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use models::cafe::{Model as Cafe, NewCafe};
use service::errors::ServiceError;

use crate::errors::{
    ApiError, Envelope, NotFoundBody, MSG_ADDED, MSG_DELETED, MSG_ID_NOT_FOUND, MSG_NO_CAFES,
    MSG_NO_CAFE_AT_LOCATION, MSG_PRICE_UPDATED, MSG_WENT_WRONG, MSG_WRONG_KEY,
};
use crate::state::ServerState;

/// Query string as decoded key/value pairs. A repeated key resolves to its first value, so
/// duplicates never reject the request.
#[derive(Debug, Default)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
    pub fn first(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

impl From<Vec<(String, String)>> for QueryArgs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

/// Raw `/add` query string; flags count as true when present and non-empty.
#[derive(Debug, Default)]
pub struct AddCafeQuery {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
    pub coffee_price: Option<String>,
}

impl From<&QueryArgs> for AddCafeQuery {
    fn from(args: &QueryArgs) -> Self {
        Self {
            name: args.first("name"),
            map_url: args.first("map_url"),
            img_url: args.first("img_url"),
            location: args.first("location"),
            seats: args.first("seats"),
            has_toilet: args.first("has_toilet"),
            has_wifi: args.first("has_wifi"),
            has_sockets: args.first("has_sockets"),
            can_take_calls: args.first("can_take_calls"),
            coffee_price: args.first("coffee_price"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CafeBody {
    pub cafe: Cafe,
}

#[derive(Debug, Serialize)]
pub struct RandomCafeBody {
    pub cafe: RandomCafe,
}

/// Random-pick shape: no `id`, amenities grouped.
#[derive(Debug, Serialize)]
pub struct RandomCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub amenities: Amenities,
}

#[derive(Debug, Serialize)]
pub struct Amenities {
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl From<Cafe> for RandomCafe {
    fn from(c: Cafe) -> Self {
        Self {
            name: c.name,
            map_url: c.map_url,
            img_url: c.img_url,
            location: c.location,
            amenities: Amenities {
                seats: c.seats,
                has_toilet: c.has_toilet,
                has_wifi: c.has_wifi,
                has_sockets: c.has_sockets,
                can_take_calls: c.can_take_calls,
                coffee_price: c.coffee_price,
            },
        }
    }
}

fn flag(v: &Option<String>) -> bool {
    v.as_deref().is_some_and(|s| !s.is_empty())
}

impl From<AddCafeQuery> for NewCafe {
    fn from(q: AddCafeQuery) -> Self {
        Self {
            has_toilet: flag(&q.has_toilet),
            has_wifi: flag(&q.has_wifi),
            has_sockets: flag(&q.has_sockets),
            can_take_calls: flag(&q.can_take_calls),
            name: q.name.unwrap_or_default(),
            map_url: q.map_url.unwrap_or_default(),
            img_url: q.img_url.unwrap_or_default(),
            location: q.location.unwrap_or_default(),
            seats: q.seats.unwrap_or_default(),
            coffee_price: q.coffee_price.filter(|p| !p.is_empty()),
        }
    }
}

/// Ids that do not parse as integers match no row.
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

#[utoipa::path(
    get, path = "/all", tag = "cafe",
    responses(
        (status = 200, description = "Every cafe keyed by id"),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn all_cafes(State(state): State<ServerState>) -> Result<Json<BTreeMap<i32, Cafe>>, ApiError> {
    let list = state.cafes.list().await?;
    info!(count = list.len(), "list cafes");
    Ok(Json(list.into_iter().map(|c| (c.id, c)).collect()))
}

#[utoipa::path(
    get, path = "/search", tag = "cafe",
    params(("loc" = Option<String>, Query, description = "Exact location to match")),
    responses(
        (status = 200, description = "Matching cafe, or a Not Found error body")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let Some(loc) = QueryArgs::from(pairs).first("loc") else {
        return Ok(Json(NotFoundBody::new(MSG_NO_CAFE_AT_LOCATION)).into_response());
    };
    match state.cafes.search(&loc).await? {
        Some(cafe) => Ok(Json(CafeBody { cafe }).into_response()),
        None => Ok(Json(NotFoundBody::new(MSG_NO_CAFE_AT_LOCATION)).into_response()),
    }
}

#[utoipa::path(
    get, path = "/random", tag = "cafe",
    responses(
        (status = 200, description = "One cafe picked at random"),
        (status = 404, description = "No cafes stored")
    )
)]
pub async fn random(State(state): State<ServerState>) -> Result<Response, ApiError> {
    match state.cafes.random().await {
        Ok(c) => Ok(Json(RandomCafeBody { cafe: c.into() }).into_response()),
        Err(ServiceError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, Json(NotFoundBody::new(MSG_NO_CAFES))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post, path = "/add", tag = "cafe",
    params(
        ("name" = String, Query, description = "Unique cafe name"),
        ("map_url" = String, Query, description = "Map link"),
        ("img_url" = String, Query, description = "Image link"),
        ("location" = String, Query, description = "Location"),
        ("seats" = String, Query, description = "Seat range, e.g. 20-30"),
        ("has_toilet" = Option<String>, Query, description = "Any non-empty value means true"),
        ("has_wifi" = Option<String>, Query, description = "Any non-empty value means true"),
        ("has_sockets" = Option<String>, Query, description = "Any non-empty value means true"),
        ("can_take_calls" = Option<String>, Query, description = "Any non-empty value means true"),
        ("coffee_price" = Option<String>, Query, description = "Free-form price")
    ),
    responses(
        (status = 200, description = "Success or Fail envelope")
    )
)]
pub async fn add_cafe(State(state): State<ServerState>, Query(pairs): Query<Vec<(String, String)>>) -> Response {
    let q = AddCafeQuery::from(&QueryArgs::from(pairs));
    match state.cafes.create(q.into()).await {
        Ok(_) => Envelope::success(MSG_ADDED).with_status(StatusCode::OK),
        Err(_) => Envelope::fail(MSG_WENT_WRONG).with_status(StatusCode::OK),
    }
}

#[utoipa::path(
    patch, path = "/update-price/{cafe_id}", tag = "cafe",
    params(
        ("cafe_id" = i32, Path, description = "Cafe id"),
        ("new_price" = Option<String>, Query, description = "New free-form price")
    ),
    responses(
        (status = 200, description = "Success or Fail envelope"),
        (status = 404, description = "No cafe with that id")
    )
)]
pub async fn update_price(
    State(state): State<ServerState>,
    Path(cafe_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let Some(id) = parse_id(&cafe_id) else {
        return Envelope::fail(MSG_ID_NOT_FOUND).with_status(StatusCode::NOT_FOUND);
    };
    let new_price = QueryArgs::from(pairs).first("new_price");
    match state.cafes.update_price(id, new_price).await {
        Ok(_) => Envelope::success(MSG_PRICE_UPDATED).with_status(StatusCode::OK),
        Err(ServiceError::NotFound(_)) => Envelope::fail(MSG_ID_NOT_FOUND).with_status(StatusCode::NOT_FOUND),
        Err(_) => Envelope::fail(MSG_WENT_WRONG).with_status(StatusCode::OK),
    }
}

#[utoipa::path(
    delete, path = "/caffe-closed/{cafe_id}", tag = "cafe",
    params(
        ("cafe_id" = i32, Path, description = "Cafe id"),
        ("api-key" = String, Query, description = "Shared secret")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 403, description = "Wrong API key"),
        (status = 404, description = "No cafe with that id"),
        (status = 500, description = "Delete failed")
    )
)]
pub async fn delete_cafe(
    State(state): State<ServerState>,
    Path(cafe_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let api_key = QueryArgs::from(pairs).first("api-key");
    if api_key.as_deref() != Some(state.auth.api_key.as_str()) {
        warn!(cafe_id = %cafe_id, "delete rejected: wrong api key");
        return Envelope::fail(MSG_WRONG_KEY).with_status(StatusCode::FORBIDDEN);
    }
    let Some(id) = parse_id(&cafe_id) else {
        return Envelope::fail(MSG_ID_NOT_FOUND).with_status(StatusCode::NOT_FOUND);
    };
    match state.cafes.delete(id).await {
        Ok(()) => Envelope::success(MSG_DELETED).with_status(StatusCode::OK),
        Err(ServiceError::NotFound(_)) => Envelope::fail(MSG_ID_NOT_FOUND).with_status(StatusCode::NOT_FOUND),
        Err(_) => Envelope::fail(MSG_WENT_WRONG).with_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
