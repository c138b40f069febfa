use crate::{
    auth::credentials::Credentials,
    error::AppError,
    model::reservation::ReservationKind,
    models::ReserveReq,
    service::ServiceLayer,
};
use actix_web::{HttpResponse, web};

async fn reserve(
    kind: ReservationKind,
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    time_slot_id: u64,
    payload: ReserveReq,
) -> Result<HttpResponse, AppError> {
    let user = service.require_user(&credentials).await?;

    if payload.id != user.id {
        return Err(AppError::Forbidden(format!(
            "Cannot book a {kind} for another user"
        )));
    }

    let reservation = service.reserve(kind, user.id, time_slot_id).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/// Reserve an arrival in a time slot
#[utoipa::path(
    post,
    path = "/api/users/arrival/{time_slot_id}",
    params(
        ("time_slot_id" = u64, Path, description = "Time slot to book")
    ),
    request_body = ReserveReq,
    responses(
        (status = 200, description = "Arrival created", body = crate::model::reservation::Reservation),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Body names another user"),
        (status = 404, description = "Time slot not found"),
        (status = 409, description = "Time slot is not open")
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Reservations"
)]
pub async fn reserve_arrival(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    path: web::Path<u64>,
    payload: web::Json<ReserveReq>,
) -> Result<HttpResponse, AppError> {
    reserve(
        ReservationKind::Arrival,
        credentials,
        service,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}

/// Reserve a departure in a time slot
#[utoipa::path(
    post,
    path = "/api/users/departure/{time_slot_id}",
    params(
        ("time_slot_id" = u64, Path, description = "Time slot to book")
    ),
    request_body = ReserveReq,
    responses(
        (status = 200, description = "Departure created", body = crate::model::reservation::Reservation),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Body names another user"),
        (status = 404, description = "Time slot not found"),
        (status = 409, description = "Time slot is not open")
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Reservations"
)]
pub async fn reserve_departure(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    path: web::Path<u64>,
    payload: web::Json<ReserveReq>,
) -> Result<HttpResponse, AppError> {
    reserve(
        ReservationKind::Departure,
        credentials,
        service,
        path.into_inner(),
        payload.into_inner(),
    )
    .await
}
