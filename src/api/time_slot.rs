use crate::{auth::credentials::Credentials, error::AppError, service::ServiceLayer};
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Open time slots of a location
#[utoipa::path(
    get,
    path = "/api/users/times/{location_id}",
    params(
        ("location_id" = u64, Path, description = "Location whose open slots are listed")
    ),
    responses(
        (status = 200, description = "Open time slots, earliest first", body = [crate::model::time_slot::TimeSlot]),
        (status = 401, description = "Invalid credentials")
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Time slots"
)]
pub async fn get_times(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    service.require_user(&credentials).await?;

    let location_id = path.into_inner();
    let slots = service.open_time_slots(location_id).await?;

    debug!(location_id, count = slots.len(), "Open time slots listed");
    Ok(HttpResponse::Ok().json(slots))
}
