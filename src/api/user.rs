use crate::{auth::credentials::Credentials, error::AppError, service::ServiceLayer};
use actix_web::{HttpResponse, web};

/// Users assigned to a location
#[utoipa::path(
    get,
    path = "/api/users/location/{location_id}",
    params(
        ("location_id" = u64, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "Users of the location", body = [crate::model::user::User]),
        (status = 401, description = "Invalid credentials")
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Users"
)]
pub async fn users_at_location(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    service.require_user(&credentials).await?;

    let users = service.users_by_location(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}
