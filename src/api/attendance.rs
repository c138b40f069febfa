use crate::{
    auth::credentials::Credentials,
    error::AppError,
    models::MarkAttendanceReq,
    service::ServiceLayer,
};
use actix_web::{HttpResponse, web};

/// Mark (or re-mark) whether the caller is coming on a given date
#[utoipa::path(
    post,
    path = "/api/users/coming/{user_id}",
    params(
        ("user_id" = u64, Path, description = "The caller's own user id")
    ),
    request_body = MarkAttendanceReq,
    responses(
        (status = 200, description = "Attendance stored", body = crate::model::attendance::Attendance),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Path names another user", body = Object, example = json!({
            "error": "Cannot mark attendance for another user"
        }))
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    path: web::Path<u64>,
    payload: web::Json<MarkAttendanceReq>,
) -> Result<HttpResponse, AppError> {
    let user = service.require_user(&credentials).await?;

    if path.into_inner() != user.id {
        return Err(AppError::Forbidden(
            "Cannot mark attendance for another user".into(),
        ));
    }

    let attendance = service
        .mark_attendance(user.id, payload.date, payload.is_attending)
        .await?;

    Ok(HttpResponse::Ok().json(attendance))
}
