use crate::{
    auth::credentials::Credentials,
    error::AppError,
    models::{EditUserReq, SignupReq},
    service::ServiceLayer,
};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

/// Checks the `email` / `password` headers and returns the stored user
#[utoipa::path(
    post,
    path = "/api/users/login",
    responses(
        (status = 200, description = "Credentials accepted", body = crate::model::user::User),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "error": "Invalid credentials"
        }))
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Users"
)]
#[instrument(
    name = "users_login",
    skip(service, credentials),
    fields(email = %credentials.email)
)]
pub async fn login(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    match service
        .check_user(&credentials.email, &credentials.password)
        .await?
    {
        Some(user) => {
            info!(user_id = user.id, "Login successful");
            Ok(HttpResponse::Ok().json(user))
        }
        None => Err(AppError::Unauthorized),
    }
}

/// User registration handler
#[utoipa::path(
    post,
    path = "/api/users/signup",
    request_body = SignupReq,
    responses(
        (status = 201, description = "User registered", body = crate::model::user::User),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "error": "Email already registered"
        }))
    ),
    tag = "Users"
)]
pub async fn signup(
    payload: web::Json<SignupReq>,
    service: web::Data<ServiceLayer>,
) -> Result<HttpResponse, AppError> {
    let user = service.signup(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Changes the caller's password. Other user fields in the body are ignored.
#[utoipa::path(
    post,
    path = "/api/users/editUser",
    request_body = EditUserReq,
    responses(
        (status = 200, description = "Password updated", body = crate::model::user::User),
        (status = 400, description = "Empty password or one with surrounding whitespace"),
        (status = 401, description = "Invalid credentials")
    ),
    security(
        ("email" = [], "password" = [])
    ),
    tag = "Users"
)]
#[instrument(name = "users_edit", skip_all, fields(email = %credentials.email))]
pub async fn edit_user(
    credentials: Credentials,
    service: web::Data<ServiceLayer>,
    payload: web::Json<EditUserReq>,
) -> Result<HttpResponse, AppError> {
    let user = service.require_user(&credentials).await?;
    let updated = service.edit_password(&user, &payload.password).await?;
    Ok(HttpResponse::Ok().json(updated))
}
