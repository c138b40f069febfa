use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "email": "a@x.com",
    "location_id": 1
}))]
pub struct User {
    pub id: u64,
    pub email: String,
    /// Argon2 PHC string, never leaves the server
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[schema(nullable = true)]
    pub location_id: Option<u64>,
}
