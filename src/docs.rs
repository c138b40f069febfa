use crate::auth::credentials::{EMAIL_HEADER, PASSWORD_HEADER};
use crate::model::{
    attendance::Attendance, reservation::Reservation, time_slot::TimeSlot, user::User,
};
use crate::models::{EditUserReq, MarkAttendanceReq, ReserveReq, SignupReq};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slotbook API",
        version = "0.1.0",
        description = r#"
## Slot attendance backend

Users log in with email and password, look up open time slots at their
location, book arrival and departure slots, and say whether they are coming
on a given day.

### Authentication
Protected endpoints read the `email` and `password` request headers on every
call. There are no sessions or tokens.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::signup,
        crate::auth::handlers::edit_user,

        crate::api::time_slot::get_times,

        crate::api::reservation::reserve_arrival,
        crate::api::reservation::reserve_departure,

        crate::api::attendance::mark_attendance,

        crate::api::user::users_at_location
    ),
    components(
        schemas(
            User,
            TimeSlot,
            Reservation,
            Attendance,
            SignupReq,
            EditUserReq,
            ReserveReq,
            MarkAttendanceReq
        )
    ),
    modifiers(&CredentialHeaders),
    tags(
        (name = "Users", description = "Login, signup and password changes"),
        (name = "Time slots", description = "Open slots per location"),
        (name = "Reservations", description = "Arrival and departure bookings"),
        (name = "Attendance", description = "Daily attendance marks"),
    )
)]
pub struct ApiDoc;

struct CredentialHeaders;

impl Modify for CredentialHeaders {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        for name in [EMAIL_HEADER, PASSWORD_HEADER] {
            components.add_security_scheme(
                name,
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(name))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_and_header_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/users/login",
            "/api/users/signup",
            "/api/users/editUser",
            "/api/users/times/{location_id}",
            "/api/users/arrival/{time_slot_id}",
            "/api/users/departure/{time_slot_id}",
            "/api/users/coming/{user_id}",
            "/api/users/location/{location_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key(EMAIL_HEADER));
        assert!(schemes.contains_key(PASSWORD_HEADER));
    }
}
