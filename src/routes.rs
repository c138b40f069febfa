use crate::{
    api::{attendance, reservation, time_slot, user},
    auth::{
        credentials::{EMAIL_HEADER, PASSWORD_HEADER},
        handlers,
    },
    config::Config,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    http::header::{self, HeaderName},
    web,
};
use anyhow::anyhow;
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiters, built once and shared by every worker.
#[derive(Clone)]
pub struct Limiters {
    login: Limiter,
    signup: Limiter,
    protected: Limiter,
}

impl Limiters {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        fn build_limiter(requests_per_min: u32) -> anyhow::Result<Limiter> {
            let burst = requests_per_min.max(1);
            let per_ms = 60_000 / burst as u64;
            let cfg = GovernorConfigBuilder::default()
                .milliseconds_per_request(per_ms.max(1))
                .burst_size(burst)
                .key_extractor(PeerIpKeyExtractor)
                .finish()
                .ok_or_else(|| anyhow!("invalid rate limit: {requests_per_min}/min"))?;
            Ok(Arc::new(Governor::new(&cfg)))
        }

        Ok(Self {
            login: build_limiter(config.rate_login_per_min)?,
            signup: build_limiter(config.rate_signup_per_min)?,
            protected: build_limiter(config.rate_protected_per_min)?,
        })
    }
}

pub fn cors(config: &Config) -> Cors {
    Cors::default()
        .allowed_origin(&config.cors_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(EMAIL_HEADER),
            HeaderName::from_static(PASSWORD_HEADER),
        ])
        .max_age(3600)
}

/// Login and signup sit outside the protected scope so each is throttled
/// by its own limiter only.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiters: &Limiters) {
    let users = format!("{}/users", config.api_prefix);

    cfg.service(
        web::resource(format!("{users}/login"))
            .wrap(limiters.login.clone())
            .route(web::post().to(handlers::login)),
    )
    .service(
        web::resource(format!("{users}/signup"))
            .wrap(limiters.signup.clone())
            .route(web::post().to(handlers::signup)),
    )
    .service(
        web::scope(&users)
            .wrap(limiters.protected.clone())
            .service(web::resource("/editUser").route(web::post().to(handlers::edit_user)))
            // /times/{location_id}
            .service(web::resource("/times/{id}").route(web::get().to(time_slot::get_times)))
            // /coming/{user_id}
            .service(
                web::resource("/coming/{id}").route(web::post().to(attendance::mark_attendance)),
            )
            // /arrival/{time_slot_id}
            .service(
                web::resource("/arrival/{id}").route(web::post().to(reservation::reserve_arrival)),
            )
            // /departure/{time_slot_id}
            .service(
                web::resource("/departure/{id}")
                    .route(web::post().to(reservation::reserve_departure)),
            )
            // /location/{location_id}
            .service(web::resource("/location/{id}").route(web::get().to(user::users_at_location))),
    );
}
