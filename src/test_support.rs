use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;

use crate::{
    config::Config,
    model::{time_slot::TimeSlot, user::User},
    models::SignupReq,
    routes::Limiters,
    service::ServiceLayer,
    store::memory::MemoryStore,
    utils::email_cache::EmailCache,
};

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub service: ServiceLayer,
    pub user: User,
}

pub fn slot(id: u64, location_id: u64, hour: u32, is_open: bool) -> TimeSlot {
    let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    TimeSlot {
        id,
        location_id,
        start_time: day.and_hms_opt(hour, 0, 0).unwrap(),
        end_time: day.and_hms_opt(hour, 30, 0).unwrap(),
        is_open,
    }
}

/// Location 1 with slots 10 (open) and 11 (closed), location 2 with slot 20
/// (open), and user `a@x.com` / `p1` at location 1.
pub async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    store.add_location(1, "Main office");
    store.add_location(2, "Warehouse");
    store.add_time_slot(slot(10, 1, 8, true));
    store.add_time_slot(slot(11, 1, 9, false));
    store.add_time_slot(slot(20, 2, 8, true));

    let service = ServiceLayer::new(store.clone(), EmailCache::new(1_000)).unwrap();
    let user = service
        .signup(SignupReq {
            email: "a@x.com".into(),
            password: "p1".into(),
            location_id: Some(1),
        })
        .await
        .unwrap();

    Fixture {
        store,
        service,
        user,
    }
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = [
        ("SERVER_ADDR", "127.0.0.1:0"),
        ("DATABASE_URL", "mysql://unused"),
    ]
    .into_iter()
    .collect();

    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

pub fn test_limiters() -> Limiters {
    Limiters::from_config(&test_config()).unwrap()
}
