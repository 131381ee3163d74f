use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};
use hotelbook_core::{
    calendar::{CalendarService, CalendarServiceTrait},
    reservations::{ReservationService, ReservationServiceTrait},
    room_types::{RoomTypeService, RoomTypeServiceTrait},
};
use hotelbook_storage_sqlite::{
    calendar::CalendarRepository, db, reservations::ReservationRepository,
    room_types::RoomTypeRepository,
};

pub struct AppState {
    pub reservation_service: Arc<dyn ReservationServiceTrait + Send + Sync>,
    pub room_type_service: Arc<dyn RoomTypeServiceTrait + Send + Sync>,
    pub calendar_service: Arc<dyn CalendarServiceTrait + Send + Sync>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    // try_init: tests may build several servers in one process
    let _ = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path, config.db_pool_size)?;
    db::run_migrations(&pool)?;

    let reservation_repository = Arc::new(ReservationRepository::new(pool.clone()));
    let reservation_service = Arc::new(ReservationService::new(reservation_repository));

    let room_type_repository = Arc::new(RoomTypeRepository::new(pool.clone()));
    let room_type_service = Arc::new(RoomTypeService::new(room_type_repository));

    let calendar_repository = Arc::new(CalendarRepository::new(pool));
    let calendar_service = Arc::new(CalendarService::new(calendar_repository));

    Ok(Arc::new(AppState {
        reservation_service,
        room_type_service,
        calendar_service,
    }))
}
