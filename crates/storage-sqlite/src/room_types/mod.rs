//! SQLite storage implementation for room types.

mod model;
mod repository;

pub use model::{NewRoomTypeDB, RoomTypeDB};
pub use repository::RoomTypeRepository;
