//! Room types module - master data for the kinds of rooms on offer.

mod room_types_model;
mod room_types_service;
mod room_types_traits;

pub use room_types_model::{next_room_type_code, NewRoomType, RoomType, RoomTypeUpdate};
pub use room_types_service::RoomTypeService;
pub use room_types_traits::{RoomTypeRepositoryTrait, RoomTypeServiceTrait};
