//! Database models for room types.

use diesel::prelude::*;

use hotelbook_core::room_types::RoomType;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(primary_key(room_type_id))]
#[diesel(table_name = crate::schema::room_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RoomTypeDB {
    pub room_type_id: i64,
    pub room_type_code: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::room_types)]
pub struct NewRoomTypeDB {
    pub room_type_code: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<RoomTypeDB> for RoomType {
    fn from(db: RoomTypeDB) -> Self {
        Self {
            room_type_id: db.room_type_id,
            room_type_code: db.room_type_code,
            description: db.description,
            is_active: db.is_active,
        }
    }
}
