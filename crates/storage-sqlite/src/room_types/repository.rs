use async_trait::async_trait;
use chrono::Local;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};
use std::sync::Arc;

use hotelbook_core::constants::{ROOM_TYPE_CODE_MAX_DIGITS, ROOM_TYPE_CODE_PREFIX};
use hotelbook_core::room_types::{NewRoomType, RoomType, RoomTypeRepositoryTrait, RoomTypeUpdate};
use hotelbook_core::Result;

use super::model::{NewRoomTypeDB, RoomTypeDB};
use crate::db::{run_blocking, DbPool};
use crate::errors::IntoCore;
use crate::reservations::TextValueDB;
use crate::schema::room_types::dsl::*;
use crate::utils::date_time_to_db;

pub struct RoomTypeRepository {
    pool: Arc<DbPool>,
}

impl RoomTypeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        RoomTypeRepository { pool }
    }
}

#[async_trait]
impl RoomTypeRepositoryTrait for RoomTypeRepository {
    async fn load_room_types(&self) -> Result<Vec<RoomType>> {
        run_blocking(&self.pool, |conn| {
            let rows = room_types
                .order(room_type_code.asc())
                .select(RoomTypeDB::as_select())
                .load::<RoomTypeDB>(conn)
                .into_core()?;
            Ok(rows.into_iter().map(RoomType::from).collect())
        })
        .await
    }

    async fn last_generated_code(&self) -> Result<Option<String>> {
        let prefix_len = ROOM_TYPE_CODE_PREFIX.len();
        run_blocking(&self.pool, move |conn| {
            // Only codes in the generated shape continue the sequence.
            let sql = format!(
                "SELECT room_type_code AS value FROM room_types \
                 WHERE room_type_code GLOB ? \
                 AND LENGTH(room_type_code) <= ? \
                 AND SUBSTR(room_type_code, {start}) NOT GLOB '*[^0-9]*' \
                 ORDER BY CAST(SUBSTR(room_type_code, {start}) AS INTEGER) DESC \
                 LIMIT 1",
                start = prefix_len + 1
            );
            let last = sql_query(sql)
                .bind::<Text, _>(format!("{}[0-9]*", ROOM_TYPE_CODE_PREFIX))
                .bind::<Integer, _>((prefix_len + ROOM_TYPE_CODE_MAX_DIGITS) as i32)
                .get_result::<TextValueDB>(conn)
                .optional()
                .into_core()?;
            Ok(last.and_then(|row| row.value))
        })
        .await
    }

    async fn insert_room_type(&self, code: String, new_room_type: NewRoomType) -> Result<RoomType> {
        run_blocking(&self.pool, move |conn| {
            let row = NewRoomTypeDB {
                room_type_code: code,
                description: new_room_type.description.trim().to_string(),
                is_active: new_room_type.is_active,
                created_at: date_time_to_db(&Local::now().naive_local()),
            };
            let inserted = diesel::insert_into(room_types)
                .values(&row)
                .returning(RoomTypeDB::as_returning())
                .get_result(conn)
                .into_core()?;
            Ok(RoomType::from(inserted))
        })
        .await
    }

    async fn update_room_type(&self, id: i64, update: RoomTypeUpdate) -> Result<usize> {
        run_blocking(&self.pool, move |conn| {
            diesel::update(room_types.find(id))
                .set((
                    description.eq(update.description.trim()),
                    is_active.eq(update.is_active),
                ))
                .execute(conn)
                .into_core()
        })
        .await
    }

    async fn delete_room_type(&self, code: &str) -> Result<usize> {
        let code = code.to_string();
        run_blocking(&self.pool, move |conn| {
            diesel::delete(room_types.filter(room_type_code.eq(code)))
                .execute(conn)
                .into_core()
        })
        .await
    }
}
