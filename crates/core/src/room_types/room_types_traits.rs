use async_trait::async_trait;

use super::room_types_model::{NewRoomType, RoomType, RoomTypeUpdate};
use crate::errors::Result;

#[async_trait]
pub trait RoomTypeRepositoryTrait: Send + Sync {
    async fn load_room_types(&self) -> Result<Vec<RoomType>>;
    /// Highest generated code, by numeric suffix.
    async fn last_generated_code(&self) -> Result<Option<String>>;
    async fn insert_room_type(&self, code: String, new_room_type: NewRoomType) -> Result<RoomType>;
    /// Number of rows updated.
    async fn update_room_type(&self, room_type_id: i64, update: RoomTypeUpdate) -> Result<usize>;
    /// Number of rows deleted.
    async fn delete_room_type(&self, room_type_code: &str) -> Result<usize>;
}

#[async_trait]
pub trait RoomTypeServiceTrait: Send + Sync {
    async fn get_next_code(&self) -> Result<String>;
    async fn get_room_types(&self) -> Result<Vec<RoomType>>;
    async fn create_room_type(&self, new_room_type: NewRoomType) -> Result<RoomType>;
    /// `false` when no room type has that id.
    async fn update_room_type(&self, room_type_id: i64, update: RoomTypeUpdate) -> Result<bool>;
    /// `false` when no room type has that code.
    async fn delete_room_type(&self, room_type_code: &str) -> Result<bool>;
}
