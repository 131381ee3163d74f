use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::room_types_model::{next_room_type_code, NewRoomType, RoomType, RoomTypeUpdate};
use super::room_types_traits::{RoomTypeRepositoryTrait, RoomTypeServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

const REFERENCED_ROOM_TYPE_MESSAGE: &str =
    "Cannot delete roomtype because it is referenced in other records.";

pub struct RoomTypeService {
    repository: Arc<dyn RoomTypeRepositoryTrait>,
}

impl RoomTypeService {
    pub fn new(repository: Arc<dyn RoomTypeRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RoomTypeServiceTrait for RoomTypeService {
    async fn get_next_code(&self) -> Result<String> {
        let last = self.repository.last_generated_code().await?;
        next_room_type_code(last.as_deref())
    }

    async fn get_room_types(&self) -> Result<Vec<RoomType>> {
        self.repository.load_room_types().await
    }

    async fn create_room_type(&self, new_room_type: NewRoomType) -> Result<RoomType> {
        new_room_type.validate()?;
        let code = match new_room_type
            .room_type_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(code) => code.to_string(),
            None => self.get_next_code().await?,
        };
        debug!("Creating room type {}", code);
        self.repository
            .insert_room_type(code.clone(), new_room_type)
            .await
            .map_err(|e| match e {
                Error::Database(DatabaseError::UniqueViolation(_)) => {
                    Error::ConstraintViolation(format!("Room type code '{}' already exists.", code))
                }
                other => other,
            })
    }

    async fn update_room_type(&self, room_type_id: i64, update: RoomTypeUpdate) -> Result<bool> {
        update.validate()?;
        let updated = self
            .repository
            .update_room_type(room_type_id, update)
            .await?;
        Ok(updated > 0)
    }

    async fn delete_room_type(&self, room_type_code: &str) -> Result<bool> {
        match self.repository.delete_room_type(room_type_code).await {
            Ok(deleted) => Ok(deleted > 0),
            Err(Error::Database(DatabaseError::ForeignKeyViolation(detail))) => {
                warn!("Room type {} is still referenced: {}", room_type_code, detail);
                Err(Error::ConstraintViolation(
                    REFERENCED_ROOM_TYPE_MESSAGE.to_string(),
                ))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockRoomTypeRepository {
        room_types: Mutex<Vec<RoomType>>,
        referenced: Vec<String>,
    }

    #[async_trait]
    impl RoomTypeRepositoryTrait for MockRoomTypeRepository {
        async fn load_room_types(&self) -> Result<Vec<RoomType>> {
            Ok(self.room_types.lock().unwrap().clone())
        }

        async fn last_generated_code(&self) -> Result<Option<String>> {
            Ok(self
                .room_types
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.room_type_code.clone())
                .max())
        }

        async fn insert_room_type(&self, code: String, new_room_type: NewRoomType) -> Result<RoomType> {
            let mut room_types = self.room_types.lock().unwrap();
            if room_types.iter().any(|r| r.room_type_code == code) {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: room_types.room_type_code".into(),
                )));
            }
            let room_type = RoomType {
                room_type_id: room_types.len() as i64 + 1,
                room_type_code: code,
                description: new_room_type.description,
                is_active: new_room_type.is_active,
            };
            room_types.push(room_type.clone());
            Ok(room_type)
        }

        async fn update_room_type(&self, room_type_id: i64, update: RoomTypeUpdate) -> Result<usize> {
            let mut room_types = self.room_types.lock().unwrap();
            Ok(room_types
                .iter_mut()
                .filter(|r| r.room_type_id == room_type_id)
                .map(|r| {
                    r.description = update.description.clone();
                    r.is_active = update.is_active;
                })
                .count())
        }

        async fn delete_room_type(&self, room_type_code: &str) -> Result<usize> {
            if self.referenced.iter().any(|c| c == room_type_code) {
                return Err(Error::Database(DatabaseError::ForeignKeyViolation(
                    "FOREIGN KEY constraint failed".into(),
                )));
            }
            let mut room_types = self.room_types.lock().unwrap();
            let before = room_types.len();
            room_types.retain(|r| r.room_type_code != room_type_code);
            Ok(before - room_types.len())
        }
    }

    fn new_type(code: Option<&str>, description: &str) -> NewRoomType {
        NewRoomType {
            room_type_code: code.map(str::to_string),
            description: description.to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_generates_sequential_codes() {
        let service = RoomTypeService::new(Arc::new(MockRoomTypeRepository::default()));
        let first = service.create_room_type(new_type(None, "Deluxe")).await.unwrap();
        let second = service.create_room_type(new_type(Some(" "), "Suite")).await.unwrap();
        assert_eq!(first.room_type_code, "RT001");
        assert_eq!(second.room_type_code, "RT002");
        assert_eq!(service.get_next_code().await.unwrap(), "RT003");
    }

    #[tokio::test]
    async fn duplicate_code_is_a_constraint_violation() {
        let service = RoomTypeService::new(Arc::new(MockRoomTypeRepository::default()));
        service
            .create_room_type(new_type(Some("RT010"), "Family"))
            .await
            .unwrap();
        let err = service
            .create_room_type(new_type(Some("RT010"), "Family again"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let service = RoomTypeService::new(Arc::new(MockRoomTypeRepository::default()));
        let created = service.create_room_type(new_type(None, "Deluxe")).await.unwrap();
        let update = RoomTypeUpdate {
            description: "Deluxe Sea View".into(),
            is_active: false,
        };
        assert!(service
            .update_room_type(created.room_type_id, update.clone())
            .await
            .unwrap());
        assert!(!service.update_room_type(99, update).await.unwrap());
        assert!(service.delete_room_type("RT001").await.unwrap());
        assert!(!service.delete_room_type("RT001").await.unwrap());
    }

    #[tokio::test]
    async fn referenced_room_type_cannot_be_deleted() {
        let repo = MockRoomTypeRepository {
            referenced: vec!["RT001".into()],
            ..MockRoomTypeRepository::default()
        };
        let service = RoomTypeService::new(Arc::new(repo));
        let err = service.delete_room_type("RT001").await.unwrap_err();
        match err {
            Error::ConstraintViolation(message) => assert_eq!(
                message,
                "Cannot delete roomtype because it is referenced in other records."
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
