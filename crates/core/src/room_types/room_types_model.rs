//! Room type domain models.

use serde::{Deserialize, Serialize};

use crate::constants::{ROOM_TYPE_CODE_MAX_DIGITS, ROOM_TYPE_CODE_PREFIX, ROOM_TYPE_CODE_WIDTH};
use crate::errors::{DatabaseError, Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub room_type_id: i64,
    pub room_type_code: String,
    pub description: String,
    pub is_active: bool,
}

/// Input for creating a room type. A blank code is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomType {
    #[serde(default)]
    pub room_type_code: Option<String>,
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeUpdate {
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::MissingField("description".to_string()).into());
    }
    Ok(())
}

impl NewRoomType {
    pub fn validate(&self) -> Result<()> {
        validate_description(&self.description)
    }
}

impl RoomTypeUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_description(&self.description)
    }
}

/// Next code after `last`, e.g. `RT007` -> `RT008`. Codes that do not end in
/// digits are treated as sequence 0. Fails once the sequence would outgrow
/// `ROOM_TYPE_CODE_MAX_DIGITS`.
pub fn next_room_type_code(last: Option<&str>) -> Result<String> {
    let last_sequence = last
        .and_then(|code| code.strip_prefix(ROOM_TYPE_CODE_PREFIX))
        .and_then(|digits| digits.parse::<u64>().ok())
        .unwrap_or(0);
    let max_sequence = 10u64.pow(ROOM_TYPE_CODE_MAX_DIGITS as u32) - 1;
    let next = last_sequence
        .checked_add(1)
        .filter(|n| *n <= max_sequence)
        .ok_or_else(|| {
            DatabaseError::Internal(format!(
                "Room type code sequence exhausted after {}",
                last.unwrap_or_default()
            ))
        })?;
    Ok(format!(
        "{}{:0width$}",
        ROOM_TYPE_CODE_PREFIX,
        next,
        width = ROOM_TYPE_CODE_WIDTH
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_code_increments_the_numeric_suffix() {
        assert_eq!(next_room_type_code(None).unwrap(), "RT001");
        assert_eq!(next_room_type_code(Some("RT009")).unwrap(), "RT010");
        assert_eq!(next_room_type_code(Some("RT999")).unwrap(), "RT1000");
        assert_eq!(next_room_type_code(Some("DELUXE")).unwrap(), "RT001");
    }

    #[test]
    fn next_code_fails_instead_of_overflowing() {
        assert_eq!(
            next_room_type_code(Some("RT999999998")).unwrap(),
            "RT999999999"
        );
        assert!(next_room_type_code(Some("RT999999999")).is_err());
        assert!(next_room_type_code(Some("RT4294967295")).is_err());
    }

    #[test]
    fn blank_description_is_rejected() {
        let input = NewRoomType {
            room_type_code: None,
            description: "  ".into(),
            is_active: true,
        };
        assert!(input.validate().is_err());
    }
}
