/// Status id assigned when a reservation is saved without one
pub const DEFAULT_STATUS_ID: i32 = 1;

/// Status id of a reservation that has been finalized into an invoice
pub const FINALIZED_STATUS_ID: i32 = 6;

/// Status label written when the request carries none
pub const DEFAULT_RESERVATION_STATUS: &str = "Booked";

/// Decimal places of every monetary parameter
pub const MONEY_SCALE: u32 = 2;

/// Name of the reservation save procedure, as reported in failures
pub const SAVE_RESERVATION_PROCEDURE: &str = "sp_reservation_save";

/// Prefix of generated reservation numbers
pub const RESERVATION_NO_PREFIX: &str = "RES";

/// Prefix of generated invoice numbers
pub const INVOICE_NO_PREFIX: &str = "INV";

/// Prefix of generated room type codes
pub const ROOM_TYPE_CODE_PREFIX: &str = "RT";

/// Width of the numeric part of reservation and invoice numbers
pub const DOCUMENT_NO_WIDTH: usize = 6;

/// Width of the numeric part of room type codes
pub const ROOM_TYPE_CODE_WIDTH: usize = 3;

/// Longest numeric suffix read back when generating reservation and invoice
/// numbers. Longer suffixes are client-supplied and never continued.
pub const DOCUMENT_NO_MAX_DIGITS: usize = 15;

/// Longest numeric suffix read back when generating room type codes
pub const ROOM_TYPE_CODE_MAX_DIGITS: usize = 9;
