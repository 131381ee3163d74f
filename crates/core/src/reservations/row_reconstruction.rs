//! Folds fan-out join rows back into reservation aggregates.
//!
//! A joined row carries one header plus at most one room, service and payment
//! line. Headers are taken from the first row seen for a reservation number;
//! child lines are appended per the [`ReconstructionPolicy`]. Null columns
//! coerce to zero, the minimum sentinel date or `None`. A malformed row never
//! fails the fold.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::reservations_model::{Customer, PaymentLine, ReservationAggregate, RoomLine, ServiceLine};
use crate::utils::time_utils::min_date_time;

/// One row of the header × room × service × payment join.
///
/// Every column is optional: the outer joins leave child columns null when a
/// reservation has no line of that kind, and customer columns are only
/// selected by the status-filtered read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedReservationRow {
    // Header
    pub reservation_no: Option<String>,
    pub reservation_date: Option<NaiveDateTime>,
    pub reservation_type: Option<i32>,
    pub customer_code: Option<String>,
    pub status_id: Option<i32>,
    pub mobile: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub travel_agent_code: Option<String>,
    pub checkin_date_time: Option<NaiveDateTime>,
    pub checkout_date_time: Option<NaiveDateTime>,
    pub no_of_vehicles: Option<i32>,
    pub no_of_adults: Option<i32>,
    pub no_of_kids: Option<i32>,
    pub event_type: Option<String>,
    pub setup_style: Option<String>,
    pub sub_total: Option<Decimal>,
    pub discount_per: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub gross_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub due_amount: Option<Decimal>,
    pub remark: Option<String>,
    pub refund_amount: Option<Decimal>,
    pub refund_note: Option<String>,
    pub reference_reservation_no: Option<String>,
    pub booking_resource_id: Option<i32>,
    pub booking_reference: Option<String>,
    pub reservation_status: Option<String>,
    pub invoice_no: Option<String>,
    pub invoice_date: Option<NaiveDateTime>,
    pub cr_user: Option<String>,

    // Customer
    pub customer_type_code: Option<String>,
    pub customer_title: Option<String>,
    pub customer_name: Option<String>,
    pub nic_passport_no: Option<String>,
    pub nationality_code: Option<String>,
    pub country_code: Option<String>,
    pub address: Option<String>,
    pub credit_limit: Option<Decimal>,

    // Room line
    pub room_details_id: Option<i64>,
    pub room_code: Option<String>,
    pub package_code: Option<String>,
    pub no_of_days: Option<i32>,
    pub room_price: Option<Decimal>,
    pub room_amount: Option<Decimal>,
    pub room_modified_date: Option<NaiveDateTime>,
    pub checkin_date: Option<NaiveDateTime>,
    pub checkout_date: Option<NaiveDateTime>,

    // Service line
    pub service_type_code: Option<String>,
    pub service_date: Option<NaiveDateTime>,
    pub service_quantity: Option<i32>,
    pub service_amount: Option<Decimal>,
    pub service_total_amount: Option<Decimal>,
    pub service_remark: Option<String>,

    // Payment line
    pub payment_id: Option<i32>,
    pub pay_amount: Option<Decimal>,
    pub ref_no: Option<String>,
    pub ref_date: Option<NaiveDateTime>,
    pub receipt_no: Option<String>,
}

/// How a read path groups rows and decides which child lines exist.
///
/// The two reads have always used different presence rules; they are kept
/// apart rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionPolicy {
    /// Unfiltered read.
    /// - Reservation numbers group case-insensitively.
    /// - A room line needs both room and package code.
    /// - A service line needs a service code.
    /// - A payment needs a payment id or receipt number.
    /// - Lines are not deduplicated.
    /// - Output is sorted by date desc, then number asc.
    AllRecords,
    /// Status-filtered read.
    /// - Reservation numbers group case-sensitively.
    /// - Room and service lines need a non-empty code and are deduplicated by it.
    /// - A payment needs a strictly positive amount.
    /// - A customer snapshot is attached.
    /// - Output keeps first-seen order.
    StatusFiltered,
}

impl ReconstructionPolicy {
    fn group_key(self, reservation_no: &str) -> String {
        match self {
            Self::AllRecords => reservation_no.to_ascii_lowercase(),
            Self::StatusFiltered => reservation_no.to_string(),
        }
    }

    fn room_present(self, row: &JoinedReservationRow) -> bool {
        match self {
            Self::AllRecords => row.room_code.is_some() && row.package_code.is_some(),
            Self::StatusFiltered => row.room_code.as_deref().is_some_and(|c| !c.is_empty()),
        }
    }

    fn service_present(self, row: &JoinedReservationRow) -> bool {
        match self {
            Self::AllRecords => row.service_type_code.is_some(),
            Self::StatusFiltered => row
                .service_type_code
                .as_deref()
                .is_some_and(|c| !c.is_empty()),
        }
    }

    fn payment_present(self, row: &JoinedReservationRow) -> bool {
        match self {
            Self::AllRecords => row.payment_id.is_some() || row.receipt_no.is_some(),
            Self::StatusFiltered => row.pay_amount.is_some_and(|a| a > Decimal::ZERO),
        }
    }

    fn deduplicates_lines(self) -> bool {
        matches!(self, Self::StatusFiltered)
    }

    fn attaches_customer(self) -> bool {
        matches!(self, Self::StatusFiltered)
    }
}

/// Per-aggregate dedup state for the status-filtered read.
#[derive(Default)]
struct SeenLines {
    rooms: HashSet<String>,
    services: HashSet<String>,
}

/// Streaming fold from joined rows to aggregates.
pub struct ReservationAssembler {
    policy: ReconstructionPolicy,
    index: HashMap<String, usize>,
    aggregates: Vec<ReservationAggregate>,
    seen: Vec<SeenLines>,
}

impl ReservationAssembler {
    pub fn new(policy: ReconstructionPolicy) -> Self {
        Self {
            policy,
            index: HashMap::new(),
            aggregates: Vec::new(),
            seen: Vec::new(),
        }
    }

    pub fn push(&mut self, row: JoinedReservationRow) {
        // A null reservation number groups under the empty key.
        let reservation_no = row.reservation_no.clone().unwrap_or_default();
        let key = self.policy.group_key(&reservation_no);

        let slot = match self.index.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = self.aggregates.len();
                self.aggregates
                    .push(header_from_row(&reservation_no, &row, self.policy));
                self.seen.push(SeenLines::default());
                self.index.insert(key, slot);
                slot
            }
        };

        let policy = self.policy;
        let aggregate = &mut self.aggregates[slot];
        let seen = &mut self.seen[slot];

        if policy.room_present(&row) {
            let fresh = !policy.deduplicates_lines()
                || row
                    .room_code
                    .as_ref()
                    .is_some_and(|code| seen.rooms.insert(code.clone()));
            if fresh {
                aggregate
                    .room_details
                    .push(room_line_from_row(&aggregate.reservation_no, &row, policy));
            }
        }

        if policy.service_present(&row) {
            let fresh = !policy.deduplicates_lines()
                || row
                    .service_type_code
                    .as_ref()
                    .is_some_and(|code| seen.services.insert(code.clone()));
            if fresh {
                aggregate.service_details.push(service_line_from_row(&row));
            }
        }

        if policy.payment_present(&row) {
            aggregate.room_pay_details.push(payment_line_from_row(&row));
        }
    }

    pub fn finish(self) -> Vec<ReservationAggregate> {
        let mut aggregates = self.aggregates;
        if self.policy == ReconstructionPolicy::AllRecords {
            aggregates.sort_by(|a, b| {
                b.reservation_date
                    .cmp(&a.reservation_date)
                    .then_with(|| a.reservation_no.cmp(&b.reservation_no))
            });
        }
        aggregates
    }
}

/// Folds `rows` into aggregates under `policy`.
pub fn reconstruct<I>(rows: I, policy: ReconstructionPolicy) -> Vec<ReservationAggregate>
where
    I: IntoIterator<Item = JoinedReservationRow>,
{
    let mut assembler = ReservationAssembler::new(policy);
    for row in rows {
        assembler.push(row);
    }
    assembler.finish()
}

fn header_from_row(
    reservation_no: &str,
    row: &JoinedReservationRow,
    policy: ReconstructionPolicy,
) -> ReservationAggregate {
    let customer = policy.attaches_customer().then(|| customer_from_row(row));
    ReservationAggregate {
        reservation_no: reservation_no.to_string(),
        reservation_date: row.reservation_date.unwrap_or_else(min_date_time),
        reservation_type: row.reservation_type.unwrap_or_default(),
        customer_code: row.customer_code.clone().unwrap_or_default(),
        status_id: row.status_id.unwrap_or_default(),
        mobile: row.mobile.clone(),
        telephone: row.telephone.clone(),
        email: row.email.clone(),
        travel_agent_code: row.travel_agent_code.clone(),
        checkin_date_time: row.checkin_date_time.unwrap_or_else(min_date_time),
        checkout_date_time: row.checkout_date_time.unwrap_or_else(min_date_time),
        no_of_vehicles: row.no_of_vehicles.unwrap_or_default(),
        no_of_adults: row.no_of_adults.unwrap_or_default(),
        no_of_kids: row.no_of_kids.unwrap_or_default(),
        event_type: row.event_type.clone(),
        setup_style: row.setup_style.clone(),
        sub_total: row.sub_total.unwrap_or_default(),
        discount_per: row.discount_per.unwrap_or_default(),
        discount: row.discount.unwrap_or_default(),
        gross_amount: row.gross_amount.unwrap_or_default(),
        paid_amount: row.paid_amount.unwrap_or_default(),
        due_amount: row.due_amount.unwrap_or_default(),
        reservation_note: row.remark.clone(),
        refund_amount: row.refund_amount.unwrap_or_default(),
        refund_note: row.refund_note.clone(),
        reference_no: row.reference_reservation_no.clone(),
        booking_resource_id: row.booking_resource_id.unwrap_or_default(),
        booking_reference_no: row.booking_reference.clone(),
        reservation_status: row.reservation_status.clone(),
        user: row.cr_user.clone(),
        invoice_no: row.invoice_no.clone(),
        invoice_date: row.invoice_date,
        customer,
        room_details: Vec::new(),
        service_details: Vec::new(),
        room_pay_details: Vec::new(),
    }
}

fn customer_from_row(row: &JoinedReservationRow) -> Customer {
    Customer {
        customer_type_code: row.customer_type_code.clone().unwrap_or_default(),
        customer_code: row.customer_code.clone().unwrap_or_default(),
        title: row.customer_title.clone().unwrap_or_default(),
        name: row.customer_name.clone().unwrap_or_default(),
        nic_passport_no: row.nic_passport_no.clone().unwrap_or_default(),
        nationality_code: row.nationality_code.clone().unwrap_or_default(),
        country_code: row.country_code.clone().unwrap_or_default(),
        address: row.address.clone().unwrap_or_default(),
        credit_limit: row.credit_limit.unwrap_or_default(),
        mobile: row.mobile.clone().unwrap_or_default(),
        telephone: row.telephone.clone().unwrap_or_default(),
        email: row.email.clone().unwrap_or_default(),
        travel_agent_code: row.travel_agent_code.clone().unwrap_or_default(),
        whatsapp: String::new(),
        remark: String::new(),
        is_active: true,
        is_new: false,
    }
}

fn room_line_from_row(
    reservation_no: &str,
    row: &JoinedReservationRow,
    policy: ReconstructionPolicy,
) -> RoomLine {
    // The status-filtered read does not select line ids or modification stamps.
    let (id, owner, modified) = match policy {
        ReconstructionPolicy::AllRecords => (
            row.room_details_id.unwrap_or_default(),
            reservation_no.to_string(),
            row.room_modified_date.unwrap_or_else(min_date_time),
        ),
        ReconstructionPolicy::StatusFiltered => (0, String::new(), min_date_time()),
    };
    RoomLine {
        reservation_room_details_id: id,
        reservation_no: owner,
        room_code: row.room_code.clone(),
        package_code: row.package_code.clone(),
        no_of_days: row.no_of_days.unwrap_or_default(),
        price: row.room_price.unwrap_or_default(),
        amount: row.room_amount.unwrap_or_default(),
        modified_date: modified,
        checkin_date: row.checkin_date.unwrap_or_else(min_date_time),
        checkout_date: row.checkout_date.unwrap_or_else(min_date_time),
    }
}

fn service_line_from_row(row: &JoinedReservationRow) -> ServiceLine {
    ServiceLine {
        service_type_code: row.service_type_code.clone(),
        service_date: row.service_date.unwrap_or_else(min_date_time),
        service_quantity: row.service_quantity.unwrap_or_default(),
        service_amount: row.service_amount.unwrap_or_default(),
        service_total_amount: row.service_total_amount.unwrap_or_default(),
        service_remark: row.service_remark.clone(),
    }
}

fn payment_line_from_row(row: &JoinedReservationRow) -> PaymentLine {
    PaymentLine {
        payment_id: row.payment_id.unwrap_or_default(),
        amount: row.pay_amount.unwrap_or_default(),
        ref_no: row.ref_no.clone(),
        ref_date: row.ref_date,
        receipt_no: row.receipt_no.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn header(no: &str, date: NaiveDateTime) -> JoinedReservationRow {
        JoinedReservationRow {
            reservation_no: Some(no.to_string()),
            reservation_date: Some(date),
            customer_code: Some("C001".into()),
            status_id: Some(1),
            ..JoinedReservationRow::default()
        }
    }

    fn with_room(mut row: JoinedReservationRow, code: &str, package: Option<&str>) -> JoinedReservationRow {
        row.room_code = Some(code.to_string());
        row.package_code = package.map(str::to_string);
        row.no_of_days = Some(2);
        row.room_price = Some(dec!(100.00));
        row.room_amount = Some(dec!(200.00));
        row
    }

    fn with_service(mut row: JoinedReservationRow, code: &str) -> JoinedReservationRow {
        row.service_type_code = Some(code.to_string());
        row.service_quantity = Some(1);
        row
    }

    #[test]
    fn status_filtered_dedups_room_lines_by_code() {
        let rows = vec![
            with_service(with_room(header("RES1", day(1)), "R1", Some("BB")), "S1"),
            with_service(with_room(header("RES1", day(1)), "R1", Some("BB")), "S2"),
        ];
        let result = reconstruct(rows, ReconstructionPolicy::StatusFiltered);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].room_details.len(), 1);
        assert_eq!(result[0].service_details.len(), 2);
    }

    #[test]
    fn all_records_appends_every_present_line() {
        let rows = vec![
            with_service(with_room(header("RES1", day(1)), "R1", Some("BB")), "S1"),
            with_service(with_room(header("RES1", day(1)), "R1", Some("BB")), "S2"),
        ];
        let result = reconstruct(rows, ReconstructionPolicy::AllRecords);
        assert_eq!(result[0].room_details.len(), 2);
        assert_eq!(result[0].room_details[0].reservation_no, "RES1");
    }

    #[test]
    fn null_room_pair_creates_no_room_line() {
        let rows = vec![
            header("RES1", day(1)),
            with_room(header("RES1", day(1)), "R1", None),
        ];
        let all = reconstruct(rows.clone(), ReconstructionPolicy::AllRecords);
        assert!(all[0].room_details.is_empty());
        assert!(all[0].service_details.is_empty());
        assert!(all[0].room_pay_details.is_empty());

        // The status path only requires the room code.
        let filtered = reconstruct(rows, ReconstructionPolicy::StatusFiltered);
        assert_eq!(filtered[0].room_details.len(), 1);
        assert_eq!(filtered[0].room_details[0].package_code, None);
    }

    #[test]
    fn empty_codes_are_absent_only_in_status_path() {
        let mut row = with_room(header("RES1", day(1)), "", Some("BB"));
        row.service_type_code = Some(String::new());
        let all = reconstruct(vec![row.clone()], ReconstructionPolicy::AllRecords);
        assert_eq!(all[0].room_details.len(), 1);
        assert_eq!(all[0].service_details.len(), 1);

        let filtered = reconstruct(vec![row], ReconstructionPolicy::StatusFiltered);
        assert!(filtered[0].room_details.is_empty());
        assert!(filtered[0].service_details.is_empty());
    }

    #[test]
    fn payment_presence_rules_differ_per_path() {
        let mut id_only = header("RES1", day(1));
        id_only.payment_id = Some(7);
        let mut receipt_zero_amount = header("RES1", day(1));
        receipt_zero_amount.receipt_no = Some("RCP1".into());
        receipt_zero_amount.pay_amount = Some(Decimal::ZERO);
        let mut amount_only = header("RES1", day(1));
        amount_only.pay_amount = Some(dec!(50.00));

        let rows = vec![id_only, receipt_zero_amount, amount_only];

        let all = reconstruct(rows.clone(), ReconstructionPolicy::AllRecords);
        assert_eq!(all[0].room_pay_details.len(), 2);
        assert_eq!(all[0].room_pay_details[0].payment_id, 7);
        assert_eq!(all[0].room_pay_details[0].amount, Decimal::ZERO);

        let filtered = reconstruct(rows, ReconstructionPolicy::StatusFiltered);
        assert_eq!(filtered[0].room_pay_details.len(), 1);
        assert_eq!(filtered[0].room_pay_details[0].amount, dec!(50.00));
        assert_eq!(filtered[0].room_pay_details[0].payment_id, 0);
    }

    #[test]
    fn all_records_order_is_independent_of_row_order() {
        let base = vec![
            header("RES2", day(3)),
            header("RES1", day(3)),
            header("RES3", day(5)),
            header("RES0", day(1)),
        ];
        let expected = vec!["RES3", "RES1", "RES2", "RES0"];

        // Every rotation and its reverse.
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            for rows in [rotated.clone(), rotated.into_iter().rev().collect()] {
                let numbers: Vec<_> = reconstruct(rows, ReconstructionPolicy::AllRecords)
                    .into_iter()
                    .map(|r| r.reservation_no)
                    .collect();
                assert_eq!(numbers, expected);
            }
        }
    }

    #[test]
    fn status_path_keeps_first_seen_order() {
        let rows = vec![header("RES1", day(1)), header("RES9", day(9))];
        let numbers: Vec<_> = reconstruct(rows, ReconstructionPolicy::StatusFiltered)
            .into_iter()
            .map(|r| r.reservation_no)
            .collect();
        assert_eq!(numbers, vec!["RES1", "RES9"]);
    }

    #[test]
    fn all_records_groups_case_insensitively() {
        let rows = vec![
            with_room(header("res1", day(1)), "R1", Some("BB")),
            with_room(header("RES1", day(1)), "R2", Some("BB")),
        ];
        let all = reconstruct(rows.clone(), ReconstructionPolicy::AllRecords);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].reservation_no, "res1");
        assert_eq!(all[0].room_details.len(), 2);

        let filtered = reconstruct(rows, ReconstructionPolicy::StatusFiltered);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn all_records_folds_ascii_case_only() {
        let rows = vec![
            with_room(header("RÉS1", day(1)), "R1", Some("BB")),
            with_room(header("rés1", day(1)), "R2", Some("BB")),
            with_room(header("rÉS1", day(1)), "R3", Some("BB")),
        ];
        let all = reconstruct(rows, ReconstructionPolicy::AllRecords);
        assert_eq!(all.len(), 2);
        let grouped = all
            .iter()
            .find(|r| r.reservation_no == "RÉS1")
            .expect("upper-case group");
        assert_eq!(grouped.room_details.len(), 2);
    }

    #[test]
    fn nulls_coerce_to_defaults() {
        let row = JoinedReservationRow {
            reservation_no: Some("RES1".into()),
            room_code: Some("R1".into()),
            package_code: Some("RO".into()),
            ..JoinedReservationRow::default()
        };
        let result = reconstruct(vec![row], ReconstructionPolicy::AllRecords);
        let reservation = &result[0];
        assert_eq!(reservation.reservation_date, min_date_time());
        assert_eq!(reservation.gross_amount, Decimal::ZERO);
        assert_eq!(reservation.customer_code, "");
        assert_eq!(reservation.customer, None);
        let room = &reservation.room_details[0];
        assert_eq!(room.no_of_days, 0);
        assert_eq!(room.price, Decimal::ZERO);
        assert_eq!(room.checkin_date, min_date_time());
    }

    #[test]
    fn null_reservation_number_groups_under_empty_key() {
        let mut orphan_a = JoinedReservationRow::default();
        orphan_a.pay_amount = Some(dec!(10));
        let mut orphan_b = JoinedReservationRow::default();
        orphan_b.pay_amount = Some(dec!(20));
        let result = reconstruct(
            vec![orphan_a, orphan_b, header("RES1", day(1))],
            ReconstructionPolicy::StatusFiltered,
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].reservation_no, "");
        assert_eq!(result[0].room_pay_details.len(), 2);
    }

    #[test]
    fn status_path_attaches_customer_snapshot() {
        let mut row = header("RES1", day(1));
        row.customer_name = Some("Nimal Perera".into());
        row.mobile = Some("0771234567".into());
        row.credit_limit = None;
        let result = reconstruct(vec![row], ReconstructionPolicy::StatusFiltered);
        let customer = result[0].customer.as_ref().unwrap();
        assert_eq!(customer.customer_code, "C001");
        assert_eq!(customer.name, "Nimal Perera");
        assert_eq!(customer.mobile, "0771234567");
        assert_eq!(customer.title, "");
        assert_eq!(customer.credit_limit, Decimal::ZERO);
        assert!(customer.is_active);
        assert!(!customer.is_new);
    }
}
