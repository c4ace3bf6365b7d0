use crate::flight::FlightRecord;
use crate::time::{HOUR, Time};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

/// Hours and minutes past midnight on day one.
pub fn at(hours: i64, minutes: i64) -> Time {
    Time(hours * HOUR + minutes * 60)
}

pub fn add_record(
    records: &mut Vec<FlightRecord>,
    flight_id: &str,
    origin_id: &str,
    destination_id: &str,
    departure_time: Time,
    arrival_time: Time,
    price: f64,
) {
    records.push(FlightRecord::new(
        flight_id,
        origin_id,
        destination_id,
        departure_time,
        arrival_time,
        price,
    ));
}

/// TAO 08:00 -> PVG 10:00 for 50, then PVG -> NGO departing at `second_departure` for 70.
pub fn shanghai_connection(second_departure: Time) -> Vec<FlightRecord> {
    let mut records = Vec::new();
    add_record(&mut records, "MU1", "TAO", "PVG", at(8, 0), at(10, 0), 50.0);
    add_record(
        &mut records,
        "MU2",
        "PVG",
        "NGO",
        second_departure,
        second_departure + 2 * HOUR,
        70.0,
    );
    records
}

pub fn arb_airport() -> impl Strategy<Value = Arc<str>> {
    prop_oneof![Just(id("AP_1")), Just(id("AP_2")), Just(id("AP_3")), Just(id("AP_4"))]
}

/// Flights on a half-hour grid across one day, with whole-number prices.
pub fn arb_record() -> impl Strategy<Value = FlightRecord> {
    (arb_airport(), arb_airport(), 0..48i64, 1..8i64, 0..200u32).prop_map(
        |(org, dst, slot, len, price)| FlightRecord {
            id: Arc::from(format!("FL_{}_{}_{}", org, dst, slot)),
            origin_id: org,
            destination_id: dst,
            departure_time: Time(slot * 1800),
            arrival_time: Time((slot + len) * 1800),
            price: price as f64,
            airline: None,
        },
    )
}
