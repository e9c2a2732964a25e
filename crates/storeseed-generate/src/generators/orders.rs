use chrono::{DateTime, Duration, Utc};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, SecondaryAddress, StreetName, ZipCode};
use rand::Rng;
use rust_decimal::Decimal;

use storeseed_core::{Order, OrderStatus};

use super::RecordFaker;
use crate::pool::Pool;

/// Orders are dated within this many seconds before the reference time.
const ORDER_WINDOW_SECS: i64 = 5 * 365 * 24 * 60 * 60;

/// Orders placed by existing clients, dated in the five years before
/// `reference_time`.
pub fn order_faker(clients: Pool<String>, reference_time: DateTime<Utc>) -> RecordFaker<Order> {
    RecordFaker::new()
        .rule("status", |rng, order: &mut Order| {
            order.status = OrderStatus::ALL[rng.random_range(0..OrderStatus::ALL.len())];
        })
        .rule("value", |rng, order| {
            order.value = Decimal::new(rng.random_range(10_000..=10_000_000), 2);
        })
        .rule("date", move |rng, order| {
            let offset = rng.random_range(0..=ORDER_WINDOW_SECS);
            order.date = reference_time - Duration::seconds(offset);
        })
        .rule("order_confirmation", |rng, order| {
            order.order_confirmation = rng.random_bool(0.5);
        })
        .rule("completion_confirmation", |rng, order| {
            order.completion_confirmation = rng.random_bool(0.5);
        })
        .rule("client_id", move |rng, order| {
            order.client_id = clients.pick(rng).clone();
        })
        .rule("shipping_address", |rng, order| {
            let shipping = &mut order.shipping_address;
            shipping.locality = CityName().fake_with_rng(rng);
            shipping.street = StreetName().fake_with_rng(rng);
            shipping.building_number = BuildingNumber().fake_with_rng(rng);
            shipping.apartment_number = SecondaryAddress().fake_with_rng(rng);
            shipping.postal_code = ZipCode().fake_with_rng(rng);
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use storeseed_core::Table;

    use super::*;

    #[test]
    fn orders_are_dated_in_the_past_window() {
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clients = Pool::new(Table::Clients, vec!["a".to_string(), "b".to_string()])
            .expect("pool");
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        for order in order_faker(clients, reference).generate_many(100, &mut rng) {
            assert!(order.date <= reference);
            assert!(order.date >= reference - Duration::seconds(ORDER_WINDOW_SECS));
            assert!(order.value >= Decimal::new(100, 0));
            assert!(order.value <= Decimal::new(100_000, 0));
            assert!(order.client_id == "a" || order.client_id == "b");
            assert!(!order.shipping_address.locality.is_empty());
        }
    }

    #[test]
    fn every_status_is_reachable() {
        let clients = Pool::new(Table::Clients, vec!["a".to_string()]).expect("pool");
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let orders = order_faker(clients, Utc::now()).generate_many(200, &mut rng);
        for status in OrderStatus::ALL {
            assert!(orders.iter().any(|order| order.status == status));
        }
    }
}
