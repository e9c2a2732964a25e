use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rand::Rng;

use storeseed_core::{Report, Review};

use super::RecordFaker;
use crate::pool::Pool;

pub fn review_faker(clients: Pool<String>, products: Pool<i32>) -> RecordFaker<Review> {
    RecordFaker::new()
        .rule("comment", |rng, review: &mut Review| {
            review.comment = Sentence(4..12).fake_with_rng(rng);
        })
        .rule("rating", |rng, review| review.rating = rng.random_range(1..=5))
        .rule("product_id", move |rng, review| {
            review.product_id = *products.pick(rng);
        })
        .rule("client_id", move |rng, review| {
            review.client_id = clients.pick(rng).clone();
        })
}

/// Reports are titled after an existing product.
pub fn report_faker(clients: Pool<String>, product_names: Pool<String>) -> RecordFaker<Report> {
    RecordFaker::new()
        .rule("title", move |rng, report: &mut Report| {
            report.title = product_names.pick(rng).clone();
        })
        .rule("description", |rng, report| {
            report.description = Sentence(6..16).fake_with_rng(rng);
        })
        .rule("answered", |rng, report| report.answered = rng.random_bool(0.5))
        .rule("client_id", move |rng, report| {
            report.client_id = clients.pick(rng).clone();
        })
}
