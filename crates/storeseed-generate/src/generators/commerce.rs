use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::DomainSuffix;
use fake::faker::lorem::en::{Paragraph, Word};
use rand::Rng;
use rust_decimal::Decimal;

use storeseed_core::{Category, Product};

use super::{RecordFaker, pick};
use crate::pool::Pool;

const DEPARTMENTS: &[&str] = &[
    "Automotive",
    "Baby",
    "Beauty",
    "Books",
    "Clothing",
    "Computers",
    "Electronics",
    "Games",
    "Garden",
    "Grocery",
    "Health",
    "Home",
    "Industrial",
    "Jewelery",
    "Kids",
    "Movies",
    "Music",
    "Outdoors",
    "Shoes",
    "Sports",
    "Tools",
    "Toys",
];

const ADJECTIVES: &[&str] = &[
    "Awesome",
    "Ergonomic",
    "Fantastic",
    "Generic",
    "Gorgeous",
    "Handcrafted",
    "Handmade",
    "Incredible",
    "Intelligent",
    "Licensed",
    "Practical",
    "Refined",
    "Rustic",
    "Sleek",
    "Small",
    "Tasty",
    "Unbranded",
];

const MATERIALS: &[&str] = &[
    "Concrete", "Cotton", "Fresh", "Frozen", "Granite", "Metal", "Plastic", "Rubber", "Soft",
    "Steel", "Wooden",
];

const PRODUCTS: &[&str] = &[
    "Bacon", "Ball", "Bike", "Car", "Chair", "Cheese", "Chicken", "Chips", "Computer", "Fish",
    "Gloves", "Hat", "Keyboard", "Mouse", "Pants", "Pizza", "Salad", "Sausages", "Shirt", "Shoes",
    "Soap", "Table", "Towels", "Tuna",
];

/// Highest picsum image id.
const MAX_IMAGE_ID: u32 = 1084;

pub fn category_faker() -> RecordFaker<Category> {
    RecordFaker::new().rule("name", |rng, category: &mut Category| {
        category.name = pick(DEPARTMENTS, rng).to_string();
    })
}

/// Products priced in [10, 1000]; products on sale carry 90% of the price.
pub fn product_faker(categories: Pool<i32>) -> RecordFaker<Product> {
    RecordFaker::new()
        .rule("name", |rng, product: &mut Product| {
            product.name = format!(
                "{} {} {}",
                pick(ADJECTIVES, rng),
                pick(MATERIALS, rng),
                pick(PRODUCTS, rng)
            );
        })
        .rule("price", |rng, product| {
            product.price = Decimal::new(rng.random_range(1_000..=100_000), 2);
        })
        .rule("description", |rng, product| {
            product.description = Paragraph(1..3).fake_with_rng(rng);
        })
        .rule("quantity", |rng, product| {
            product.quantity = rng.random_range(1..=100);
        })
        .rule("image", |rng, product| {
            let image_id = rng.random_range(0..=MAX_IMAGE_ID);
            product.image = format!("https://picsum.photos/640/480/?image={image_id}");
        })
        .rule("company", |rng, product| {
            product.company = CompanyName().fake_with_rng(rng);
        })
        .rule("is_on_sale", |rng, product| {
            product.is_on_sale = rng.random_bool(0.5);
        })
        .rule("sale_price", |_, product| {
            product.sale_price = product.is_on_sale.then(|| sale_price(product.price));
        })
        .rule("url", |rng, product| {
            let word: String = Word().fake_with_rng(rng);
            let suffix: String = DomainSuffix().fake_with_rng(rng);
            product.url = format!("https://{}.{suffix}", word.to_lowercase());
        })
        .rule("category_id", move |rng, product| {
            product.category_id = *categories.pick(rng);
        })
}

fn sale_price(price: Decimal) -> Decimal {
    (price * Decimal::new(9, 1)).round_dp(2)
}
