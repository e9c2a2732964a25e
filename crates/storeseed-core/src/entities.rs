use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::table::{Record, Table};
use crate::types::{Address, OrderStatus, ShippingAddress};

/// Store customer, keyed by a client-generated UUID string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub user_name: String,
    pub normalized_email: String,
    pub normalized_user_name: String,
    pub email_confirmed: bool,
    pub address: Address,
}

impl Record for Client {
    const TABLE: Table = Table::Clients;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl Record for Category {
    const TABLE: Table = Table::Categories;

    fn assign_id(&mut self, id: i32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub quantity: i32,
    pub image: String,
    pub company: String,
    pub is_on_sale: bool,
    /// Present only while the product is on sale.
    pub sale_price: Option<Decimal>,
    pub url: String,
    pub category_id: i32,
}

impl Record for Product {
    const TABLE: Table = Table::Products;

    fn assign_id(&mut self, id: i32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub comment: String,
    pub rating: i32,
    pub product_id: i32,
    pub client_id: String,
}

impl Record for Review {
    const TABLE: Table = Table::Reviews;

    fn assign_id(&mut self, id: i32) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub status: OrderStatus,
    pub value: Decimal,
    pub date: DateTime<Utc>,
    pub order_confirmation: bool,
    pub completion_confirmation: bool,
    pub client_id: String,
    pub shipping_address: ShippingAddress,
}

impl Record for Order {
    const TABLE: Table = Table::Orders;

    fn assign_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// Junction row linking an order to one of its products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductOrderRelation {
    pub order_id: i32,
    pub product_id: i32,
}

impl Record for ProductOrderRelation {
    const TABLE: Table = Table::ProductOrderRelations;
}

/// Customer report about a product; the title is a product name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub answered: bool,
    pub client_id: String,
}

impl Record for Report {
    const TABLE: Table = Table::Reports;

    fn assign_id(&mut self, id: i32) {
        self.id = id;
    }
}
