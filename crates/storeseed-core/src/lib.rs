//! Core contracts for storeseed.
//!
//! This crate defines the e-commerce entities that get seeded and the table
//! catalogue shared by the storage backends.

pub mod entities;
pub mod table;
pub mod types;

pub use entities::{Category, Client, Order, Product, ProductOrderRelation, Report, Review};
pub use table::{Record, Table};
pub use types::{Address, OrderStatus, ShippingAddress};
