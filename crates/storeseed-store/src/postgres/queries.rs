use sqlx::{PgConnection, Postgres, QueryBuilder};

use storeseed_core::{
    Category, Client, Order, Product, ProductOrderRelation, Record, Report, Review,
};

use crate::error::{Result, StoreError};

/// Postgres caps a statement at 65535 bind parameters.
const MAX_BIND_PARAMS: usize = 65_535;

const CLIENT_COLUMNS: &[&str] = &[
    "Id",
    "FirstName",
    "LastName",
    "Email",
    "PasswordHash",
    "UserName",
    "NormalizedEmail",
    "NormalizedUserName",
    "EmailConfirmed",
    "Address_Street",
    "Address_BuildingNumber",
    "Address_ApartmentNumber",
    "Address_PostalCode",
    "Address_Locality",
];

const CATEGORY_COLUMNS: &[&str] = &["Name"];

const PRODUCT_COLUMNS: &[&str] = &[
    "Name",
    "Price",
    "Description",
    "Quantity",
    "Image",
    "Company",
    "IsOnSale",
    "SalePrice",
    "Url",
    "CategoryId",
];

const REVIEW_COLUMNS: &[&str] = &["Comment", "Rating", "ProductId", "ClientId"];

const ORDER_COLUMNS: &[&str] = &[
    "OrderStatus",
    "OrderValue",
    "OrderDate",
    "OrderConfirmation",
    "CompletionConfirmation",
    "ClientId",
    "ShippingAddress_Locality",
    "ShippingAddress_Street",
    "ShippingAddress_BuildingNumber",
    "ShippingAddress_ApartmentNumber",
    "ShippingAddress_PostalCode",
];

const RELATION_COLUMNS: &[&str] = &["OrderId", "ProductId"];

const REPORT_COLUMNS: &[&str] = &["Title", "Description", "Answered", "ClientId"];

pub async fn insert_clients(conn: &mut PgConnection, rows: &mut [Client]) -> Result<()> {
    for part in rows.chunks(rows_per_statement(CLIENT_COLUMNS)) {
        let mut builder = insert_builder::<Client>(CLIENT_COLUMNS);
        builder.push_values(part.iter(), |mut row, client| {
            let address = &client.address;
            row.push_bind(client.id.clone())
                .push_bind(client.first_name.clone())
                .push_bind(client.last_name.clone())
                .push_bind(client.email.clone())
                .push_bind(client.password_hash.clone())
                .push_bind(client.user_name.clone())
                .push_bind(client.normalized_email.clone())
                .push_bind(client.normalized_user_name.clone())
                .push_bind(client.email_confirmed)
                .push_bind(address.street.clone())
                .push_bind(address.building_number.clone())
                .push_bind(address.apartment_number.clone())
                .push_bind(address.postal_code.clone())
                .push_bind(address.locality.clone());
        });
        builder.build().execute(&mut *conn).await?;
    }
    Ok(())
}

pub async fn insert_categories(conn: &mut PgConnection, rows: &mut [Category]) -> Result<()> {
    for part in rows.chunks_mut(rows_per_statement(CATEGORY_COLUMNS)) {
        let mut builder = insert_builder::<Category>(CATEGORY_COLUMNS);
        builder.push_values(part.iter(), |mut row, category| {
            row.push_bind(category.name.clone());
        });
        let ids = fetch_ids(conn, builder).await?;
        assign_ids(part, ids)?;
    }
    Ok(())
}

pub async fn insert_products(conn: &mut PgConnection, rows: &mut [Product]) -> Result<()> {
    for part in rows.chunks_mut(rows_per_statement(PRODUCT_COLUMNS)) {
        let mut builder = insert_builder::<Product>(PRODUCT_COLUMNS);
        builder.push_values(part.iter(), |mut row, product| {
            row.push_bind(product.name.clone())
                .push_bind(product.price)
                .push_bind(product.description.clone())
                .push_bind(product.quantity)
                .push_bind(product.image.clone())
                .push_bind(product.company.clone())
                .push_bind(product.is_on_sale)
                .push_bind(product.sale_price)
                .push_bind(product.url.clone())
                .push_bind(product.category_id);
        });
        let ids = fetch_ids(conn, builder).await?;
        assign_ids(part, ids)?;
    }
    Ok(())
}

pub async fn insert_reviews(conn: &mut PgConnection, rows: &mut [Review]) -> Result<()> {
    for part in rows.chunks_mut(rows_per_statement(REVIEW_COLUMNS)) {
        let mut builder = insert_builder::<Review>(REVIEW_COLUMNS);
        builder.push_values(part.iter(), |mut row, review| {
            row.push_bind(review.comment.clone())
                .push_bind(review.rating)
                .push_bind(review.product_id)
                .push_bind(review.client_id.clone());
        });
        let ids = fetch_ids(conn, builder).await?;
        assign_ids(part, ids)?;
    }
    Ok(())
}

pub async fn insert_orders(conn: &mut PgConnection, rows: &mut [Order]) -> Result<()> {
    for part in rows.chunks_mut(rows_per_statement(ORDER_COLUMNS)) {
        let mut builder = insert_builder::<Order>(ORDER_COLUMNS);
        builder.push_values(part.iter(), |mut row, order| {
            let shipping = &order.shipping_address;
            row.push_bind(order.status.as_str())
                .push_bind(order.value)
                .push_bind(order.date)
                .push_bind(order.order_confirmation)
                .push_bind(order.completion_confirmation)
                .push_bind(order.client_id.clone())
                .push_bind(shipping.locality.clone())
                .push_bind(shipping.street.clone())
                .push_bind(shipping.building_number.clone())
                .push_bind(shipping.apartment_number.clone())
                .push_bind(shipping.postal_code.clone());
        });
        let ids = fetch_ids(conn, builder).await?;
        assign_ids(part, ids)?;
    }
    Ok(())
}

pub async fn insert_relations(
    conn: &mut PgConnection,
    rows: &mut [ProductOrderRelation],
) -> Result<()> {
    for part in rows.chunks(rows_per_statement(RELATION_COLUMNS)) {
        let mut builder = insert_builder::<ProductOrderRelation>(RELATION_COLUMNS);
        builder.push_values(part.iter(), |mut row, relation| {
            row.push_bind(relation.order_id)
                .push_bind(relation.product_id);
        });
        builder.build().execute(&mut *conn).await?;
    }
    Ok(())
}

pub async fn insert_reports(conn: &mut PgConnection, rows: &mut [Report]) -> Result<()> {
    for part in rows.chunks_mut(rows_per_statement(REPORT_COLUMNS)) {
        let mut builder = insert_builder::<Report>(REPORT_COLUMNS);
        builder.push_values(part.iter(), |mut row, report| {
            row.push_bind(report.title.clone())
                .push_bind(report.description.clone())
                .push_bind(report.answered)
                .push_bind(report.client_id.clone());
        });
        let ids = fetch_ids(conn, builder).await?;
        assign_ids(part, ids)?;
    }
    Ok(())
}

pub async fn client_ids(conn: &mut PgConnection) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(r#"select "Id" from "Clients" order by "Id""#)
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

pub async fn category_ids(conn: &mut PgConnection) -> Result<Vec<i32>> {
    let ids = sqlx::query_scalar::<_, i32>(r#"select "Id" from "Categories" order by "Id""#)
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

pub async fn product_ids(conn: &mut PgConnection) -> Result<Vec<i32>> {
    let ids = sqlx::query_scalar::<_, i32>(r#"select "Id" from "Products" order by "Id""#)
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

pub async fn product_names(conn: &mut PgConnection) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(r#"select "Name" from "Products" order by "Id""#)
        .fetch_all(conn)
        .await?;
    Ok(names)
}

fn insert_builder<T: Record>(columns: &[&str]) -> QueryBuilder<'static, Postgres> {
    let quoted: Vec<String> = columns.iter().map(|column| format!("\"{column}\"")).collect();
    QueryBuilder::new(format!(
        "insert into \"{}\" ({}) ",
        T::TABLE.as_str(),
        quoted.join(", ")
    ))
}

async fn fetch_ids(
    conn: &mut PgConnection,
    mut builder: QueryBuilder<'static, Postgres>,
) -> Result<Vec<i32>> {
    builder.push(r#" returning "Id""#);
    let ids = builder
        .build_query_scalar::<i32>()
        .fetch_all(&mut *conn)
        .await?;
    Ok(ids)
}

fn assign_ids<T: Record>(rows: &mut [T], ids: Vec<i32>) -> Result<()> {
    if ids.len() != rows.len() {
        return Err(StoreError::Invalid(format!(
            "{} returned {} ids for {} rows",
            T::TABLE,
            ids.len(),
            rows.len()
        )));
    }
    // A single multi-row `insert ... values ... returning` yields its rows in
    // `values` order, so ids pair up with rows by position.
    for (row, id) in rows.iter_mut().zip(ids) {
        row.assign_id(id);
    }
    Ok(())
}

fn rows_per_statement(columns: &[&str]) -> usize {
    (MAX_BIND_PARAMS / columns.len()).max(1)
}
