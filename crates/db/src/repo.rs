//! Generic content repository.
//!
//! One repository serves CRUD for every entry in the resource registry.
//! SQL is generated from the [`Resource`] configuration (explicit column
//! lists, quoted identifiers for the camelCase legacy columns) and rows
//! are decoded into `serde_json` maps keyed by column name, so handlers
//! serialize them straight into responses.

use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use sanstha_core::types::DbId;

use crate::registry::{FieldKind, Resource};
use crate::values::FieldValue;

/// A decoded row, keyed by column name.
pub type JsonRow = serde_json::Map<String, Value>;

/// Generic CRUD over the content tables.
pub struct ContentRepo;

impl ContentRepo {
    /// List all rows in the resource's documented order.
    pub async fn list(pool: &PgPool, resource: &Resource) -> Result<Vec<JsonRow>, sqlx::Error> {
        let sql = select_sql(resource);
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        rows.iter().map(|row| row_to_json(resource, row)).collect()
    }

    /// Fetch one row by id.
    pub async fn fetch(
        pool: &PgPool,
        resource: &Resource,
        id: DbId,
    ) -> Result<Option<JsonRow>, sqlx::Error> {
        let sql = select_by_id_sql(resource);
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        row.map(|row| row_to_json(resource, &row)).transpose()
    }

    /// Insert a row and return it.
    ///
    /// `image` is the stored filename from the upload store, already
    /// written to disk by the caller; NULL when the resource has no image
    /// column or none was uploaded.
    pub async fn insert(
        pool: &PgPool,
        resource: &Resource,
        values: &[FieldValue],
        image: Option<&str>,
    ) -> Result<JsonRow, sqlx::Error> {
        let sql = insert_sql(resource);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = bind_value(query, value);
        }
        if resource.image.is_some() {
            query = query.bind(image.map(str::to_owned));
        }
        let row = query.fetch_one(pool).await?;
        row_to_json(resource, &row)
    }

    /// Replace a row's fields (and image reference) and return the updated
    /// row, or `None` when no row has that id.
    pub async fn update(
        pool: &PgPool,
        resource: &Resource,
        id: DbId,
        values: &[FieldValue],
        image: Option<&str>,
    ) -> Result<Option<JsonRow>, sqlx::Error> {
        let sql = update_sql(resource);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = bind_value(query, value);
        }
        if resource.image.is_some() {
            query = query.bind(image.map(str::to_owned));
        }
        let row = query.bind(id).fetch_optional(pool).await?;
        row.map(|row| row_to_json(resource, &row)).transpose()
    }

    /// Delete a row by id. Returns whether a row was affected; deleting a
    /// nonexistent id is not an error.
    pub async fn delete(pool: &PgPool, resource: &Resource, id: DbId) -> Result<bool, sqlx::Error> {
        let sql = delete_sql(resource);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// SQL generation
// ---------------------------------------------------------------------------

fn quoted(column: &str) -> String {
    format!("\"{column}\"")
}

/// Full column list for SELECT / RETURNING: id, writable fields, image
/// column, creation timestamp.
fn column_list(resource: &Resource) -> String {
    let mut columns = vec!["id".to_string()];
    columns.extend(resource.fields.iter().map(|f| quoted(f.column)));
    if let Some(image) = &resource.image {
        columns.push(quoted(image.column));
    }
    if let Some(ts) = resource.timestamp_column {
        columns.push(quoted(ts));
    }
    columns.join(", ")
}

pub fn select_sql(resource: &Resource) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(resource),
        resource.table,
        resource.order_by
    )
}

pub fn select_by_id_sql(resource: &Resource) -> String {
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        column_list(resource),
        resource.table
    )
}

pub fn insert_sql(resource: &Resource) -> String {
    let mut columns: Vec<String> = resource.fields.iter().map(|f| quoted(f.column)).collect();
    if let Some(image) = &resource.image {
        columns.push(quoted(image.column));
    }
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        resource.table,
        columns.join(", "),
        placeholders.join(", "),
        column_list(resource)
    )
}

pub fn update_sql(resource: &Resource) -> String {
    let mut columns: Vec<String> = resource.fields.iter().map(|f| quoted(f.column)).collect();
    if let Some(image) = &resource.image {
        columns.push(quoted(image.column));
    }
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        resource.table,
        assignments.join(", "),
        columns.len() + 1,
        column_list(resource)
    )
}

pub fn delete_sql(resource: &Resource) -> String {
    format!("DELETE FROM {} WHERE id = $1", resource.table)
}

// ---------------------------------------------------------------------------
// Binding and decoding
// ---------------------------------------------------------------------------

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

fn bind_value<'q>(query: PgQuery<'q>, value: &FieldValue) -> PgQuery<'q> {
    match value {
        FieldValue::Text(text) => query.bind(text.clone()),
        FieldValue::Int(int) => query.bind(*int),
        FieldValue::Date(date) => query.bind(*date),
    }
}

/// Decode a row into a JSON map using the resource's column types.
fn row_to_json(resource: &Resource, row: &PgRow) -> Result<JsonRow, sqlx::Error> {
    let mut map = JsonRow::new();

    let id: DbId = row.try_get("id")?;
    map.insert("id".into(), Value::from(id));

    for field in resource.fields {
        let value = match field.kind {
            FieldKind::Text => row
                .try_get::<Option<String>, _>(field.column)?
                .map_or(Value::Null, Value::String),
            FieldKind::Int => row
                .try_get::<Option<i64>, _>(field.column)?
                .map_or(Value::Null, Value::from),
            FieldKind::Date => row
                .try_get::<Option<chrono::NaiveDate>, _>(field.column)?
                .map_or(Value::Null, |d| Value::String(d.format("%Y-%m-%d").to_string())),
        };
        map.insert(field.column.into(), value);
    }

    if let Some(image) = &resource.image {
        let value = row
            .try_get::<Option<String>, _>(image.column)?
            .map_or(Value::Null, Value::String);
        map.insert(image.column.into(), value);
    }

    if let Some(ts) = resource.timestamp_column {
        let value = row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(ts)?
            .map_or(Value::Null, |t| Value::String(t.to_rfc3339()));
        map.insert(ts.into(), value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{EVENTS, GALLERY, HERO, INITIATIVES, MESSAGES, NEWS};

    // The generated SQL is part of the contract with the legacy schema
    // (quoted camelCase identifiers, documented list orders), so the text
    // is pinned here per resource.

    #[test]
    fn events_select_orders_by_date_desc() {
        assert_eq!(
            select_sql(&EVENTS),
            "SELECT id, \"eventName\", \"location\", \"date\", \"descriptionHi\", \
             \"descriptionEn\", \"image\" FROM events ORDER BY \"date\" DESC, id ASC"
        );
    }

    #[test]
    fn events_insert_returns_full_row() {
        assert_eq!(
            insert_sql(&EVENTS),
            "INSERT INTO events (\"eventName\", \"location\", \"date\", \"descriptionHi\", \
             \"descriptionEn\", \"image\") VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, \"eventName\", \"location\", \"date\", \"descriptionHi\", \
             \"descriptionEn\", \"image\""
        );
    }

    #[test]
    fn events_update_sets_image_and_binds_id_last() {
        assert_eq!(
            update_sql(&EVENTS),
            "UPDATE events SET \"eventName\" = $1, \"location\" = $2, \"date\" = $3, \
             \"descriptionHi\" = $4, \"descriptionEn\" = $5, \"image\" = $6 WHERE id = $7 \
             RETURNING id, \"eventName\", \"location\", \"date\", \"descriptionHi\", \
             \"descriptionEn\", \"image\""
        );
    }

    #[test]
    fn news_select_orders_by_created_at_desc() {
        assert_eq!(
            select_sql(&NEWS),
            "SELECT id, \"titleEn\", \"titleHi\", \"contentEn\", \"contentHi\", \"category\", \
             \"image\", \"created_at\" FROM news ORDER BY created_at DESC, id DESC"
        );
    }

    #[test]
    fn initiatives_select_orders_by_display_order_asc() {
        assert_eq!(
            select_sql(&INITIATIVES),
            "SELECT id, \"slug\", \"titleHi\", \"titleEn\", \"descriptionHi\", \
             \"descriptionEn\", \"display_order\", \"image\" FROM initiatives \
             ORDER BY display_order ASC, id ASC"
        );
    }

    #[test]
    fn initiatives_insert_binds_display_order_before_image() {
        assert_eq!(
            insert_sql(&INITIATIVES),
            "INSERT INTO initiatives (\"slug\", \"titleHi\", \"titleEn\", \"descriptionHi\", \
             \"descriptionEn\", \"display_order\", \"image\") \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, \"slug\", \"titleHi\", \"titleEn\", \"descriptionHi\", \
             \"descriptionEn\", \"display_order\", \"image\""
        );
    }

    #[test]
    fn hero_select_uses_legacy_table_and_columns() {
        assert_eq!(
            select_sql(&HERO),
            "SELECT id, \"description\", \"display_order\", \"imageUrl\" FROM hero_slides \
             ORDER BY display_order ASC, id ASC"
        );
    }

    #[test]
    fn gallery_insert_has_title_and_image_only() {
        assert_eq!(
            insert_sql(&GALLERY),
            "INSERT INTO gallery (\"title\", \"image\") VALUES ($1, $2) \
             RETURNING id, \"title\", \"image\", \"created_at\""
        );
    }

    #[test]
    fn messages_insert_has_no_image_column() {
        assert_eq!(
            insert_sql(&MESSAGES),
            "INSERT INTO messages (\"name\", \"email\", \"phone\", \"message\") \
             VALUES ($1, $2, $3, $4) RETURNING id, \"name\", \"email\", \"phone\", \
             \"message\", \"sentAt\""
        );
    }

    #[test]
    fn messages_select_orders_by_sent_at_desc() {
        assert_eq!(
            select_sql(&MESSAGES),
            "SELECT id, \"name\", \"email\", \"phone\", \"message\", \"sentAt\" \
             FROM messages ORDER BY \"sentAt\" DESC, id DESC"
        );
    }

    #[test]
    fn delete_is_by_id() {
        assert_eq!(delete_sql(&EVENTS), "DELETE FROM events WHERE id = $1");
        assert_eq!(delete_sql(&MESSAGES), "DELETE FROM messages WHERE id = $1");
    }

    #[test]
    fn select_by_id_uses_one_placeholder() {
        assert_eq!(
            select_by_id_sql(&GALLERY),
            "SELECT id, \"title\", \"image\", \"created_at\" FROM gallery WHERE id = $1"
        );
    }
}
