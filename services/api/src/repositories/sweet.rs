//! Sweet repository for database operations
//!
//! Purchase and restock are single conditional UPDATE statements so the
//! quantity >= 0 invariant holds under concurrent requests; no
//! read-then-write sequence ever decides a stock mutation.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{NewSweet, Sweet, SweetPatch, SweetSearch};

const SWEET_COLUMNS: &str = "id, name, category, price, quantity, created_at";

fn sweet_from_row(row: &PgRow) -> Sweet {
    Sweet {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        price: row.get("price"),
        quantity: row.get("quantity"),
        created_at: row.get("created_at"),
    }
}

/// Build an ILIKE substring pattern from a user-supplied term
///
/// LIKE metacharacters in the term are escaped so the filter stays a
/// plain substring match.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Sweet repository
#[derive(Clone)]
pub struct SweetRepository {
    pool: PgPool,
}

impl SweetRepository {
    /// Create a new sweet repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new sweet and return it with its server-assigned id and
    /// timestamp
    pub async fn create(&self, new_sweet: &NewSweet) -> Result<Sweet> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO sweets (name, category, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING {SWEET_COLUMNS}
            "#
        ))
        .bind(new_sweet.name.trim())
        .bind(new_sweet.category.trim())
        .bind(new_sweet.price)
        .bind(new_sweet.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(sweet_from_row(&row))
    }

    /// Get all sweets, newest first
    pub async fn list(&self) -> Result<Vec<Sweet>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SWEET_COLUMNS}
            FROM sweets
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(sweet_from_row).collect())
    }

    /// Search sweets by name, category, and inclusive price range
    ///
    /// Every absent filter collapses to a no-op predicate, so the filters
    /// compose with AND and an empty query behaves like `list`.
    pub async fn search(&self, query: &SweetSearch) -> Result<Vec<Sweet>> {
        let name_pattern = query.name.as_deref().map(like_pattern);
        let category_pattern = query.category.as_deref().map(like_pattern);

        let rows = sqlx::query(&format!(
            r#"
            SELECT {SWEET_COLUMNS}
            FROM sweets
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::text IS NULL OR category ILIKE $2)
              AND ($3::float8 IS NULL OR price >= $3)
              AND ($4::float8 IS NULL OR price <= $4)
            ORDER BY created_at DESC
            "#
        ))
        .bind(name_pattern)
        .bind(category_pattern)
        .bind(query.min_price)
        .bind(query.max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(sweet_from_row).collect())
    }

    /// Find a sweet by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sweet>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {SWEET_COLUMNS}
            FROM sweets
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| sweet_from_row(&row)))
    }

    /// Apply a partial update; unsupplied fields are left untouched
    ///
    /// Returns `None` when the id is unknown.
    pub async fn update(&self, id: Uuid, patch: &SweetPatch) -> Result<Option<Sweet>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sweets
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity)
            WHERE id = $1
            RETURNING {SWEET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name.as_ref().map(|n| n.trim().to_string()))
        .bind(patch.category.as_ref().map(|c| c.trim().to_string()))
        .bind(patch.price)
        .bind(patch.quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| sweet_from_row(&row)))
    }

    /// Delete a sweet; returns false when the id is unknown
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically decrement quantity by one, refusing to go below zero
    ///
    /// Returns `None` when nothing matched: either the id is unknown or
    /// the sweet is out of stock. Callers disambiguate with `find_by_id`.
    pub async fn purchase(&self, id: Uuid) -> Result<Option<Sweet>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sweets
            SET quantity = quantity - 1
            WHERE id = $1 AND quantity > 0
            RETURNING {SWEET_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| sweet_from_row(&row)))
    }

    /// Atomically increment quantity by the given amount
    ///
    /// Returns `None` when the id is unknown.
    pub async fn restock(&self, id: Uuid, amount: i32) -> Result<Option<Sweet>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sweets
            SET quantity = quantity + $2
            WHERE id = $1
            RETURNING {SWEET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| sweet_from_row(&row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("choc"), "%choc%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"back\slash"), "%back\\\\slash%");
    }
}
