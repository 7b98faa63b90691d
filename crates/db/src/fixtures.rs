use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Baseline menu a fresh deployment starts with. Prices are integer cents.
pub const DEFAULT_MENU: &[(&str, i64)] = &[
    ("burger", 1200),
    ("fries", 350),
    ("soda", 199),
    ("pizza", 899),
    ("taco", 349),
    ("salad", 499),
    ("sandwich", 649),
    ("coffee", 299),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub inserted: usize,
    pub skipped: bool,
}

/// Seeds the menu when (and only when) the table is empty, so a fresh
/// database can price completed orders. Re-running is a no-op.
pub async fn ensure_menu_seed(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Ok(SeedResult { inserted: 0, skipped: true });
    }

    let mut tx = pool.begin().await?;
    for (name, price_cents) in DEFAULT_MENU.iter().copied() {
        sqlx::query("INSERT INTO menu_items (name, price_cents) VALUES (?1, ?2)")
            .bind(name)
            .bind(price_cents)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    Ok(SeedResult { inserted: DEFAULT_MENU.len(), skipped: false })
}
