//! # Sale Repository
//!
//! Database operations for the `Ventas` table.
//!
//! ## Two Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Channels                                    │
//! │                                                                         │
//! │  try_update(&sale)  ──► Ok(())                                          │
//! │                    ──► Err(DbError::NotFound)        no row matched     │
//! │                    ──► Err(DbError::QueryFailed)     statement rejected │
//! │                    ──► Err(DbError::ConnectionFailed)                   │
//! │                                                                         │
//! │  update(&sale)      ──► true / false   (errors logged, not returned)    │
//! │                                                                         │
//! │  Same split for insert, fetch_by_id, delete_by_id and list_all.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call opens its own connection through the [`ConnectionProvider`]
//! and closes it before returning, whatever the outcome.

use chrono::NaiveDate;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::provider::ConnectionProvider;
use ventas_core::Sale;

const INSERT_SALE: &str = r#"
    INSERT INTO Ventas (fecha_venta, cliente_nombre, total_venta, estado)
    VALUES (?1, ?2, ?3, ?4)
"#;

const SELECT_SALE_BY_ID: &str = r#"
    SELECT id_venta, fecha_venta, cliente_nombre, total_venta, estado
    FROM Ventas
    WHERE id_venta = ?1
"#;

const UPDATE_SALE: &str = r#"
    UPDATE Ventas SET
        cliente_nombre = ?1,
        total_venta = ?2,
        estado = ?3
    WHERE id_venta = ?4
"#;

const UPDATE_SALE_WITH_DATE: &str = r#"
    UPDATE Ventas SET
        cliente_nombre = ?1,
        total_venta = ?2,
        estado = ?3,
        fecha_venta = ?4
    WHERE id_venta = ?5
"#;

const DELETE_SALE: &str = "DELETE FROM Ventas WHERE id_venta = ?1";

const SELECT_ALL_SALES: &str = r#"
    SELECT id_venta, fecha_venta, cliente_nombre, total_venta, estado
    FROM Ventas
    ORDER BY fecha_venta DESC, id_venta DESC
"#;

/// One row of the `Ventas` table, column for column.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id_venta: i64,
    fecha_venta: NaiveDate,
    cliente_nombre: String,
    total_venta: f64,
    estado: String,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale::with_id(
            row.id_venta,
            row.fecha_venta,
            row.cliente_nombre,
            row.total_venta,
            row.estado,
        )
    }
}

/// Repository for sale database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = provider.sales();
///
/// let mut sale = Sale::new(date, "Sofía Rodríguez", 150.50, "Pendiente");
/// repo.try_insert(&mut sale).await?;
///
/// let stored = repo.try_fetch_by_id(sale.id().unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SaleRepository {
    provider: ConnectionProvider,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(provider: ConnectionProvider) -> Self {
        SaleRepository { provider }
    }

    // =========================================================================
    // Strict channel
    // =========================================================================

    /// Inserts a new sale and writes the generated id back into it.
    ///
    /// ## Returns
    /// * `Ok(id)` - The storage-assigned id (also set on `sale`)
    /// * `Err(DbError::AlreadyPersisted)` - `sale` already has an id
    pub async fn try_insert(&self, sale: &mut Sale) -> DbResult<i64> {
        if let Some(id) = sale.id() {
            return Err(DbError::AlreadyPersisted { id });
        }

        debug!(customer = %sale.customer_name, date = %sale.date, "Inserting sale");

        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(INSERT_SALE)
            .bind(sale.date)
            .bind(sale.customer_name.as_str())
            .bind(sale.total)
            .bind(sale.status.as_str())
            .execute(&mut conn)
            .await;
        self.provider.release(conn).await;

        let result = result?;
        if result.rows_affected() == 0 {
            return Err(DbError::QueryFailed("insert affected no rows".to_string()));
        }

        let id = result.last_insert_rowid();
        sale.assign_id(id);

        Ok(id)
    }

    /// Gets a sale by ID.
    pub async fn try_fetch_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        debug!(sale_id = id, "Fetching sale");

        let mut conn = self.provider.acquire().await?;
        let row = sqlx::query_as::<_, SaleRow>(SELECT_SALE_BY_ID)
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        self.provider.release(conn).await;

        Ok(row?.map(Sale::from))
    }

    /// Updates customer name, total and status of a stored sale.
    ///
    /// The date is not touched. A sale without an id matches no row and
    /// yields `NotFound`.
    pub async fn try_update(&self, sale: &Sale) -> DbResult<()> {
        debug!(sale_id = ?sale.id(), "Updating sale");

        let query = sqlx::query(UPDATE_SALE)
            .bind(sale.customer_name.as_str())
            .bind(sale.total)
            .bind(sale.status.as_str())
            .bind(sale.id());
        self.execute_update(query, sale.id()).await
    }

    /// Like [`try_update`](Self::try_update), but also rewrites the sale date.
    ///
    /// Used by the REST PUT, where clients may correct `fechaVenta`.
    pub async fn try_update_with_date(&self, sale: &Sale) -> DbResult<()> {
        debug!(sale_id = ?sale.id(), date = %sale.date, "Updating sale with date");

        let query = sqlx::query(UPDATE_SALE_WITH_DATE)
            .bind(sale.customer_name.as_str())
            .bind(sale.total)
            .bind(sale.status.as_str())
            .bind(sale.date)
            .bind(sale.id());
        self.execute_update(query, sale.id()).await
    }

    async fn execute_update<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        id: Option<i64>,
    ) -> DbResult<()> {
        let mut conn = self.provider.acquire().await?;
        let result = query.execute(&mut conn).await;
        self.provider.release(conn).await;

        if result?.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", describe_id(id)));
        }

        Ok(())
    }

    /// Deletes a sale by ID.
    pub async fn try_delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(sale_id = id, "Deleting sale");

        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(DELETE_SALE).bind(id).execute(&mut conn).await;
        self.provider.release(conn).await;

        if result?.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id.to_string()));
        }

        Ok(())
    }

    /// Lists every sale, newest date first.
    pub async fn try_list_all(&self) -> DbResult<Vec<Sale>> {
        let mut conn = self.provider.acquire().await?;
        let rows = sqlx::query_as::<_, SaleRow>(SELECT_ALL_SALES)
            .fetch_all(&mut conn)
            .await;
        self.provider.release(conn).await;

        let sales: Vec<Sale> = rows?.into_iter().map(Sale::from).collect();
        debug!(count = sales.len(), "Listed sales");

        Ok(sales)
    }

    // =========================================================================
    // Quiet channel
    // =========================================================================

    /// Inserts a sale; `false` on any failure (logged).
    pub async fn insert(&self, sale: &mut Sale) -> bool {
        match self.try_insert(sale).await {
            Ok(id) => {
                info!(sale_id = id, "Sale inserted");
                true
            }
            Err(e) => {
                error!(operation = "insert", error = %e, "Failed to insert sale");
                false
            }
        }
    }

    /// Fetches a sale; `None` when absent or on failure (logged).
    pub async fn fetch_by_id(&self, id: i64) -> Option<Sale> {
        match self.try_fetch_by_id(id).await {
            Ok(Some(sale)) => Some(sale),
            Ok(None) => {
                debug!(sale_id = id, "Sale not found");
                None
            }
            Err(e) => {
                error!(operation = "fetch_by_id", sale_id = id, error = %e, "Failed to fetch sale");
                None
            }
        }
    }

    /// Updates a sale; `true` only if a row was changed.
    pub async fn update(&self, sale: &Sale) -> bool {
        match self.try_update(sale).await {
            Ok(()) => {
                info!(sale_id = ?sale.id(), "Sale updated");
                true
            }
            Err(e) if e.is_not_found() => {
                warn!(sale_id = ?sale.id(), "No sale found to update");
                false
            }
            Err(e) => {
                error!(operation = "update", sale_id = ?sale.id(), error = %e, "Failed to update sale");
                false
            }
        }
    }

    /// Deletes a sale; `true` only if a row was removed.
    pub async fn delete_by_id(&self, id: i64) -> bool {
        match self.try_delete_by_id(id).await {
            Ok(()) => {
                info!(sale_id = id, "Sale deleted");
                true
            }
            Err(e) if e.is_not_found() => {
                warn!(sale_id = id, "No sale found to delete");
                false
            }
            Err(e) => {
                error!(operation = "delete_by_id", sale_id = id, error = %e, "Failed to delete sale");
                false
            }
        }
    }

    /// Lists every sale; empty on failure (logged).
    pub async fn list_all(&self) -> Vec<Sale> {
        self.try_list_all().await.unwrap_or_else(|e| {
            error!(operation = "list_all", error = %e, "Failed to list sales");
            Vec::new()
        })
    }
}

fn describe_id(id: Option<i64>) -> String {
    id.map_or_else(|| "unassigned".to_string(), |id| id.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::schema;
    use tempfile::TempDir;
    use ventas_core::{MAX_CUSTOMER_NAME_LEN, MAX_STATUS_LEN};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Repository over a fresh on-disk database. Keep the TempDir alive.
    async fn test_repo() -> (TempDir, SaleRepository) {
        let dir = tempfile::tempdir().unwrap();
        let provider = ConnectionProvider::new(DbConfig::new(dir.path().join("ventas.db"))).unwrap();
        schema::ensure_schema(&provider).await.unwrap();
        (dir, provider.sales())
    }

    fn sofia() -> Sale {
        Sale::new(date(2025, 10, 15), "Sofía Rodríguez", 150.50, "Pendiente")
    }

    fn carlos() -> Sale {
        Sale::new(date(2025, 10, 16), "Carlos Martínez", 300.00, "Pagada")
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_fetch_matches() {
        let (_dir, repo) = test_repo().await;
        let mut sale = sofia();

        let id = repo.try_insert(&mut sale).await.unwrap();
        assert_eq!(sale.id(), Some(id));

        let stored = repo.try_fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, sale);
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let (_dir, repo) = test_repo().await;
        let mut a = sofia();
        let mut b = carlos();

        assert!(repo.insert(&mut a).await);
        assert!(repo.insert(&mut b).await);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_repeated_fetch_returns_same_snapshot() {
        let (_dir, repo) = test_repo().await;
        let mut sale = sofia();
        repo.try_insert(&mut sale).await.unwrap();
        let id = sale.id().unwrap();

        let first = repo.fetch_by_id(id).await;
        let second = repo.fetch_by_id(id).await;
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_missing_returns_none() {
        let (_dir, repo) = test_repo().await;
        assert_eq!(repo.try_fetch_by_id(999).await.unwrap(), None);
        assert_eq!(repo.fetch_by_id(999).await, None);
    }

    #[tokio::test]
    async fn test_insert_already_persisted_is_rejected() {
        let (_dir, repo) = test_repo().await;
        let mut sale = sofia();
        repo.try_insert(&mut sale).await.unwrap();

        let err = repo.try_insert(&mut sale).await.unwrap_err();
        assert!(matches!(err, DbError::AlreadyPersisted { .. }));
        assert!(!repo.insert(&mut sale).await);
        assert_eq!(repo.try_list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_mutable_fields_only() {
        let (_dir, repo) = test_repo().await;
        let mut sale = sofia();
        repo.try_insert(&mut sale).await.unwrap();

        sale.status = "Enviada".to_string();
        sale.total = 155.50;
        sale.date = date(2030, 1, 1);
        repo.try_update(&sale).await.unwrap();

        let stored = repo.try_fetch_by_id(sale.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.status, "Enviada");
        assert_eq!(stored.total, 155.50);
        assert_eq!(stored.date, date(2025, 10, 15));
    }

    #[tokio::test]
    async fn test_update_with_date_rewrites_date() {
        let (_dir, repo) = test_repo().await;
        let mut sale = sofia();
        repo.try_insert(&mut sale).await.unwrap();

        sale.date = date(2025, 10, 20);
        sale.status = "Enviada".to_string();
        repo.try_update_with_date(&sale).await.unwrap();

        let stored = repo.try_fetch_by_id(sale.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored, sale);
    }

    #[tokio::test]
    async fn test_update_with_date_missing_is_not_found() {
        let (_dir, repo) = test_repo().await;
        let ghost = Sale::with_id(42, date(2025, 1, 1), "Nadie", 1.0, "Pagada");

        assert!(repo.try_update_with_date(&ghost).await.unwrap_err().is_not_found());
        assert!(repo.try_list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_storage_unchanged() {
        let (_dir, repo) = test_repo().await;
        let mut stored = sofia();
        repo.try_insert(&mut stored).await.unwrap();

        let ghost = Sale::with_id(999, date(2025, 1, 1), "Nadie", 1.0, "Pagada");
        let err = repo.try_update(&ghost).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!repo.update(&ghost).await);

        assert_eq!(repo.try_list_all().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_update_unassigned_id_matches_nothing() {
        let (_dir, repo) = test_repo().await;
        let mut stored = sofia();
        repo.try_insert(&mut stored).await.unwrap();

        let draft = carlos();
        assert!(matches!(
            repo.try_update(&draft).await,
            Err(DbError::NotFound { ref id, .. }) if id == "unassigned"
        ));
        assert!(!repo.update(&draft).await);
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let (_dir, repo) = test_repo().await;
        let mut sale = carlos();
        repo.try_insert(&mut sale).await.unwrap();
        let id = sale.id().unwrap();

        assert!(repo.delete_by_id(id).await);
        assert_eq!(repo.fetch_by_id(id).await, None);

        assert!(!repo.delete_by_id(id).await);
        assert!(repo.try_delete_by_id(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_all_orders_by_date_descending() {
        let (_dir, repo) = test_repo().await;
        let mut a = sofia();
        let mut b = carlos();
        repo.try_insert(&mut a).await.unwrap();
        repo.try_insert(&mut b).await.unwrap();

        let mut oldest = Sale::new(date(2024, 1, 2), "Lucía Gómez", 20.0, "Pagada");
        repo.try_insert(&mut oldest).await.unwrap();

        let dates: Vec<NaiveDate> = repo.list_all().await.into_iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date(2025, 10, 16), date(2025, 10, 15), date(2024, 1, 2)]);

        let last = repo.try_list_all().await.unwrap().pop().unwrap();
        assert_eq!(last.id(), oldest.id());
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let (_dir, repo) = test_repo().await;
        assert!(repo.try_list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_length_limits_accept_boundary_values() {
        let (_dir, repo) = test_repo().await;
        let mut sale = Sale::new(
            date(2025, 10, 15),
            "x".repeat(MAX_CUSTOMER_NAME_LEN),
            1.0,
            "y".repeat(MAX_STATUS_LEN),
        );

        repo.try_insert(&mut sale).await.unwrap();
        let stored = repo.try_fetch_by_id(sale.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.customer_name.len(), MAX_CUSTOMER_NAME_LEN);
        assert_eq!(stored.status.len(), MAX_STATUS_LEN);
    }

    #[tokio::test]
    async fn test_status_too_long_is_query_failure() {
        let (_dir, repo) = test_repo().await;
        let mut sale = Sale::new(
            date(2025, 10, 15),
            "Sofía Rodríguez",
            1.0,
            "x".repeat(MAX_STATUS_LEN + 1),
        );

        assert!(matches!(
            repo.try_insert(&mut sale).await,
            Err(DbError::QueryFailed(_))
        ));
        assert!(!repo.insert(&mut sale).await);
        assert!(repo.try_list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_constraint_violation_is_query_failure() {
        let (_dir, repo) = test_repo().await;
        let mut sale = Sale::new(
            date(2025, 10, 15),
            "x".repeat(MAX_CUSTOMER_NAME_LEN + 1),
            1.0,
            "Pagada",
        );

        let err = repo.try_insert(&mut sale).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        assert!(!repo.insert(&mut sale).await);
        assert!(!sale.is_persisted());
    }

    #[tokio::test]
    async fn test_missing_table_is_query_failure() {
        let dir = tempfile::tempdir().unwrap();
        let provider = ConnectionProvider::new(DbConfig::new(dir.path().join("bare.db"))).unwrap();
        let repo = provider.sales();

        assert!(matches!(repo.try_list_all().await, Err(DbError::QueryFailed(_))));
        assert!(repo.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("absent.db")).create_if_missing(false);
        let repo = ConnectionProvider::new(config).unwrap().sales();

        let mut sale = sofia();
        assert!(matches!(
            repo.try_insert(&mut sale).await,
            Err(DbError::ConnectionFailed(_))
        ));

        assert!(!repo.insert(&mut sale).await);
        assert_eq!(repo.fetch_by_id(1).await, None);
        assert!(!repo.update(&Sale::with_id(1, date(2025, 1, 1), "A", 1.0, "B")).await);
        assert!(!repo.delete_by_id(1).await);
        assert!(repo.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_demo_scenario() {
        let (_dir, repo) = test_repo().await;

        let mut first = sofia();
        let mut second = carlos();
        assert!(repo.insert(&mut first).await);
        assert!(repo.insert(&mut second).await);
        let first_id = first.id().unwrap();
        let second_id = second.id().unwrap();

        let mut fetched = repo.fetch_by_id(first_id).await.unwrap();
        assert_eq!(fetched, first);

        fetched.status = "Enviada".to_string();
        fetched.total = 155.50;
        assert!(repo.update(&fetched).await);
        assert_eq!(repo.fetch_by_id(first_id).await.unwrap(), fetched);

        assert_eq!(repo.list_all().await.len(), 2);

        assert!(repo.delete_by_id(second_id).await);
        assert_eq!(repo.fetch_by_id(second_id).await, None);

        let remaining = repo.list_all().await;
        assert_eq!(remaining, vec![fetched]);
        assert_eq!(remaining[0].customer_name, "Sofía Rodríguez");
        assert_eq!(remaining[0].total, 155.50);
        assert_eq!(remaining[0].status, "Enviada");
    }
}
