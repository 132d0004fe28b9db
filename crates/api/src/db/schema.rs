//! The dataset layout this service is built against.
//!
//! The database is produced elsewhere and opened read-only, so instead of
//! discovering its tables at runtime the columns every query relies on are
//! listed here and checked once at startup.

use log::debug;
use sqlx::SqlitePool;

use super::Error;

/// Bump when a query starts relying on a column not listed below.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["station", "name"],
};

pub const TABLES: &[TableSchema] = &[MEASUREMENT, STATION];

impl TableSchema {
    /// Columns this table is expected to have that `present` lacks.
    pub fn missing_columns(&self, present: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
            .map(|column| column.to_string())
            .collect()
    }

    /// `CREATE TABLE` statement for an empty table with this layout, used to
    /// build fixture datasets.
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE TABLE {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
            self.name,
            self.columns.join(", ")
        )
    }
}

/// Check that every table and column the queries use exists.
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), Error> {
    for table in TABLES {
        let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
            .bind(table.name)
            .fetch_all(pool)
            .await?;

        let missing = table.missing_columns(&present);
        if !missing.is_empty() {
            return Err(Error::Schema {
                table: table.name,
                missing,
            });
        }
        debug!("table {} matches schema v{}", table.name, SCHEMA_VERSION);
    }
    Ok(())
}
