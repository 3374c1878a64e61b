//! PostgreSQL implementation of RecordStore

use crate::db::traits::RecordStore;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgPool, Row};
use tally_query::Record;

const JOINED_RECORDS_QUERY: &str = r#"
    SELECT
        c.id,
        c.name,
        c.industry,
        c.country,
        c.founded_year,
        d.company_type,
        d.size,
        d.ceo_name,
        d.headquarters,
        f.year AS financial_year,
        f.revenue,
        f.net_income
    FROM companies AS c
    LEFT JOIN company_details AS d ON d.company_id = c.id
    LEFT JOIN financial_data AS f ON f.company_id = c.id
    ORDER BY c.id, f.year DESC
"#;

/// Reads the joined dataset from the `companies`, `company_details` and
/// `financial_data` tables.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn fetch_all_joined_records(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(JOINED_RECORDS_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        rows.iter().map(row_to_record).collect()
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

// Column order matches tally_query::FIELDS. Every joined column may be null.
fn row_to_record(row: &PgRow) -> Result<Record> {
    Ok(Record::new()
        .with("id", row.try_get::<Option<i64>, _>("id")?)
        .with("name", row.try_get::<Option<String>, _>("name")?)
        .with("industry", row.try_get::<Option<String>, _>("industry")?)
        .with("country", row.try_get::<Option<String>, _>("country")?)
        .with("founded_year", row.try_get::<Option<i32>, _>("founded_year")?)
        .with("company_type", row.try_get::<Option<String>, _>("company_type")?)
        .with("size", row.try_get::<Option<String>, _>("size")?)
        .with("ceo_name", row.try_get::<Option<String>, _>("ceo_name")?)
        .with("headquarters", row.try_get::<Option<String>, _>("headquarters")?)
        .with("financial_year", row.try_get::<Option<i32>, _>("financial_year")?)
        .with("revenue", row.try_get::<Option<Decimal>, _>("revenue")?)
        .with("net_income", row.try_get::<Option<Decimal>, _>("net_income")?))
}
