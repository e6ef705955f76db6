use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};

use crate::error::StoreResult;
use crate::schema::TableSchema;
use crate::statement::{Param, Statement};
use crate::value::{Record, Value, ValueType};

/// The data-access boundary the generated operations run against.
///
/// Reads borrow a pooled connection for the call; writes run in their own
/// transaction, committed on success and rolled back on failure.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all(&self, statement: &Statement) -> StoreResult<Vec<Record>>;

    async fn fetch_optional(&self, statement: &Statement) -> StoreResult<Option<Record>>;

    /// Executes one write and commits it, returning the affected row count.
    async fn execute(&self, statement: &Statement) -> StoreResult<u64>;

    /// Connectivity probe, `SELECT 1`.
    async fn ping(&self) -> StoreResult<i64>;

    /// Creates any missing tables in a single transaction.
    async fn bootstrap(&self, schemas: &[TableSchema]) -> StoreResult<()>;

    async fn close(&self);
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn fetch_all(&self, statement: &Statement) -> StoreResult<Vec<Record>> {
        let (sql, params) = statement.to_positional()?;
        let rows = bind_all(sqlx::query(&sql), &params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(decode_row).collect())
    }

    async fn fetch_optional(&self, statement: &Statement) -> StoreResult<Option<Record>> {
        let (sql, params) = statement.to_positional()?;
        let row = bind_all(sqlx::query(&sql), &params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(decode_row))
    }

    async fn execute(&self, statement: &Statement) -> StoreResult<u64> {
        let (sql, params) = statement.to_positional()?;
        let mut tx = self.pool.begin().await?;
        match bind_all(sqlx::query(&sql), &params).execute(&mut *tx).await {
            Ok(result) => {
                tx.commit().await?;
                Ok(result.rows_affected())
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(e.into())
            }
        }
    }

    async fn ping(&self) -> StoreResult<i64> {
        let row: (i32,) = sqlx::query_as("SELECT 1 AS test")
            .fetch_one(&self.pool)
            .await?;
        Ok(i64::from(row.0))
    }

    async fn bootstrap(&self, schemas: &[TableSchema]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for schema in schemas {
            sqlx::query(&schema.create_sql()).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[&'q Param],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = bind_param(query, param);
    }
    query
}

fn bind_param<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q Param,
) -> Query<'q, Postgres, PgArguments> {
    match &param.value {
        Value::Null => match param.ty {
            ValueType::Int => query.bind(None::<i64>),
            ValueType::Float => query.bind(None::<f64>),
            ValueType::Decimal => query.bind(None::<Decimal>),
            ValueType::Bool => query.bind(None::<bool>),
            ValueType::Date => query.bind(None::<NaiveDate>),
            ValueType::Time => query.bind(None::<NaiveTime>),
            ValueType::Timestamp => query.bind(None::<NaiveDateTime>),
            ValueType::Text => query.bind(None::<String>),
        },
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Decimal(v) => query.bind(*v),
        Value::Bool(v) => query.bind(*v),
        Value::Date(v) => query.bind(*v),
        Value::Time(v) => query.bind(*v),
        Value::Timestamp(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.as_str()),
    }
}

fn decode_row(row: &PgRow) -> Record {
    let mut record = Record::new();
    for (index, col) in row.columns().iter().enumerate() {
        record.insert(col.name(), decode_column(row, index, col.type_info().name()));
    }
    record
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Value {
    fn get<'r, T>(row: &'r PgRow, index: usize) -> Option<T>
    where
        T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    {
        row.try_get::<Option<T>, _>(index).ok().flatten()
    }

    let value = match type_name {
        "INT2" => get::<i16>(row, index).map(|v| Value::Int(i64::from(v))),
        "INT4" => get::<i32>(row, index).map(|v| Value::Int(i64::from(v))),
        "INT8" => get::<i64>(row, index).map(Value::Int),
        "FLOAT4" => get::<f32>(row, index).map(|v| Value::Float(f64::from(v))),
        "FLOAT8" => get::<f64>(row, index).map(Value::Float),
        "NUMERIC" => get::<Decimal>(row, index).map(Value::Decimal),
        "BOOL" => get::<bool>(row, index).map(Value::Bool),
        "DATE" => get::<NaiveDate>(row, index).map(Value::Date),
        "TIME" => get::<NaiveTime>(row, index).map(Value::Time),
        "TIMESTAMP" => get::<NaiveDateTime>(row, index).map(Value::Timestamp),
        "TIMESTAMPTZ" => get::<DateTime<Utc>>(row, index).map(|v| Value::Timestamp(v.naive_utc())),
        _ => get::<String>(row, index).map(Value::Text),
    };
    value.unwrap_or(Value::Null)
}
