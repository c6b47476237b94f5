//! Employee CRUD operations

use buildflow_core::{Employee, Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Database row for employee
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    name: String,
    phone: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

/// Create or update an employee record
pub async fn upsert_employee(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    phone: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO employees (id, name, phone)
           VALUES (?, ?, ?)
           ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             phone = excluded.phone"#,
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .execute(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(())
}

/// Get a specific employee by ID
pub async fn get_employee(pool: &SqlitePool, id: &str) -> Result<Option<Employee>> {
    let row: Option<EmployeeRow> = sqlx::query_as(
        r#"
        SELECT id, name, phone, created_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(row.map(Employee::from))
}

/// Check if an employee with the given id exists
pub async fn employee_exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| Error::DatabaseError(e.to_string()))?;

    Ok(count.0 > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::Database;

    #[tokio::test]
    async fn test_upsert_get_roundtrip() {
        let db = Database::connect_in_memory().await.unwrap();

        upsert_employee(db.pool(), "emp-1", "Alex Mason", Some("0412 345 678"))
            .await
            .unwrap();

        let employee = get_employee(db.pool(), "emp-1").await.unwrap().unwrap();
        assert_eq!(employee.name, "Alex Mason");
        assert_eq!(employee.phone.as_deref(), Some("0412 345 678"));

        // Upsert overwrites in place
        upsert_employee(db.pool(), "emp-1", "Alex Mason", None)
            .await
            .unwrap();
        let updated = get_employee(db.pool(), "emp-1").await.unwrap().unwrap();
        assert_eq!(updated.phone, None);

        assert!(employee_exists(db.pool(), "emp-1").await.unwrap());
        assert!(!employee_exists(db.pool(), "emp-2").await.unwrap());
        assert!(get_employee(db.pool(), "emp-2").await.unwrap().is_none());
    }
}
