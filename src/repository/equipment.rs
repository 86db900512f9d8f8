//! Equipment repository

use chrono::{NaiveDate, Utc};
use sqlx::{FromRow, Pool, Postgres};

use super::map_unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentStatus, UpdateEquipment},
};

pub(crate) const EQUIPMENT_COLUMNS: &str =
    "id, short_name, full_name, how_many, status, defects, value, buy_date, notes";

/// Equipment row as stored; nullable columns get their defaults in `From`
#[derive(Debug, FromRow)]
pub(crate) struct EquipmentRow {
    pub id: String,
    pub short_name: String,
    pub full_name: Option<String>,
    pub how_many: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub defects: Option<Vec<String>>,
    pub value: Option<f64>,
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id,
            short_name: row.short_name,
            full_name: row.full_name,
            how_many: row.how_many.and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
            status: row.status.unwrap_or_default(),
            defects: row.defects.unwrap_or_default(),
            value: row.value,
            buy_date: row.buy_date,
            notes: row.notes,
        }
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment matching the query's search and status filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let search = query.search_pattern();
        let select_q = list_query(search.is_some(), query.status.is_some(), &query.order_by());

        let mut builder = sqlx::query_as::<_, EquipmentRow>(&select_q);
        if let Some(pattern) = search { builder = builder.bind(pattern); }
        if let Some(status) = query.status { builder = builder.bind(status); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Equipment::from).collect())
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, EquipmentRow>(&format!(
            "SELECT {} FROM equipment WHERE id = $1",
            EQUIPMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Equipment::from)
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment under the given id
    pub async fn create(&self, id: &str, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, EquipmentRow>(&format!(
            r#"
            INSERT INTO equipment (id, short_name, full_name, how_many, status, defects, value, buy_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            EQUIPMENT_COLUMNS
        ))
        .bind(id)
        .bind(&data.short_name)
        .bind(&data.full_name)
        .bind(data.how_many.unwrap_or(1))
        .bind(data.status.unwrap_or_default())
        .bind(data.defects.clone().unwrap_or_default())
        .bind(data.value)
        .bind(data.buy_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, format!("Equipment {} already exists", id)))?;
        Ok(row.into())
    }

    /// Update equipment (only provided fields are written)
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.short_name, "short_name");
        add_field!(data.full_name, "full_name");
        add_field!(data.how_many, "how_many");
        add_field!(data.status, "status");
        add_field!(data.defects, "defects");
        add_field!(data.value, "value");
        add_field!(data.buy_date, "buy_date");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            EQUIPMENT_COLUMNS
        );

        let mut builder = sqlx::query_as::<_, EquipmentRow>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.short_name);
        bind_field!(data.full_name);
        bind_field!(data.how_many);
        bind_field!(data.status);
        bind_field!(data.defects);
        bind_field!(data.value);
        bind_field!(data.buy_date);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Equipment::from)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment. Jobs referencing it are left untouched.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Number of jobs holding a reservation for this equipment id
    pub async fn count_jobs_referencing(&self, id: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE gear @> jsonb_build_array(jsonb_build_object('equipment_id', $1::text))
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// SELECT for `list`; binds are the search pattern then the status, each only when present
fn list_query(has_search: bool, has_status: bool, order_by: &str) -> String {
    let mut conditions = Vec::new();
    let mut idx = 1;

    if has_search {
        conditions.push(format!(
            "(LOWER(short_name) LIKE ${0} OR LOWER(COALESCE(full_name, '')) LIKE ${0} \
             OR LOWER(COALESCE(notes, '')) LIKE ${0})",
            idx
        ));
        idx += 1;
    }
    if has_status {
        conditions.push(format!("status = ${}", idx));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    format!(
        "SELECT {} FROM equipment {} ORDER BY {}",
        EQUIPMENT_COLUMNS, where_clause, order_by
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::equipment::{EquipmentSort, SortOrder};

    #[test]
    fn test_list_query_without_filters() {
        let sql = list_query(false, false, &EquipmentQuery::default().order_by());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY short_name ASC NULLS LAST, short_name, id"));
    }

    #[test]
    fn test_list_query_numbers_binds_in_order() {
        let query = EquipmentQuery {
            search: Some("sony".into()),
            status: Some(EquipmentStatus::Old),
            sort: Some(EquipmentSort::HowMany),
            order: Some(SortOrder::Desc),
        };
        let sql = list_query(true, true, &query.order_by());
        assert!(sql.contains("LOWER(short_name) LIKE $1"));
        assert!(sql.contains("LOWER(COALESCE(notes, '')) LIKE $1"));
        assert!(sql.contains("AND status = $2"));
        assert!(sql.contains("ORDER BY how_many DESC NULLS LAST"));

        let status_only = list_query(false, true, &query.order_by());
        assert!(status_only.contains("WHERE status = $1"));
    }

    #[test]
    fn test_row_defaults() {
        let row = EquipmentRow {
            id: "cam1".into(),
            short_name: "A7 III".into(),
            full_name: None,
            how_many: None,
            status: None,
            defects: None,
            value: None,
            buy_date: None,
            notes: None,
        };
        let equipment = Equipment::from(row);
        assert_eq!(equipment.how_many, 0);
        assert_eq!(equipment.status, EquipmentStatus::New);
        assert!(equipment.defects.is_empty());
    }

    #[test]
    fn test_row_negative_count_reads_as_zero() {
        let row = EquipmentRow {
            id: "cam1".into(),
            short_name: "A7 III".into(),
            full_name: None,
            how_many: Some(-3),
            status: Some(EquipmentStatus::Damaged),
            defects: Some(vec!["cracked LCD".into()]),
            value: Some(2000.0),
            buy_date: None,
            notes: None,
        };
        let equipment = Equipment::from(row);
        assert_eq!(equipment.how_many, 0);
        assert_eq!(equipment.defects, vec!["cracked LCD".to_string()]);
    }
}
