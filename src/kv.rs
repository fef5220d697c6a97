//! JSON documents under string keys, backed by the `kv_store` table.

use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::{kv_store, KvStore};
use crate::error::AppError;

pub fn user_data_key(user_id: i32) -> String {
    format!("user:{user_id}:data")
}

pub fn activity_prefix(user_id: i32) -> String {
    format!("activity:{user_id}:")
}

pub fn activity_key(user_id: i32, entry_id: Uuid) -> String {
    format!("{}{entry_id}", activity_prefix(user_id))
}

pub async fn get(db: &DatabaseConnection, key: &str) -> Result<Option<Value>, AppError> {
    Ok(KvStore::find_by_id(key.to_string())
        .one(db)
        .await?
        .map(|entry| entry.value))
}

pub async fn set(db: &DatabaseConnection, key: &str, value: Value) -> Result<(), AppError> {
    let entry = kv_store::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(Utc::now().naive_utc()),
    };

    KvStore::insert(entry)
        .on_conflict(
            OnConflict::column(kv_store::Column::Key)
                .update_columns([kv_store::Column::Value, kv_store::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Most recently written first.
pub async fn get_by_prefix(db: &DatabaseConnection, prefix: &str) -> Result<Vec<kv_store::Model>, AppError> {
    Ok(KvStore::find()
        .filter(kv_store::Column::Key.starts_with(prefix))
        .order_by_desc(kv_store::Column::UpdatedAt)
        .all(db)
        .await?)
}

pub async fn delete(db: &DatabaseConnection, key: &str) -> Result<bool, AppError> {
    let result = KvStore::delete_by_id(key.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    #[test]
    fn keys_are_namespaced_per_user() {
        assert_eq!(user_data_key(12), "user:12:data");
        let id = Uuid::nil();
        assert_eq!(
            activity_key(12, id),
            "activity:12:00000000-0000-0000-0000-000000000000"
        );
        assert!(activity_key(12, id).starts_with(&activity_prefix(12)));
        assert!(!activity_key(123, id).starts_with(&activity_prefix(12)));
    }

    #[tokio::test]
    async fn get_returns_stored_document() {
        let now = Utc::now().naive_utc();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![kv_store::Model {
                key: "user:1:data".into(),
                value: json!({"kit": {"water": true}}),
                updated_at: now,
            }]])
            .into_connection();

        let value = get(&db, "user:1:data").await.unwrap();
        assert_eq!(value, Some(json!({"kit": {"water": true}})));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        assert!(delete(&db, "user:1:data").await.unwrap());
        assert!(!delete(&db, "user:1:data").await.unwrap());
    }
}
