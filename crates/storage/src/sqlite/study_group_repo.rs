use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Row, Sqlite, Transaction};
use wordy_core::model::{ReviewSlot, StudyGroup, WordId};

use super::SqliteRepository;
use super::mapping::{conn, insert_error, map_study_group_row, ser, word_id_from_text};
use crate::repository::{StorageError, StudyGroupRepository};

async fn write_memberships(
    tx: &mut Transaction<'_, Sqlite>,
    group: &StudyGroup,
) -> Result<(), StorageError> {
    let group_id = group.id().to_string();

    sqlx::query("DELETE FROM study_group_words WHERE group_id = ?1")
        .bind(&group_id)
        .execute(&mut **tx)
        .await
        .map_err(conn)?;

    for (position, word) in group.words().iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|_| StorageError::Serialization("position overflow".into()))?;
        sqlx::query(
            "INSERT INTO study_group_words (group_id, word_id, position) VALUES (?1, ?2, ?3)",
        )
        .bind(&group_id)
        .bind(word.to_string())
        .bind(position)
        .execute(&mut **tx)
        .await
        .map_err(conn)?;
    }
    Ok(())
}

#[async_trait]
impl StudyGroupRepository for SqliteRepository {
    async fn insert_study_group(&self, group: &StudyGroup) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO study_groups (
                id, study_date, review1_at, review2_at, review3_at,
                is_completed, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(group.id().to_string())
        .bind(group.study_date())
        .bind(group.review_at(ReviewSlot::First))
        .bind(group.review_at(ReviewSlot::Second))
        .bind(group.review_at(ReviewSlot::Third))
        .bind(i64::from(group.is_completed()))
        .bind(group.created_at())
        .bind(group.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(insert_error)?;

        write_memberships(&mut tx, group).await?;
        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn list_study_groups(&self) -> Result<Vec<StudyGroup>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                id, study_date, review1_at, review2_at, review3_at,
                is_completed, created_at, updated_at
            FROM study_groups
            ORDER BY rowid ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let member_rows = sqlx::query(
            r"
            SELECT group_id, word_id
            FROM study_group_words
            ORDER BY group_id, position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut members: HashMap<String, Vec<WordId>> = HashMap::new();
        for row in member_rows {
            let group_id: String = row.try_get("group_id").map_err(ser)?;
            let word_id: String = row.try_get("word_id").map_err(ser)?;
            members
                .entry(group_id)
                .or_default()
                .push(word_id_from_text(&word_id)?);
        }

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id").map_err(ser)?;
            let words = members.remove(&id).unwrap_or_default();
            groups.push(map_study_group_row(&row, words)?);
        }
        Ok(groups)
    }

    async fn save_study_group(&self, group: &StudyGroup) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let result = sqlx::query(
            r"
            UPDATE study_groups SET
                study_date = ?2,
                review1_at = ?3,
                review2_at = ?4,
                review3_at = ?5,
                is_completed = ?6,
                updated_at = ?7
            WHERE id = ?1
            ",
        )
        .bind(group.id().to_string())
        .bind(group.study_date())
        .bind(group.review_at(ReviewSlot::First))
        .bind(group.review_at(ReviewSlot::Second))
        .bind(group.review_at(ReviewSlot::Third))
        .bind(i64::from(group.is_completed()))
        .bind(group.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        write_memberships(&mut tx, group).await?;
        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
