use async_trait::async_trait;
use askup_shared::types::{ItemId, ItemKind, VotableItem, VoteEntry, VoteState};
use sqlx::types::Json;

use super::rows::VoteFieldsRow;
use crate::{ItemStore, ItemStoreError};

/// PostgreSQL-backed `ItemStore` for one kind of votable item.
///
/// Reads and writes only the `votes` and `voted_by` columns of the
/// `questions` or `answers` table.
pub struct PostgresItemStore {
    pool: sqlx::PgPool,
    kind: ItemKind,
}

impl PostgresItemStore {
    /// Creates a store over the table holding items of `kind`.
    pub fn new(pool: sqlx::PgPool, kind: ItemKind) -> Self {
        Self { pool, kind }
    }

    fn table(&self) -> &'static str {
        match self.kind {
            ItemKind::Question => "questions",
            ItemKind::Answer => "answers",
        }
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<VotableItem>, ItemStoreError> {
        let sql = format!("SELECT votes, voted_by FROM {} WHERE id = $1", self.table());
        let row: Option<VoteFieldsRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| VotableItem::new(id, self.kind, r.votes, r.voted_by.0)))
    }

    /// Replaces both vote columns in one single-row `UPDATE`.
    async fn update_vote_fields(
        &self,
        id: ItemId,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<(), ItemStoreError> {
        let sql = format!(
            "UPDATE {} SET votes = $2, voted_by = $3 WHERE id = $1",
            self.table()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(votes)
            .bind(Json(voted_by))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Compare-and-set on the previously read vote columns.
    ///
    /// Postgres re-evaluates the `WHERE` clause against the latest row version
    /// after waiting on a concurrent writer, so two requests that read the
    /// same state cannot both succeed.
    async fn update_vote_fields_if_unchanged(
        &self,
        id: ItemId,
        expected: &VoteState,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<bool, ItemStoreError> {
        let sql = format!(
            "UPDATE {} SET votes = $2, voted_by = $3 WHERE id = $1 AND votes = $4 AND voted_by = $5",
            self.table()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(votes)
            .bind(Json(voted_by))
            .bind(expected.votes)
            .bind(Json(&expected.voted_by))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
