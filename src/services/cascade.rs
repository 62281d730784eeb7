//! Cascade deletion of a board's dependents.
//!
//! Runs as a sequential batch the caller awaits in full: for each list of the
//! board, the list's cards are deleted, then the list; finally the board's
//! activities. A failed step does not abort the remaining steps. Failures are
//! collected into a report for the caller to surface; there is no rollback and
//! no cross-step transaction.

use sqlx::SqlitePool;

#[derive(Debug, Default)]
pub struct CascadeReport {
    pub lists_deleted: u64,
    pub cards_deleted: u64,
    pub activities_deleted: u64,
    pub failures: Vec<String>,
}

impl CascadeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_clean() {
            format!(
                "{} lists, {} cards, {} activities deleted",
                self.lists_deleted, self.cards_deleted, self.activities_deleted
            )
        } else {
            self.failures.join("; ")
        }
    }
}

pub async fn delete_board_dependents(pool: &SqlitePool, board_id: &str) -> CascadeReport {
    let mut report = CascadeReport::default();

    let list_ids: Vec<(String,)> = match sqlx::query_as("SELECT id FROM lists WHERE board_id = ?")
        .bind(board_id)
        .fetch_all(pool)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            report
                .failures
                .push(format!("lookup of lists for board {}: {}", board_id, e));
            Vec::new()
        }
    };

    for (list_id,) in &list_ids {
        match delete_list_cards(pool, list_id).await {
            Ok(n) => report.cards_deleted += n,
            Err(e) => report
                .failures
                .push(format!("cards of list {}: {}", list_id, e)),
        }

        match sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(list_id)
            .execute(pool)
            .await
        {
            Ok(res) => report.lists_deleted += res.rows_affected(),
            Err(e) => report.failures.push(format!("list {}: {}", list_id, e)),
        }
    }

    match sqlx::query("DELETE FROM activities WHERE board_id = ?")
        .bind(board_id)
        .execute(pool)
        .await
    {
        Ok(res) => report.activities_deleted += res.rows_affected(),
        Err(e) => report
            .failures
            .push(format!("activities of board {}: {}", board_id, e)),
    }

    tracing::debug!(
        board_id = %board_id,
        "Cascade finished: {}",
        report.summary()
    );

    report
}

/// Deletes every card belonging to a list. Also used by the list resource's
/// own delete.
pub async fn delete_list_cards(pool: &SqlitePool, list_id: &str) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM cards WHERE list_id = ?")
        .bind(list_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
