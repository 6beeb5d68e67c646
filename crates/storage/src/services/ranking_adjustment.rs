//! Post-fight ranking adjustment.
//!
//! The winner moves up one spot (never above rank 1) and the loser moves down
//! one spot. The adjustment runs inside the caller's transaction under a
//! savepoint: either both writes land or neither does, and a failed
//! adjustment leaves the rest of the transaction usable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Ranking;

/// Ranking operations available inside an open transaction
#[async_trait]
pub trait RankingTransaction: Send {
    /// Load and lock the fighter's ranking in `category`
    async fn find_ranking(&mut self, fighter_id: Uuid, category: &str) -> Result<Option<Ranking>>;

    /// Load and lock every ranking the fighter holds
    async fn fighter_rankings(&mut self, fighter_id: Uuid) -> Result<Vec<Ranking>>;

    async fn set_rank(&mut self, ranking_id: Uuid, rank: i32) -> Result<()>;

    async fn savepoint(&mut self) -> Result<()>;

    async fn rollback_to_savepoint(&mut self) -> Result<()>;

    async fn release_savepoint(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankChange {
    pub ranking_id: Uuid,
    pub fighter_id: Uuid,
    pub previous_rank: i32,
    pub new_rank: i32,
}

/// Outcome of [`adjust_rankings`]. Never an error: callers decide what to surface.
#[derive(Debug)]
pub enum RankAdjustment {
    Applied { winner: RankChange, loser: RankChange },
    MissingRanking { fighter_id: Uuid },
    SameFighter,
    Failed(StorageError),
}

impl RankAdjustment {
    pub fn is_applied(&self) -> bool {
        matches!(self, RankAdjustment::Applied { .. })
    }
}

/// New (winner, loser) ranks after one fight
pub fn shifted_ranks(winner_rank: i32, loser_rank: i32) -> (i32, i32) {
    (
        winner_rank.saturating_sub(1).max(1),
        loser_rank.saturating_add(1),
    )
}

/// Shift the winner up and the loser down.
///
/// Each fighter's ranking is the one held in `category`; a fighter with no
/// ranking there but exactly one ranking elsewhere is adjusted in that one.
/// Rankings are locked in fighter id order so two adjustments touching the
/// same pair cannot deadlock.
#[tracing::instrument(skip(tx))]
pub async fn adjust_rankings<T>(
    tx: &mut T,
    winner_id: Uuid,
    loser_id: Uuid,
    category: &str,
) -> RankAdjustment
where
    T: RankingTransaction + ?Sized,
{
    if winner_id == loser_id {
        tracing::warn!("Skipping ranking update: winner and loser are the same fighter");
        return RankAdjustment::SameFighter;
    }

    if let Err(e) = tx.savepoint().await {
        tracing::error!(error = %e, "Error updating fighter rankings");
        return RankAdjustment::Failed(e);
    }

    match apply(tx, winner_id, loser_id, category).await {
        Ok(adjustment) => {
            if let Err(e) = tx.release_savepoint().await {
                tracing::error!(error = %e, "Error updating fighter rankings");
                return RankAdjustment::Failed(e);
            }
            match &adjustment {
                RankAdjustment::Applied { winner, loser } => tracing::info!(
                    winner_rank = winner.new_rank,
                    loser_rank = loser.new_rank,
                    "Fighter rankings updated"
                ),
                RankAdjustment::MissingRanking { fighter_id } => tracing::warn!(
                    %fighter_id,
                    "Skipping ranking update: fighter has no ranking to adjust"
                ),
                _ => {}
            }
            adjustment
        }
        Err(e) => {
            tracing::error!(error = %e, "Error updating fighter rankings");
            if let Err(rollback) = tx.rollback_to_savepoint().await {
                tracing::error!(error = %rollback, "Failed to roll back ranking update");
            }
            RankAdjustment::Failed(e)
        }
    }
}

async fn apply<T>(
    tx: &mut T,
    winner_id: Uuid,
    loser_id: Uuid,
    category: &str,
) -> Result<RankAdjustment>
where
    T: RankingTransaction + ?Sized,
{
    let (winner, loser) = if winner_id < loser_id {
        let winner = ranking_to_adjust(tx, winner_id, category).await?;
        let loser = ranking_to_adjust(tx, loser_id, category).await?;
        (winner, loser)
    } else {
        let loser = ranking_to_adjust(tx, loser_id, category).await?;
        let winner = ranking_to_adjust(tx, winner_id, category).await?;
        (winner, loser)
    };

    let (winner, loser) = match (winner, loser) {
        (Some(winner), Some(loser)) => (winner, loser),
        (None, _) => return Ok(RankAdjustment::MissingRanking { fighter_id: winner_id }),
        (_, None) => return Ok(RankAdjustment::MissingRanking { fighter_id: loser_id }),
    };

    let (new_winner_rank, new_loser_rank) = shifted_ranks(winner.rank, loser.rank);

    tx.set_rank(winner.ranking_id, new_winner_rank).await?;
    tx.set_rank(loser.ranking_id, new_loser_rank).await?;

    Ok(RankAdjustment::Applied {
        winner: RankChange {
            ranking_id: winner.ranking_id,
            fighter_id: winner_id,
            previous_rank: winner.rank,
            new_rank: new_winner_rank,
        },
        loser: RankChange {
            ranking_id: loser.ranking_id,
            fighter_id: loser_id,
            previous_rank: loser.rank,
            new_rank: new_loser_rank,
        },
    })
}

async fn ranking_to_adjust<T>(
    tx: &mut T,
    fighter_id: Uuid,
    category: &str,
) -> Result<Option<Ranking>>
where
    T: RankingTransaction + ?Sized,
{
    if let Some(ranking) = tx.find_ranking(fighter_id, category).await? {
        return Ok(Some(ranking));
    }

    let mut rankings = tx.fighter_rankings(fighter_id).await?;
    if rankings.len() != 1 {
        return Ok(None);
    }

    let ranking = rankings.pop();
    if let Some(ranking) = &ranking {
        tracing::debug!(
            %fighter_id,
            category = %ranking.category,
            "Using the fighter's only ranking"
        );
    }
    Ok(ranking)
}
