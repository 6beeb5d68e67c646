use async_trait::async_trait;

use crate::dto::common::canonical_weight_class;
use crate::dto::fight::NewFight;
use crate::error::Result;
use crate::models::{Fight, Fighter};
use crate::services::ranking_adjustment::{self, RankAdjustment, RankingTransaction};

/// Source of transactions that record fights
#[async_trait]
pub trait FightStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn FightTransaction>>;
}

/// Unit of work for recording a fight. Dropping it without calling
/// [`FightTransaction::commit`] discards every write made through it.
#[async_trait]
pub trait FightTransaction: RankingTransaction {
    async fn insert_fight(&mut self, fight: &NewFight) -> Result<Fight>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Category whose rankings a fight adjusts: the requested weight class, or
/// the winner's when none was given
pub fn ranking_category(requested: Option<&str>, winner: &Fighter) -> String {
    requested
        .map(canonical_weight_class)
        .unwrap_or_else(|| winner.weight_class.clone())
}

/// Store the fight and adjust both fighters' rankings in one transaction.
///
/// A failed adjustment is rolled back on its own and the fight is still
/// committed. If the fight cannot be stored nothing is committed, rankings
/// included.
pub async fn record_fight(
    store: &dyn FightStore,
    fight: &NewFight,
    category: &str,
) -> Result<(Fight, RankAdjustment)> {
    let mut tx = store.begin().await?;

    let adjustment =
        ranking_adjustment::adjust_rankings(tx.as_mut(), fight.winner_id, fight.loser_id, category)
            .await;

    let created = tx.insert_fight(fight).await?;
    tx.commit().await?;

    tracing::info!(
        fight_id = %created.fight_id,
        rankings_adjusted = adjustment.is_applied(),
        "Fight recorded"
    );

    Ok((created, adjustment))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use uuid::Uuid;

    use super::*;
    use crate::error::StorageError;
    use crate::services::memory::MemoryStore;

    fn new_fight(winner_id: Uuid, loser_id: Uuid) -> NewFight {
        NewFight {
            event_id: Uuid::new_v4(),
            winner_id,
            loser_id,
            last_round: 3,
            referee: Some("Herb Dean".to_string()),
            win_condition: "Decision".to_string(),
            weight_class: None,
        }
    }

    fn fighter(weight_class: &str) -> Fighter {
        let now = chrono::Utc::now().naive_utc();
        Fighter {
            fighter_id: Uuid::new_v4(),
            name: "Jon Doe".to_string(),
            wins: 0,
            losses: 0,
            knockouts: 0,
            submissions: 0,
            weight_class: weight_class.to_string(),
            nationality: None,
            team: None,
            nickname: None,
            date_of_birth: None,
            last_weight_grams: None,
            height_cm: None,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_category_defaults_to_winner_weight_class() {
        let winner = fighter("lightweight");

        assert_eq!(ranking_category(None, &winner), "lightweight");
        assert_eq!(
            ranking_category(Some("Light Heavyweight"), &winner),
            "light_heavyweight"
        );
    }

    #[tokio::test]
    async fn test_fight_and_rankings_commit_together() {
        let store = MemoryStore::default();
        let (winner, loser) = (Uuid::new_v4(), Uuid::new_v4());
        let winner_ranking = store.insert_ranking(winner, "lightweight", 3);
        let loser_ranking = store.insert_ranking(loser, "lightweight", 5);

        let (fight, adjustment) = record_fight(&store, &new_fight(winner, loser), "lightweight")
            .await
            .unwrap();

        assert!(adjustment.is_applied());
        assert_eq!(store.fights().len(), 1);
        assert_eq!(store.fights()[0].fight_id, fight.fight_id);
        assert_eq!(store.rank(winner_ranking), 2);
        assert_eq!(store.rank(loser_ranking), 6);
    }

    #[tokio::test]
    async fn test_winner_ranked_outside_own_weight_class() {
        let store = MemoryStore::default();
        let winner = fighter("lightweight");
        let loser = Uuid::new_v4();
        let winner_ranking = store.insert_ranking(winner.fighter_id, "welterweight", 3);
        let loser_ranking = store.insert_ranking(loser, "welterweight", 5);

        let category = ranking_category(None, &winner);
        let (_, adjustment) =
            record_fight(&store, &new_fight(winner.fighter_id, loser), &category)
                .await
                .unwrap();

        assert!(adjustment.is_applied());
        assert_eq!(store.rank(winner_ranking), 2);
        assert_eq!(store.rank(loser_ranking), 6);
    }

    #[tokio::test]
    async fn test_failed_fight_insert_leaves_rankings_unchanged() {
        let store = MemoryStore {
            fail_fight_insert: true,
            ..Default::default()
        };
        let (winner, loser) = (Uuid::new_v4(), Uuid::new_v4());
        let winner_ranking = store.insert_ranking(winner, "middleweight", 4);
        let loser_ranking = store.insert_ranking(loser, "middleweight", 7);

        let result = record_fight(&store, &new_fight(winner, loser), "middleweight").await;

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
        assert!(store.fights().is_empty());
        assert_eq!(store.rank(winner_ranking), 4);
        assert_eq!(store.rank(loser_ranking), 7);
    }

    #[tokio::test]
    async fn test_failed_adjustment_still_records_fight() {
        let store = MemoryStore {
            fail_on_rank_write: Some(1),
            ..Default::default()
        };
        let (winner, loser) = (Uuid::new_v4(), Uuid::new_v4());
        let winner_ranking = store.insert_ranking(winner, "flyweight", 2);
        let loser_ranking = store.insert_ranking(loser, "flyweight", 3);

        let (_, adjustment) = record_fight(&store, &new_fight(winner, loser), "flyweight")
            .await
            .unwrap();

        assert!(matches!(adjustment, RankAdjustment::Failed(_)));
        assert_eq!(store.fights().len(), 1);
        assert_eq!(store.rank(winner_ranking), 2);
        assert_eq!(store.rank(loser_ranking), 3);
    }

    #[tokio::test]
    async fn test_unranked_fighters_still_record_fight() {
        let store = MemoryStore::default();
        let (winner, loser) = (Uuid::new_v4(), Uuid::new_v4());

        let (_, adjustment) = record_fight(&store, &new_fight(winner, loser), "strawweight")
            .await
            .unwrap();

        assert!(matches!(adjustment, RankAdjustment::MissingRanking { .. }));
        assert_eq!(store.fights().len(), 1);
        assert_eq!(store.begun.load(Ordering::SeqCst), 1);
    }
}
