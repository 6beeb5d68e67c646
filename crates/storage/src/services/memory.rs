//! In-memory fight store for service tests. Transactions stage their writes
//! and only touch the shared tables when applied.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::fight::NewFight;
use crate::error::{Result, StorageError};
use crate::models::{Fight, Ranking};
use crate::services::fight_recording::{FightStore, FightTransaction};
use crate::services::ranking_adjustment::RankingTransaction;

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) rankings: Arc<Mutex<HashMap<Uuid, Ranking>>>,
    pub(crate) fights: Arc<Mutex<Vec<Fight>>>,
    /// Zero-based index of the rank write that fails
    pub(crate) fail_on_rank_write: Option<usize>,
    pub(crate) fail_fight_insert: bool,
    pub(crate) begun: AtomicUsize,
}

pub(crate) struct MemoryTransaction {
    rankings: Arc<Mutex<HashMap<Uuid, Ranking>>>,
    fights: Arc<Mutex<Vec<Fight>>>,
    staged_ranks: Vec<(Uuid, i32)>,
    staged_fights: Vec<Fight>,
    savepoint: Option<usize>,
    savepoints_taken: usize,
    rank_writes: usize,
    fail_on_rank_write: Option<usize>,
    fail_fight_insert: bool,
}

fn injected_failure() -> StorageError {
    StorageError::Database(sqlx::Error::PoolClosed)
}

impl MemoryStore {
    pub(crate) fn insert_ranking(&self, fighter_id: Uuid, category: &str, rank: i32) -> Uuid {
        let now = chrono::Utc::now().naive_utc();
        let ranking = Ranking {
            ranking_id: Uuid::new_v4(),
            fighter_id,
            category: category.to_string(),
            rank,
            created_at: now,
            updated_at: now,
        };
        let id = ranking.ranking_id;
        self.rankings.lock().unwrap().insert(id, ranking);
        id
    }

    pub(crate) fn rank(&self, ranking_id: Uuid) -> i32 {
        self.rankings.lock().unwrap()[&ranking_id].rank
    }

    pub(crate) fn fights(&self) -> Vec<Fight> {
        self.fights.lock().unwrap().clone()
    }

    pub(crate) fn transaction(&self) -> MemoryTransaction {
        self.begun.fetch_add(1, Ordering::SeqCst);
        MemoryTransaction {
            rankings: Arc::clone(&self.rankings),
            fights: Arc::clone(&self.fights),
            staged_ranks: Vec::new(),
            staged_fights: Vec::new(),
            savepoint: None,
            savepoints_taken: 0,
            rank_writes: 0,
            fail_on_rank_write: self.fail_on_rank_write,
            fail_fight_insert: self.fail_fight_insert,
        }
    }
}

impl MemoryTransaction {
    pub(crate) fn savepoints_taken(&self) -> usize {
        self.savepoints_taken
    }

    /// Make every staged write visible
    pub(crate) fn apply(self) {
        let mut rankings = self.rankings.lock().unwrap();
        for (ranking_id, rank) in self.staged_ranks {
            if let Some(ranking) = rankings.get_mut(&ranking_id) {
                ranking.rank = rank;
            }
        }
        self.fights.lock().unwrap().extend(self.staged_fights);
    }

    fn current_rank(&self, ranking: &Ranking) -> Ranking {
        let mut ranking = ranking.clone();
        if let Some((_, rank)) = self
            .staged_ranks
            .iter()
            .rev()
            .find(|(id, _)| *id == ranking.ranking_id)
        {
            ranking.rank = *rank;
        }
        ranking
    }
}

#[async_trait]
impl FightStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn FightTransaction>> {
        Ok(Box::new(self.transaction()))
    }
}

#[async_trait]
impl RankingTransaction for MemoryTransaction {
    async fn find_ranking(&mut self, fighter_id: Uuid, category: &str) -> Result<Option<Ranking>> {
        let found = self
            .rankings
            .lock()
            .unwrap()
            .values()
            .find(|r| r.fighter_id == fighter_id && r.category == category)
            .cloned();
        Ok(found.map(|r| self.current_rank(&r)))
    }

    async fn fighter_rankings(&mut self, fighter_id: Uuid) -> Result<Vec<Ranking>> {
        let found: Vec<Ranking> = self
            .rankings
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.fighter_id == fighter_id)
            .cloned()
            .collect();
        Ok(found.iter().map(|r| self.current_rank(r)).collect())
    }

    async fn set_rank(&mut self, ranking_id: Uuid, rank: i32) -> Result<()> {
        let attempt = self.rank_writes;
        self.rank_writes += 1;
        if self.fail_on_rank_write == Some(attempt) {
            return Err(injected_failure());
        }
        self.staged_ranks.push((ranking_id, rank));
        Ok(())
    }

    async fn savepoint(&mut self) -> Result<()> {
        self.savepoint = Some(self.staged_ranks.len());
        self.savepoints_taken += 1;
        Ok(())
    }

    async fn rollback_to_savepoint(&mut self) -> Result<()> {
        if let Some(len) = self.savepoint.take() {
            self.staged_ranks.truncate(len);
        }
        Ok(())
    }

    async fn release_savepoint(&mut self) -> Result<()> {
        self.savepoint = None;
        Ok(())
    }
}

#[async_trait]
impl FightTransaction for MemoryTransaction {
    async fn insert_fight(&mut self, fight: &NewFight) -> Result<Fight> {
        if self.fail_fight_insert {
            return Err(StorageError::ConstraintViolation(
                "Event or fighter does not exist".to_string(),
            ));
        }
        let now = chrono::Utc::now().naive_utc();
        let fight = Fight {
            fight_id: Uuid::new_v4(),
            event_id: fight.event_id,
            winner_id: fight.winner_id,
            loser_id: fight.loser_id,
            last_round: fight.last_round,
            referee: fight.referee.clone(),
            win_condition: fight.win_condition.clone(),
            created_at: now,
            updated_at: now,
        };
        self.staged_fights.push(fight.clone());
        Ok(fight)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.apply();
        Ok(())
    }
}
