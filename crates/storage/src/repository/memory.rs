use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewPick, Pick, PickChange, PickFilter, PickPage};

use super::PickStore;

/// [`PickStore`] holding rows in process memory, in insertion order.
///
/// Enforces the same (user, league, race) uniqueness rule as the database
/// schema. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryPickStore {
    rows: RwLock<Vec<Pick>>,
}

fn same_key(a: &Pick, b: &Pick) -> bool {
    a.user_id == b.user_id && a.league_id == b.league_id && a.race_id == b.race_id
}

fn parse_id(pick_id: &str) -> Option<Uuid> {
    Uuid::parse_str(pick_id).ok()
}

impl InMemoryPickStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn apply(&self, pick_id: &str, changes: &[PickChange]) -> Result<Pick> {
        let id = parse_id(pick_id).ok_or(StorageError::NotFound)?;
        let mut rows = self.rows.write().await;

        let index = rows
            .iter()
            .position(|row| row.pick_id == id)
            .ok_or(StorageError::NotFound)?;

        let mut updated = rows[index].clone();
        for change in changes {
            change.apply(&mut updated);
        }

        if rows
            .iter()
            .any(|row| row.pick_id != id && same_key(row, &updated))
        {
            return Err(StorageError::pick_conflict());
        }

        rows[index] = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl PickStore for InMemoryPickStore {
    async fn list(&self, filter: &PickFilter) -> Result<PickPage> {
        let rows = self.rows.read().await;
        let matching: Vec<&Pick> = rows.iter().filter(|row| filter.matches(row)).collect();

        let items = matching
            .iter()
            .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.limit).unwrap_or(0))
            .map(|row| (*row).clone())
            .collect();

        Ok(PickPage {
            items,
            total: matching.len() as i64,
        })
    }

    async fn insert(&self, pick: &NewPick) -> Result<Pick> {
        let created = Pick {
            pick_id: Uuid::new_v4(),
            user_id: pick.user_id.clone(),
            league_id: pick.league_id.clone(),
            race_id: pick.race_id.clone(),
            p10_driver_id: pick.p10_driver_id.clone(),
            first_retirement_driver_id: pick.first_retirement_driver_id.clone(),
            fastest_lap_driver_id: pick.fastest_lap_driver_id.clone(),
            submitted_at: Utc::now(),
        };

        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| same_key(row, &created)) {
            return Err(StorageError::pick_conflict());
        }
        rows.push(created.clone());

        Ok(created)
    }

    async fn find(&self, pick_id: &str) -> Result<Pick> {
        let id = parse_id(pick_id).ok_or(StorageError::NotFound)?;

        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.pick_id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn replace(&self, pick_id: &str, pick: &NewPick) -> Result<Pick> {
        self.apply(pick_id, &pick.changes()).await
    }

    async fn update(&self, pick_id: &str, changes: &[PickChange]) -> Result<Pick> {
        self.apply(pick_id, changes).await
    }

    async fn delete(&self, pick_id: &str) -> Result<u64> {
        let Some(id) = parse_id(pick_id) else {
            return Ok(0);
        };

        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.pick_id != id);

        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_pick(user: &str, league: &str, race: &str) -> NewPick {
        NewPick {
            user_id: user.into(),
            league_id: league.into(),
            race_id: race.into(),
            p10_driver_id: None,
            first_retirement_driver_id: None,
            fastest_lap_driver_id: None,
        }
    }

    fn filter(limit: i64, offset: i64) -> PickFilter {
        PickFilter {
            user_id: None,
            league_id: None,
            race_id: None,
            limit,
            offset,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let store = InMemoryPickStore::new();
        let first = store.insert(&new_pick("u1", "l1", "r1")).await.unwrap();

        let err = store.insert(&new_pick("u1", "l1", "r1")).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        assert_eq!(store.find(&first.pick_id.to_string()).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_update_to_own_key_is_not_a_conflict() {
        let store = InMemoryPickStore::new();
        let pick = store.insert(&new_pick("u1", "l1", "r1")).await.unwrap();
        let id = pick.pick_id.to_string();

        let updated = store
            .update(&id, &[PickChange::RaceId("r1".into())])
            .await
            .unwrap();
        assert_eq!(updated, pick);
    }

    #[tokio::test]
    async fn test_update_into_other_key_conflicts() {
        let store = InMemoryPickStore::new();
        store.insert(&new_pick("u1", "l1", "r1")).await.unwrap();
        let second = store.insert(&new_pick("u1", "l1", "r2")).await.unwrap();

        let err = store
            .update(
                &second.pick_id.to_string(),
                &[PickChange::RaceId("r1".into())],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_pages_and_counts() {
        let store = InMemoryPickStore::new();
        for race in ["r1", "r2", "r3"] {
            store.insert(&new_pick("u1", "l1", race)).await.unwrap();
        }
        store.insert(&new_pick("u2", "l1", "r1")).await.unwrap();

        let page = store.list(&filter(2, 1)).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].race_id, "r2");

        let mut by_user = filter(20, 0);
        by_user.user_id = Some("u2".into());
        let page = store.list(&by_user).await.unwrap();
        assert_eq!(page.total, 1);

        let beyond = store.list(&filter(20, 10)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 4);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let store = InMemoryPickStore::new();
        let pick = store.insert(&new_pick("u1", "l1", "r1")).await.unwrap();
        let id = pick.pick_id.to_string();

        assert_eq!(store.delete(&id).await.unwrap(), 1);
        assert_eq!(store.delete(&id).await.unwrap(), 0);
        assert_eq!(store.delete("not-a-uuid").await.unwrap(), 0);
        assert!(matches!(
            store.find(&id).await.unwrap_err(),
            StorageError::NotFound
        ));
    }
}
