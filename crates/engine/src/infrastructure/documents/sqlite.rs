//! SQLite-backed character documents.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sheetkeep_domain::{Character, CharacterDocument, CharacterId, UserId};
use sqlx::{Row, SqlitePool};

use super::{body_object, merge_top_level, parse_document};
use crate::infrastructure::ports::{
    CharacterStore, ClockPort, RandomPort, RepoError, CHARACTERS_COLLECTION,
};

/// One row per document; the body is stored as JSON text.
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SqliteCharacterStore {
    pub async fn new(
        db_path: &str,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_characters_owner ON characters (owner_id)")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;

        Ok(Self {
            pool,
            clock,
            random,
        })
    }

    fn decode(body: &str) -> Result<CharacterDocument, RepoError> {
        let value: Value = serde_json::from_str(body).map_err(RepoError::serialization)?;
        parse_document(value)
    }
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn get(&self, id: &CharacterId) -> Result<Option<CharacterDocument>, RepoError> {
        let row = sqlx::query("SELECT body FROM characters WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                Ok(Some(Self::decode(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, character: &Character) -> Result<CharacterId, RepoError> {
        let body = serde_json::to_string(&body_object(character)?)
            .map_err(RepoError::serialization)?;
        let id = CharacterId::new(self.random.gen_uuid().simple().to_string());
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO characters (id, owner_id, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.as_str())
        .bind(character.user_id.as_str())
        .bind(body)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("create_character", e))?;

        Ok(id)
    }

    async fn update(&self, id: &CharacterId, character: &Character) -> Result<(), RepoError> {
        let update = body_object(character)?;
        let now = self.clock.now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("update_character", e))?;

        let row = sqlx::query("SELECT body FROM characters WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepoError::database("update_character", e))?
            .ok_or_else(|| RepoError::not_found(CHARACTERS_COLLECTION, id))?;

        let stored: String = row.get("body");
        let mut body: Map<String, Value> =
            serde_json::from_str(&stored).map_err(RepoError::serialization)?;
        merge_top_level(&mut body, update);
        let merged = serde_json::to_string(&body).map_err(RepoError::serialization)?;

        sqlx::query("UPDATE characters SET body = ?, owner_id = ?, updated_at = ? WHERE id = ?")
            .bind(merged)
            .bind(character.user_id.as_str())
            .bind(now)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("update_character", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("update_character", e))?;

        Ok(())
    }

    async fn delete(&self, id: &CharacterId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(CharacterId, CharacterDocument)>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, body FROM characters WHERE owner_id = ? ORDER BY created_at, rowid",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_characters", e))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let body: String = row.get("body");
                Ok((CharacterId::new(id), Self::decode(&body)?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{SequentialRandom, SystemClock};
    use sheetkeep_domain::{CharacteristicName, Characteristic, Talent};

    async fn store(dir: &tempfile::TempDir) -> SqliteCharacterStore {
        let path = dir.path().join("sheetkeep.db");
        SqliteCharacterStore::new(
            path.to_str().unwrap(),
            Arc::new(SystemClock::new()),
            Arc::new(SequentialRandom::new()),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn template_round_trips_through_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let original = Character::from_template(UserId::new("u1"));

        let id = store.create(&original).await.unwrap();
        let loaded = store.get(&id).await.unwrap().unwrap().backfill().unwrap();

        assert!(loaded.was_complete());
        assert_eq!(loaded.character, original);
    }

    #[tokio::test]
    async fn update_merges_and_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let store = store(&dir).await;
            let mut character = Character::from_template(UserId::new("u1"));
            let id = store.create(&character).await.unwrap();

            character.characteristics.weapon_skill = Characteristic::new(30, 10);
            character.talents.push(Talent::new("Warrior Born"));
            store.update(&id, &character).await.unwrap();
            id
        };

        let reopened = store(&dir).await;
        let loaded = reopened.get(&id).await.unwrap().unwrap().backfill().unwrap().character;
        assert_eq!(loaded.characteristics.total(CharacteristicName::WeaponSkill), 40);
        assert_eq!(loaded.talents, vec![Talent::new("Warrior Born")]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = store(&dir)
            .await
            .update(&CharacterId::new("missing"), &Character::from_template(UserId::new("u1")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let a = store.create(&Character::from_template(UserId::new("me"))).await.unwrap();
        let _other = store.create(&Character::from_template(UserId::new("you"))).await.unwrap();
        let b = store.create(&Character::from_template(UserId::new("me"))).await.unwrap();

        let mine: Vec<_> = store
            .list_by_owner(&UserId::new("me"))
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(mine, vec![a.clone(), b.clone()]);

        store.delete(&a).await.unwrap();
        assert!(store.get(&a).await.unwrap().is_none());
        assert_eq!(store.list_by_owner(&UserId::new("me")).await.unwrap().len(), 1);
    }
}
