use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use sheetkeep_domain::{Character, CharacterDocument, CharacterId, UserId};

use super::{body_object, merge_top_level, parse_document};
use crate::infrastructure::ports::{CharacterStore, RandomPort, RepoError, CHARACTERS_COLLECTION};

struct Entry {
    seq: u64,
    body: Map<String, Value>,
}

/// Process-local document store. Contents are lost on restart.
pub struct InMemoryCharacterStore {
    documents: DashMap<CharacterId, Entry>,
    next_seq: AtomicU64,
    random: Arc<dyn RandomPort>,
}

impl InMemoryCharacterStore {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            documents: DashMap::new(),
            next_seq: AtomicU64::new(0),
            random,
        }
    }

    /// Store a raw body under a chosen id, as an older writer might have.
    pub fn insert_raw(&self, id: CharacterId, body: Map<String, Value>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.documents.insert(id, Entry { seq, body });
    }

    /// The stored body, exactly as held.
    pub fn raw(&self, id: &CharacterId) -> Option<Map<String, Value>> {
        self.documents.get(id).map(|entry| entry.body.clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn get(&self, id: &CharacterId) -> Result<Option<CharacterDocument>, RepoError> {
        let body = self.raw(id);
        body.map(|body| parse_document(Value::Object(body))).transpose()
    }

    async fn create(&self, character: &Character) -> Result<CharacterId, RepoError> {
        let body = body_object(character)?;
        let id = CharacterId::new(self.random.gen_uuid().simple().to_string());
        self.insert_raw(id.clone(), body);
        Ok(id)
    }

    async fn update(&self, id: &CharacterId, character: &Character) -> Result<(), RepoError> {
        let update = body_object(character)?;
        let mut entry = self
            .documents
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found(CHARACTERS_COLLECTION, id))?;
        merge_top_level(&mut entry.body, update);
        Ok(())
    }

    async fn delete(&self, id: &CharacterId) -> Result<(), RepoError> {
        self.documents.remove(id);
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<(CharacterId, CharacterDocument)>, RepoError> {
        let mut owned: Vec<(u64, CharacterId, Map<String, Value>)> = self
            .documents
            .iter()
            .filter(|entry| entry.body.get("userId").and_then(Value::as_str) == Some(owner.as_str()))
            .map(|entry| (entry.seq, entry.key().clone(), entry.body.clone()))
            .collect();
        owned.sort_by_key(|(seq, _, _)| *seq);

        owned
            .into_iter()
            .map(|(_, id, body)| Ok((id, parse_document(Value::Object(body))?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SequentialRandom;
    use serde_json::json;
    use sheetkeep_domain::Money;

    fn store() -> InMemoryCharacterStore {
        InMemoryCharacterStore::new(Arc::new(SequentialRandom::new()))
    }

    #[tokio::test]
    async fn template_round_trips() {
        let store = store();
        let original = Character::from_template(UserId::new("u1"));

        let id = store.create(&original).await.unwrap();
        let loaded = store.get(&id).await.unwrap().unwrap().backfill().unwrap();

        assert!(loaded.was_complete());
        assert_eq!(loaded.character, original);
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let err = store()
            .update(&CharacterId::new("nope"), &Character::from_template(UserId::new("u1")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_keeps_fields_the_body_does_not_name() {
        let store = store();
        let id = CharacterId::new("legacy");
        store.insert_raw(
            id.clone(),
            json!({"userId": "u1", "name": "Old", "homebrew": true})
                .as_object()
                .cloned()
                .unwrap(),
        );

        let mut character = store.get(&id).await.unwrap().unwrap().backfill().unwrap().character;
        character.money = Money::new(0, 100, 0);
        store.update(&id, &character).await.unwrap();

        let raw = store.raw(&id).unwrap();
        assert_eq!(raw["homebrew"], true);
        assert_eq!(raw["money"]["ss"], 100);
    }

    #[tokio::test]
    async fn list_filters_by_owner_in_creation_order() {
        let store = store();
        let mine_a = store.create(&Character::from_template(UserId::new("me"))).await.unwrap();
        store.create(&Character::from_template(UserId::new("you"))).await.unwrap();
        let mine_b = store.create(&Character::from_template(UserId::new("me"))).await.unwrap();

        let listed: Vec<CharacterId> = store
            .list_by_owner(&UserId::new("me"))
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        assert_eq!(listed, vec![mine_a, mine_b]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store();
        let id = store.create(&Character::from_template(UserId::new("u1"))).await.unwrap();

        store.delete(&id).await.unwrap();
        store.delete(&id).await.unwrap();

        assert!(store.get(&id).await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
