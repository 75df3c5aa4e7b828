//! In-memory plant repository.
//!
//! Used when no `DATABASE_URL` is configured and by the API tests. The write
//! lock is held across the slot check and the mutation, so concurrent
//! requests cannot both claim the same slot.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use garden_core::{Error, NewPlant, PlantRecord, PlantRepository, Result, UpdatePlantRequest};

use crate::plants::occupied_message;

#[derive(Debug, Default)]
pub struct InMemoryPlantRepository {
    plants: RwLock<Vec<PlantRecord>>,
}

impl InMemoryPlantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_plants(plants: Vec<PlantRecord>) -> Self {
        Self {
            plants: RwLock::new(plants),
        }
    }

    pub async fn len(&self) -> usize {
        self.plants.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plants.read().await.is_empty()
    }
}

fn slot_taken(plants: &[PlantRecord], floor: i32, slot_index: i32, except_id: Option<&str>) -> bool {
    plants.iter().any(|p| {
        p.floor == floor && p.slot_index == slot_index && Some(p.id.as_str()) != except_id
    })
}

#[async_trait]
impl PlantRepository for InMemoryPlantRepository {
    async fn list(&self) -> Result<Vec<PlantRecord>> {
        let mut plants = self.plants.read().await.clone();
        plants.sort_by_key(|p| (p.floor, p.slot_index));
        Ok(plants)
    }

    async fn get(&self, id: &str) -> Result<PlantRecord> {
        self.plants
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("plant {}", id)))
    }

    async fn insert(&self, plant: NewPlant) -> Result<PlantRecord> {
        let mut plants = self.plants.write().await;
        if slot_taken(&plants, plant.floor, plant.slot_index, None) {
            return Err(Error::Conflict(occupied_message(plant.floor, plant.slot_index)));
        }

        let record = PlantRecord {
            id: Uuid::now_v7().to_string(),
            name: plant.name,
            floor: plant.floor,
            slot_index: plant.slot_index,
            start_date: plant.start_date,
            cycle_adjustment_days: plant.cycle_adjustment_days,
            cycle_days: plant.cycle_days,
            target_humidity_pct: plant.target_humidity_pct,
            created_at: Utc::now(),
            updated_at: None,
        };
        plants.push(record.clone());

        debug!(subsystem = "db", component = "memory", op = "insert", plant_id = %record.id, "Plant stored");
        Ok(record)
    }

    async fn update(&self, id: &str, changes: UpdatePlantRequest) -> Result<PlantRecord> {
        changes.validate()?;

        let mut plants = self.plants.write().await;
        let idx = plants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("plant {}", id)))?;

        let mut updated = plants[idx].clone();
        changes.apply_to(&mut updated);
        if changes.moves_slot(&plants[idx])
            && slot_taken(&plants, updated.floor, updated.slot_index, Some(id))
        {
            return Err(Error::Conflict(occupied_message(updated.floor, updated.slot_index)));
        }
        updated.updated_at = Some(Utc::now());
        plants[idx] = updated.clone();

        debug!(subsystem = "db", component = "memory", op = "update", plant_id = %id, "Plant updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut plants = self.plants.write().await;
        let idx = plants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("plant {}", id)))?;
        plants.remove(idx);

        debug!(subsystem = "db", component = "memory", op = "delete", plant_id = %id, "Plant removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::new_plant;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let repo = InMemoryPlantRepository::new();
        let plant = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();

        assert!(!plant.id.is_empty());
        assert!(plant.updated_at.is_none());
        assert_eq!(repo.get(&plant.id).await.unwrap(), plant);
    }

    #[tokio::test]
    async fn test_occupied_slot_conflicts_and_store_unchanged() {
        let repo = InMemoryPlantRepository::new();
        repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();

        let err = repo.insert(new_plant("Alface", 1, 0)).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(repo.len().await, 1);

        // same slot number on another floor is fine
        repo.insert(new_plant("Alface", 2, 0)).await.unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_floor_then_slot() {
        let repo = InMemoryPlantRepository::new();
        repo.insert(new_plant("C", 2, 0)).await.unwrap();
        repo.insert(new_plant("B", 1, 3)).await.unwrap();
        repo.insert(new_plant("A", 1, 1)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_stamps() {
        let repo = InMemoryPlantRepository::new();
        let plant = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();

        let updated = repo
            .update(
                &plant.id,
                UpdatePlantRequest {
                    target_humidity_pct: Some(75),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, plant.id);
        assert_eq!(updated.name, "Tomate");
        assert_eq!(updated.target_humidity_pct, 75);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_into_occupied_slot_conflicts() {
        let repo = InMemoryPlantRepository::new();
        let a = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();
        repo.insert(new_plant("Alface", 1, 1)).await.unwrap();

        let err = repo
            .update(
                &a.id,
                UpdatePlantRequest {
                    slot_index: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(repo.get(&a.id).await.unwrap().slot_index, 0);
    }

    #[tokio::test]
    async fn test_update_keeping_own_slot_is_allowed() {
        let repo = InMemoryPlantRepository::new();
        let a = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();

        let updated = repo
            .update(
                &a.id,
                UpdatePlantRequest {
                    floor: Some(1),
                    slot_index: Some(0),
                    name: Some("Tomate chucha".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Tomate chucha");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryPlantRepository::new();
        let err = repo
            .update("missing", UpdatePlantRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_values() {
        let repo = InMemoryPlantRepository::new();
        let a = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();
        let err = repo
            .update(
                &a.id,
                UpdatePlantRequest {
                    target_humidity_pct: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_store_unchanged() {
        let repo = InMemoryPlantRepository::new();
        repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();

        let err = repo.delete("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_frees_slot() {
        let repo = InMemoryPlantRepository::new();
        let a = repo.insert(new_plant("Tomate", 1, 0)).await.unwrap();
        repo.delete(&a.id).await.unwrap();

        assert!(repo.is_empty().await);
        repo.insert(new_plant("Alface", 1, 0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_inserts_into_one_slot() {
        let repo = Arc::new(InMemoryPlantRepository::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(new_plant(&format!("P{}", i), 1, 0)).await
            }));
        }

        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repo.len().await, 1);
    }
}
