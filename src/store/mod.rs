//! Snapshot access to the place table.
//!
//! The proximity finders depend only on the [`PlaceStore`] trait, so
//! tests can substitute an in-memory store; [`DbPlaceStore`] is the
//! sea-orm implementation the HTTP layer wires in.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use thiserror::Error;
use uuid::Uuid;

use crate::entities::place;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("place store unavailable: {0}")]
    Unavailable(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// One place as observed in a query snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPlace {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<place::Model> for StoredPlace {
    fn from(model: place::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}

#[async_trait]
pub trait PlaceStore {
    /// Return every stored place as one consistent snapshot.
    async fn list_all(&self) -> Result<Vec<StoredPlace>, StoreError>;
}

pub struct DbPlaceStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbPlaceStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlaceStore for DbPlaceStore<'_> {
    async fn list_all(&self) -> Result<Vec<StoredPlace>, StoreError> {
        let rows = place::Entity::find().all(self.db).await?;
        Ok(rows.into_iter().map(StoredPlace::from).collect())
    }
}
