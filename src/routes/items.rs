use axum::{
    extract::{Path, Query, State},
    response::Json,
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aspect::{log_exceptions, log_returning, track_time, Signature};
use crate::error::HandlerError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemFilter {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

/// Read-only item store built at startup.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            Item { id: 1, name: "desk".to_string() },
            Item { id: 2, name: "lamp".to_string() },
            Item { id: 3, name: "chair".to_string() },
        ])
    }

    pub async fn find(&self, id: u32) -> Result<Item, HandlerError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| HandlerError::NotFound("not found".to_string()))
    }

    pub async fn search(&self, name: Option<&str>) -> Result<Vec<Item>, HandlerError> {
        Ok(self
            .items
            .iter()
            .filter(|item| name.map_or(true, |name| item.name.contains(name)))
            .cloned()
            .collect())
    }

    /// Validates a new item and assigns the next id. Nothing is stored.
    pub async fn prepare(&self, name: &str) -> Result<Item, HandlerError> {
        if name.trim().is_empty() {
            return Err(HandlerError::BadRequest("name must not be empty".to_string()));
        }
        let next_id = self
            .items
            .iter()
            .map(|item| item.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| HandlerError::Internal(anyhow::anyhow!("item id space exhausted")))?;
        Ok(Item {
            id: next_id,
            name: name.to_string(),
        })
    }
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> Result<Json<Vec<Item>>, HandlerError> {
    info!("List items requested");

    let signature = Signature::of::<ItemCatalog>("search");
    let search = track_time(
        signature,
        &[&filter.name],
        state.catalog.search(filter.name.as_deref()),
    );
    let items = search.await?;

    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Item>, HandlerError> {
    let signature = Signature::of::<ItemCatalog>("find");
    let item = log_exceptions(signature, log_returning(signature, state.catalog.find(id))).await?;

    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    Form(payload): Form<CreateItemRequest>,
) -> Result<Json<Item>, HandlerError> {
    let signature = Signature::of::<ItemCatalog>("prepare");
    let item = log_exceptions(signature, state.catalog.prepare(&payload.name))
        .await
        .inspect_err(|_| warn!("Invalid item creation request"))?;

    Ok(Json(item))
}
