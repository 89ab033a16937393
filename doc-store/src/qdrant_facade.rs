//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding away the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.

use std::time::Duration;

use crate::config::{DistanceKind, StoreConfig, VectorSpace};
use crate::errors::StoreError;

use qdrant_client::Payload;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter,
    GetPointsBuilder, PointId, PointStruct, SearchParamsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Deterministic UUIDv5 point id derived from a filename.
///
/// Qdrant point ids must be integers or UUIDs, so path-like filenames are
/// mapped through a stable namespace hash.
pub fn stable_point_id(filename: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, filename.as_bytes()).to_string()
}

/// A facade over the Qdrant client to keep the rest of the code clean and stable.
///
/// This struct encapsulates:
/// - The underlying Qdrant client.
/// - The target collection name.
/// - The distance function used in the vector space.
pub struct QdrantFacade {
    pub(crate) client: Qdrant,
    pub(crate) collection: String,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the modern builder-based API of `qdrant-client` and supports
    /// optional API key authentication. Every call is bounded by the
    /// configured timeout.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?; // Early validation of config.

        let mut builder =
            Qdrant::from_url(&cfg.qdrant_url).timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
        })
    }

    /// Ensures that the collection exists in Qdrant.
    ///
    /// - If the collection already exists → no-op.
    /// - If missing → creates it with the given vector space configuration.
    pub async fn ensure_collection(&self, space: &VectorSpace) -> Result<(), StoreError> {
        info!(
            "Ensuring collection '{}' with size={} distance={:?}",
            self.collection, space.size, self.distance
        );

        // Try to fetch collection info first.
        match self.client.collection_info(&self.collection).await {
            Ok(_) => {
                debug!("Collection '{}' already exists", self.collection);
                return Ok(());
            }
            Err(err) => {
                warn!(
                    "Collection '{}' not found, will be created (error={})",
                    self.collection, err
                );
            }
        }

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(space.size as u64, distance)),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!("Collection '{}' created successfully", self.collection);
        Ok(())
    }

    /// Upserts (inserts or updates) a batch of points into the collection.
    pub async fn upsert_points(&self, points: Vec<PointStruct>) -> Result<(), StoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(());
        }

        debug!(
            "Upserting {} points into collection '{}'",
            points.len(),
            self.collection
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(())
    }

    /// Performs a similarity search in Qdrant.
    ///
    /// Returns `(score, payload)` tuples with results sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        exact: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        debug!(
            "Searching in '{}' with limit={}, exact={}",
            self.collection, limit, exact
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, limit).with_payload(true);
        if exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        // Convert raw Qdrant payloads into JSON.
        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }

    /// Exact number of points in the collection.
    ///
    /// A missing collection counts as empty rather than an error, so an
    /// un-ingested deployment reports zero documents.
    pub async fn count(&self) -> Result<u64, StoreError> {
        match self
            .client
            .count(CountPointsBuilder::new(&self.collection).exact(true))
            .await
        {
            Ok(res) => Ok(res.result.map(|r| r.count).unwrap_or(0)),
            Err(err) => {
                warn!(
                    "Count on '{}' failed, treating as empty (error={})",
                    self.collection, err
                );
                Ok(0)
            }
        }
    }

    /// Deletes every point in the collection; returns the number deleted.
    pub async fn delete_all(&self) -> Result<u64, StoreError> {
        let before = self.count().await?;

        // An empty filter selects all points.
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(Filter::default())
                    .wait(true),
            )
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        info!(
            "Deleted {} points from collection '{}'",
            before, self.collection
        );
        Ok(before)
    }

    /// Whether a point with the given (filename-derived) id exists.
    pub async fn exists(&self, filename: &str) -> Result<bool, StoreError> {
        let pid: PointId = stable_point_id(filename).into();
        match self
            .client
            .get_points(GetPointsBuilder::new(&self.collection, vec![pid]))
            .await
        {
            Ok(res) => Ok(!res.result.is_empty()),
            // A missing collection means nothing has been ingested yet.
            Err(_) => Ok(false),
        }
    }

    /// Builds a Qdrant point from record parts.
    pub fn make_point(
        filename: &str,
        content: &str,
        is_faq: bool,
        embedding: Vec<f32>,
    ) -> PointStruct {
        let mut payload = Payload::new();
        payload.insert("filename", filename);
        payload.insert("content", content);
        payload.insert("is_faq", is_faq);

        let pid: PointId = stable_point_id(filename).into();
        PointStruct::new(pid, embedding, payload)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            // For unsupported nested types, fallback to Null for safety.
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ids_are_stable_and_distinct() {
        assert_eq!(stable_point_id("faq/becas.md"), stable_point_id("faq/becas.md"));
        assert_ne!(stable_point_id("faq/becas.md"), stable_point_id("general.md"));
    }
}
