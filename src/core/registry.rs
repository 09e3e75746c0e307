//! Pipeline Registry - Central registry for managing loaded pipelines
//!
//! This module provides a thread-safe registry for registering, discovering,
//! and managing pipelines in the workspace. It supports:
//! - Pipeline registration and unregistration
//! - Pipeline lookup by uuid
//! - Search by name or uuid substring
//! - Edge validation on registration

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::pipeline::{Pipeline, PipelineError};

/// Registry errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Pipeline with given uuid was not found
    #[error("Pipeline not found: {0}")]
    PipelineNotFound(String),

    /// Attempted to register a pipeline with duplicate uuid
    #[error("Duplicate pipeline uuid: {0}")]
    DuplicatePipeline(String),

    /// Pipeline validation failed
    #[error("Validation error: {0}")]
    ValidationError(#[from] PipelineError),
}

/// Pipeline registry for managing all loaded pipelines
///
/// The registry uses `Arc<RwLock<HashMap>>` for thread-safe access,
/// supporting concurrent reads and exclusive writes via parking_lot's
/// RwLock.
#[derive(Clone, Default)]
pub struct PipelineRegistry {
    pipelines: Arc<RwLock<HashMap<String, Pipeline>>>,
}

impl PipelineRegistry {
    /// Create a new empty pipeline registry
    pub fn new() -> Self {
        Self {
            pipelines: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a pipeline in the registry
    ///
    /// Validates the pipeline's edges before insertion.
    ///
    /// # Errors
    /// * `DuplicatePipeline` if the uuid is already registered
    /// * `ValidationError` if the pipeline has dangling edges
    pub fn register(&self, pipeline: Pipeline) -> Result<(), RegistryError> {
        pipeline.validate()?;

        let mut pipelines = self.pipelines.write();
        if pipelines.contains_key(&pipeline.uuid) {
            return Err(RegistryError::DuplicatePipeline(pipeline.uuid));
        }

        debug!(uuid = %pipeline.uuid, "registering pipeline");
        pipelines.insert(pipeline.uuid.clone(), pipeline);
        Ok(())
    }

    /// Unregister a pipeline, returning it
    pub fn unregister(&self, uuid: &str) -> Result<Pipeline, RegistryError> {
        let mut pipelines = self.pipelines.write();

        debug!(uuid = %uuid, "unregistering pipeline");
        pipelines
            .remove(uuid)
            .ok_or_else(|| RegistryError::PipelineNotFound(uuid.to_string()))
    }

    /// Get a snapshot of a pipeline by uuid
    pub fn get(&self, uuid: &str) -> Result<Pipeline, RegistryError> {
        let pipelines = self.pipelines.read();

        pipelines
            .get(uuid)
            .cloned()
            .ok_or_else(|| RegistryError::PipelineNotFound(uuid.to_string()))
    }

    /// Uuids of all registered pipelines, sorted
    pub fn uuids(&self) -> Vec<String> {
        let pipelines = self.pipelines.read();
        let mut uuids: Vec<String> = pipelines.keys().cloned().collect();
        uuids.sort();
        uuids
    }

    /// Search pipelines by name or uuid substring (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<Pipeline> {
        let pipelines = self.pipelines.read();
        let query = query.to_lowercase();

        pipelines
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&query) || p.uuid.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Number of registered pipelines
    pub fn count(&self) -> usize {
        let pipelines = self.pipelines.read();
        pipelines.len()
    }

    /// Check if a pipeline with the given uuid exists
    pub fn contains(&self, uuid: &str) -> bool {
        let pipelines = self.pipelines.read();
        pipelines.contains_key(uuid)
    }

    /// Remove all registered pipelines
    pub fn clear(&self) {
        let mut pipelines = self.pipelines.write();
        pipelines.clear();
    }
}
