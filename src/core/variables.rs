//! Block output variable store
//!
//! Blocks produce named output variables (dataframes, analyses) consumed by
//! downstream blocks. This module holds them in memory, keyed by pipeline
//! uuid, block uuid, and variable uuid. Persistence formats are handled
//! elsewhere.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

type BlockVariables = HashMap<String, serde_json::Value>;
type PipelineVariables = HashMap<String, BlockVariables>;

/// Thread-safe in-memory store for block output variables
#[derive(Clone, Default)]
pub struct VariableStore {
    variables: Arc<RwLock<HashMap<String, PipelineVariables>>>,
}

impl VariableStore {
    /// Create a new empty variable store
    pub fn new() -> Self {
        Self {
            variables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a variable, overwriting any previous value
    pub fn add_variable(
        &self,
        pipeline_uuid: &str,
        block_uuid: &str,
        variable_uuid: &str,
        data: serde_json::Value,
    ) {
        let mut variables = self.variables.write();
        variables
            .entry(pipeline_uuid.to_string())
            .or_default()
            .entry(block_uuid.to_string())
            .or_default()
            .insert(variable_uuid.to_string(), data);
    }

    /// Fetch a variable, if present
    pub fn get_variable(
        &self,
        pipeline_uuid: &str,
        block_uuid: &str,
        variable_uuid: &str,
    ) -> Option<serde_json::Value> {
        let variables = self.variables.read();
        variables
            .get(pipeline_uuid)?
            .get(block_uuid)?
            .get(variable_uuid)
            .cloned()
    }

    /// Uuids of all variables a block has produced, sorted
    pub fn variable_uuids(&self, pipeline_uuid: &str, block_uuid: &str) -> Vec<String> {
        let variables = self.variables.read();
        let mut uuids: Vec<String> = variables
            .get(pipeline_uuid)
            .and_then(|p| p.get(block_uuid))
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default();
        uuids.sort();
        uuids
    }

    /// Drop every variable a block has produced (e.g., on block removal)
    pub fn remove_block_variables(&self, pipeline_uuid: &str, block_uuid: &str) {
        let mut variables = self.variables.write();
        if let Some(pipeline) = variables.get_mut(pipeline_uuid) {
            pipeline.remove(block_uuid);
        }
    }
}
