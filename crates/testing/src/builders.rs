//! Fluent builder pattern for constructing test data.
//!
//! This module provides builder structs for tables, metadata, and runs with
//! a fluent API for customization.

use crate::fixtures::table_to_csv;
use graph_challenge_domain::{
    Dataset, Metadata, ModelType, Run, RunHandle, Table, GRAPH_ID_COLUMN, TARGET_COLUMN,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Builder for raw text tables
#[derive(Clone, Debug)]
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableBuilder {
    /// Start a table with the `graph_id,target` header
    pub fn new() -> Self {
        Self {
            columns: vec![GRAPH_ID_COLUMN.to_string(), TARGET_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append a row of raw cells
    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Append a `graph_id,target` row
    pub fn assignment(mut self, graph_id: i64, target: i64) -> Self {
        self.rows.push(vec![graph_id.to_string(), target.to_string()]);
        self
    }

    pub fn assignments(self, pairs: &[(i64, i64)]) -> Self {
        pairs
            .iter()
            .fold(self, |builder, (id, target)| builder.assignment(*id, *target))
    }

    pub fn build(self) -> Table {
        Table::new(self.columns, self.rows)
    }

    /// Render as comma-separated text with a header row
    pub fn to_csv(&self) -> String {
        table_to_csv(&self.clone().build())
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for run metadata
#[derive(Clone, Debug)]
pub struct MetadataBuilder {
    team: String,
    model: String,
    model_type: ModelType,
    runtime_minutes: String,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self {
            team: "team-alpha".to_string(),
            model: "gin-baseline".to_string(),
            model_type: ModelType::Human,
            runtime_minutes: "12".to_string(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_model_type(mut self, model_type: ModelType) -> Self {
        self.model_type = model_type;
        self
    }

    pub fn with_runtime_minutes(mut self, runtime: impl Into<String>) -> Self {
        self.runtime_minutes = runtime.into();
        self
    }

    pub fn build(self) -> Metadata {
        Metadata {
            team: self.team,
            model: self.model,
            model_type: self.model_type,
            runtime_minutes: self.runtime_minutes,
        }
    }

    /// The metadata as a participant would write it in `metadata.json`
    pub fn to_json(&self) -> Value {
        json!({
            "team": self.team,
            "model": self.model,
            "model_type": self.model_type.as_str(),
            "runtime_minutes": self.runtime_minutes,
        })
    }
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for complete runs
#[derive(Clone, Debug)]
pub struct RunBuilder {
    handle: RunHandle,
    metadata: Metadata,
    predictions: BTreeMap<Dataset, Table>,
}

impl RunBuilder {
    /// A run under `team_folder` whose metadata declares the same team
    pub fn new(team_folder: impl Into<String>, run_name: impl Into<String>) -> Self {
        let handle = RunHandle::new(team_folder, run_name);
        let metadata = MetadataBuilder::new()
            .with_team(handle.team_folder.clone())
            .build();
        Self {
            handle,
            metadata,
            predictions: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_predictions(mut self, dataset: Dataset, table: Table) -> Self {
        self.predictions.insert(dataset, table);
        self
    }

    pub fn handle(&self) -> &RunHandle {
        &self.handle
    }

    pub fn build(self) -> Run {
        Run {
            handle: self.handle,
            metadata: self.metadata,
            predictions: self.predictions,
        }
    }
}
