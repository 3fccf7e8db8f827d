//! Scenario runner for batch projections
//!
//! Holds a pre-built archetype table so many allocations (or several period
//! model configs) can be projected without re-reading CSV files.

use std::path::Path;

use crate::allocation::SellerAllocation;
use crate::archetype::{loader, ArchetypeTable};
use crate::error::ProjectionError;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-loaded scenario runner for efficient batch projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    table: ArchetypeTable,
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the built-in monthly seller table
    pub fn new() -> Self {
        Self {
            table: ArchetypeTable::default_monthly_sellers(),
            config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a specific table and config
    pub fn with_table(table: ArchetypeTable, config: ProjectionConfig) -> Self {
        Self { table, config }
    }

    /// Create a runner by loading the table from a CSV file
    pub fn from_csv_file(
        path: &Path,
        config: ProjectionConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            table: loader::load_table(path)?,
            config,
        })
    }

    /// Run a single allocation
    pub fn run(&self, allocation: &SellerAllocation) -> Result<ProjectionResult, ProjectionError> {
        let engine = ProjectionEngine::new(self.table.clone(), self.config.clone());
        engine.project(allocation)
    }

    /// Run a batch of allocations with the same table and config
    pub fn run_batch(
        &self,
        allocations: &[SellerAllocation],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        let engine = ProjectionEngine::new(self.table.clone(), self.config.clone());
        allocations.iter().map(|a| engine.project(a)).collect()
    }

    /// Run the same allocation under several configs (e.g. both period models)
    pub fn run_configs(
        &self,
        allocation: &SellerAllocation,
        configs: &[ProjectionConfig],
    ) -> Result<Vec<ProjectionResult>, ProjectionError> {
        configs
            .iter()
            .map(|config| {
                let engine = ProjectionEngine::new(self.table.clone(), config.clone());
                engine.project(allocation)
            })
            .collect()
    }

    /// Reference to the underlying table
    pub fn table(&self) -> &ArchetypeTable {
        &self.table
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
