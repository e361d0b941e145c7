use std::collections::HashMap;
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rayon::prelude::*;
use switchcheck_core::store::FactStore;
use switchcheck_core::types::{Diagnostic, ModuleTable};
use switchcheck_parsers::go::PackageIndex;
use switchcheck_parsers::model::GoPackage;
use switchcheck_parsers::workspace::{self, LoadError, LoadOptions, Workspace};

use crate::catalog_builder::export_catalog;
use crate::coverage::{CheckOptions, CoverageChecker, PackageOutcome};
use crate::registry::ModuleRegistry;
use crate::types::{CheckReport, FactsReport, PackageFacts};

const REPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("import cycle through package {package}")]
    ImportCycle { package: String },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Drives catalog export and coverage checking over a workspace.
///
/// Packages are processed in dependency levels: every package of a level
/// runs in parallel once all levels below it have exported their catalogs.
pub struct CheckEngine {
    store: Box<dyn FactStore>,
    options: CheckOptions,
    modules: ModuleTable,
}

impl CheckEngine {
    pub fn new(store: Box<dyn FactStore>) -> Self {
        Self::with_options(store, CheckOptions::default())
    }

    pub fn with_options(store: Box<dyn FactStore>, options: CheckOptions) -> Self {
        Self {
            store,
            options,
            modules: ModuleTable::new(),
        }
    }

    pub fn store(&self) -> &dyn FactStore {
        &*self.store
    }

    /// Handles interned so far. Stable across runs of one engine.
    pub fn modules(&self) -> &ModuleTable {
        &self.modules
    }

    /// Load the workspace at `root`, then [`check`](Self::check) it.
    pub fn check_path(
        &mut self,
        root: &Path,
        load: &LoadOptions,
    ) -> Result<CheckReport, EngineError> {
        let ws = workspace::load(root, load)?;
        self.check(&ws)
    }

    /// Export every package's catalog and check its annotated switches.
    pub fn check(&mut self, ws: &Workspace) -> Result<CheckReport, EngineError> {
        let outcomes = self.run(ws, true)?;

        let mut annotated = 0;
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        for outcome in outcomes {
            annotated += outcome.annotated;
            diagnostics.extend(outcome.diagnostics);
        }
        diagnostics.sort_by(|a, b| a.position.cmp(&b.position));

        let status = if diagnostics.is_empty() { "ok" } else { "error" };
        Ok(CheckReport {
            version: REPORT_VERSION.to_string(),
            command: "check".to_string(),
            status: status.to_string(),
            packages_analyzed: ws.packages.iter().map(|p| p.path.clone()).collect(),
            files_analyzed: ws.file_count(),
            switches_checked: annotated,
            diagnostics,
        })
    }

    /// Export every package's catalog without checking switches.
    pub fn facts(&mut self, ws: &Workspace) -> Result<FactsReport, EngineError> {
        self.run(ws, false)?;

        let packages = ws
            .packages
            .iter()
            .filter_map(|pkg| {
                let handle = self.modules.get(&pkg.path)?;
                let catalog = self.store.import(handle)?;
                Some(PackageFacts {
                    package: pkg.path.clone(),
                    fingerprint: self.store.fingerprint(handle).unwrap_or_default(),
                    types: catalog.len(),
                    constants: catalog.types().map(|t| catalog.constants(t).len()).sum(),
                    catalog: catalog.to_string(),
                })
            })
            .collect();

        Ok(FactsReport {
            version: REPORT_VERSION.to_string(),
            command: "facts".to_string(),
            packages,
        })
    }

    fn run(&mut self, ws: &Workspace, check: bool) -> Result<Vec<PackageOutcome>, EngineError> {
        let levels = dependency_levels(&ws.packages)?;
        let index = PackageIndex::build(&ws.packages);

        let names: HashMap<String, String> = ws
            .packages
            .iter()
            .map(|p| (p.path.clone(), p.name.clone()))
            .collect();
        let registries: Vec<ModuleRegistry> = ws
            .packages
            .iter()
            .map(|p| ModuleRegistry::build(p, &mut self.modules, &names))
            .collect();

        let store: &dyn FactStore = &*self.store;
        let options = self.options;
        let mut outcomes = Vec::with_capacity(ws.packages.len());
        for (depth, level) in levels.iter().enumerate() {
            tracing::debug!(level = depth, packages = level.len(), "analysing level");
            let level_outcomes: Vec<PackageOutcome> = level
                .par_iter()
                .filter_map(|&i| {
                    let pkg = &ws.packages[i];
                    let registry = &registries[i];
                    let resolver = index.resolver(&pkg.path)?;
                    export_catalog(pkg, registry.own(), &resolver, store);
                    if !check {
                        return None;
                    }
                    let outcome = CoverageChecker::new(&resolver, registry, store, options)
                        .check_package(pkg);
                    tracing::debug!(
                        package = %pkg.path,
                        annotated = outcome.annotated,
                        diagnostics = outcome.diagnostics.len(),
                        "package checked"
                    );
                    Some(outcome)
                })
                .collect();
            outcomes.extend(level_outcomes);
        }
        Ok(outcomes)
    }
}

/// Group package indices into levels: a package's workspace imports all sit
/// in strictly lower levels. Each level is sorted by index.
pub fn dependency_levels(packages: &[GoPackage]) -> Result<Vec<Vec<usize>>, EngineError> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..packages.len()).map(|i| graph.add_node(i)).collect();
    let by_path: HashMap<&str, NodeIndex> = packages
        .iter()
        .zip(&nodes)
        .map(|(p, n)| (p.path.as_str(), *n))
        .collect();

    for (pkg, &node) in packages.iter().zip(&nodes) {
        for imp in pkg.imports() {
            if let Some(&dep) = by_path.get(imp.path.as_str()) {
                if dep != node && !graph.contains_edge(dep, node) {
                    graph.add_edge(dep, node, ());
                }
            }
        }
    }

    let order = toposort(&graph, None).map_err(|cycle| EngineError::ImportCycle {
        package: packages[graph[cycle.node_id()]].path.clone(),
    })?;

    let mut depth = vec![0usize; packages.len()];
    for node in &order {
        let level = graph
            .neighbors_directed(*node, Direction::Incoming)
            .map(|dep| depth[graph[dep]] + 1)
            .max()
            .unwrap_or(0);
        depth[graph[*node]] = level;
    }

    let count = depth.iter().max().map_or(0, |d| d + 1);
    let mut levels = vec![Vec::new(); count];
    for (i, d) in depth.into_iter().enumerate() {
        levels[d].push(i);
    }
    Ok(levels)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
