use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use switchcheck_core::config::SwitchCheckConfig;
use switchcheck_core::store::FactStore;
use switchcheck_core::types::{Diagnostic, DiagnosticKind, Position};
use switchcheck_parsers::model::{GoFile, GoPackage, SwitchStmt};
use switchcheck_parsers::resolver::SemanticResolver;

use crate::directive::{self, Directive};
use crate::message::format_missing;
use crate::registry::ModuleRegistry;

/// Uncovered names shown before the list is cut off with `more`.
pub const MAX_LISTED: usize = 3;

/// How directive exclusions are compared against qualified constant names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcludeMatch {
    /// `Hoge` excludes every name containing `Hoge`, `c.TestKindHogeExtra`
    /// included.
    #[default]
    Substring,
    /// The exclusion must equal the qualified name or its unqualified part.
    Exact,
}

impl ExcludeMatch {
    pub fn matches(self, qualified: &str, pattern: &str) -> bool {
        match self {
            ExcludeMatch::Substring => qualified.contains(pattern),
            ExcludeMatch::Exact => {
                let local = qualified.rsplit_once('.').map_or(qualified, |(_, n)| n);
                qualified == pattern || local == pattern
            }
        }
    }
}

/// Options scoped to one checker invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Reserved for inserting missing cases; currently has no effect.
    pub fill: bool,
    pub exclude_match: ExcludeMatch,
}

impl CheckOptions {
    pub fn from_config(config: &SwitchCheckConfig) -> Self {
        Self {
            fill: config.fill,
            exclude_match: if config.exact_exclude {
                ExcludeMatch::Exact
            } else {
                ExcludeMatch::Substring
            },
        }
    }
}

/// Result of checking every switch of one package.
#[derive(Debug, Clone, Default)]
pub struct PackageOutcome {
    pub diagnostics: Vec<Diagnostic>,
    /// Switches carrying a directive, malformed ones included.
    pub annotated: usize,
}

/// Checks annotated switches of one package against published catalogs.
pub struct CoverageChecker<'a> {
    resolver: &'a dyn SemanticResolver,
    registry: &'a ModuleRegistry,
    store: &'a dyn FactStore,
    options: CheckOptions,
}

impl<'a> CoverageChecker<'a> {
    pub fn new(
        resolver: &'a dyn SemanticResolver,
        registry: &'a ModuleRegistry,
        store: &'a dyn FactStore,
        options: CheckOptions,
    ) -> Self {
        Self {
            resolver,
            registry,
            store,
            options,
        }
    }

    /// Check every switch of `pkg` in source order.
    pub fn check_package(&self, pkg: &GoPackage) -> PackageOutcome {
        let mut outcome = PackageOutcome::default();
        for (file, switch) in pkg.switches() {
            match directive::parse(&switch.comments) {
                Ok(d) if !d.present => continue,
                Ok(d) => {
                    outcome.annotated += 1;
                    outcome.diagnostics.extend(self.check_switch(file, switch, &d));
                }
                Err(e) => {
                    outcome.annotated += 1;
                    outcome.diagnostics.push(self.diagnostic(
                        file,
                        switch,
                        DiagnosticKind::MalformedDirective,
                        format!("malformed directive: {e}"),
                    ));
                }
            }
        }
        outcome
    }

    /// Check one switch whose directive is present.
    pub fn check_switch(
        &self,
        file: &GoFile,
        switch: &SwitchStmt,
        directive: &Directive,
    ) -> Option<Diagnostic> {
        if self.options.fill {
            tracing::debug!(
                file = %file.path,
                line = switch.line,
                "fill requested; case insertion is not implemented"
            );
        }

        let unexpected = |display: &str| {
            self.diagnostic(
                file,
                switch,
                DiagnosticKind::UnexpectedType,
                format!("unexpected type:{display}"),
            )
        };

        let ty = match self.resolver.tag_type(switch) {
            Ok(ty) => ty,
            Err(display) => return Some(unexpected(&display)),
        };
        let module = match &ty.package {
            None => self.registry.own(),
            Some(path) => match self.registry.resolve(path) {
                Some(handle) => handle,
                None => return Some(unexpected(&ty.key())),
            },
        };
        let Some(catalog) = self.store.import(module) else {
            return Some(unexpected(&ty.key()));
        };

        let used: HashSet<String> = switch
            .cases
            .iter()
            .filter_map(|expr| self.resolver.resolve(expr))
            .map(|name| name.qualified)
            .collect();

        let mut uncovered = catalog.constants(&ty.key()).iter().filter(|name| {
            !used.contains(name.as_str()) && !self.is_excluded(name, &directive.exclude_names)
        });
        let listed: Vec<String> = uncovered.by_ref().take(MAX_LISTED).cloned().collect();
        if listed.is_empty() {
            return None;
        }
        let truncated = uncovered.next().is_some();

        Some(self.diagnostic(
            file,
            switch,
            DiagnosticKind::MissingCases,
            format_missing(&listed, truncated),
        ))
    }

    fn is_excluded(&self, qualified: &str, excludes: &[String]) -> bool {
        excludes
            .iter()
            .any(|pattern| self.options.exclude_match.matches(qualified, pattern))
    }

    fn diagnostic(
        &self,
        file: &GoFile,
        switch: &SwitchStmt,
        kind: DiagnosticKind,
        message: String,
    ) -> Diagnostic {
        Diagnostic {
            module: self.resolver.module_path().to_string(),
            position: Position {
                file: file.path.clone(),
                line: switch.line,
                column: switch.column,
            },
            kind,
            message,
        }
    }
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
