use crate::dependency::{DependencyGraph, EdgeOutcome};
use crate::error::{Result, ScorecardError};
use crate::index::{InorderIter, NameIndex};
use crate::limits::{truncate_name, Limits};
use crate::types::{Kpi, Perspective};
use serde::Serialize;

/// Result of [`Registry::add_perspective_if_absent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerspectiveOutcome {
    /// Appended at this index
    Created(usize),
    /// Already present (case-insensitive) at this index
    Existing(usize),
    /// Empty name, nothing done
    Ignored,
}

/// Outgoing dependencies of one perspective
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyListing {
    pub name: String,
    pub affects: Vec<String>,
}

/// What [`Registry::teardown`] released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Teardown {
    pub perspectives: usize,
    pub kpis: usize,
}

/// Single source of truth for perspectives, KPIs and dependencies.
///
/// The name table (inside the dependency graph) and the name index always
/// hold the same set of names; every mutation goes through this type.
#[derive(Debug, Clone)]
pub struct Registry {
    index: NameIndex,
    graph: DependencyGraph,
    limits: Limits,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            index: NameIndex::new(),
            graph: DependencyGraph::with_capacity(limits.max_perspectives),
            limits,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Add a perspective unless a case-insensitive match exists.
    ///
    /// Names longer than the configured limit are truncated. Empty names are
    /// ignored. A full table returns [`ScorecardError::CapacityExceeded`].
    pub fn add_perspective_if_absent(&mut self, name: &str) -> Result<PerspectiveOutcome> {
        let name = truncate_name(name, self.limits.max_name_len);
        if name.is_empty() {
            return Ok(PerspectiveOutcome::Ignored);
        }
        if let Some(idx) = self.graph.index_of(name) {
            return Ok(PerspectiveOutcome::Existing(idx));
        }

        let (idx, _) = self.graph.ensure_name(name).inspect_err(|_| {
            log::warn!(
                "Perspective limit reached ({}), rejecting {name:?}",
                self.limits.max_perspectives
            );
        })?;
        let inserted = self.index.insert(name);
        debug_assert!(inserted, "name index out of sync with name table");
        log::debug!("Added perspective {name:?} at index {idx}");

        Ok(PerspectiveOutcome::Created(idx))
    }

    /// Add edge `from -> to`, creating either perspective when unknown.
    ///
    /// When the new endpoints do not both fit, neither is created.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<EdgeOutcome> {
        let limit = self.limits.max_name_len;
        let (from_key, to_key) = (truncate_name(from, limit), truncate_name(to, limit));
        let is_new = |key: &str| !key.is_empty() && self.graph.index_of(key).is_none();
        let mut missing = usize::from(is_new(from_key));
        if is_new(to_key) && !to_key.eq_ignore_ascii_case(from_key) {
            missing += 1;
        }
        if self.len() + missing > self.limits.max_perspectives {
            log::warn!(
                "Perspective limit reached ({}), rejecting {from:?} -> {to:?}",
                self.limits.max_perspectives
            );
            return Err(ScorecardError::CapacityExceeded {
                limit: self.limits.max_perspectives,
            });
        }

        self.add_perspective_if_absent(from)?;
        self.add_perspective_if_absent(to)?;

        let (Some(fi), Some(ti)) = (self.index_of(from), self.index_of(to)) else {
            log::warn!("Dependency endpoints unresolvable: {from:?} -> {to:?}");
            return Err(ScorecardError::NotFound(format!("{from} -> {to}")));
        };

        let outcome = self.graph.add_edge(fi, ti)?;
        log::debug!("Dependency {from:?} -> {to:?}: {outcome:?}");
        Ok(outcome)
    }

    /// Attach a KPI to `perspective`, creating the perspective when new.
    /// The KPI becomes the first one listed for that perspective.
    pub fn add_kpi(
        &mut self,
        perspective: &str,
        kpi: &str,
        target: f64,
        achieved: f64,
    ) -> Result<()> {
        let kpi = truncate_name(kpi, self.limits.max_name_len);
        if kpi.is_empty() {
            return Err(ScorecardError::InvalidInput(
                "KPI name cannot be empty".to_string(),
            ));
        }
        if !target.is_finite() {
            return Err(ScorecardError::InvalidInput(format!(
                "target must be a finite number, got {target}"
            )));
        }
        if !achieved.is_finite() || achieved < 0.0 {
            return Err(ScorecardError::InvalidInput(format!(
                "achieved must be a non-negative number, got {achieved}"
            )));
        }

        self.add_perspective_if_absent(perspective)?;
        let key = truncate_name(perspective, self.limits.max_name_len);
        let node = self
            .index
            .find_mut(key)
            .ok_or_else(|| ScorecardError::NotFound(perspective.to_string()))?;

        node.push_kpi(Kpi::new(kpi, target, achieved));
        log::debug!("Added KPI {kpi:?} under {:?}", node.name());
        Ok(())
    }

    /// Stable index of `name` in the name table
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.graph
            .index_of(truncate_name(name, self.limits.max_name_len))
    }

    pub fn perspective(&self, name: &str) -> Option<&Perspective> {
        self.index
            .find(truncate_name(name, self.limits.max_name_len))
    }

    /// Names in insertion order
    pub fn perspectives(&self) -> impl Iterator<Item = &str> {
        self.graph.names()
    }

    /// Each perspective (insertion order) with its outgoing neighbours
    pub fn dependencies(&self) -> Vec<DependencyListing> {
        self.graph
            .names()
            .enumerate()
            .map(|(idx, name)| DependencyListing {
                name: name.to_string(),
                affects: self
                    .graph
                    .neighbors(idx)
                    .into_iter()
                    .filter_map(|j| self.graph.name(j).map(str::to_string))
                    .collect(),
            })
            .collect()
    }

    /// Perspectives in case-sensitive lexicographic order
    pub fn inorder(&self) -> InorderIter<'_> {
        self.index.iter()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Release every perspective, KPI and edge
    pub fn teardown(&mut self) -> Teardown {
        let (perspectives, kpis) = self.index.clear();
        self.graph.clear();
        log::debug!("Released {perspectives} perspectives and {kpis} KPIs");
        Teardown { perspectives, kpis }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
