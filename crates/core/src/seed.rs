use crate::error::{Result, ScorecardError};
use crate::limits::Limits;
use crate::registry::Registry;
use serde::Deserialize;
use std::path::Path;

/// Builtin seed: the four classic perspectives, no KPIs, no dependencies
pub const BUILTIN_DEFAULT: &str = include_str!("../../../profiles/default.json");

const SCHEMA_VERSION: u32 = 1;

/// Initial registry contents loaded from JSON
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    pub schema_version: u32,
    #[serde(default)]
    pub limits: Option<SeedLimits>,
    /// Applied first, in order
    #[serde(default)]
    pub perspectives: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<SeedDependency>,
    #[serde(default)]
    pub kpis: Vec<SeedKpi>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLimits {
    pub max_perspectives: Option<usize>,
    pub max_name_len: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDependency {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedKpi {
    pub perspective: String,
    pub name: String,
    pub target: f64,
    pub achieved: f64,
}

impl Seed {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DEFAULT)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let seed: Seed =
            serde_json::from_str(text).map_err(|err| ScorecardError::Seed(err.to_string()))?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ScorecardError::Seed(format!("{}: {err}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn limits(&self) -> Limits {
        let defaults = Limits::default();
        let raw = self.limits.clone().unwrap_or_default();
        Limits {
            max_perspectives: raw.max_perspectives.unwrap_or(defaults.max_perspectives),
            max_name_len: raw.max_name_len.unwrap_or(defaults.max_name_len),
        }
    }

    /// Fresh registry with this seed's limits and contents
    pub fn build(&self) -> Result<Registry> {
        let mut registry = Registry::with_limits(self.limits());
        self.apply(&mut registry)?;
        Ok(registry)
    }

    /// Replay perspectives, then dependencies, then KPIs
    pub fn apply(&self, registry: &mut Registry) -> Result<()> {
        for name in &self.perspectives {
            registry.add_perspective_if_absent(name)?;
        }
        for dep in &self.dependencies {
            registry.add_dependency(&dep.from, &dep.to)?;
        }
        for kpi in &self.kpis {
            registry.add_kpi(&kpi.perspective, &kpi.name, kpi.target, kpi.achieved)?;
        }
        log::debug!(
            "Seed applied: {} perspectives, {} dependencies, {} KPIs",
            self.perspectives.len(),
            self.dependencies.len(),
            self.kpis.len()
        );
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ScorecardError::Seed(format!(
                "schema_version {} is not supported (expected {SCHEMA_VERSION})",
                self.schema_version
            )));
        }
        let limits = self.limits();
        if limits.max_perspectives == 0 || limits.max_name_len == 0 {
            return Err(ScorecardError::Seed(
                "limits must be greater than zero".to_string(),
            ));
        }

        for (i, name) in self.perspectives.iter().enumerate() {
            require_name(&format!("perspectives[{i}]"), name)?;
        }
        for (i, dep) in self.dependencies.iter().enumerate() {
            require_name(&format!("dependencies[{i}].from"), &dep.from)?;
            require_name(&format!("dependencies[{i}].to"), &dep.to)?;
        }
        for (i, kpi) in self.kpis.iter().enumerate() {
            require_name(&format!("kpis[{i}].perspective"), &kpi.perspective)?;
            require_name(&format!("kpis[{i}].name"), &kpi.name)?;
            if !kpi.target.is_finite() {
                return Err(ScorecardError::Seed(format!(
                    "kpis[{i}].target must be a finite number, got {}",
                    kpi.target
                )));
            }
            if !kpi.achieved.is_finite() || kpi.achieved < 0.0 {
                return Err(ScorecardError::Seed(format!(
                    "kpis[{i}].achieved must be a non-negative number, got {}",
                    kpi.achieved
                )));
            }
        }
        Ok(())
    }
}

fn require_name(path: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScorecardError::Seed(format!("{path} cannot be empty")));
    }
    Ok(())
}
