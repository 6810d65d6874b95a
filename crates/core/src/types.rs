/// Key performance indicator attached to a perspective
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    /// KPI name (e.g., "Revenue growth")
    pub name: String,

    /// Expected value
    pub target: f64,

    /// Value actually reached
    pub achieved: f64,
}

impl Kpi {
    pub fn new(name: impl Into<String>, target: f64, achieved: f64) -> Self {
        Self {
            name: name.into(),
            target,
            achieved,
        }
    }
}

/// Named evaluation category owning its KPIs
#[derive(Debug, Clone, PartialEq)]
pub struct Perspective {
    /// Name with the casing of its first insertion
    name: String,

    /// KPIs in insertion order; exposed newest-first
    kpis: Vec<Kpi>,
}

impl Perspective {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kpis: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// KPIs, most recently added first
    pub fn kpis(&self) -> impl DoubleEndedIterator<Item = &Kpi> + ExactSizeIterator {
        self.kpis.iter().rev()
    }

    pub fn kpi_count(&self) -> usize {
        self.kpis.len()
    }

    pub(crate) fn push_kpi(&mut self, kpi: Kpi) {
        self.kpis.push(kpi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpis_are_listed_newest_first() {
        let mut p = Perspective::new("Customer");
        p.push_kpi(Kpi::new("first", 10.0, 5.0));
        p.push_kpi(Kpi::new("second", 10.0, 5.0));

        let names: Vec<_> = p.kpis().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(p.kpi_count(), 2);
    }
}
