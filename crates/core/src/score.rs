use crate::registry::Registry;
use crate::types::{Kpi, Perspective};
use serde::Serialize;
use std::fmt;

/// Averages strictly below this (and above zero) flag dependency impact
pub const IMPACT_THRESHOLD: f64 = 80.0;

/// Presentation band for a performance percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Above 100%
    Exceeds,
    /// 80% to 100% inclusive
    Meets,
    /// 20% up to 80%
    Caution,
    /// Below 20%
    Critical,
}

impl Band {
    pub fn classify(performance: f64) -> Self {
        if performance > 100.0 {
            Self::Exceeds
        } else if performance >= 80.0 {
            Self::Meets
        } else if performance >= 20.0 {
            Self::Caution
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Exceeds => "exceeds",
            Self::Meets => "meets",
            Self::Caution => "caution",
            Self::Critical => "critical",
        }
    }
}

/// `achieved / target * 100`, or 0 when the target is 0
pub fn kpi_performance(kpi: &Kpi) -> f64 {
    if kpi.target != 0.0 {
        kpi.achieved / kpi.target * 100.0
    } else {
        0.0
    }
}

/// Mean performance over KPIs with a non-zero target; `None` means no data
pub fn perspective_average(perspective: &Perspective) -> Option<f64> {
    let (sum, counted) = perspective
        .kpis()
        .filter(|k| k.target != 0.0)
        .fold((0.0, 0usize), |(sum, n), k| (sum + kpi_performance(k), n + 1));

    (counted > 0).then(|| sum / counted as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    pub name: String,
    pub target: f64,
    pub achieved: f64,
    pub performance: f64,
    pub band: Band,
}

/// One perspective's KPIs, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerspectiveReport {
    pub name: String,
    pub kpis: Vec<KpiReport>,
}

/// Per-KPI performance for every perspective in lexicographic order
pub fn scorecard(registry: &Registry) -> Vec<PerspectiveReport> {
    registry
        .inorder()
        .map(|p| PerspectiveReport {
            name: p.name().to_string(),
            kpis: p
                .kpis()
                .map(|k| {
                    let performance = kpi_performance(k);
                    KpiReport {
                        name: k.name.clone(),
                        target: k.target,
                        achieved: k.achieved,
                        performance,
                        band: Band::classify(performance),
                    }
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerspectiveScore {
    pub name: String,
    /// `None` when no KPI with a non-zero target exists
    pub average: Option<f64>,
    pub band: Option<Band>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyImpact {
    pub from: String,
    pub to: String,
    pub average: f64,
}

impl fmt::Display for DependencyImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Low performance in {} ({:.2}%) may affect {}.",
            self.from, self.average, self.to
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowestPerformer {
    pub name: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Name-table (insertion) order
    pub perspectives: Vec<PerspectiveScore>,
    pub overall: Option<f64>,
    pub impacts: Vec<DependencyImpact>,
    pub lowest: Option<LowestPerformer>,
}

/// Averages, overall mean, one-hop dependency impact and lowest performer
pub fn evaluate(registry: &Registry) -> Evaluation {
    let averages: Vec<(&str, Option<f64>)> = registry
        .perspectives()
        .map(|name| {
            let avg = registry.perspective(name).and_then(perspective_average);
            (name, avg)
        })
        .collect();

    let with_data: Vec<f64> = averages.iter().filter_map(|(_, avg)| *avg).collect();
    let overall = (!with_data.is_empty())
        .then(|| with_data.iter().sum::<f64>() / with_data.len() as f64);

    // A 0% average with real data is not flagged: the window is open at 0.
    let impacts = registry
        .graph()
        .edges()
        .into_iter()
        .filter_map(|(i, j)| {
            let (from, avg) = averages[i];
            let avg = avg.filter(|a| *a > 0.0 && *a < IMPACT_THRESHOLD)?;
            Some(DependencyImpact {
                from: from.to_string(),
                to: averages[j].0.to_string(),
                average: avg,
            })
        })
        .collect();

    let mut lowest: Option<LowestPerformer> = None;
    for (name, avg) in &averages {
        let Some(avg) = *avg else { continue };
        if lowest.as_ref().map_or(true, |l| avg < l.average) {
            lowest = Some(LowestPerformer {
                name: name.to_string(),
                average: avg,
            });
        }
    }

    let perspectives = averages
        .iter()
        .map(|(name, avg)| PerspectiveScore {
            name: name.to_string(),
            average: *avg,
            band: avg.map(Band::classify),
        })
        .collect();

    Evaluation {
        perspectives,
        overall,
        impacts,
        lowest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn kpi_performance_is_ratio_percent() {
        assert_relative_eq!(kpi_performance(&Kpi::new("k", 80.0, 60.0)), 75.0);
        assert_relative_eq!(kpi_performance(&Kpi::new("k", 3.0, 1.0)), 33.333333, epsilon = 1e-5);
        assert_eq!(kpi_performance(&Kpi::new("k", 0.0, 50.0)), 0.0);
    }

    #[test]
    fn zero_target_is_excluded_from_average() {
        let mut r = Registry::new();
        r.add_kpi("Customer", "a", 100.0, 50.0).unwrap();
        r.add_kpi("Customer", "b", 0.0, 50.0).unwrap();

        let avg = perspective_average(r.perspective("Customer").unwrap()).unwrap();
        assert_relative_eq!(avg, 50.0);
    }

    #[test]
    fn perspective_without_kpis_has_no_data() {
        let mut r = Registry::new();
        r.add_perspective_if_absent("Customer").unwrap();
        assert_eq!(perspective_average(r.perspective("Customer").unwrap()), None);
    }

    #[test]
    fn bands_cover_boundaries() {
        assert_eq!(Band::classify(100.01), Band::Exceeds);
        assert_eq!(Band::classify(100.0), Band::Meets);
        assert_eq!(Band::classify(80.0), Band::Meets);
        assert_eq!(Band::classify(79.99), Band::Caution);
        assert_eq!(Band::classify(20.0), Band::Caution);
        assert_eq!(Band::classify(19.99), Band::Critical);
        assert_eq!(Band::classify(0.0), Band::Critical);
    }

    #[test]
    fn overall_excludes_perspectives_without_data() {
        let mut r = Registry::new();
        r.add_perspective_if_absent("Financial").unwrap();
        r.add_kpi("Customer", "a", 100.0, 40.0).unwrap();
        r.add_kpi("Internal", "b", 100.0, 80.0).unwrap();

        let eval = evaluate(&r);
        assert_relative_eq!(eval.overall.unwrap(), 60.0);
        assert_eq!(eval.perspectives[0].average, None);
        assert_eq!(eval.perspectives[0].band, None);
        assert_eq!(eval.perspectives[1].band, Some(Band::Caution));
    }

    #[test]
    fn zero_percent_with_data_is_not_flagged_but_is_lowest() {
        let mut r = Registry::new();
        r.add_kpi("Learning", "training", 100.0, 0.0).unwrap();
        r.add_kpi("Internal", "cycle", 100.0, 50.0).unwrap();
        r.add_dependency("Learning", "Internal").unwrap();

        let eval = evaluate(&r);
        assert_eq!(eval.perspectives[0].average, Some(0.0));
        assert!(eval.impacts.is_empty());
        assert_eq!(
            eval.lowest,
            Some(LowestPerformer {
                name: "Learning".into(),
                average: 0.0
            })
        );
    }

    #[test]
    fn impact_threshold_is_exclusive() {
        let mut r = Registry::new();
        r.add_kpi("A", "k", 100.0, 80.0).unwrap();
        r.add_kpi("B", "k", 100.0, 79.5).unwrap();
        r.add_dependency("A", "B").unwrap();
        r.add_dependency("B", "A").unwrap();

        let eval = evaluate(&r);
        assert_eq!(eval.impacts.len(), 1);
        assert_eq!(
            eval.impacts[0].to_string(),
            "Low performance in B (79.50%) may affect A."
        );
    }

    #[test]
    fn impacts_follow_edge_index_order() {
        let mut r = Registry::new();
        r.add_kpi("A", "k", 100.0, 10.0).unwrap();
        r.add_kpi("B", "k", 100.0, 20.0).unwrap();
        r.add_perspective_if_absent("C").unwrap();
        r.add_dependency("B", "C").unwrap();
        r.add_dependency("A", "C").unwrap();
        r.add_dependency("A", "B").unwrap();

        let pairs: Vec<_> = evaluate(&r)
            .impacts
            .into_iter()
            .map(|i| (i.from, i.to))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn lowest_tie_goes_to_first_inserted() {
        let mut r = Registry::new();
        r.add_kpi("Zeta", "k", 100.0, 30.0).unwrap();
        r.add_kpi("Alpha", "k", 100.0, 30.0).unwrap();

        assert_eq!(evaluate(&r).lowest.map(|l| l.name), Some("Zeta".to_string()));
    }

    #[test]
    fn scorecard_lists_lexicographically_newest_first() {
        let mut r = Registry::new();
        r.add_kpi("Learning", "old", 10.0, 5.0).unwrap();
        r.add_kpi("Customer", "nps", 0.0, 5.0).unwrap();
        r.add_kpi("Learning", "new", 10.0, 12.0).unwrap();

        let card = scorecard(&r);
        assert_eq!(card[0].name, "Customer");
        assert_eq!(card[0].kpis[0].performance, 0.0);
        assert_eq!(card[1].name, "Learning");
        let learning: Vec<_> = card[1].kpis.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(learning, vec!["new", "old"]);
        assert_eq!(card[1].kpis[0].band, Band::Exceeds);
    }
}
