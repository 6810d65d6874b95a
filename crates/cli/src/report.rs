use console::{style, StyledObject};
use scorecard_core::{Band, Evaluation, PerspectiveReport, Registry};
use std::fmt::Write as _;

fn banded<D>(value: D, band: Band) -> StyledObject<D> {
    match band {
        Band::Exceeds => style(value).green().bold(),
        Band::Meets => style(value).green(),
        Band::Caution => style(value).yellow(),
        Band::Critical => style(value).red(),
    }
}

fn percent(value: f64, band: Band) -> String {
    banded(format!("{value:.2}%"), band).to_string()
}

pub fn render_perspectives(registry: &Registry) -> String {
    let mut out = format!("\nExisting Perspectives (count = {}):\n", registry.len());
    if registry.is_empty() {
        out.push_str("  (no perspectives defined)\n");
        return out;
    }
    for (i, name) in registry.perspectives().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, name);
    }
    out
}

pub fn render_dependencies(registry: &Registry) -> String {
    let mut out = String::from("\n--- Perspective Dependencies ---\n");
    if registry.is_empty() {
        out.push_str("  (no perspectives defined)\n");
        return out;
    }
    for listing in registry.dependencies() {
        let targets = if listing.affects.is_empty() {
            "None".to_string()
        } else {
            listing.affects.join(", ")
        };
        let _ = writeln!(out, "{} -> {}", listing.name, targets);
    }
    out
}

fn render_kpi_sections(out: &mut String, reports: &[PerspectiveReport]) {
    for report in reports {
        let _ = writeln!(out, "\nPerspective: {}", style(&report.name).cyan());
        if report.kpis.is_empty() {
            out.push_str("  (No KPIs yet)\n");
            continue;
        }
        for kpi in &report.kpis {
            let _ = writeln!(
                out,
                "  - {} | Target: {:.2} | Achieved: {:.2} | Performance: {} [{}]",
                kpi.name,
                kpi.target,
                kpi.achieved,
                percent(kpi.performance, kpi.band),
                kpi.band.label()
            );
        }
    }
}

pub fn render_kpis(reports: &[PerspectiveReport]) -> String {
    if reports.is_empty() {
        return "No perspectives / KPIs defined yet.\n".to_string();
    }
    let mut out = String::new();
    render_kpi_sections(&mut out, reports);
    out
}

pub fn render_scorecard(reports: &[PerspectiveReport]) -> String {
    if reports.is_empty() {
        return "No data to generate scorecard.\n".to_string();
    }
    let mut out = format!("\n{}\n", style("=== Scorecard (per-KPI performance) ===").bold());
    render_kpi_sections(&mut out, reports);
    out
}

pub fn render_evaluation(eval: &Evaluation) -> String {
    if eval.perspectives.is_empty() {
        return "No data to evaluate.\n".to_string();
    }

    let mut out = String::from("\n--- Perspective Averages ---\n");
    for score in &eval.perspectives {
        match (score.average, score.band) {
            (Some(avg), Some(band)) => {
                let _ = writeln!(out, "{}: {} [{}]", score.name, percent(avg, band), band.label());
            }
            _ => {
                let _ = writeln!(out, "{}: (No KPI data)", score.name);
            }
        }
    }

    out.push_str("\n--- Dependency Impact Analysis ---\n");
    if eval.impacts.is_empty() {
        out.push_str("No dependency impacts detected.\n");
    }
    for impact in &eval.impacts {
        let _ = writeln!(out, "{}", style(impact).yellow());
    }

    match eval.overall {
        Some(overall) => {
            let _ = writeln!(
                out,
                "\nOverall Performance: {}",
                percent(overall, Band::classify(overall))
            );
        }
        None => out.push_str("\nOverall Performance: (No KPI data)\n"),
    }
    match &eval.lowest {
        Some(lowest) => {
            let _ = writeln!(
                out,
                "Lowest Performing Perspective: {} ({})",
                style(&lowest.name).bold(),
                percent(lowest.average, Band::classify(lowest.average))
            );
        }
        None => out.push_str("No perspective had KPI data to determine lowest performer.\n"),
    }
    out
}
