use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hexhand_core::CommitOutcome;
use hexhand_core::belief::telemetry::BeliefMetrics;
use hexhand_core::model::resource::ResourceCategory;
use serde::Serialize;

/// Running totals for one replayed opponent.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub events: usize,
    pub commits: usize,
    pub overflow_resets: usize,
    pub exhausted_updates: usize,
    pub peak_hypotheses: usize,
    pub final_hypotheses: usize,
    pub final_presence: [f32; ResourceCategory::COUNT],
    pub final_affordability: BTreeMap<String, f64>,
    /// Steps whose true hand was still among the hypotheses, when the truth is known.
    pub truth_hits: Option<usize>,
}

impl ScenarioReport {
    pub fn new(name: impl Into<String>, truth_known: bool) -> Self {
        Self {
            name: name.into(),
            events: 0,
            commits: 0,
            overflow_resets: 0,
            exhausted_updates: 0,
            peak_hypotheses: 1,
            final_hypotheses: 1,
            final_presence: [0.0; ResourceCategory::COUNT],
            final_affordability: BTreeMap::new(),
            truth_hits: truth_known.then_some(0),
        }
    }

    pub fn record(
        &mut self,
        outcomes: &[CommitOutcome],
        metrics: &BeliefMetrics,
        affordability: &BTreeMap<String, f64>,
        truth_covered: Option<bool>,
    ) {
        self.events += 1;
        for outcome in outcomes {
            self.commits += 1;
            match outcome {
                CommitOutcome::Applied { size } => {
                    self.peak_hypotheses = self.peak_hypotheses.max(*size);
                }
                CommitOutcome::Overflow { attempted } => {
                    self.overflow_resets += 1;
                    self.peak_hypotheses = self.peak_hypotheses.max(*attempted);
                }
                CommitOutcome::Exhausted => self.exhausted_updates += 1,
            }
        }
        self.final_hypotheses = metrics.hypotheses;
        self.final_presence = metrics.presence_per_category;
        self.final_affordability = affordability.clone();
        if let (Some(hits), Some(true)) = (self.truth_hits.as_mut(), truth_covered) {
            *hits += 1;
        }
    }

    pub fn truth_coverage(&self) -> Option<f64> {
        let hits = self.truth_hits?;
        if self.events == 0 {
            return Some(1.0);
        }
        Some(hits as f64 / self.events as f64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub run_id: String,
    pub scenarios: Vec<ScenarioReport>,
}

impl ReplaySummary {
    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str(&format!("# Belief Replay Summary: {}\n\n", self.run_id));
        rows.push_str("| Scenario | Events | Commits | Peak | Final | Overflow resets | Exhausted | Truth coverage |\n");
        rows.push_str("|----------|--------|---------|------|-------|-----------------|-----------|----------------|\n");
        for scenario in &self.scenarios {
            let coverage = scenario
                .truth_coverage()
                .map(|value| format!("{:.1}%", value * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            rows.push_str(&format!(
                "| {name} | {events} | {commits} | {peak} | {last} | {overflow} | {exhausted} | {coverage} |\n",
                name = scenario.name,
                events = scenario.events,
                commits = scenario.commits,
                peak = scenario.peak_hypotheses,
                last = scenario.final_hypotheses,
                overflow = scenario.overflow_resets,
                exhausted = scenario.exhausted_updates,
            ));
        }

        rows.push_str("\n## Final presence probability\n\n");
        rows.push_str("| Scenario |");
        for category in ResourceCategory::ALL {
            rows.push_str(&format!(" {category} |"));
        }
        rows.push_str("\n|----------|");
        for _ in ResourceCategory::ALL {
            rows.push_str("------|");
        }
        rows.push('\n');
        for scenario in &self.scenarios {
            rows.push_str(&format!("| {} |", scenario.name));
            for value in scenario.final_presence {
                rows.push_str(&format!(" {value:.2} |"));
            }
            rows.push('\n');
        }

        rows.push_str("\n## Final affordability\n\n");
        for scenario in &self.scenarios {
            let cells: Vec<String> = scenario
                .final_affordability
                .iter()
                .map(|(piece, ratio)| format!("{piece} {ratio:.2}"))
                .collect();
            rows.push_str(&format!("- **{}**: {}\n", scenario.name, cells.join(", ")));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_markdown())
    }
}
