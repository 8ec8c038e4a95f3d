//! KPI summary and rank distribution of an enumeration result.
use std::fmt::Write as _;

use calc_core::{CalcConfig, EnumerationResult, GrowthParams, StatVector};
use runtime::CalculationReport;
use serde::Serialize;

/// How a value should be highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Ok,
    Warn,
    Bad,
}

impl Tone {
    fn tag(self) -> &'static str {
        match self {
            Tone::Ok => "[ok]",
            Tone::Warn => "[warn]",
            Tone::Bad => "[bad]",
        }
    }
}

/// Headline numbers derived from one result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpis {
    /// Share of matches at base rank 8, in percent.
    pub success_pct: f64,
    /// Share of the population that shows the observation, in percent.
    pub appearance_pct: f64,
    /// Expected number of tries until a rank-8 specimen.
    pub expected_tries: u64,
    pub tries_tone: Tone,
}

impl Kpis {
    pub fn new(result: &EnumerationResult, total_population: u64) -> Self {
        let success_pct = if result.matches > 0 {
            result.rank8 as f64 / result.matches as f64 * 100.0
        } else {
            0.0
        };
        let appearance_pct = result.matches as f64 / total_population as f64 * 100.0;

        // tone follows the unrounded 100 / success, not the displayed count
        let (expected_tries, raw_tries) = if success_pct > 0.0 {
            let raw = 100.0 / success_pct;
            (raw.floor() as u64 + 1, raw)
        } else {
            (1, 1.0)
        };
        let tries_tone = if raw_tries < 50.0 {
            Tone::Ok
        } else if raw_tries < 100.0 {
            Tone::Warn
        } else {
            Tone::Bad
        };

        Self {
            success_pct,
            appearance_pct,
            expected_tries,
            tries_tone,
        }
    }
}

/// One row of the rank distribution table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistributionRow {
    pub rank: i64,
    pub count: u64,
    /// Share of all matches, rounded to two decimals.
    pub share_pct: f64,
    pub tone: Option<Tone>,
}

/// Rows ordered by rank descending, then count descending.
pub fn distribution(result: &EnumerationResult) -> Vec<DistributionRow> {
    let denominator = result.matches.max(1) as f64;
    let mut rows: Vec<DistributionRow> = result
        .dist
        .iter()
        .map(|(&rank, &count)| DistributionRow {
            rank,
            count,
            share_pct: (count as f64 / denominator * 10_000.0).round() / 100.0,
            tone: match rank {
                CalcConfig::PERFECT_RANK => Some(Tone::Ok),
                5.. => Some(Tone::Warn),
                _ => None,
            },
        })
        .collect();
    rows.sort_by(|a, b| b.rank.cmp(&a.rank).then(b.count.cmp(&a.count)));
    rows
}

/// Formats a percentage for display.
pub fn fmt_pct(value: f64) -> String {
    if !value.is_finite() {
        "—%".to_string()
    } else if value == 0.0 {
        "0.0000%".to_string()
    } else if value.abs() < 0.001 {
        format!("{value:.6}%")
    } else {
        format!("{value:.4}%")
    }
}

/// Serializable form of a full report.
#[derive(Clone, Debug, Serialize)]
pub struct ReportView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub params: GrowthParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<bool>,
    pub obs: StatVector,
    pub matches: u64,
    pub rank8: u64,
    pub evaluated: u64,
    pub kpis: Kpis,
    pub distribution: Vec<DistributionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_rank8: Option<bool>,
}

impl ReportView {
    pub fn from_result(
        params: GrowthParams,
        obs: StatVector,
        result: &EnumerationResult,
        total_population: u64,
    ) -> Self {
        Self {
            name: None,
            params,
            inferred: None,
            obs,
            matches: result.matches,
            rank8: result.rank8,
            evaluated: result.evaluated,
            kpis: Kpis::new(result, total_population),
            distribution: distribution(result),
            guaranteed_rank8: None,
        }
    }

    pub fn from_report(report: &CalculationReport, total_population: u64) -> Self {
        Self {
            name: Some(report.name.clone()),
            inferred: Some(report.resolved.is_inferred()),
            guaranteed_rank8: Some(report.guaranteed_rank8),
            ..Self::from_result(*report.params(), report.obs, &report.result, total_population)
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.name {
            let _ = writeln!(out, "{name}");
        }
        let source = match self.inferred {
            Some(true) => " (inferred)",
            Some(false) => " (known)",
            None => "",
        };
        let _ = writeln!(out, "  params      {}{source}", self.params);
        let _ = writeln!(out, "  observed    {}", self.obs);
        let _ = writeln!(out, "  matches     {} / {}", self.matches, self.evaluated);
        let _ = writeln!(out, "  rank 8      {}", self.rank8);
        let _ = writeln!(out, "  success     {}", fmt_pct(self.kpis.success_pct));
        let _ = writeln!(out, "  appearance  {}", fmt_pct(self.kpis.appearance_pct));
        let _ = writeln!(
            out,
            "  tries       {} {}",
            self.kpis.expected_tries,
            self.kpis.tries_tone.tag()
        );
        if self.guaranteed_rank8 == Some(true) {
            let _ = writeln!(out, "  guaranteed rank 8 set");
        }

        if self.distribution.is_empty() {
            let _ = writeln!(out, "  no matching modifiers");
            return out;
        }
        let _ = writeln!(out, "  {:>6}  {:>8}  {:>8}", "rank", "count", "share");
        for row in &self.distribution {
            let tag = row.tone.map(Tone::tag).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:>6}  {:>8}  {:>7.2}%  {tag}",
                row.rank, row.count, row.share_pct
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result(dist: &[(i64, u64)]) -> EnumerationResult {
        let dist: BTreeMap<i64, u64> = dist.iter().copied().collect();
        EnumerationResult {
            matches: dist.values().sum(),
            rank8: dist.get(&8).copied().unwrap_or(0),
            dist,
            evaluated: CalcConfig::RAW_SPACE,
        }
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(fmt_pct(f64::NAN), "—%");
        assert_eq!(fmt_pct(f64::INFINITY), "—%");
        assert_eq!(fmt_pct(0.0), "0.0000%");
        assert_eq!(fmt_pct(0.0005), "0.000500%");
        assert_eq!(fmt_pct(12.5), "12.5000%");
    }

    #[test]
    fn kpis_with_rank8_matches() {
        let kpis = Kpis::new(&result(&[(8, 1), (6, 3)]), 100);
        assert_eq!(kpis.success_pct, 25.0);
        assert_eq!(kpis.appearance_pct, 4.0);
        assert_eq!(kpis.expected_tries, 5);
        assert_eq!(kpis.tries_tone, Tone::Ok);
    }

    #[test]
    fn kpis_without_rank8() {
        let kpis = Kpis::new(&result(&[(0, 85), (2, 49)]), 178_750);
        assert_eq!(kpis.success_pct, 0.0);
        assert_eq!(kpis.expected_tries, 1);

        let empty = Kpis::new(&EnumerationResult::default(), 178_750);
        assert_eq!(empty.success_pct, 0.0);
        assert_eq!(empty.appearance_pct, 0.0);
    }

    #[test]
    fn tries_tones() {
        let warn = Kpis::new(&result(&[(8, 1), (0, 63)]), 100);
        assert_eq!(warn.expected_tries, 65);
        assert_eq!(warn.tries_tone, Tone::Warn);

        let bad = Kpis::new(&result(&[(8, 1), (0, 127)]), 100);
        assert_eq!(bad.expected_tries, 129);
        assert_eq!(bad.tries_tone, Tone::Bad);
    }

    #[test]
    fn tone_uses_unrounded_tries() {
        // 2 of 99 → 100 / success = 49.5, shown as 50 tries
        let kpis = Kpis::new(&result(&[(8, 2), (0, 97)]), 100);
        assert_eq!(kpis.expected_tries, 50);
        assert_eq!(kpis.tries_tone, Tone::Ok);
    }

    #[test]
    fn distribution_order_and_tones() {
        let rows = distribution(&result(&[(0, 85), (2, 49), (5, 1), (8, 2)]));
        let ranks: Vec<i64> = rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![8, 5, 2, 0]);
        assert_eq!(rows[0].tone, Some(Tone::Ok));
        assert_eq!(rows[1].tone, Some(Tone::Warn));
        assert_eq!(rows[3].tone, None);
        assert_eq!(rows[2].share_pct, 35.77);
    }

    #[test]
    fn render_mentions_kpis() {
        let view = ReportView::from_result(
            GrowthParams::default(),
            StatVector::new(9, 2, 2, 1),
            &result(&[(0, 85), (2, 49)]),
            CalcConfig::VALID_SPACE,
        );
        let text = view.render();
        assert!(text.contains("matches     134 / 831875"));
        assert!(text.contains("success     0.0000%"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["matches"], 134);
        assert!(json.get("name").is_none());
    }
}
