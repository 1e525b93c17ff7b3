use chrono::{DateTime, Utc};
use ncaa_bracket::Scorecard;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StrategyRun {
    pub strategy: String,
    pub scorecard: Scorecard,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonReport {
    pub year: u16,
    pub champion: String,
    pub results: Vec<StrategyRun>,
}

/// One strategy's scores across every simulated season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub max: u32,
    pub max_year: u16,
    pub min: u32,
    pub min_year: u16,
    pub median: f64,
    pub mean: f64,
}

impl StrategySummary {
    /// `scores` are `(year, total)` in simulation order; ties for max and min
    /// go to the first season seen. `None` when there are no scores.
    pub fn from_scores(strategy: &str, scores: &[(u16, u32)]) -> Option<Self> {
        let (&(first_year, first_total), rest) = scores.split_first()?;
        let (mut max_year, mut max, mut min_year, mut min) = (first_year, first_total, first_year, first_total);
        for &(year, total) in rest {
            if total > max {
                (max_year, max) = (year, total);
            }
            if total < min {
                (min_year, min) = (year, total);
            }
        }

        let mut totals: Vec<u32> = scores.iter().map(|(_, total)| *total).collect();
        totals.sort_unstable();
        let mid = totals.len() / 2;
        let median = if totals.len() % 2 == 0 {
            (f64::from(totals[mid - 1]) + f64::from(totals[mid])) / 2.0
        } else {
            f64::from(totals[mid])
        };
        let mean = totals.iter().map(|t| f64::from(*t)).sum::<f64>() / totals.len() as f64;

        Some(Self { strategy: strategy.to_owned(), max, max_year, min, min_year, median, mean })
    }

    pub fn line(&self) -> String {
        format!(
            "\tMAX: {} ({})\tMIN: {} ({})\tMEDIAN: {:2.1}\tMEAN: {:2.1}",
            self.max, self.max_year, self.min, self.min_year, self.median, self.mean
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub seasons: Vec<SeasonReport>,
    pub summaries: Vec<StrategySummary>,
}

impl Report {
    pub fn new(seasons: Vec<SeasonReport>, summaries: Vec<StrategySummary>) -> Self {
        Self { generated_at: Utc::now(), seasons, summaries }
    }

    pub fn write_json(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_odd_number_of_seasons() {
        let summary = StrategySummary::from_scores("Coin Toss", &[(2015, 40), (2016, 90), (2017, 60)]).unwrap();
        assert_eq!((summary.max, summary.max_year), (90, 2016));
        assert_eq!((summary.min, summary.min_year), (40, 2015));
        assert_eq!(summary.median, 60.0);
        assert!((summary.mean - 63.333).abs() < 0.001);
    }

    #[test]
    fn summary_median_averages_the_middle_pair() {
        let summary = StrategySummary::from_scores("Chalk", &[(2015, 10), (2016, 20), (2017, 40), (2018, 30)]).unwrap();
        assert_eq!(summary.median, 25.0);
        assert_eq!(summary.mean, 25.0);
    }

    #[test]
    fn summary_ties_keep_the_first_season() {
        let summary = StrategySummary::from_scores("Flat", &[(2019, 50), (2017, 50)]).unwrap();
        assert_eq!(summary.max_year, 2019);
        assert_eq!(summary.min_year, 2019);
        assert!(StrategySummary::from_scores("Empty", &[]).is_none());
    }

    #[test]
    fn summary_line_format() {
        let summary = StrategySummary::from_scores("Chalk", &[(2015, 120)]).unwrap();
        assert_eq!(summary.line(), "\tMAX: 120 (2015)\tMIN: 120 (2015)\tMEDIAN: 120.0\tMEAN: 120.0");
    }

    #[test]
    fn report_serializes_scorecards() {
        let report = Report::new(
            vec![SeasonReport {
                year: 2024,
                champion: "East 1".into(),
                results: vec![StrategyRun { strategy: "Chalk".into(), scorecard: Scorecard::default() }],
            }],
            Vec::new(),
        );
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seasons"][0]["year"], 2024);
        assert_eq!(json["seasons"][0]["results"][0]["scorecard"]["total"], 0);
        assert!(json["generated_at"].is_string());
    }
}
