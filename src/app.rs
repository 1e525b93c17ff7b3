use crate::components::bracket::BracketView;
use crate::state::app_settings::AppSettings;
use crate::state::report::{Report, SeasonReport, StrategyRun, StrategySummary};
use anyhow::{Context, anyhow};
use log::{Level, debug, info, log_enabled};
use ncaa_bracket::{Bracket, GameRecord, MAX_SCORE, RoundKind, Scorecard, Strategy, build_bracket, predict, score};
use std::collections::BTreeMap;

const JUSTIFICATION_SIZE: usize = 33;

pub struct App {
    pub settings: AppSettings,
    pub roster: Vec<Strategy>,
}

impl App {
    pub fn new(settings: AppSettings) -> anyhow::Result<Self> {
        let (roster, source) = settings.load_roster()?;
        debug!("using {} strategies from {source}", roster.len());
        Ok(Self { settings, roster })
    }

    /// Simulate every requested season, print the per-strategy summary and
    /// write the JSON report when one was asked for.
    pub fn run(&self) -> anyhow::Result<Report> {
        let data_file = &self.settings.data_file;
        let seasons = ncaa_bracket::load_seasons(data_file)
            .with_context(|| format!("reading {}", data_file.display()))?;
        let report = self.run_seasons(&seasons)?;

        if let Some(path) = &self.settings.output {
            report
                .write_json(path)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        Ok(report)
    }

    pub fn run_seasons(&self, seasons: &BTreeMap<u16, Vec<GameRecord>>) -> anyhow::Result<Report> {
        let mut season_reports = Vec::with_capacity(self.settings.years.len());
        for &year in &self.settings.years {
            let records = seasons
                .get(&year)
                .ok_or_else(|| anyhow!("no games recorded for season {year}"))?;
            let season = self.run_season(year, records).with_context(|| format!("season {year}"))?;
            season_reports.push(season);
            info!("");
        }

        let summaries = self.summarize(&season_reports);
        for summary in &summaries {
            info!("{}", summary.strategy);
            info!("{}", "-".repeat(summary.strategy.len()));
            info!("{}\n", summary.line());
        }
        Ok(Report::new(season_reports, summaries))
    }

    fn run_season(&self, year: u16, records: &[GameRecord]) -> anyhow::Result<SeasonReport> {
        info!("{year}\n----");
        let (actual, rankings) = build_bracket(records)?;
        self.print_bracket("ACTUAL BRACKET", &actual, None)?;

        let mut results = Vec::with_capacity(self.roster.len());
        for strategy in &self.roster {
            let mut predicted = actual.deep_copy();
            predicted.wipe();
            predict(&mut predicted, strategy, &rankings)
                .with_context(|| format!("predicting with {}", strategy.name))?;
            self.print_bracket("PREDICTED BRACKET", &predicted, Some(&actual))?;

            let scorecard = score(&predicted, &actual)?;
            log_scorecard(strategy, &scorecard);
            results.push(StrategyRun { strategy: strategy.name.clone(), scorecard });
        }

        Ok(SeasonReport { year, champion: actual.root_game().winner.name.clone(), results })
    }

    fn print_bracket(&self, title: &str, bracket: &Bracket, actual: Option<&Bracket>) -> anyhow::Result<()> {
        if !self.settings.show_brackets || !log_enabled!(Level::Debug) {
            return Ok(());
        }
        let width = JUSTIFICATION_SIZE * RoundKind::ALL.len();
        debug!("{:^width$}", format!("------------------- {title} ----------------"));

        let mut view = BracketView::new(bracket).colored(self.settings.colored);
        if let Some(actual) = actual {
            view = view.compared_to(actual);
        }
        for line in view.lines()? {
            debug!("{line}");
        }
        Ok(())
    }

    fn summarize(&self, seasons: &[SeasonReport]) -> Vec<StrategySummary> {
        self.roster
            .iter()
            .filter_map(|strategy| {
                let scores: Vec<(u16, u32)> = seasons
                    .iter()
                    .filter_map(|season| {
                        season
                            .results
                            .iter()
                            .find(|run| run.strategy == strategy.name)
                            .map(|run| (season.year, run.scorecard.total))
                    })
                    .collect();
                StrategySummary::from_scores(&strategy.name, &scores)
            })
            .collect()
    }
}

fn log_scorecard(strategy: &Strategy, card: &Scorecard) {
    info!(
        "{:<width$} {}/{}",
        format!("{}:", strategy.name),
        card.total,
        MAX_SCORE,
        width = JUSTIFICATION_SIZE
    );
    debug!(
        "\n  SEED = {}\n  FAVORITE_BIAS = {:.6}\n  PROTECTED_FUN = {:?}\n",
        strategy.seed, strategy.favorite_bias, strategy.protection
    );
    for round in &card.rounds {
        debug!("    {}: {}", round.round, round.points);
        debug!(
            "      PREDICTED: {:?}\n      ACTUAL: {:?}\n      INTERSECTION: {:?}",
            round.predicted, round.actual, round.intersection
        );
    }
}
