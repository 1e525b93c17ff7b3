use anyhow::Context;
use log::LevelFilter;
use ncaa_bracket::Strategy;
use ncaa_bracket::strategy::load_roster;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub data_file: PathBuf,
    pub years: Vec<u16>,
    pub strategies_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub show_brackets: bool,
    pub colored: bool,
    pub log_level: LevelFilter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("Game By Game.csv"),
            years: Vec::new(),
            strategies_file: None,
            output: None,
            show_brackets: true,
            colored: true,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppSettings {
    /// Resolve the strategy roster: an explicit file wins, then the per-user
    /// config file if one exists, then the built-in roster.
    pub fn load_roster(&self) -> anyhow::Result<(Vec<Strategy>, String)> {
        if let Some(path) = &self.strategies_file {
            return read_roster(path);
        }
        if let Some(path) = strategies_config_path(std::env::var("XDG_CONFIG_HOME").ok(), std::env::var("HOME").ok())
            && path.is_file()
        {
            return read_roster(&path);
        }
        Ok((Strategy::defaults(), "built-in roster".to_owned()))
    }
}

fn read_roster(path: &Path) -> anyhow::Result<(Vec<Strategy>, String)> {
    let roster = load_roster(path).with_context(|| format!("loading strategies from {}", path.display()))?;
    Ok((roster, path.display().to_string()))
}

/// `$XDG_CONFIG_HOME/mmsim/strategies.json`, falling back to `~/.config`.
pub fn strategies_config_path(xdg_config_home: Option<String>, home: Option<String>) -> Option<PathBuf> {
    if let Some(config_dir) = xdg_config_home
        && !config_dir.trim().is_empty()
    {
        return Some(PathBuf::from(config_dir).join("mmsim").join("strategies.json"));
    }
    if let Some(home) = home
        && !home.trim().is_empty()
    {
        return Some(PathBuf::from(home).join(".config").join("mmsim").join("strategies.json"));
    }
    None
}
