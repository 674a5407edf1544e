use crate::app::cli::Cli;
use crate::app::error::ReclinkError;
use crate::app::mapper::{normalize, relative_to_root};
use crate::app::matcher::normalize_rule;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    ignore: Option<Vec<String>>,
    replace: Option<bool>,
    links: Option<bool>,
    quiet: Option<bool>,
}

fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("reclink").join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>, ReclinkError> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let invalid = |message: String| ReclinkError::InvalidPresets {
        path: config_path.to_path_buf(),
        message,
    };
    let content = fs::read_to_string(config_path).map_err(|e| invalid(e.to_string()))?;
    let parsed: PresetsFile = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

    Ok(parsed.presets)
}

/// Looks up a preset the user asked for by name. Presets are never picked implicitly.
fn load_preset(config_path: &Path, name: &str) -> Result<PresetConfig, ReclinkError> {
    let mut presets = load_presets_file(config_path)?;
    let preset = presets
        .remove(name)
        .ok_or_else(|| ReclinkError::UnknownPreset(name.to_string()))?;
    log::info!("using preset {} from {}", name, config_path.display());
    Ok(preset)
}

/// Merges preset and CLI rules into one cleaned, deduplicated set.
fn merge_rules(preset_rules: Option<Vec<String>>, cli_rules: Vec<String>) -> BTreeSet<String> {
    preset_rules
        .unwrap_or_default()
        .into_iter()
        .chain(cli_rules)
        .filter_map(|raw| normalize_rule(&raw))
        .collect()
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Rule for the running binary when it lives inside the source tree.
fn self_ignore_rule(source_root: &Path, exe: &Path) -> Option<String> {
    // current_exe() is already resolved on some platforms, so also try the resolved root.
    let relative = relative_to_root(source_root, exe).ok().or_else(|| {
        let root = source_root.canonicalize().ok()?;
        let exe = exe.canonicalize().unwrap_or_else(|_| exe.to_path_buf());
        relative_to_root(&root, &exe).ok()
    })?;
    relative.to_str().and_then(normalize_rule)
}

/// Only an explicit `--preset` consults the presets file at all.
fn select_preset(
    name: Option<&str>,
    locate: impl FnOnce() -> Result<PathBuf>,
) -> Result<PresetConfig> {
    match name {
        Some(name) => Ok(load_preset(&locate()?, name)?),
        None => Ok(PresetConfig::default()),
    }
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let preset = select_preset(cli.preset.as_deref(), presets_path)?;
    let own_exe = std::env::current_exe().ok();
    Ok(build_config(cli, &cwd, preset, own_exe.as_deref()))
}

fn build_config(
    cli: Cli,
    cwd: &Path,
    preset: PresetConfig,
    own_exe: Option<&Path>,
) -> RuntimeConfig {
    let source_root = absolutize(&cli.source, cwd);
    let target_root = absolutize(&cli.target, cwd);

    let mut ignore_rules = merge_rules(preset.ignore, cli.ignore);
    if let Some(rule) = own_exe.and_then(|exe| self_ignore_rule(&source_root, exe)) {
        ignore_rules.insert(rule);
    }

    RuntimeConfig {
        source_root,
        target_root,
        ignore_rules,
        replace_existing: cli.replace || preset.replace.unwrap_or(false),
        follow_source_symlinks: cli.links || preset.links.unwrap_or(false),
        confirm_before_run: !(cli.quiet || preset.quiet.unwrap_or(false)),
    }
}

/// Checks the run preconditions before anything on disk is touched.
pub fn validate(config: &RuntimeConfig) -> Result<(), ReclinkError> {
    if !config.source_root.is_dir() {
        return Err(ReclinkError::SourceNotDirectory(config.source_root.clone()));
    }
    if !config.target_root.is_dir() {
        return Err(ReclinkError::TargetNotDirectory(config.target_root.clone()));
    }
    if config.source_root == config.target_root {
        return Err(ReclinkError::SameRoots(config.source_root.clone()));
    }
    Ok(())
}
