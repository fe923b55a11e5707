//! Command line arguments.

use clap::Parser;
use spoiler_application::Step;
use spoiler_infrastructure::{ConfigError, SuiteConfig, parse_base_url};

/// Runs the Story Spoiler API acceptance suite.
///
/// Settings default to the `STORY_SPOILER_BASE_URL`, `STORY_SPOILER_USERNAME`
/// and `STORY_SPOILER_PASSWORD` environment variables; flags override them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Story API
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Login username
    #[arg(long)]
    pub username: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Run only this step (repeatable); see --list
    #[arg(long = "only", value_name = "STEP", value_parser = parse_step)]
    pub only: Vec<Step>,

    /// Print the available steps and exit
    #[arg(long)]
    pub list: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Steps to run; every step when none were selected.
    pub fn selection(&self) -> Vec<Step> {
        if self.only.is_empty() {
            Step::ALL.to_vec()
        } else {
            Step::ordered(&self.only)
        }
    }

    /// Applies flag overrides on top of `config`.
    pub fn apply(&self, mut config: SuiteConfig) -> Result<SuiteConfig, ConfigError> {
        if let Some(raw) = &self.base_url {
            config.base_url = parse_base_url("--base-url", raw)?;
        }
        if let Some(username) = &self.username {
            config.credentials.username = nonempty("--username", username)?;
        }
        if let Some(password) = &self.password {
            config.credentials.password = nonempty("--password", password)?;
        }
        Ok(config)
    }
}

fn nonempty(key: &'static str, value: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { key });
    }
    Ok(value.to_string())
}

fn parse_step(name: &str) -> Result<Step, String> {
    Step::from_name(name).ok_or_else(|| format!("unknown step '{name}' (see --list)"))
}
