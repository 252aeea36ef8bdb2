//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use menumaster_types::{DiningScenario, OutputFormat, Preferences, SpiceLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menumaster")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Decode restaurant menus from a photo using AI")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Preference flags shared by `analyze` and `prompt`
#[derive(Args, Debug, Clone)]
pub struct PreferenceArgs {
    /// Foods you enjoy (e.g., "chicken, noodles")
    #[arg(long)]
    pub likes: Option<String>,

    /// Foods to avoid, including allergies (e.g., "peanuts")
    #[arg(long)]
    pub dislikes: Option<String>,

    /// Spice tolerance
    #[arg(long, short = 's')]
    pub spice: Option<SpiceLevel>,

    /// Dining goal tag (see `menumaster scenarios`)
    #[arg(long)]
    pub scenario: Option<String>,
}

impl PreferenceArgs {
    /// Apply the flags that were given on top of `base`
    pub fn apply(&self, base: Preferences) -> Preferences {
        let mut prefs = base;
        if let Some(ref likes) = self.likes {
            prefs.likes = likes.clone();
        }
        if let Some(ref dislikes) = self.dislikes {
            prefs.dislikes = dislikes.clone();
        }
        if let Some(spice) = self.spice {
            prefs.spice_level = spice;
        }
        if let Some(ref scenario) = self.scenario {
            prefs.dining_scenario = DiningScenario::from_tag(scenario);
        }
        prefs
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a menu photo
    Analyze {
        /// Path to image file
        image: PathBuf,

        #[command(flatten)]
        preferences: PreferenceArgs,
    },

    /// Print the instruction that would be sent, without calling the API
    Prompt {
        #[command(flatten)]
        preferences: PreferenceArgs,
    },

    /// List dining goal tags
    Scenarios,

    /// Print the response schema sent with every request
    Schema,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set model
        #[arg(long)]
        set_model: Option<String>,

        /// Store an API key in the config file
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Set default spice level
        #[arg(long)]
        set_spice: Option<SpiceLevel>,

        /// Set default dining goal tag
        #[arg(long)]
        set_scenario: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_preferences() {
        let cli = Cli::try_parse_from([
            "menumaster",
            "analyze",
            "menu.jpg",
            "--dislikes",
            "peanuts",
            "--spice",
            "very_spicy",
            "--scenario",
            "healthy",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Commands::Analyze { image, preferences } = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(image, PathBuf::from("menu.jpg"));

        let prefs = preferences.apply(Preferences::default());
        assert_eq!(prefs.dislikes, "peanuts");
        assert_eq!(prefs.spice_level, SpiceLevel::VerySpicy);
        assert_eq!(prefs.dining_scenario, DiningScenario::Healthy);
        assert_eq!(prefs.likes, Preferences::default().likes);
    }

    #[test]
    fn test_unknown_scenario_is_kept() {
        let cli = Cli::try_parse_from(["menumaster", "prompt", "--scenario", "date_night"]).unwrap();
        let Commands::Prompt { preferences } = cli.command else {
            panic!("expected prompt");
        };
        let prefs = preferences.apply(Preferences::default());
        assert_eq!(
            prefs.dining_scenario,
            DiningScenario::Other("date_night".to_string())
        );
    }

    #[test]
    fn test_analyze_requires_image() {
        assert!(Cli::try_parse_from(["menumaster", "analyze"]).is_err());
    }

    #[test]
    fn test_invalid_spice_rejected() {
        assert!(Cli::try_parse_from(["menumaster", "prompt", "--spice", "lava"]).is_err());
    }
}
