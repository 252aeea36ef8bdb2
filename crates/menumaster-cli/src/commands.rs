//! Command handlers

use crate::cli::{Cli, Commands, PreferenceArgs};
use crate::output::{output_footer, output_result};
use indicatif::{ProgressBar, ProgressStyle};
use menumaster_app::{load_menu_image, AnalysisService, AnalysisSession, Config};
use menumaster_types::{DiningScenario, OutputFormat, Result, SpiceLevel};
use menumaster_vision::{build_prompt, response_schema, scenario_instruction};
use std::path::PathBuf;
use std::time::Duration;

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref model) = cli.model {
        config.model = model.clone();
    }

    match &cli.command {
        Commands::Analyze { image, preferences } => {
            let output_format = cli.format.unwrap_or(config.output_format);
            cmd_analyze(&cli, &config, image.clone(), preferences, output_format)
        }

        Commands::Prompt { preferences } => cmd_prompt(&config, preferences),

        Commands::Scenarios => cmd_scenarios(),

        Commands::Schema => cmd_schema(),

        Commands::Config {
            show,
            set_model,
            set_api_key,
            set_format,
            set_spice,
            set_scenario,
            reset,
        } => cmd_config(
            *show,
            set_model.clone(),
            set_api_key.clone(),
            *set_format,
            *set_spice,
            set_scenario.clone(),
            *reset,
        ),
    }
}

fn cmd_analyze(
    cli: &Cli,
    config: &Config,
    image: PathBuf,
    preference_args: &PreferenceArgs,
    output_format: OutputFormat,
) -> Result<()> {
    let menu_image = load_menu_image(&image)?;

    let mut session = AnalysisSession::new(preference_args.apply(config.initial_preferences()));
    session.set_image(menu_image);

    if cli.verbose {
        let prefs = session.preferences();
        eprintln!("Analyzing image: {}", image.display());
        eprintln!(
            "  likes: {} | dislikes: {} | spice: {} | goal: {}",
            prefs.likes, prefs.dislikes, prefs.spice_level, prefs.dining_scenario
        );
    }

    let service = AnalysisService::from_config(config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Analyzing menu with {}...", config.model));
    pb.enable_steady_tick(Duration::from_millis(100));

    let outcome = runtime.block_on(service.analyze(&mut session));
    pb.finish_and_clear();

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Some(banner) = session.error() {
                eprintln!("{}", banner);
            }
            return Err(err);
        }
    };

    output_result(output_format, &outcome.result)?;
    if output_format == OutputFormat::Table {
        output_footer(&outcome);
    }

    Ok(())
}

fn cmd_prompt(config: &Config, preference_args: &PreferenceArgs) -> Result<()> {
    let prefs = preference_args.apply(config.initial_preferences());
    println!("{}", build_prompt(&prefs));
    Ok(())
}

fn cmd_scenarios() -> Result<()> {
    println!("Dining goals");
    println!("============");
    for scenario in DiningScenario::SELECTABLE
        .iter()
        .chain(std::iter::once(&DiningScenario::FirstTimeIngredient))
    {
        println!("{:<24} {}", scenario.tag(), scenario.label());
        println!("{:<24} {}", "", scenario_instruction(scenario));
    }
    println!("\nAny other tag falls back to the general instruction.");
    Ok(())
}

fn cmd_schema() -> Result<()> {
    let content = serde_json::to_string_pretty(&response_schema())?;
    println!("{}", content);
    Ok(())
}

fn cmd_config(
    show: bool,
    set_model: Option<String>,
    set_api_key: Option<String>,
    set_format: Option<OutputFormat>,
    set_spice: Option<SpiceLevel>,
    set_scenario: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }

    if let Some(api_key) = set_api_key {
        let api_key = api_key.trim().to_string();
        config.api_key = (!api_key.is_empty()).then_some(api_key);
        modified = true;
    }

    if let Some(output_format) = set_format {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(spice_level) = set_spice {
        config.spice_level = spice_level;
        modified = true;
    }

    if let Some(tag) = set_scenario {
        config.dining_scenario = DiningScenario::from_tag(&tag);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
