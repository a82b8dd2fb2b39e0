use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, info, instrument};

use crate::builder::{TreeBuilder, VALUE_MAX, VALUE_MIN};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::harness::{BenchmarkSample, Harness};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => _run(cli, false),
        Some(Commands::Run { no_smoke, .. }) => _run(cli, *no_smoke),
        Some(Commands::Smoke { size }) => _smoke(cli, *size),
        Some(Commands::Tree { size }) => _tree(cli, *size),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

/// Merge config layers with the global command line flags and validate.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(threshold) = cli.threshold {
        settings.threshold = threshold;
    }
    if let Some(iterations) = cli.iterations {
        settings.iterations = iterations;
    }
    if let Some(Commands::Run {
        sizes: Some(sizes), ..
    }) = &cli.command
    {
        settings.sizes = sizes.clone();
    }
    settings.validate()?;
    debug!(?settings, "resolved settings");
    Ok(settings)
}

fn warn_on_degenerate_threshold(settings: &Settings) {
    if settings.threshold >= i64::from(VALUE_MAX) - 1 {
        output::warning(&format!(
            "threshold {} matches no node (values are below {})",
            settings.threshold, VALUE_MAX
        ));
    } else if settings.threshold < i64::from(VALUE_MIN) {
        output::warning(&format!(
            "threshold {} matches every node",
            settings.threshold
        ));
    }
}

fn builder_for(settings: &Settings) -> TreeBuilder {
    TreeBuilder::from_seed(settings.seed).fan_out(settings.fan_out)
}

fn size_or_default(size: Option<usize>, settings: &Settings) -> CliResult<usize> {
    match size {
        Some(0) => Err(CliError::InvalidArgs("size must be at least 1".into())),
        Some(n) => Ok(n),
        None => Ok(settings.smoke_size),
    }
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, no_smoke: bool) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    warn_on_degenerate_threshold(&settings);
    run_benchmark(&settings, no_smoke, &mut io::stdout().lock())
}

/// Smoke block (unless skipped), then one report block per size, each
/// followed by a blank line.
pub fn run_benchmark<W: Write>(settings: &Settings, no_smoke: bool, out: &mut W) -> CliResult<()> {
    let harness = Harness::from_settings(settings);
    let mut builder = builder_for(settings);

    if !no_smoke {
        let small = builder.build(settings.smoke_size)?;
        output::block_to(out, &harness.smoke(&small)).map_err(write_err)?;
    }

    output::progress(&format!("Generating {} trees...", settings.sizes.len()));
    let samples = BenchmarkSample::generate_all(&mut builder, &settings.sizes)?;
    info!(samples = samples.len(), "trees generated");

    // First write failure wins; later reports are still timed but not written
    let mut write_result = Ok(());
    harness.run(&samples, |report| {
        if write_result.is_ok() {
            write_result = output::block_to(out, report);
        }
    });
    write_result.map_err(write_err)?;
    out.flush().map_err(write_err)
}

fn write_err(e: io::Error) -> CliError {
    CliError::io("write report", e)
}

#[instrument(skip(cli))]
fn _smoke(cli: &Cli, size: Option<usize>) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    warn_on_degenerate_threshold(&settings);
    let size = size_or_default(size, &settings)?;
    let tree = builder_for(&settings).build(size)?;
    output::info(&Harness::from_settings(&settings).smoke(&tree));
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, size: Option<usize>) -> CliResult<()> {
    let settings = resolve_settings(cli)?;
    let size = size_or_default(size, &settings)?;
    let tree = builder_for(&settings).build(size)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = resolve_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::io(
                    "locate config directory",
                    io::Error::new(io::ErrorKind::NotFound, "no home directory"),
                ))
            }
        },
        ConfigCommands::Init => output::info(&Settings::template()),
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
