//! Command handlers

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::OptionsReport;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::TreeNodeConvert;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Move {
            file,
            mover,
            root,
            indent,
        }) => cmd_move(
            &container(cli)?,
            file,
            mover.as_deref(),
            root.as_deref(),
            indent.as_deref(),
        ),
        Some(Commands::Assoc {
            file,
            node,
            exclude,
            prompt,
            indent,
        }) => cmd_assoc(
            &container(cli)?,
            file,
            node.as_deref(),
            exclude,
            prompt.as_deref(),
            indent.as_deref(),
        ),
        Some(Commands::Pick {
            file,
            node,
            exclude,
        }) => cmd_pick(&container(cli)?, file, node.as_deref(), exclude),
        Some(Commands::Tree { file }) => cmd_tree(&container(cli)?, file),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve current directory", e).into()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&dir))?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?))
}

#[instrument(level = "debug", skip(container))]
fn cmd_move(
    container: &ServiceContainer,
    file: &Path,
    mover: Option<&str>,
    root: Option<&str>,
    indent: Option<&str>,
) -> CliResult<()> {
    let settings = &container.settings;
    let service = container.options_service();
    let tree = service.load(file)?;
    let indent = indent.unwrap_or(&settings.indent);

    let entries = service.move_options(&tree, mover, root, indent)?;
    if entries.is_empty() {
        output::warning("no legal move targets");
    }
    print_report(&OptionsReport::from(entries), settings.format)
}

#[instrument(level = "debug", skip(container))]
fn cmd_assoc(
    container: &ServiceContainer,
    file: &Path,
    node: Option<&str>,
    exclude: &[String],
    prompt: Option<&str>,
    indent: Option<&str>,
) -> CliResult<()> {
    let settings = &container.settings;
    let service = container.options_service();
    let tree = service.load(file)?;

    let options = service.association_options(
        &tree,
        node,
        exclude,
        prompt.unwrap_or(&settings.prompt),
        indent.unwrap_or(&settings.indent),
    )?;
    print_report(&OptionsReport::from(options), settings.format)
}

#[instrument(level = "debug", skip(container))]
fn cmd_pick(
    container: &ServiceContainer,
    file: &Path,
    node: Option<&str>,
    exclude: &[String],
) -> CliResult<()> {
    let settings = &container.settings;
    let service = container.options_service();
    let tree = service.load(file)?;

    let options =
        service.association_options(&tree, node, exclude, &settings.prompt, &settings.indent)?;
    match service.pick(container.selector.as_ref(), &options, &settings.prompt)? {
        Some(entry) => output::info(&entry.value),
        None => output::warning("nothing selected"),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let tree = container.options_service().load(file)?;
    output::info(&tree.to_tree_string());
    output::action("summary", &tree.stats());
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            match global_config_path() {
                Some(path) => output::action("global", &describe(&path)),
                None => output::action("global", "unavailable (no home directory)"),
            }
            output::action("local", &describe(&local_config_path(&project_dir(cli)?)));
            output::action("env", "NESTOPT_PROMPT, NESTOPT_INDENT, NESTOPT_FORMAT");
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_report(report: &OptionsReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => {
            for entry in &report.options {
                output::option(
                    &entry.value,
                    &entry.display,
                    report.is_disabled(&entry.value),
                );
            }
        }
        OutputFormat::Toml => {
            let rendered = report.to_toml()?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", rendered).map_err(|e| InfraError::io("write options", e))?;
        }
    }
    Ok(())
}
