//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CourseIndex, TreeDisplay};
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::List { by_prereqs }) => cmd_list(cli, container, *by_prereqs),
        Some(Commands::Show { id }) => cmd_show(cli, container, id),
        Some(Commands::Validate) => cmd_validate(cli, container),
        Some(Commands::Impact { id }) => cmd_impact(cli, container, id),
        Some(Commands::Tree) => cmd_tree(cli, container),
        Some(Commands::Menu) | None => cmd_menu(cli, container),
        Some(Commands::Config { command }) => cmd_config(command, container),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Catalog from `--file`, falling back to the configured `catalog_file`.
fn catalog_path(cli: &Cli, container: &ServiceContainer) -> Option<PathBuf> {
    cli.file
        .clone()
        .or_else(|| container.settings.catalog_file.clone())
}

fn load_index(cli: &Cli, container: &ServiceContainer) -> CliResult<CourseIndex> {
    let path = catalog_path(cli, container).ok_or_else(|| {
        CliError::Usage("no catalog file: pass --file or set catalog_file in the config".into())
    })?;
    debug!("catalog: {}", path.display());
    Ok(container.catalog.load(&path)?)
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_list(cli: &Cli, container: &ServiceContainer, by_prereqs: bool) -> CliResult<()> {
    let index = load_index(cli, container)?;

    if !by_prereqs {
        output::header(&format!("Courses ({})", index.len()));
        index
            .iter()
            .for_each(|course| output::info(&output::course_line(course)));
        return Ok(());
    }

    match index.prerequisite_order() {
        Some(order) => {
            output::header(&format!("Courses in prerequisite order ({})", order.len()));
            order
                .into_iter()
                .for_each(|course| output::info(&output::course_line(course)));
        }
        None => output::warning("courses cannot be ordered by prerequisites"),
    }
    Ok(())
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_show(cli: &Cli, container: &ServiceContainer, id: &str) -> CliResult<()> {
    let index = load_index(cli, container)?;
    let course = index
        .find(id)
        .ok_or_else(|| ApplicationError::CourseNotFound(id.to_string()))?;

    let lines = output::course_detail(&index, course);
    if let Some((summary, rest)) = lines.split_first() {
        output::header(summary);
        rest.iter().for_each(|line| output::info(line));
    }
    Ok(())
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_validate(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match load_index(cli, container) {
        Ok(index) => {
            output::success(&format!("catalog is valid ({} courses)", index.len()));
            Ok(())
        }
        Err(CliError::Infra(InfraError::Application(
            ApplicationError::InvalidCatalog { issues },
        ))) => {
            output::header(&format!("{} problem(s) found", issues.len()));
            issues.iter().for_each(|issue| output::failure(issue));
            Err(ApplicationError::InvalidCatalog { issues }.into())
        }
        Err(e) => Err(e),
    }
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_impact(cli: &Cli, container: &ServiceContainer, id: &str) -> CliResult<()> {
    let index = load_index(cli, container)?;
    let impacted = container.catalog.deletion_impact(&index, id)?;

    output::header(&format!(
        "Deleting {} removes {} course(s):",
        impacted[0],
        impacted.len()
    ));
    impacted.iter().for_each(|course_id| output::detail(course_id));
    Ok(())
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_tree(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let index = load_index(cli, container)?;
    output::info(&index.to_tree_string());
    output::detail(&format!("{} courses, height {}", index.len(), index.height()));
    Ok(())
}

#[instrument(level = "debug", skip(cli, container))]
fn cmd_menu(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    // only an explicit --file is loaded up front; the configured catalog is the prompt default
    let preloaded = match &cli.file {
        Some(path) => Some(container.catalog.load(path)?),
        None => None,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(&container.catalog, stdin.lock(), stdout.lock())
        .with_default_file(catalog_path(cli, container));
    if let Some(index) = preloaded {
        menu = menu.with_index(index);
    }
    let index = menu.run()?;
    debug!("menu closed with {} courses", index.len());
    Ok(())
}

fn cmd_config(command: &ConfigCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&Settings::template());
        }
        ConfigCommands::Path => {
            let cwd = std::env::current_dir().with_path_context("resolve", Path::new("."))?;
            output::header("Config files (lowest precedence first)");
            match global_config_path() {
                Some(path) => output::detail(&describe_path(path)),
                None => output::warning("no home directory, global config disabled"),
            }
            output::detail(&describe_path(local_config_path(&cwd)));
        }
    }
    Ok(())
}

fn describe_path(path: PathBuf) -> String {
    let state = if path.is_file() { "found" } else { "missing" };
    format!("{} ({})", path.display(), state)
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
