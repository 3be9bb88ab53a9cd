//! CLI command implementations
//!
//! Every command is one-shot: it loads the latest snapshot from the base
//! directory, runs one store operation, and (for mutations) publishes the
//! result as a new version. Publishing is the only write path, so each
//! mutation leaves behind a complete version history.

use crate::codec;
use crate::publish::VersionStore;
use crate::store::{StoreError, VariableStore};

use super::args::{Cli, Command, OverrideCommand};
use super::errors::CliResult;

/// Dispatch a parsed command.
pub fn dispatch(cli: &Cli) -> CliResult<()> {
    let storage = VersionStore::new(&cli.dir);
    match &cli.command {
        Command::List => list(&storage),
        Command::Show { name } => show(&storage, name),
        Command::Add {
            name,
            var_type,
            default,
        } => mutate(&storage, |vars| {
            vars.add_variable(name, *var_type, default)?;
            Ok(())
        }),
        Command::SetDefault { name, value } => {
            mutate(&storage, |vars| vars.update_default(name, value))
        }
        Command::Delete { name } => mutate(&storage, |vars| vars.delete_variable(name)),
        Command::Override(command) => match command {
            OverrideCommand::Set {
                variable,
                shot,
                value,
            } => mutate(&storage, |vars| vars.set_override(variable, shot, value)),
            OverrideCommand::Delete { variable, shot } => {
                mutate(&storage, |vars| vars.delete_override(variable, shot))
            }
            OverrideCommand::List { variable } => list_overrides(&storage, variable),
        },
        Command::Versions => versions(&storage),
    }
}

/// Load, apply one mutation, publish.
fn mutate(
    storage: &VersionStore,
    operation: impl FnOnce(&mut VariableStore) -> Result<(), StoreError>,
) -> CliResult<()> {
    let mut vars = VariableStore::from_snapshot(storage.load_latest()?);
    operation(&mut vars)?;
    let version = storage.publish(&vars.snapshot())?;
    println!("published version {:03}", version);
    Ok(())
}

fn list(storage: &VersionStore) -> CliResult<()> {
    let vars = VariableStore::from_snapshot(storage.load_latest()?);
    for variable in vars.variables() {
        println!(
            "{}\t{}\t{}\t{} override(s)",
            variable.name(),
            variable.var_type(),
            codec::format(variable.default()),
            variable.overrides().len()
        );
    }
    Ok(())
}

fn show(storage: &VersionStore, name: &str) -> CliResult<()> {
    let vars = VariableStore::from_snapshot(storage.load_latest()?);
    let variable = vars
        .get(name)
        .ok_or_else(|| StoreError::UnknownVariable(name.to_string()))?;

    println!("name:    {}", variable.name());
    println!("type:    {}", variable.var_type());
    println!("default: {}", codec::format(variable.default()));
    for (shot, value) in variable.overrides() {
        println!("  {}\t{}", shot, codec::format(value));
    }
    Ok(())
}

fn list_overrides(storage: &VersionStore, name: &str) -> CliResult<()> {
    let vars = VariableStore::from_snapshot(storage.load_latest()?);
    for (shot, value) in vars.overrides(name)? {
        println!("{}\t{}", shot, codec::format(value));
    }
    Ok(())
}

fn versions(storage: &VersionStore) -> CliResult<()> {
    for version in storage.versions() {
        println!("{:03}", version);
    }
    Ok(())
}
