//! In-memory variable store
//!
//! The store owns the live variable set and is the only place mutations
//! happen. Every mutation is validated up front through the value codec:
//! either it fully succeeds, or it fails and the prior state is untouched.
//! Persistence only ever sees copies via [`VariableStore::snapshot`].

mod errors;
mod types;

pub use errors::{StoreError, StoreResult};
pub use types::{Snapshot, Variable};

use crate::codec::{self, VarType, VarValue};

/// Insertion-ordered set of typed variables.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: Vec<Variable>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a previously loaded snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            variables: snapshot.variables,
        }
    }

    /// Copies the live state into a snapshot for publishing.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            variables: self.variables.clone(),
        }
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Looks up one variable by name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Adds a new variable with an empty override map.
    ///
    /// The default value is parsed against `var_type`; its parse error is
    /// returned as-is. The variable's type is fixed from here on.
    pub fn add_variable(
        &mut self,
        name: &str,
        var_type: VarType,
        default_raw: &str,
    ) -> StoreResult<&Variable> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.get(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let default = codec::parse(var_type, default_raw)?;
        self.variables.push(Variable {
            name: name.to_string(),
            var_type,
            default,
            overrides: Vec::new(),
        });
        let added = self.variables.len() - 1;
        Ok(&self.variables[added])
    }

    /// Replaces a variable's default value, keeping its type.
    ///
    /// On a parse failure the stored default is left unchanged.
    pub fn update_default(&mut self, name: &str, raw: &str) -> StoreResult<()> {
        let index = self.index_of(name)?;
        let default = codec::parse(self.variables[index].var_type(), raw)?;
        self.variables[index].default = default;
        Ok(())
    }

    /// Deletes a variable together with all of its overrides.
    pub fn delete_variable(&mut self, name: &str) -> StoreResult<()> {
        let index = self.index_of(name)?;
        self.variables.remove(index);
        Ok(())
    }

    /// Adds or replaces the override of one shot on one variable.
    ///
    /// The value is parsed against the owning variable's type. Each shot id
    /// appears at most once; a second set replaces the first in place.
    pub fn set_override(&mut self, name: &str, shot_id: &str, raw: &str) -> StoreResult<()> {
        let index = self.index_of(name)?;
        let shot = shot_id.trim();
        if shot.is_empty() {
            return Err(StoreError::EmptyShotId);
        }

        let value = codec::parse(self.variables[index].var_type(), raw)?;
        let overrides = &mut self.variables[index].overrides;
        match overrides.iter_mut().find(|(existing, _)| existing == shot) {
            Some((_, slot)) => *slot = value,
            None => overrides.push((shot.to_string(), value)),
        }
        Ok(())
    }

    /// Deletes the override of one shot on one variable.
    ///
    /// The shot id is trimmed the same way `set_override` trims it before
    /// storing.
    pub fn delete_override(&mut self, name: &str, shot_id: &str) -> StoreResult<()> {
        let index = self.index_of(name)?;
        let shot = shot_id.trim();
        let overrides = &mut self.variables[index].overrides;
        match overrides.iter().position(|(existing, _)| existing == shot) {
            Some(position) => {
                overrides.remove(position);
                Ok(())
            }
            None => Err(StoreError::UnknownOverride {
                variable: name.to_string(),
                shot: shot.to_string(),
            }),
        }
    }

    /// Overrides of one variable in insertion order.
    pub fn overrides(&self, name: &str) -> StoreResult<&[(String, VarValue)]> {
        let index = self.index_of(name)?;
        Ok(self.variables[index].overrides())
    }

    fn index_of(&self, name: &str) -> StoreResult<usize> {
        self.variables
            .iter()
            .position(|v| v.name() == name)
            .ok_or_else(|| StoreError::UnknownVariable(name.to_string()))
    }
}
