//! Position-indexed argument list.
//!
//! [`Arguments`] is a thin wrapper around `Vec<Option<Argument>>`. Slot `i`
//! holds the deposit for argument position `i`. Positions the scan never
//! wrote stay `None`. With `%N$` formats, a scan that stops early can leave
//! gaps.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::sscanf;
//!
//! let result = sscanf("%2$d %1$d", "7 x").unwrap();
//! assert_eq!(result.args.len(), 2);
//! assert!(result.args.get(0).is_none());
//! assert!(result.args.get(1).is_some());
//! ```

use crate::decl::Argument;
use serde::Serialize;

/// Argument deposits indexed by argument position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Arguments(Vec<Option<Argument>>);

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Arguments(Vec::new())
    }

    /// Number of slots, which is one past the highest written position.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no slot exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the deposit at `position`, if one was written.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Argument> {
        self.0.get(position).and_then(Option::as_ref)
    }

    /// Returns `true` if `position` has been written.
    #[must_use]
    pub fn is_set(&self, position: usize) -> bool {
        self.get(position).is_some()
    }

    /// Stores `arg` at `position`, growing the list with empty slots.
    ///
    /// Returns the argument back if the slot is already occupied.
    pub fn try_insert(&mut self, position: usize, arg: Argument) -> Result<(), Argument> {
        if self.is_set(position) {
            return Err(arg);
        }
        if self.0.len() <= position {
            self.0.resize(position + 1, None);
        }
        self.0[position] = Some(arg);
        Ok(())
    }

    /// Iterates over slots in position order, including empty ones.
    pub fn iter(&self) -> std::slice::Iter<'_, Option<Argument>> {
        self.0.iter()
    }

    /// Iterates over written deposits with their positions.
    pub fn assigned(&self) -> impl Iterator<Item = (usize, &Argument)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_ref().map(|arg| (position, arg)))
    }

    /// Number of slots that hold a deposit.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    /// Consumes the list, returning the slots.
    #[must_use]
    pub fn into_inner(self) -> Vec<Option<Argument>> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Option<Argument>;
    type IntoIter = std::slice::Iter<'a, Option<Argument>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Arguments {
    type Output = Option<Argument>;

    fn index(&self, position: usize) -> &Self::Output {
        &self.0[position]
    }
}
