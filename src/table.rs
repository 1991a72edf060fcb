//! This module defines the `TransitionTable`, the immutable rule set a machine dispatches on.

use serde::{Deserialize, Serialize};

use crate::types::Transition;

/// An ordered, immutable collection of transition rules.
///
/// No validation happens on construction: duplicate, unreachable or missing rules are
/// allowed and only show up at run time as an [`Outcome::NoTransition`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable<Q, S> {
    transitions: Vec<Transition<Q, S>>,
}

impl<Q, S> TransitionTable<Q, S> {
    /// Creates a table from rules in the order they should be matched.
    pub fn new(transitions: Vec<Transition<Q, S>>) -> Self {
        Self { transitions }
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterates over the rules in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transition<Q, S>> {
        self.transitions.iter()
    }

    pub fn transitions(&self) -> &[Transition<Q, S>] {
        &self.transitions
    }
}

impl<Q: PartialEq, S: PartialEq> TransitionTable<Q, S> {
    /// Finds the rule for `state` reading `symbol`.
    ///
    /// Rules are scanned in table order and the first exact match is returned, so an
    /// earlier duplicate always shadows a later one.
    ///
    /// # Returns
    ///
    /// * `Some(&Transition)` if a matching rule exists.
    /// * `None` if no rule matches.
    pub fn lookup(&self, state: &Q, symbol: &S) -> Option<&Transition<Q, S>> {
        self.transitions
            .iter()
            .find(|t| t.state == *state && t.read == *symbol)
    }
}

impl<Q, S> FromIterator<Transition<Q, S>> for TransitionTable<Q, S> {
    fn from_iter<I: IntoIterator<Item = Transition<Q, S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, Q, S> IntoIterator for &'a TransitionTable<Q, S> {
    type Item = &'a Transition<Q, S>;
    type IntoIter = std::slice::Iter<'a, Transition<Q, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
