//! Variable bindings supplied at evaluation time.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use calcex_types::{CalcError, Result};

/// A set of named variable values.
///
/// Both evaluators only ever ask two questions of a binding set: how many
/// entries it holds, and the value of one name.
pub trait Bindings {
    /// Number of bound names.
    fn len(&self) -> usize;

    /// Value bound to `name`, if any.
    fn get(&self, name: &str) -> Option<f64>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Bindings for BTreeMap<String, f64> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, name: &str) -> Option<f64> {
        BTreeMap::get(self, name).copied()
    }
}

impl<S: BuildHasher> Bindings for HashMap<String, f64, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, name: &str) -> Option<f64> {
        HashMap::get(self, name).copied()
    }
}

impl Bindings for [(&str, f64)] {
    fn len(&self) -> usize {
        <[_]>::len(self)
    }

    /// Linear scan; the first pair with a matching name wins.
    fn get(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> Bindings for [(&str, f64); N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, name: &str) -> Option<f64> {
        Bindings::get(self.as_slice(), name)
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, name: &str) -> Option<f64> {
        (**self).get(name)
    }
}

/// Validate `bindings` against `unknowns`.
///
/// The count must match exactly; then every unknown must be present,
/// checked in `unknowns` order.
pub fn check<B: Bindings + ?Sized>(unknowns: &[String], bindings: &B) -> Result<()> {
    resolve(unknowns, bindings).map(|_| ())
}

/// Validate `bindings` and return the value of each unknown, in order.
pub fn resolve<B: Bindings + ?Sized>(unknowns: &[String], bindings: &B) -> Result<Vec<f64>> {
    if bindings.len() != unknowns.len() {
        return Err(CalcError::Arity {
            expected: unknowns.len(),
            got: bindings.len(),
        });
    }
    unknowns
        .iter()
        .map(|name| {
            bindings
                .get(name)
                .ok_or_else(|| CalcError::MissingVariable { name: name.clone() })
        })
        .collect()
}
