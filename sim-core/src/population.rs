use std::collections::HashSet;

use crate::{branch::Branch, types::WalkerId};

/// The set of walkers that are still growing.
///
/// Order carries no meaning; removal swaps the last walker into the
/// freed slot.
#[derive(Debug, Default)]
pub struct Population {
    walkers: Vec<Branch>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    pub fn clear(&mut self) {
        self.walkers.clear();
    }

    pub fn insert(&mut self, walker: Branch) {
        self.walkers.push(walker);
    }

    /// Removes the walker with `id`.
    ///
    /// ### Returns
    /// The removed walker, or `None` when no walker has that id. An
    /// unknown id is not an error.
    pub fn remove(&mut self, id: WalkerId) -> Option<Branch> {
        let index = self.walkers.iter().position(|w| w.id() == id)?;
        Some(self.walkers.swap_remove(index))
    }

    #[cfg(test)]
    pub fn contains(&self, id: WalkerId) -> bool {
        self.walkers.iter().any(|w| w.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.walkers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Branch> {
        self.walkers.iter_mut()
    }

    /// Removes every walker whose id is in `ids` in a single pass.
    /// Unknown ids are ignored.
    ///
    /// ### Returns
    /// How many walkers were removed.
    pub fn remove_all(&mut self, ids: &[WalkerId]) -> usize {
        match ids {
            [] => 0,
            [id] => usize::from(self.remove(*id).is_some()),
            _ => {
                let doomed: HashSet<WalkerId> = ids.iter().copied().collect();
                let before = self.walkers.len();
                self.walkers.retain(|w| !doomed.contains(&w.id()));
                before - self.walkers.len()
            }
        }
    }
}

impl Extend<Branch> for Population {
    fn extend<I: IntoIterator<Item = Branch>>(&mut self, iter: I) {
        self.walkers.extend(iter);
    }
}
