//! Joint actions: one choice per deciding actor
//!
//! Turn-based games are the special case where exactly one actor has moves
//! and the rest pass.

use std::collections::BTreeMap;

/// Actors with a pending decision, each mapped to its legal moves.
pub type LegalMoves<A, M> = BTreeMap<A, Vec<M>>;

/// A mapping from each deciding actor to its chosen move, or `None` for pass.
///
/// Ordered by actor so that equal choices always hash and compare equal,
/// regardless of the order they were assembled in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointAction<A: Ord, M>(BTreeMap<A, Option<M>>);

impl<A: Ord + Copy, M> JointAction<A, M> {
    /// Empty joint action (nobody decides).
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from `(actor, choice)` pairs.
    pub fn from_choices<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = (A, Option<M>)>,
    {
        Self(choices.into_iter().collect())
    }

    /// Single-actor joint action, the turn-based shape.
    pub fn single(actor: A, choice: M) -> Self {
        Self::from_choices([(actor, Some(choice))])
    }

    /// Record `actor`'s choice, replacing any earlier one.
    pub fn set(&mut self, actor: A, choice: Option<M>) {
        self.0.insert(actor, choice);
    }

    /// The move `actor` chose. `None` both for a pass and for an actor that
    /// is not part of this joint action.
    pub fn get(&self, actor: A) -> Option<&M> {
        self.0.get(&actor).and_then(Option::as_ref)
    }

    /// The raw choice for `actor`; distinguishes "absent" (`None`) from
    /// "passed" (`Some(None)`).
    pub fn choice(&self, actor: A) -> Option<&Option<M>> {
        self.0.get(&actor)
    }

    /// Deciding actors in ascending order.
    pub fn actors(&self) -> impl Iterator<Item = A> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, &Option<M>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A: Ord + Copy, M> Default for JointAction<A, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Ord + Copy, M> FromIterator<(A, Option<M>)> for JointAction<A, M> {
    fn from_iter<I: IntoIterator<Item = (A, Option<M>)>>(iter: I) -> Self {
        Self::from_choices(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_get_distinguishes_pass_from_absent() {
        let action = JointAction::from_choices([(1u8, Some('a')), (2, None)]);

        assert_eq!(action.get(1), Some(&'a'));
        assert_eq!(action.get(2), None);
        assert_eq!(action.get(3), None);

        assert_eq!(action.choice(2), Some(&None));
        assert_eq!(action.choice(3), None);
    }

    #[test]
    fn test_order_independent_equality() {
        let a = JointAction::from_choices([(2u8, Some(7)), (1, Some(3))]);
        let b = JointAction::from_choices([(1u8, Some(3)), (2, Some(7))]);
        assert_eq!(a, b);

        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));
    }

    #[test]
    fn test_set_replaces_choice() {
        let mut action = JointAction::single(0u8, 4u32);
        action.set(0, None);
        action.set(1, Some(9));

        assert_eq!(action.len(), 2);
        assert_eq!(action.get(0), None);
        assert_eq!(action.get(1), Some(&9));
        assert_eq!(action.actors().collect::<Vec<_>>(), vec![0, 1]);
    }
}
