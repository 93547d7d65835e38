//! Joint action generation.

use engine_core::{Game, JointAction, Portfolio};

/// Turns each actor's legal moves into the joint actions expanding a node.
pub enum ActionGenerator<G: Game> {
    /// Cartesian product of all legal moves.
    Full,
    /// Product of the moves each actor keeps after the portfolio filter.
    Portfolio(Portfolio<G>),
}

impl<G: Game> std::fmt::Debug for ActionGenerator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "Full"),
            Self::Portfolio(_) => write!(f, "Portfolio"),
        }
    }
}

impl<G: Game> ActionGenerator<G> {
    /// Joint actions for `state`, in actor order then move order.
    ///
    /// An actor without legal moves contributes a single pass. With a
    /// portfolio, an actor whose filtered moves come back empty abandons the
    /// node and no joint actions are produced.
    pub fn generate(&self, game: &G, state: &G::State) -> Vec<JointAction<G::Actor, G::Move>> {
        let mut joint = vec![JointAction::new()];

        for (actor, moves) in game.legal_moves(state) {
            let options: Vec<Option<G::Move>> = if moves.is_empty() {
                vec![None]
            } else {
                let kept = match self {
                    Self::Full => moves,
                    Self::Portfolio(filter) => filter(game, state, actor, &moves),
                };
                if kept.is_empty() {
                    return Vec::new();
                }
                kept.into_iter().map(Some).collect()
            };

            joint = joint
                .into_iter()
                .flat_map(|partial| {
                    options.iter().map(move |choice| {
                        let mut next = partial.clone();
                        next.set(actor, choice.clone());
                        next
                    })
                })
                .collect();
        }

        joint
    }
}
