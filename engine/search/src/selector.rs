//! Extracting answers from a resolved store.

use engine_core::{Game, JointAction};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::node::NodeId;
use crate::search::SearchError;
use crate::store::TranspositionStore;

/// One optimal action sequence from the root to a terminal node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<A: Ord, M> {
    /// Visited nodes, root first
    pub nodes: Vec<NodeId>,
    /// Joint actions taken between consecutive nodes
    pub actions: Vec<JointAction<A, M>>,
}

impl<A: Ord, M> Path<A, M> {
    /// Number of actions in the path.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Pick uniformly among the root's best moves.
///
/// `Ok(None)` means the best choice is to pass (or the root was abandoned and
/// has nothing to offer). Fails when the root was never resolved.
pub fn best_move<G: Game>(
    store: &TranspositionStore<G>,
    rng: &mut ChaCha20Rng,
) -> Result<Option<G::Move>, SearchError> {
    let opinion = store
        .get(store.root())
        .opinion
        .as_ref()
        .ok_or(SearchError::Unresolved)?;

    Ok(opinion.actions.choose(rng).cloned().flatten())
}

/// Pick uniformly among `actor`'s legal moves, ignoring any search.
pub fn random_move<G: Game>(
    game: &G,
    state: &G::State,
    actor: G::Actor,
    rng: &mut ChaCha20Rng,
) -> Option<G::Move> {
    game.legal_moves(state)
        .get(&actor)
        .and_then(|moves| moves.choose(rng))
        .cloned()
}

/// Every path from the root that only follows edges into children whose
/// value equals the current node's value, ending at a terminal node.
///
/// Nodes already on the current path are skipped, so cycles are never
/// followed. Branches ending anywhere but a terminal node yield nothing.
pub fn best_paths<G: Game>(store: &TranspositionStore<G>) -> Vec<Path<G::Actor, G::Move>> {
    let mut paths = Vec::new();
    let mut current = Path {
        nodes: vec![store.root()],
        actions: Vec::new(),
    };
    walk(store, store.root(), &mut current, &mut paths);
    paths
}

fn walk<G: Game>(
    store: &TranspositionStore<G>,
    id: NodeId,
    current: &mut Path<G::Actor, G::Move>,
    paths: &mut Vec<Path<G::Actor, G::Move>>,
) {
    let node = store.get(id);
    if node.terminal {
        paths.push(current.clone());
        return;
    }

    for edge in store.children_of(id) {
        if current.nodes.contains(&edge.to) || store.get(edge.to).value != node.value {
            continue;
        }

        current.nodes.push(edge.to);
        current.actions.push(edge.action.clone());
        walk(store, edge.to, current, paths);
        current.nodes.pop();
        current.actions.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Opinion;
    use crate::testing::GraphGame;
    use rand::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(3)
    }

    #[test]
    fn test_best_move_requires_opinion() {
        let game = GraphGame::new(0);
        let store = TranspositionStore::new(&game, 0);

        assert!(matches!(
            best_move(&store, &mut rng()),
            Err(SearchError::Unresolved)
        ));
    }

    #[test]
    fn test_best_move_picks_among_ties() {
        let game = GraphGame::new(0);
        let mut store = TranspositionStore::new(&game, 0);
        store.set_opinion(
            store.root(),
            Opinion {
                value: 1.0,
                actions: vec![Some(4), Some(7)],
            },
        );

        let mut rng = rng();
        for _ in 0..20 {
            let chosen = best_move(&store, &mut rng).unwrap();
            assert!(matches!(chosen, Some(4) | Some(7)));
        }
    }

    #[test]
    fn test_best_move_on_abandoned_root() {
        let game = GraphGame::new(0);
        let mut store = TranspositionStore::new(&game, 0);
        store.set_opinion(store.root(), Opinion::abandoned());

        assert_eq!(best_move(&store, &mut rng()).unwrap(), None);
    }

    #[test]
    fn test_random_move() {
        let game = GraphGame::new(0).node(0, 1, &[5, 6]);

        let chosen = random_move(&game, &0, 1, &mut rng());
        assert!(matches!(chosen, Some(5) | Some(6)));

        // actor 0 has nothing to decide at node 0
        assert_eq!(random_move(&game, &0, 0, &mut rng()), None);
    }

    #[test]
    fn test_best_paths_follow_equal_values() {
        // 0 -> 1 -> 3 (terminal), 0 -> 2 -> 3, 0 -> 4 (terminal, worse)
        // plus a cycle 1 <-> 2 on the optimal level
        let game = GraphGame::new(0).terminal(3).terminal(4);
        let mut store = TranspositionStore::new(&game, 0);
        let ids: Vec<NodeId> = (1..=4)
            .map(|s| store.insert_if_absent(&game, s).0)
            .collect();
        let [n1, n2, n3, n4] = [ids[0], ids[1], ids[2], ids[3]];
        let root = store.root();

        for (from, to) in [(root, n1), (root, n2), (root, n4), (n1, n3), (n2, n3), (n1, n2), (n2, n1)] {
            let target = store.get(to).hash;
            store.record_edge(from, JointAction::single(0, target), to);
        }
        for id in [root, n1, n2, n3] {
            store.set_value(id, 2.0);
        }
        store.set_value(n4, -1.0);

        let paths = best_paths(&store);
        let routes: Vec<Vec<NodeId>> = paths.iter().map(|p| p.nodes.clone()).collect();

        assert_eq!(
            routes,
            vec![
                vec![root, n1, n3],
                vec![root, n1, n2, n3],
                vec![root, n2, n3],
                vec![root, n2, n1, n3],
            ]
        );
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[0].actions[1].get(0), Some(&3));
    }

    #[test]
    fn test_best_paths_on_terminal_root() {
        let game = GraphGame::new(0).terminal(0);
        let store = TranspositionStore::new(&game, 0);

        let paths = best_paths(&store);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_empty());
    }
}
