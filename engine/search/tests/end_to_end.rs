//! Full searches over the bundled games.

use engine_core::game_utils::Player;
use engine_core::{Game, JointAction};
use games_connect4::Connect4;
use games_maze::{Maze, Step, Walker};
use games_tictactoe::TicTacToe;
use games_tricks::Tricks;
use search::{
    Aggregation, Decision, Evaluation, Expansion, Frontier, Generation, Search, SearchConfig,
    SearchError, Selection,
};

// =============================================================================
// TicTacToe
// =============================================================================

#[test]
fn tictactoe_is_a_draw() {
    let game = TicTacToe::new();
    let config = SearchConfig::default().with_seed(7);

    let mut search = Search::builder(&game, config)
        .with_stats()
        .build(game.initial_state(), Player::First)
        .unwrap();
    search.build();

    assert_eq!(search.root_value(), 0.0);
    // Every position reachable in play, stopping at wins
    assert_eq!(search.store().len(), 5478);

    let stats = search.stats().unwrap();
    assert_eq!(stats.nodes_discovered, 5478);
    assert_eq!(stats.evaluations, 5478);
    assert_eq!(stats.truncated_propagations, 0);
}

#[test]
fn tictactoe_symmetry_shrinks_the_graph() {
    let game = TicTacToe::with_symmetry();
    let config = SearchConfig::default().with_seed(7);

    let mut search = Search::new(&game, config, game.initial_state(), Player::First).unwrap();
    search.build();

    assert_eq!(search.root_value(), 0.0);
    assert_eq!(search.store().len(), 765);
}

#[test]
fn tictactoe_takes_the_win() {
    let game = TicTacToe::new();
    // X: 0, 1  O: 3, 4 -> X completes the top row at 2
    let mut state = game.initial_state();
    for cell in [0, 3, 1, 4] {
        let mover = game.to_move(&state);
        state = game.apply(&state, &JointAction::single(mover, cell));
    }

    let mut search =
        Search::new(&game, SearchConfig::fixed_plies(1), state, Player::First).unwrap();
    let decision = search.run().unwrap();

    assert_eq!(decision, Decision::Move(Some(2)));
    assert_eq!(search.root_value(), f64::INFINITY);
}

#[test]
fn tictactoe_blocks_as_second_player() {
    let game = TicTacToe::new();
    // X: 0, 1  O: 4 -> O must block at 2
    let mut state = game.initial_state();
    for cell in [0, 4, 1] {
        let mover = game.to_move(&state);
        state = game.apply(&state, &JointAction::single(mover, cell));
    }

    let config = SearchConfig::default().with_seed(3);
    let mut search = Search::new(&game, config, state, Player::Second).unwrap();

    assert_eq!(search.run().unwrap(), Decision::Move(Some(2)));
    assert_eq!(search.root_value(), 0.0);
}

#[test]
fn tictactoe_waiting_player_passes() {
    let game = TicTacToe::new();
    let config = SearchConfig::fixed_plies(2).with_seed(1);

    // It is X's turn; O has nothing to decide at the root
    let decision = search::run_search(&game, config, game.initial_state(), Player::Second).unwrap();
    assert_eq!(decision, Decision::Move(None));
}

#[test]
fn tictactoe_heuristic_spec_string() {
    let game = TicTacToe::new();
    let config: SearchConfig = "limit_type=plies,limit=2,eval_func=lines,seed=5"
        .parse()
        .unwrap();

    let mut search = Search::new(&game, config, game.initial_state(), Player::First).unwrap();
    let decision = search.run().unwrap();

    // After X's move and O's best reply, the center keeps the largest margin
    assert_eq!(decision, Decision::Move(Some(4)));
}

#[test]
fn unknown_heuristic_is_rejected() {
    let game = TicTacToe::new();
    let config: SearchConfig = "eval_func=windows".parse().unwrap();

    let err = Search::new(&game, config, game.initial_state(), Player::First)
        .err()
        .unwrap();
    assert!(matches!(err, SearchError::UnknownHeuristic { .. }));
    assert_eq!(
        err.to_string(),
        "Unknown heuristic 'windows' (available: lines)"
    );
}

// =============================================================================
// Maze
// =============================================================================

#[test]
fn maze_has_one_shortest_path() {
    let maze = Maze::classic().unwrap();
    let config: SearchConfig = "select_action=paths,portfolio=no_revisit,seed=1".parse().unwrap();

    let mut search = Search::new(&maze, config, maze.initial_state(), Walker).unwrap();
    let Decision::Paths(paths) = search.run().unwrap() else {
        panic!("paths selection returns paths");
    };

    assert_eq!(search.root_value(), f64::INFINITY);
    assert_eq!(search.store().len(), maze.floor_count());
    assert_eq!(paths.len(), 1);
    // Breadth-first distance from start to exit
    assert_eq!(paths[0].len(), 28);

    let last = *paths[0].nodes.last().unwrap();
    assert_eq!(search.store().get(last).hash, maze.exit());
}

#[test]
fn maze_loop_keeps_only_the_short_route() {
    // Straight down is 4 steps; around the loop is 10
    let maze: Maze = "I...\n.  .\n.  .\n....\nO".parse().unwrap();
    let config: SearchConfig = "select_action=paths,portfolio=no_revisit,seed=1".parse().unwrap();

    let mut search = Search::new(&maze, config, maze.initial_state(), Walker).unwrap();
    let Decision::Paths(paths) = search.run().unwrap() else {
        panic!("paths selection returns paths");
    };

    assert_eq!(search.root_value(), f64::INFINITY);
    assert_eq!(search.store().len(), 13);
    let lengths: Vec<usize> = paths.iter().map(|path| path.len()).collect();
    assert_eq!(lengths, vec![4]);
    assert!(paths[0]
        .actions
        .iter()
        .all(|action| action.get(Walker) == Some(&Step::Down)));
}

#[test]
fn maze_first_step_leads_to_the_exit() {
    let maze = Maze::classic().unwrap();
    let config = SearchConfig::default()
        .with_generation(Generation::Portfolio("no_revisit".to_string()))
        .with_seed(2);

    let decision = search::run_search(&maze, config, maze.initial_state(), Walker).unwrap();

    // Left from the start is a dead end
    assert_eq!(decision, Decision::Move(Some(Step::Down)));
}

#[test]
fn maze_cycles_resolve() {
    let maze: Maze = "I.. ...
. . . .
. ... .
.     .
... .O.
  . .
  ..."
        .parse()
        .unwrap();

    // Corridors are walked both ways, so the graph is full of cycles
    let config = SearchConfig::default().with_seed(4);
    let mut search = Search::builder(&maze, config)
        .with_stats()
        .build(maze.initial_state(), Walker)
        .unwrap();
    search.build();

    assert_eq!(search.root_value(), f64::INFINITY);
    assert_eq!(search.store().len(), maze.floor_count());
    assert!(search.stats().unwrap().transpositions > 0);
}

#[test]
fn maze_priority_frontier() {
    let maze = Maze::classic().unwrap();
    let config = SearchConfig::default()
        .with_frontier(Frontier::Priority("distance".to_string()))
        .with_generation(Generation::Portfolio("no_revisit".to_string()))
        .with_seed(5);

    let mut search = Search::new(&maze, config, maze.initial_state(), Walker).unwrap();
    search.build();

    assert_eq!(search.root_value(), f64::INFINITY);
}

// =============================================================================
// Connect4
// =============================================================================

#[test]
fn connect4_node_limit() {
    let game = Connect4::new();
    let config = SearchConfig::default()
        .with_expansion(Expansion::NodeLimit(500))
        .with_evaluation(Evaluation::Heuristic("windows".to_string()))
        .with_seed(11);

    let mut search = Search::builder(&game, config)
        .with_stats()
        .build(game.initial_state(), Player::First)
        .unwrap();
    let decision = search.run().unwrap();

    // One expansion adds at most seven nodes past the check
    let stored = search.store().len();
    assert!((500..507).contains(&stored), "stored {stored}");
    assert!(search.root_opinion().is_some());
    assert!(matches!(decision, Decision::Move(Some(column)) if column < 7));
}

#[test]
fn connect4_central_portfolio() {
    let game = Connect4::new();
    let config: SearchConfig = "limit_type=plies,limit=2,portfolio=central,eval_func=windows,seed=3"
        .parse()
        .unwrap();

    let mut search = Search::builder(&game, config)
        .with_stats()
        .build(game.initial_state(), Player::First)
        .unwrap();
    let decision = search.run().unwrap();

    // 1 root + 3 replies + 9 second plies
    assert_eq!(search.store().len(), 13);
    assert_eq!(search.stats().unwrap().joint_actions, 3 + 9);
    assert!(matches!(decision, Decision::Move(Some(2..=4))));
}

// =============================================================================
// Tricks
// =============================================================================

#[test]
fn tricks_root_has_every_combination() {
    let game = Tricks::new();
    let config = SearchConfig::fixed_plies(1).with_seed(9);

    let mut search = Search::builder(&game, config)
        .with_stats()
        .build(game.initial_state(), 1)
        .unwrap();
    search.build();

    let root = search.store().root();
    assert_eq!(search.store().children_of(root).count(), 27);
    assert_eq!(search.stats().unwrap().joint_actions, 27);
}

#[test]
fn tricks_exhaustive_leader_relative() {
    let game = Tricks::new();
    let config = SearchConfig::default()
        .with_aggregation(Aggregation::LeaderRelative)
        .with_selection(Selection::BestMove)
        .with_seed(13);

    let mut search = Search::new(&game, config, game.initial_state(), 2).unwrap();
    let decision = search.run().unwrap();

    let opinion = search.root_opinion().unwrap();
    assert!(!opinion.actions.is_empty());
    assert!(opinion.actions.iter().all(|card| matches!(card, Some(1..=3))));
    assert!(matches!(decision, Decision::Move(Some(1..=3))));
}

#[test]
fn tricks_heuristic_rollouts_agree_on_shape() {
    let game = Tricks::new();
    let config: SearchConfig = "limit_type=nodes,limit=50,eval=rollout,rollouts=4,aggregate=leader,seed=21"
        .parse()
        .unwrap();

    let mut search = Search::new(&game, config, game.initial_state(), 3).unwrap();
    let decision = search.run().unwrap();

    assert!(search.store().len() >= 50);
    assert!(decision.first_move(3).is_some());
}
