//! Validates frontier ordering semantics and heuristic evaluation

use std::sync::Arc;

use gridplan::io::protocol::parse_level;
use gridplan::search::action::Action;
use gridplan::search::frontier::Frontier;
use gridplan::search::heuristic::{Heuristic, Objective};
use gridplan::search::{SearchEngine, SearchStatus, State};

const ROOM: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    room\n\
    #colors\n\
    red: 0\n\
    #initial\n\
    +++++\n\
    +0  +\n\
    +   +\n\
    +   +\n\
    +++++\n\
    #goal\n\
    +++++\n\
    +   +\n\
    + 0 +\n\
    +   +\n\
    +++++\n\
    #end\n";

const BOX_ROOM: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    box room\n\
    #colors\n\
    red: 0, A\n\
    #initial\n\
    ++++++\n\
    +0A  +\n\
    ++++++\n\
    #goal\n\
    ++++++\n\
    +   A+\n\
    ++++++\n\
    #end\n";

fn parse(text: &str) -> Arc<State> {
    match parse_level(&mut text.as_bytes()) {
        Ok(state) => state,
        Err(err) => unreachable!("level must parse: {err}"),
    }
}

#[test]
fn test_bfs_pops_in_fifo_order() {
    let initial = parse(ROOM);
    let first = Arc::new(initial.apply(vec![Action::MOVE_E]));
    let second = Arc::new(initial.apply(vec![Action::MOVE_S]));

    let mut frontier = Frontier::bfs();
    frontier.add(Arc::clone(&first));
    frontier.add(Arc::clone(&second));

    assert_eq!(frontier.pop(), Some(first));
    assert_eq!(frontier.pop(), Some(second));
    assert_eq!(frontier.pop(), None);
}

#[test]
fn test_dfs_pops_in_lifo_order() {
    let initial = parse(ROOM);
    let first = Arc::new(initial.apply(vec![Action::MOVE_E]));
    let second = Arc::new(initial.apply(vec![Action::MOVE_S]));

    let mut frontier = Frontier::dfs();
    frontier.add(Arc::clone(&first));
    frontier.add(Arc::clone(&second));

    assert_eq!(frontier.pop(), Some(second));
    assert_eq!(frontier.pop(), Some(first));
    assert!(frontier.is_empty());
}

#[test]
fn test_membership_tracks_adds_and_pops() {
    let initial = parse(ROOM);
    let child = Arc::new(initial.apply(vec![Action::MOVE_E]));

    let mut frontier = Frontier::bfs();
    assert!(!frontier.contains(&child));

    frontier.add(Arc::clone(&child));
    assert!(frontier.contains(&child));
    assert_eq!(frontier.len(), 1);

    let popped = frontier.pop();
    assert_eq!(popped, Some(child));
    let Some(popped) = popped else {
        unreachable!("pop returned above");
    };
    assert!(!frontier.contains(&popped));
    assert!(frontier.is_empty());
}

#[test]
fn test_best_first_orders_by_ascending_evaluation() {
    let initial = parse(ROOM);
    // Goal sits at (2,2); (1,2) is one step away, (1,1) is two.
    let near = Arc::new(initial.apply(vec![Action::MOVE_E]));
    let far = Arc::clone(&initial);

    let heuristic = Heuristic::new(&initial, Objective::Greedy);
    let mut frontier = Frontier::best_first(heuristic);
    frontier.add(Arc::clone(&far));
    frontier.add(Arc::clone(&near));

    assert_eq!(frontier.pop(), Some(near));
    assert_eq!(frontier.pop(), Some(far));
}

#[test]
fn test_best_first_breaks_ties_by_insertion_order() {
    let initial = parse(ROOM);
    // Both (1,2) and (2,1) are one step from the goal at (2,2).
    let east = Arc::new(initial.apply(vec![Action::MOVE_E]));
    let south = Arc::new(initial.apply(vec![Action::MOVE_S]));

    let heuristic = Heuristic::new(&initial, Objective::Greedy);
    assert_eq!(heuristic.evaluate(&east), heuristic.evaluate(&south));

    let mut frontier = Frontier::best_first(Heuristic::new(&initial, Objective::Greedy));
    frontier.add(Arc::clone(&south));
    frontier.add(Arc::clone(&east));

    assert_eq!(frontier.pop(), Some(south));
    assert_eq!(frontier.pop(), Some(east));
}

#[test]
fn test_estimate_sums_goal_cell_distances() {
    let initial = parse(ROOM);
    let heuristic = Heuristic::new(&initial, Objective::Greedy);

    // Agent at (1,1), goal at (2,2): Manhattan distance 2.
    assert_eq!(heuristic.estimate(&initial), 2);

    let nearer = initial.apply(vec![Action::MOVE_E]);
    assert_eq!(heuristic.estimate(&nearer), 1);
}

#[test]
fn test_box_goal_uses_nearest_matching_box() {
    let initial = parse(BOX_ROOM);
    let heuristic = Heuristic::new(&initial, Objective::Greedy);

    // Box at (1,2), goal A at (1,4): distance 2.
    assert_eq!(heuristic.estimate(&initial), 2);

    let pushed = initial.apply(vec![Action::PUSH_EE]);
    assert_eq!(heuristic.estimate(&pushed), 1);
}

#[test]
fn test_objectives_weight_path_cost_differently() {
    let initial = parse(ROOM);
    let child = initial.apply(vec![Action::MOVE_E]);
    // g = 1, h = 1 for the child configuration.

    let astar = Heuristic::new(&initial, Objective::AStar);
    let weighted = Heuristic::new(&initial, Objective::WeightedAStar(5));
    let greedy = Heuristic::new(&initial, Objective::Greedy);

    assert_eq!(astar.evaluate(&child), 2);
    assert_eq!(weighted.evaluate(&child), 6);
    assert_eq!(greedy.evaluate(&child), 1);
}

#[test]
fn test_satisfied_goal_cells_contribute_nothing() {
    let text = BOX_ROOM.replace("+   A+", "+ A  +");
    let solved_box = parse(&text);
    let heuristic = Heuristic::new(&solved_box, Objective::Greedy);

    assert_eq!(heuristic.estimate(&solved_box), 0);
}

#[test]
fn test_engine_finds_an_optimal_bfs_plan() {
    let initial = parse(ROOM);
    let mut engine = SearchEngine::new(Frontier::bfs(), 1, 2048.0);
    let outcome = engine.run(Arc::clone(&initial));

    assert_eq!(outcome.status, SearchStatus::GoalFound);
    let Some(ref plan) = outcome.plan else {
        unreachable!("a goal was reported");
    };
    assert_eq!(plan.len(), 2);
    assert_eq!(outcome.generated(), outcome.explored + outcome.frontier);
}

#[test]
fn test_engine_exhausts_an_unsolvable_level() {
    // A letter goal with no box of that letter anywhere on the grid.
    let text = ROOM.replace("+ 0 +", "+ A +");
    let initial = parse(&text);

    let mut engine = SearchEngine::new(Frontier::dfs(), 1, 2048.0);
    let outcome = engine.run(Arc::clone(&initial));

    assert_eq!(outcome.status, SearchStatus::FrontierExhausted);
    assert!(outcome.plan.is_none());
}

#[test]
fn test_strategy_display_names() {
    let initial = parse(ROOM);

    assert_eq!(Frontier::bfs().name(), "breadth-first search");
    assert_eq!(Frontier::dfs().name(), "depth-first search");

    let weighted = Frontier::best_first(Heuristic::new(&initial, Objective::WeightedAStar(5)));
    assert_eq!(weighted.name(), "best-first search using WA*(5) evaluation");
}
