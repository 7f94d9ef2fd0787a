//! Validates level parsing, error reporting and full client sessions

use std::io::{BufReader, Write};
use std::sync::Arc;

use clap::Parser;
use tempfile::NamedTempFile;

use gridplan::PlannerError;
use gridplan::io::cli::{Cli, PlannerClient, Strategy};
use gridplan::io::protocol::parse_level;
use gridplan::level::Position;
use gridplan::search::State;

const CORRIDOR: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    corridor\n\
    #colors\n\
    red: 0\n\
    #initial\n\
    +++++\n\
    +0  +\n\
    +++++\n\
    #goal\n\
    +++++\n\
    +  0+\n\
    +++++\n\
    #end\n";

const PUSH_LANE: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    push lane\n\
    #colors\n\
    red: 0, A\n\
    #initial\n\
    +++++\n\
    +0A +\n\
    +++++\n\
    #goal\n\
    +++++\n\
    +  A+\n\
    +++++\n\
    #end\n";

fn parse(text: &str) -> Arc<State> {
    match parse_level(&mut text.as_bytes()) {
        Ok(state) => state,
        Err(err) => unreachable!("level must parse: {err}"),
    }
}

/// Run a quiet client session over in-memory streams, returning the lines it
/// wrote to the server.
fn session(args: &[&str], input: &str) -> Vec<String> {
    let cli = Cli::parse_from(args);
    let client = PlannerClient::new(cli);
    let mut reader = input.as_bytes();
    let mut written = Vec::new();
    match client.run_with(&mut reader, &mut written) {
        Ok(()) => {}
        Err(err) => unreachable!("session must succeed: {err}"),
    }
    String::from_utf8_lossy(&written)
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_parse_level_reads_grid() {
    let state = parse(PUSH_LANE);
    let level = state.level();

    assert_eq!(level.name, "push lane");
    assert_eq!(level.rows(), 3);
    assert_eq!(level.cols(), 5);
    assert_eq!(level.num_agents(), 1);
    assert!(level.is_wall(Position::new(0, 0)));
    assert!(!level.is_wall(Position::new(1, 1)));
    // Cells beyond the grid read as walls.
    assert!(level.is_wall(Position::new(-1, 0)));
    assert!(level.is_wall(Position::new(1, 5)));

    assert_eq!(state.agents(), &[Position::new(1, 1)]);
    assert_eq!(state.box_at(Position::new(1, 2)), Some(b'A'));
    assert_eq!(state.box_at(Position::new(1, 3)), None);
    assert_eq!(level.goal_at(Position::new(1, 3)), Some(b'A'));
    assert_eq!(level.goal_at(Position::new(1, 1)), None);
}

#[test]
fn test_truncated_stream_is_missing_section() {
    let text = "#domain\nhospital\n#levelname\ncorridor\n";
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(
        result,
        Err(PlannerError::MissingSection { section: "#colors" })
    ));
}

#[test]
fn test_unknown_color_is_rejected() {
    let text = CORRIDOR.replace("red: 0", "vermilion: 0");
    let result = parse_level(&mut text.as_bytes());
    match result {
        Err(PlannerError::UnknownColor { line, name }) => {
            assert_eq!(line, 6);
            assert_eq!(name, "vermilion");
        }
        _ => unreachable!("expected an unknown color error"),
    }
}

#[test]
fn test_invalid_glyph_is_rejected() {
    let text = CORRIDOR.replace("+0  +", "+0 ?+");
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(
        result,
        Err(PlannerError::MalformedLevel { line: 9, .. })
    ));
}

#[test]
fn test_duplicate_agent_is_rejected() {
    let text = CORRIDOR.replace("+0  +", "+0 0+");
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(result, Err(PlannerError::MalformedLevel { .. })));
}

#[test]
fn test_noncontiguous_agent_ids_are_rejected() {
    let text = CORRIDOR
        .replace("red: 0", "red: 0, 2")
        .replace("+0  +", "+0 2+");
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(result, Err(PlannerError::MalformedLevel { .. })));
}

#[test]
fn test_uncolored_agent_is_rejected() {
    let text = CORRIDOR.replace("red: 0", "red: 1");
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(result, Err(PlannerError::MalformedLevel { .. })));
}

#[test]
fn test_goal_for_missing_agent_is_rejected() {
    let text = CORRIDOR.replace("+  0+", "+  1+");
    let result = parse_level(&mut text.as_bytes());
    assert!(matches!(result, Err(PlannerError::MalformedLevel { .. })));
}

#[test]
fn test_oversized_grid_is_rejected() {
    let wide_wall = "+".repeat(131);
    let text = CORRIDOR
        .replace("#initial\n+++++", &format!("#initial\n{wide_wall}"))
        .replace("#goal\n+++++", &format!("#goal\n{wide_wall}"));
    let result = parse_level(&mut text.as_bytes());
    match result {
        Err(PlannerError::LevelTooLarge { rows, cols, max }) => {
            assert_eq!(rows, 3);
            assert_eq!(cols, 131);
            assert_eq!(max, 130);
        }
        _ => unreachable!("expected a level size error"),
    }
}

#[test]
fn test_level_parses_from_a_file() {
    let mut file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => unreachable!("temporary file must open: {err}"),
    };
    match file.write_all(CORRIDOR.as_bytes()) {
        Ok(()) => {}
        Err(err) => unreachable!("temporary file must accept writes: {err}"),
    }
    let reopened = match file.reopen() {
        Ok(reopened) => reopened,
        Err(err) => unreachable!("temporary file must reopen: {err}"),
    };

    let mut reader = BufReader::new(reopened);
    let state = match parse_level(&mut reader) {
        Ok(state) => state,
        Err(err) => unreachable!("level must parse: {err}"),
    };
    assert_eq!(state.level().name, "corridor");
}

#[test]
fn test_session_solves_corridor_with_bfs() {
    let input = format!("{CORRIDOR}ok\nok\n");
    let lines = session(&["gridplan", "--bfs", "--quiet"], &input);
    assert_eq!(
        lines,
        [
            "GridPlan",
            "#Strategy: breadth-first search",
            "Move(E)",
            "Move(E)"
        ]
    );
}

#[test]
fn test_session_solves_push_lane() {
    let input = format!("{PUSH_LANE}ok\n");
    let lines = session(&["gridplan", "--astar", "--quiet"], &input);
    assert_eq!(
        lines,
        [
            "GridPlan",
            "#Strategy: best-first search using A* evaluation",
            "Push(E,E)"
        ]
    );
}

#[test]
fn test_session_submits_nothing_when_already_solved() {
    let solved = CORRIDOR.replace("+  0+", "+0  +");
    let lines = session(&["gridplan", "--greedy", "--quiet"], &solved);
    // An empty plan still counts as a solution; no action lines follow
    // the handshake.
    assert_eq!(
        lines,
        ["GridPlan", "#Strategy: best-first search using greedy evaluation"]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_zero_memory_ceiling_aborts_the_search() {
    let lines = session(
        &["gridplan", "--bfs", "--quiet", "--max-memory", "0"],
        CORRIDOR,
    );
    // The search gives up before popping the initial configuration, so
    // no plan lines reach the server.
    assert_eq!(lines, ["GridPlan", "#Strategy: breadth-first search"]);
}

#[test]
fn test_negative_memory_ceiling_is_rejected() {
    let cli = Cli::parse_from(["gridplan", "--bfs", "--quiet", "--max-memory=-1"]);
    let client = PlannerClient::new(cli);
    let mut reader = CORRIDOR.as_bytes();
    let mut written = Vec::new();

    let result = client.run_with(&mut reader, &mut written);
    assert!(matches!(
        result,
        Err(PlannerError::InvalidParameter {
            parameter: "max-memory",
            ..
        })
    ));
    // The handshake never happens when the arguments are invalid.
    assert!(written.is_empty());
}

#[test]
fn test_bare_wastar_flag_defaults_its_weight() {
    let cli = Cli::parse_from(["gridplan", "--wastar"]);
    assert_eq!(cli.wastar, Some(5));
    assert_eq!(cli.strategy(), Some(Strategy::WeightedAStar(5)));

    let cli = Cli::parse_from(["gridplan", "--wastar=3"]);
    assert_eq!(cli.strategy(), Some(Strategy::WeightedAStar(3)));
}

#[test]
fn test_strategy_flags_are_mutually_exclusive() {
    let result = Cli::try_parse_from(["gridplan", "--bfs", "--dfs"]);
    assert!(result.is_err());
}

#[test]
fn test_no_flag_leaves_strategy_unset() {
    let cli = Cli::parse_from(["gridplan"]);
    assert_eq!(cli.strategy(), None);
    assert_eq!(cli.seed, 1);
    assert!((cli.max_memory - 2048.0).abs() < f64::EPSILON);
}
