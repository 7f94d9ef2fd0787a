//! Performance measurement for successor generation and full searches

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gridplan::io::protocol::parse_level;
use gridplan::search::frontier::Frontier;
use gridplan::search::{SearchEngine, State};

const TWO_AGENT_ROOM: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    two agent room\n\
    #colors\n\
    red: 0, A\n\
    blue: 1, B\n\
    #initial\n\
    ++++++++\n\
    +0A    +\n\
    +      +\n\
    +    B1+\n\
    ++++++++\n\
    #goal\n\
    ++++++++\n\
    +     A+\n\
    +      +\n\
    +B     +\n\
    ++++++++\n\
    #end\n";

const PUSH_CORRIDOR: &str = "#domain\n\
    hospital\n\
    #levelname\n\
    push corridor\n\
    #colors\n\
    red: 0, A\n\
    #initial\n\
    ++++++++\n\
    +0A    +\n\
    ++++++++\n\
    #goal\n\
    ++++++++\n\
    +     A+\n\
    ++++++++\n\
    #end\n";

fn parse(text: &str) -> Option<Arc<State>> {
    parse_level(&mut text.as_bytes()).ok()
}

/// Measures the cost of generating the joint-action successors of one
/// configuration
fn bench_expand(c: &mut Criterion) {
    c.bench_function("expand_two_agents", |b| {
        let Some(initial) = parse(TWO_AGENT_ROOM) else {
            return;
        };
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            black_box(initial.expand(&mut rng));
        });
    });
}

/// Measures a complete breadth-first solve of a small push level
fn bench_bfs_solve(c: &mut Criterion) {
    c.bench_function("bfs_solve_push_corridor", |b| {
        let Some(initial) = parse(PUSH_CORRIDOR) else {
            return;
        };
        b.iter(|| {
            let mut engine = SearchEngine::new(Frontier::bfs(), 1, 2048.0);
            let outcome = engine.run(Arc::clone(&initial));
            black_box(outcome.plan);
        });
    });
}

criterion_group!(benches, bench_expand, bench_bfs_solve);
criterion_main!(benches);
