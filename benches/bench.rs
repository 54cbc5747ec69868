use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tile_search::{search, Domain, Problem, SearchOptions, Strategy};

const MEDIUM_INPUT: &str = "
1 2 4
5 0 6
7 3 8";

const HARDER_INPUT: &str = "
8 6 7
2 5 4
3 0 1";

const MULTI_INPUT: &str = "
1 0 2
4 5 6
3 0 0";

fn problem(domain: Domain, input: &str) -> Problem {
    Problem::new(domain, domain.parse(input).unwrap())
}

fn criterion_bench(c: &mut Criterion) {
    let medium = problem(Domain::SingleBlank, MEDIUM_INPUT);
    for strategy in Strategy::ALL {
        c.bench_function(&format!("medium {}", strategy), |b| {
            b.iter(|| search(black_box(&medium), strategy, &SearchOptions::default()))
        });
    }

    let harder = problem(Domain::SingleBlank, HARDER_INPUT);
    c.bench_function("harder A*", |b| {
        b.iter(|| search(black_box(&harder), Strategy::AStar, &SearchOptions::default()))
    });

    c.bench_function("harder A* purge-stale", |b| {
        let options = SearchOptions {
            purge_stale: true,
            ..SearchOptions::default()
        };
        b.iter(|| search(black_box(&harder), Strategy::AStar, &options))
    });

    let multi = problem(Domain::MultiBlank, MULTI_INPUT);
    c.bench_function("multi-blank A*", |b| {
        b.iter(|| search(black_box(&multi), Strategy::AStar, &SearchOptions::default()))
    });
}

criterion_group!(benches, criterion_bench);
criterion_main!(benches);
