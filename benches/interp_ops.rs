//! Benchmarks for interpreter operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use minimetta::atom::Atom;
use minimetta::config::InterpreterConfig;
use minimetta::interp::Interpreter;
use minimetta::reader::parse;
use minimetta::seeds::SeedPack;
use minimetta::space::KnowledgeBase;

fn funding_kb() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    SeedPack::bundled("funding").unwrap().apply(&mut kb);
    kb
}

/// A store with `n` distinct heads, so a miss scans every rule.
fn wide_kb(n: usize) -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    for i in 0..n {
        kb.add_rule(&parse(&format!("(= (fact{i} arg) value{i})")).unwrap());
    }
    kb
}

fn bench_evaluate(c: &mut Criterion) {
    let kb = funding_kb();
    let interp = Interpreter::new(&kb);
    let arith = parse("(+ 40 2)").unwrap();
    let lookup = parse("(allocation_weight CRITICAL)").unwrap();

    c.bench_function("evaluate_grounded", |bench| {
        bench.iter(|| black_box(interp.evaluate(black_box(&arith))))
    });
    c.bench_function("evaluate_rule", |bench| {
        bench.iter(|| black_box(interp.evaluate(black_box(&lookup))))
    });
}

fn bench_query(c: &mut Criterion) {
    let kb = wide_kb(1_000);
    let miss = parse("(absent arg)").unwrap();
    let last = parse("(fact999 arg)").unwrap();

    c.bench_function("query_miss_1k", |bench| {
        bench.iter(|| black_box(kb.query(black_box(&miss))))
    });
    c.bench_function("query_strict_last_1k", |bench| {
        bench.iter(|| black_box(kb.query_strict(black_box(&last))))
    });
}

fn bench_chain(c: &mut Criterion) {
    let kb = funding_kb();
    let interp = Interpreter::with_config(&kb, InterpreterConfig::default()).unwrap();
    let instruction = parse("(eval (+ 1 2))").unwrap();
    let var = Atom::var("x");
    let continuation =
        parse("(chain (eval (+ $x 1)) $y (chain (eval (threshold CRITICAL)) $t (< $y $t)))").unwrap();

    c.bench_function("chain_nested_3", |bench| {
        bench.iter(|| black_box(interp.chain(&instruction, &var, &continuation).unwrap()))
    });
}

criterion_group!(benches, bench_evaluate, bench_query, bench_chain);
criterion_main!(benches);
