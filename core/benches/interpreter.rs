//! Benchmarks for the regvm assembler and interpreter.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. assemble: Measures assembly of generated straight-line sources
//! 2. countdown: Measures the dispatch loop on a tight countdown loop

use std::io;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use regvm_core::{
    api::{AssemblerOptions, ExecutionOptions},
    assembler::assemble,
    vm::Interpreter,
};

/// Generate `n` lines alternating between loads and additions.
fn generate_straight_line(n: usize) -> String {
    let mut source = String::from("@main:\n");
    for i in 0..n {
        if i % 2 == 0 {
            source.push_str(&format!("    cil {} 0\n", i));
        } else {
            source.push_str("    add 0 1\n");
        }
    }
    source
}

fn countdown(n: usize) -> String {
    format!(
        "\
@main:
    cil {} 0
.loop:
    dec 0
    cmpz 0
    jgt .loop
",
        n
    )
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let options = AssemblerOptions::default();

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        let source = generate_straight_line(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| assemble(black_box(source), "bench.asm", &options))
        });
    }

    group.finish();
}

fn bench_countdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown");
    let options = ExecutionOptions::default();

    for iterations in [1_000, 10_000, 100_000] {
        // three instructions per iteration
        group.throughput(Throughput::Elements(3 * iterations as u64));
        let program = assemble(&countdown(iterations), "bench.asm", &AssemblerOptions::default())
            .expect("benchmark program assembles");
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &program,
            |b, program| {
                b.iter(|| {
                    let mut vm = Interpreter::new(program, &options, io::empty(), io::sink());
                    vm.run().expect("countdown halts");
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assemble, bench_countdown);
criterion_main!(benches);
