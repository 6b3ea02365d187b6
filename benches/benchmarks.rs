use tapeforge::score::Scorer;
use tapeforge::tape::Machine;
use tapeforge::task;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        executing_hello_world,
        executing_reverse,
        scoring_a_reverse_candidate,
}

const HELLO: &str = ">++++++++[-<+++++++++>]<.>>+>-[+]++>++>+++[>[->+++<<+++>]<<]>-----\
                    .>->+++..+++.>-.<<+[>[+>+]>>]<--------------.>>.+++.------.-------\
                    -.>+.>+.";

fn executing_hello_world(c: &mut criterion::Criterion) {
    let machine = Machine::default();
    c.bench_function("execute the hello-world program", |b| {
        b.iter(|| machine.run(HELLO, &[]))
    });
}

fn executing_reverse(c: &mut criterion::Criterion) {
    let machine = Machine::default();
    c.bench_function("execute reverse on six tokens", |b| {
        b.iter(|| machine.run(">,[>,]<[.<]", &[9, 8, 7, 6, 5, 4]))
    });
}

fn scoring_a_reverse_candidate(c: &mut criterion::Criterion) {
    let scorer = Scorer::new(task::make("reverse").unwrap(), 32, false, false);
    c.bench_function("score a candidate on all reverse cases", |b| {
        b.iter(|| scorer.score(">,[>,]<[.<]"))
    });
}
