use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use readgen::{
    mutate, write_read, BruteForce, Locate, ReadSampler, Reference, SeedIndex, SimParams,
    SpacedSeed,
};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);
    c.bench_function("reference 100kb", |b| {
        b.iter(|| Reference::random(100_000, &mut rng))
    });

    let params = SimParams {
        reference_length: 100_000,
        read_count: 10_000,
        ..Default::default()
    };
    let reference = Reference::random(params.reference_length, &mut rng);
    c.bench_function("sample and write 10k reads", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(params.read_count * (params.read_length + 1));
            for read in ReadSampler::new(&reference, &params, &mut rng).unwrap() {
                write_read(&mut out, &read).unwrap();
            }
            out
        })
    });

    let mut read = reference.as_bytes()[..50].to_vec();
    c.bench_function("mutate twice", |b| {
        b.iter(|| mutate(&mut read, 2, &mut rng))
    });

    let read = reference.as_bytes()[60_000..60_050].to_vec();
    let index = SeedIndex::new(&reference, 10, SpacedSeed::default(), 10).unwrap();
    c.bench_function("seed index locate", |b| b.iter(|| index.locate(&read)));
    let brute = BruteForce::new(&reference, 10);
    c.bench_function("brute force locate", |b| b.iter(|| brute.locate(&read)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
