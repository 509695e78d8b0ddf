use criterion::{criterion_group, criterion_main, Criterion};
use luov::traits::{Signer, Verifier};
use luov::LUOV_7_57_197;
use rand_chacha::rand_core::SeedableRng;

pub fn criterion_benchmark(c: &mut Criterion) {
    let message = [0u8, 1, 2, 3, 4, 5, 6, 7];
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);

    let (pk, sk) = luov::try_keygen_with_rng(&mut rng, &LUOV_7_57_197).unwrap();
    let sig = sk.try_sign_with_rng(&mut rng, &message).unwrap();

    c.bench_function("luov-7-57-197 keygen", |b| {
        b.iter(|| luov::try_keygen_with_rng(&mut rng, &LUOV_7_57_197))
    });
    c.bench_function("luov-7-57-197 sign", |b| {
        b.iter(|| sk.try_sign_with_rng(&mut rng, &message))
    });
    c.bench_function("luov-7-57-197 verify", |b| b.iter(|| pk.verify(&message, &sig)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

// cargo bench
