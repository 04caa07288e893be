use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqlab_core::analysis::{
    align, find_palindromes, find_repeats, longest_common_subsequence, similarity_matrix,
    ScoringScheme,
};

fn generate_test_sequence(length: usize, pattern: &[u8]) -> Vec<u8> {
    pattern.iter().copied().cycle().take(length).collect()
}

fn bench_global_alignment(c: &mut Criterion) {
    let a = generate_test_sequence(500, b"ATCGATCG");
    let b = generate_test_sequence(500, b"ATCGTTCG");
    let scheme = ScoringScheme::default();

    c.bench_function("align_500bp", |bench| {
        bench.iter(|| black_box(align(black_box(&a), black_box(&b), &scheme)))
    });
}

fn bench_lcs(c: &mut Criterion) {
    let a = generate_test_sequence(500, b"ATCGATCG");
    let b = generate_test_sequence(500, b"GATTACA");

    c.bench_function("lcs_500bp", |bench| {
        bench.iter(|| black_box(longest_common_subsequence(black_box(&a), black_box(&b))))
    });
}

fn bench_patterns(c: &mut Criterion) {
    let seq = generate_test_sequence(200, b"ATGCGAATTCGCAT");

    c.bench_function("repeats_k4_200bp", |bench| {
        bench.iter(|| black_box(find_repeats(black_box(&seq), 4)))
    });
    c.bench_function("palindromes_200bp", |bench| {
        bench.iter(|| black_box(find_palindromes(black_box(&seq), 4)))
    });
}

fn bench_similarity(c: &mut Criterion) {
    let named: Vec<(String, Vec<u8>)> = (0..20)
        .map(|i| (format!("seq{}", i), generate_test_sequence(300 + i, b"ACGTTGCA")))
        .collect();

    c.bench_function("similarity_20x300bp", |bench| {
        bench.iter(|| black_box(similarity_matrix(black_box(&named))))
    });
}

criterion_group!(benches, bench_global_alignment, bench_lcs, bench_patterns, bench_similarity);
criterion_main!(benches);
