use criterion::{criterion_group, criterion_main};

mod network;

criterion_group!(
    benches,
    network::http::bench_build_request,
    network::http::bench_parse_headers,
    network::http::bench_get_round_trip
);
criterion_main!(benches);
