use alloy::primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pump::curve::{market_cap, price, verify_invariant};
use pump::history::plan_chunks;
use pump::models::PoolState;

/// Curve constant of a freshly launched pool
const CURVE_CONSTANT: &str = "32190000000000000000000000000000000000000000000";

/// Generate pools walking along the curve, plus a few knocked off it
fn generate_pools(count: usize) -> Vec<PoolState> {
    let constant: U256 = CURVE_CONSTANT.parse().unwrap();
    let start: U256 = "1073000000000000000000000000".parse().unwrap();

    (0..count)
        .map(|i| {
            let sold = U256::from(fastrand::u64(..1_000_000_000_000_000_000))
                * U256::from(1_000_000_000_u64);
            let virtual_token_reserve = start - sold;
            let mut virtual_eth_reserve = constant / virtual_token_reserve;
            if i % 10 == 0 {
                virtual_eth_reserve += U256::from(fastrand::u64(1..u64::MAX));
            }
            PoolState {
                token: Address::with_last_byte(i as u8),
                token_reserve: virtual_token_reserve,
                virtual_token_reserve,
                eth_reserve: virtual_eth_reserve,
                virtual_eth_reserve,
                last_price: U256::ZERO,
                last_mcap_in_eth: U256::ZERO,
                last_timestamp: U256::ZERO,
                last_block: U256::ZERO,
                creator: Address::ZERO,
                liquidity_manager: Address::ZERO,
                pool_id: U256::from(i),
                curve_constant: constant,
            }
        })
        .collect()
}

fn bench_curve(c: &mut Criterion) {
    let pools = generate_pools(1_000);
    let mut group = c.benchmark_group("curve");
    group.throughput(criterion::Throughput::Elements(pools.len() as u64));

    group.bench_function("price", |b| {
        b.iter(|| {
            for pool in &pools {
                black_box(price(black_box(pool)).ok());
            }
        });
    });
    group.bench_function("market_cap", |b| {
        b.iter(|| {
            for pool in &pools {
                black_box(market_cap(black_box(pool)).ok());
            }
        });
    });
    group.bench_function("verify_invariant", |b| {
        b.iter(|| {
            for pool in &pools {
                black_box(verify_invariant(black_box(pool)));
            }
        });
    });

    group.finish();
}

fn bench_plan_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_chunks");

    for blocks in [10_000_u64, 1_000_000, 50_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &blocks| {
            b.iter(|| plan_chunks(black_box(0), black_box(blocks), black_box(500)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_curve, bench_plan_chunks);
criterion_main!(benches);
