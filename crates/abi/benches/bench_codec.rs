//! Benchmark for packing and unpacking performance.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jeth_abi::{pack_values, parse_type_list, unpack};

fn test_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("jeth_abi");

    let cases = [
        ("static", "address,uint256,bool", vec!["0x6b175474e89094c44da98b954eedeac495271d0f", "1000", "true"]),
        ("dynamic", "string,bytes,uint256[]", vec!["hello world", "0xdeadbeef", "1,2,3,4,5,6,7,8"]),
        ("nested", "(uint256[2],bool,(address,uint8)),string[2]", vec![
            "1,2,true,0x6b175474e89094c44da98b954eedeac495271d0f,255",
            "left,right",
        ]),
    ];

    for (name, types, values) in cases.iter() {
        let types = parse_type_list(types).expect("failed to parse types");
        let packed = pack_values(&types, values).expect("failed to pack values");

        group.sample_size(500);
        group.bench_with_input(BenchmarkId::new("pack", name), values, |b, values| {
            b.iter(|| pack_values(&types, values))
        });
        group.bench_with_input(BenchmarkId::new("unpack", name), &packed, |b, packed| {
            b.iter(|| unpack(&types, packed))
        });
    }
    group.finish();
}

criterion_group!(benches, test_codec);
criterion_main!(benches);
