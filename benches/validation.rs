use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tensorgate::prelude::*;

fn contract(inputs: usize) -> ModelContract {
    (0..inputs).fold(
        ModelContract::new("bench", 1).with_batching_mode(Mode::Auto),
        |contract, i| {
            contract.with_input(
                TensorInfo::new(
                    format!("input_{}", i),
                    Precision::FP32,
                    "(1:8,3,32,32)".parse().unwrap(),
                )
                .with_layout("NCHW"),
            )
        },
    )
}

fn tfs_request(inputs: usize, batch: i64) -> PredictRequest {
    let bytes = batch as usize * 3 * 32 * 32 * 4;
    (0..inputs).fold(PredictRequest::new("bench"), |request, i| {
        request.with_input(
            format!("input_{}", i),
            TensorProto::with_content(TfDataType::Float, &[batch, 3, 32, 32], vec![0; bytes]),
        )
    })
}

fn kfs_request(inputs: usize, batch: i64) -> ModelInferRequest {
    let bytes = batch as usize * 3 * 32 * 32 * 4;
    (0..inputs).fold(ModelInferRequest::new("bench"), |request, i| {
        request.with_raw_input(
            InferInputTensor::new(format!("input_{}", i), "FP32", &[batch, 3, 32, 32]),
            vec![0; bytes],
        )
    })
}

fn native_request(inputs: usize, batch: i64) -> InferenceRequest {
    let bytes = batch as usize * 3 * 32 * 32 * 4;
    let mut request = InferenceRequest::new("bench", 1);
    for i in 0..inputs {
        let name = format!("input_{}", i);
        request
            .add_input(name.as_str(), NativeDataType::FP32, &[batch, 3, 32, 32])
            .unwrap();
        request.set_input_data(&name, vec![0; bytes], 1, None).unwrap();
    }
    request
}

fn benchmark_formats(c: &mut Criterion) {
    let contract = contract(4);
    let ctx = ValidationContext::new(&contract);
    let tfs = tfs_request(4, 1);
    let kfs = kfs_request(4, 1);
    let native = native_request(4, 1);

    let mut group = c.benchmark_group("validate_accepted");
    group.bench_function("tfs", |b| b.iter(|| validate_tfs(black_box(&tfs), &ctx)));
    group.bench_function("kfs", |b| b.iter(|| validate_kfs(black_box(&kfs), &ctx)));
    group.bench_function("native", |b| {
        b.iter(|| validate_native(black_box(&native), &ctx))
    });
    group.finish();
}

fn benchmark_input_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_by_input_count");
    for inputs in [1usize, 8, 32] {
        let contract = contract(inputs);
        let ctx = ValidationContext::new(&contract);
        let request = tfs_request(inputs, 2);
        group.bench_with_input(BenchmarkId::from_parameter(inputs), &request, |b, request| {
            b.iter(|| validate_tfs(black_box(request), &ctx))
        });
    }
    group.finish();
}

fn benchmark_registry(c: &mut Criterion) {
    let registry = ContractRegistry::new();
    for version in 1..=16 {
        let mut contract = contract(2);
        contract.version = ModelVersion(version);
        registry.register(contract).unwrap();
    }
    let stats = ValidationStats::new();
    let request = tfs_request(2, 1);

    c.bench_function("resolve_validate_record", |b| {
        b.iter(|| {
            let contract = registry
                .resolve(black_box("bench"), ModelVersion::LATEST)
                .unwrap();
            stats.record(&validate_tfs(&request, &ValidationContext::new(&contract)));
        })
    });
}

criterion_group!(
    benches,
    benchmark_formats,
    benchmark_input_count,
    benchmark_registry
);
criterion_main!(benches);
