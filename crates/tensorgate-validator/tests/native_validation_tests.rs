use tensorgate_interfaces::BufferKind;
use tensorgate_protocols::{InferenceRequest, NativeDataType};
use tensorgate_types::{Mode, ModelContract, Precision, Shape, StatusCode, TensorInfo};
use tensorgate_validator::{
    validate_native, Signal, ValidationContext, ValidationOutcome, ValidationResult,
};

const CPU: i32 = 1;

fn dummy_contract() -> ModelContract {
    ModelContract::new("dummy", 1).with_input(TensorInfo::new(
        "b",
        Precision::FP32,
        Shape::from_static(&[1, 10]).unwrap(),
    ))
}

fn request(dims: &[i64], data: Option<(usize, i32, Option<u32>)>) -> InferenceRequest {
    let mut request = InferenceRequest::new("dummy", 1);
    request.add_input("b", NativeDataType::FP32, dims).unwrap();
    if let Some((bytes, buffer_type, device_id)) = data {
        request
            .set_input_data("b", vec![0; bytes], buffer_type, device_id)
            .unwrap();
    }
    request
}

fn check(contract: &ModelContract, request: &InferenceRequest) -> ValidationResult {
    validate_native(request, &ValidationContext::new(contract))
}

fn error_of(contract: &ModelContract, request: &InferenceRequest) -> (StatusCode, String) {
    let err = check(contract, request).unwrap_err();
    (err.code(), err.details().to_string())
}

#[test]
fn cpu_buffer_of_right_size_is_accepted() {
    let req = request(&[1, 10], Some((40, CPU, None)));
    assert_eq!(check(&dummy_contract(), &req).unwrap(), ValidationOutcome::Ok);

    let default_device = request(&[1, 10], Some((40, CPU, Some(0))));
    assert_eq!(
        check(&dummy_contract(), &default_device).unwrap(),
        ValidationOutcome::Ok
    );
}

#[test]
fn input_without_buffer() {
    assert_eq!(
        error_of(&dummy_contract(), &request(&[1, 10], None)),
        (
            StatusCode::InvalidContentSize,
            "Servable: dummy; version: 1; is missing buffer for input: b".to_string()
        )
    );
}

#[test]
fn buffer_size_mismatch() {
    assert_eq!(
        error_of(&dummy_contract(), &request(&[1, 10], Some((4, CPU, None)))),
        (
            StatusCode::InvalidContentSize,
            "Expected: 40 bytes; Actual: 4 bytes; input name: b".to_string()
        )
    );
}

#[test]
fn unknown_buffer_type_codes() {
    for code in [0, 5, -1] {
        let (status, details) = error_of(&dummy_contract(), &request(&[1, 10], Some((40, code, None))));
        assert_eq!(status, StatusCode::InvalidBufferType);
        assert_eq!(
            details,
            format!("Unrecognised buffer type: {}; input name: b", code)
        );
    }
}

#[test]
fn known_non_cpu_buffer_types_are_rejected() {
    for kind in [BufferKind::CpuPinned, BufferKind::Gpu, BufferKind::Hddl] {
        let req = request(&[1, 10], Some((40, kind.code(), None)));
        let (status, details) = error_of(&dummy_contract(), &req);
        assert_eq!(status, StatusCode::InvalidBufferType);
        assert_eq!(
            details,
            format!("Unsupported buffer type: {}; input name: b", kind)
        );
    }
}

#[test]
fn cpu_buffer_naming_a_device() {
    assert_eq!(
        error_of(&dummy_contract(), &request(&[1, 10], Some((40, CPU, Some(1))))),
        (
            StatusCode::InvalidDeviceId,
            "CPU buffer must not name device: 1; input name: b".to_string()
        )
    );
}

#[test]
fn size_is_checked_before_buffer_placement() {
    let req = request(&[1, 10], Some((8, BufferKind::Gpu.code(), None)));
    assert_eq!(
        check(&dummy_contract(), &req).unwrap_err().code(),
        StatusCode::InvalidContentSize
    );
}

#[test]
fn native_precision_names() {
    let mut req = InferenceRequest::new("dummy", 1);
    req.add_input("b", NativeDataType::I32, &[1, 10]).unwrap();
    req.set_input_data("b", vec![0; 40], CPU, None).unwrap();
    assert_eq!(
        error_of(&dummy_contract(), &req),
        (
            StatusCode::InvalidPrecision,
            "Expected: FP32; Actual: I32; input name: b".to_string()
        )
    );
}

#[test]
fn optional_inputs_do_not_extend_the_count() {
    let contract = dummy_contract().with_optional_input("mask");
    let mut req = request(&[1, 10], Some((40, CPU, None)));
    req.add_input("mask", NativeDataType::FP32, &[1]).unwrap();
    assert_eq!(
        error_of(&contract, &req),
        (StatusCode::InvalidNoOfInputs, "Expected: 1; Actual: 2".to_string())
    );
}

#[test]
fn removed_input_is_missing() {
    let mut req = request(&[1, 10], Some((40, CPU, None)));
    req.add_input("other", NativeDataType::FP32, &[1]).unwrap();
    req.remove_input("b").unwrap();
    assert_eq!(
        error_of(&dummy_contract(), &req),
        (StatusCode::InvalidMissingInput, "Required input: b".to_string())
    );
}

#[test]
fn negative_axis() {
    assert_eq!(
        check(&dummy_contract(), &request(&[1, -10], None)).unwrap_err().code(),
        StatusCode::InvalidShape
    );
}

#[test]
fn batch_and_shape_signals() {
    let batching = dummy_contract().with_batching_mode(Mode::Auto);
    let req = request(&[4, 10], Some((160, CPU, None)));
    assert_eq!(
        check(&batching, &req).unwrap(),
        ValidationOutcome::OkWithSignal(Signal::BatchSizeChangeRequired)
    );
    assert_eq!(
        error_of(&dummy_contract(), &req),
        (
            StatusCode::InvalidBatchSize,
            "Expected: 1; Actual: 4; input name: b".to_string()
        )
    );
}
