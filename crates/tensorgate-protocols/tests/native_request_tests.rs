use tensorgate_interfaces::{BufferKind, ShapeAccessor};
use tensorgate_protocols::*;
use tensorgate_types::StatusCode;

const INPUT: &str = "b";
const SHAPE: [i64; 2] = [1, 10];

fn float_bytes(n: usize) -> Vec<u8> {
    (0..n).flat_map(|i| (i as f32).to_le_bytes()).collect()
}

#[test]
fn build_request_with_data_and_parameters() {
    let mut req = InferenceRequest::new("dummy", 1);
    req.add_input(INPUT, NativeDataType::FP32, &SHAPE).unwrap();
    req.set_input_data(INPUT, float_bytes(10), BufferKind::Cpu.code(), None)
        .unwrap();
    req.add_parameter("sequence_id", NativeDataType::U64, 42u64.to_le_bytes().to_vec())
        .unwrap();
    req.add_parameter("sequence_control_input", NativeDataType::U32, 1u32.to_le_bytes().to_vec())
        .unwrap();

    assert_eq!(req.input_count(), 1);
    let input = req.get_input(INPUT).unwrap();
    assert_eq!(input.display_shape(), "(1,10)");
    assert_eq!(input.buffer().map(Buffer::byte_size), Some(40));
    assert_eq!(
        req.get_parameter("sequence_id").map(|p| p.datatype),
        Some(NativeDataType::U64)
    );
    assert_eq!(req.parameters().len(), 2);
}

#[test]
fn double_inserts_are_rejected() {
    let mut req = InferenceRequest::new("dummy", 1);
    req.add_input(INPUT, NativeDataType::FP32, &SHAPE).unwrap();
    let err = req.add_input(INPUT, NativeDataType::FP32, &SHAPE).unwrap_err();
    assert_eq!(err.code(), StatusCode::DoubleTensorInsert);

    req.add_parameter("sequence_id", NativeDataType::U64, vec![0; 8])
        .unwrap();
    let err = req
        .add_parameter("sequence_id", NativeDataType::U64, vec![0; 8])
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::DoubleParameterInsert);
}

#[test]
fn operations_on_missing_entries_fail() {
    let mut req = InferenceRequest::new("dummy", 1);
    let err = req
        .set_input_data("NONEXISTENT_TENSOR", vec![1], BufferKind::Cpu.code(), None)
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::NonexistentTensorForSetBuffer);

    let err = req.remove_input("NONEXISTENT_TENSOR").unwrap_err();
    assert_eq!(err.code(), StatusCode::NonexistentTensorForRemoval);

    let err = req.remove_parameter("sequence_id").unwrap_err();
    assert_eq!(err.code(), StatusCode::NonexistentParameterForRemoval);

    req.add_input(INPUT, NativeDataType::FP32, &SHAPE).unwrap();
    let err = req.remove_input_data(INPUT).unwrap_err();
    assert_eq!(err.code(), StatusCode::NonexistentBufferForRemoval);
}

#[test]
fn removal_keeps_insertion_order() {
    let mut req = InferenceRequest::new("dummy", 1);
    for name in ["first", "second", "third"] {
        req.add_input(name, NativeDataType::U8, &[1]).unwrap();
    }
    req.remove_input("second").unwrap();
    let names: Vec<_> = req.inputs().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["first", "third"]);

    req.add_parameter("p", NativeDataType::U32, vec![0; 4]).unwrap();
    assert_eq!(req.remove_parameter("p").unwrap().data.len(), 4);
    assert!(req.get_parameter("p").is_none());
}

#[test]
fn native_request_from_json() {
    let json = r#"{
        "servable_name": "dummy",
        "servable_version": 1,
        "inputs": [
            {"name": "b", "datatype": "FP32", "shape": [1, 2],
             "buffer": {"data": [0,0,0,0,0,0,0,0], "buffer_type": 1}}
        ]
    }"#;
    let req: InferenceRequest = serde_json::from_str(json).unwrap();
    let input = req.get_input("b").unwrap();
    assert_eq!(input.datatype, NativeDataType::FP32);
    let placement = input.buffer().unwrap().placement();
    assert_eq!(placement.kind(), Some(BufferKind::Cpu));
    assert_eq!(placement.device_id, None);
}

#[test]
fn tfs_and_kfs_requests_from_json() {
    let tfs: PredictRequest = serde_json::from_str(
        r#"{"model_spec":{"name":"resnet"},
            "inputs":{"data":{"dtype":"DT_STRING","tensor_shape":{"dim":[{"size":2}]},
                              "string_val":[[1,2],[3]]}}}"#,
    )
    .unwrap();
    let data = &tfs.inputs["data"];
    assert_eq!(data.dtype, TfDataType::String);
    assert_eq!(data.string_val.len(), 2);

    let kfs: ModelInferRequest = serde_json::from_str(
        r#"{"model_name":"resnet","inputs":[
              {"name":"data","datatype":"FP32","shape":[1,2],
               "contents":{"fp32_contents":[0.5,1.5]}}]}"#,
    )
    .unwrap();
    assert!(kfs.inputs[0].has_contents());
    assert!(kfs.raw_input_contents.is_empty());
}
