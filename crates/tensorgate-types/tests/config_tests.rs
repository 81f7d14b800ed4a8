use std::io::Write;
use tensorgate_types::*;

const CONTRACTS: &str = r#"
[[models]]
name = "resnet"
version = 1
optional_inputs = ["mask"]

[models.shape_modes]
data = "auto"

[[models.inputs]]
name = "data"
precision = "FP32"
shape = "(1:8,3,224,224)"
layout = "NCHW"
"#;

const RESNET_V2: &str = r#"
[[models]]
name = "resnet"
version = 2
batching_mode = "auto"

[[models.inputs]]
name = "data"
precision = "FP16"
shape = "(-1,3,224,224)"
"#;

#[tokio::test]
async fn load_contract_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONTRACTS.as_bytes()).unwrap();
    file.write_all(RESNET_V2.as_bytes()).unwrap();

    let contracts = ContractFile::load(file.path())
        .await
        .unwrap()
        .into_contracts()
        .unwrap();
    assert_eq!(contracts.len(), 2);

    let v1 = &contracts[0];
    assert_eq!(v1.version, ModelVersion(1));
    assert!(v1.optional_inputs.contains("mask"));
    assert_eq!(v1.shape_modes.resolve("data"), Mode::Auto);
    assert_eq!(v1.batching_mode, Mode::Fixed);

    let v2 = &contracts[1];
    let data = v2.inputs.get("data").unwrap();
    assert_eq!(data.precision, Precision::FP16);
    assert_eq!(data.layout, Layout::default_input());
    assert!(data.shape[0].is_any());
}

#[tokio::test]
async fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContractFile::load(dir.path().join("absent.toml"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::IoError);
}

#[test]
fn duplicate_model_version_rejected() {
    let text = format!("{}{}{}", CONTRACTS, RESNET_V2, RESNET_V2);
    let err = ContractFile::from_toml_str(&text)
        .unwrap()
        .into_contracts()
        .unwrap_err();
    assert_eq!(err.code(), StatusCode::InvalidConfig);
}

#[test]
fn unknown_precision_rejected() {
    let text = RESNET_V2.replace("FP16", "FP128");
    assert!(ContractFile::from_toml_str(&text).is_err());
}

#[test]
fn contract_round_trips_through_toml() {
    let text = format!("{}{}", CONTRACTS, RESNET_V2);
    let contracts = ContractFile::from_toml_str(&text)
        .unwrap()
        .into_contracts()
        .unwrap();
    let file = ContractFile {
        models: contracts.iter().map(ModelConfigEntry::from).collect(),
    };
    let text = file.to_toml_string().unwrap();
    let again = ContractFile::from_toml_str(&text)
        .unwrap()
        .into_contracts()
        .unwrap();
    assert_eq!(again, contracts);
}
