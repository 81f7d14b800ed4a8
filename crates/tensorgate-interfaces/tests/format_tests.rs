use std::collections::BTreeSet;
use tensorgate_interfaces::*;

/// Minimal in-memory format used to exercise the trait defaults
struct Pairs(Vec<(String, Vec<i64>)>);

impl RequestFormat for Pairs {
    type Tensor = Vec<i64>;
    const FORMAT: &'static str = "pairs";

    fn input_count(&self) -> usize {
        self.0.len()
    }

    fn optional_inputs_present(&self, optional: &BTreeSet<String>) -> usize {
        self.0.iter().filter(|(n, _)| optional.contains(n)).count()
    }

    fn find_input(&self, name: &str) -> Option<InputRef<'_, Vec<i64>>> {
        self.0
            .iter()
            .position(|(n, _)| n == name)
            .map(|i| InputRef::new(&self.0[i].1, i))
    }

    fn binary_blob_count(&self, _tensor: &Vec<i64>) -> Option<usize> {
        None
    }

    fn datatype_matches(&self, _tensor: &Vec<i64>, expected: Precision) -> bool {
        expected == Precision::I64
    }

    fn datatype_name(&self, _tensor: &Vec<i64>) -> String {
        "I64".to_string()
    }

    fn content(&self, input: InputRef<'_, Vec<i64>>, _precision: Precision) -> ContentMeasure {
        ContentMeasure::Values(input.tensor.element_count())
    }
}

#[test]
fn defaults_are_permissive() {
    let req = Pairs(vec![("a".into(), vec![1, 2]), ("b".into(), vec![3])]);
    assert!(req.check_coherency().is_ok());
    assert!(req.binary_batch_checks_allowed());
    assert_eq!(req.buffer_placement(&vec![1]), None);
    assert_eq!(Pairs::VALUE_COUNT_UNIT, "");
}

#[test]
fn lookup_reports_position() {
    let req = Pairs(vec![("a".into(), vec![1, 2]), ("b".into(), vec![3])]);
    let found = req.find_input("b").unwrap();
    assert_eq!(found.buffer_index, 1);
    assert_eq!(found.tensor.display_shape(), "(3)");
    assert!(req.find_input("c").is_none());

    let optional: BTreeSet<String> = ["b".to_string()].into_iter().collect();
    assert_eq!(req.optional_inputs_present(&optional), 1);
}

#[test]
fn placement_kind() {
    let cpu = BufferPlacement {
        code: 1,
        device_id: None,
    };
    assert_eq!(cpu.kind(), Some(BufferKind::Cpu));
    let unknown = BufferPlacement {
        code: 42,
        device_id: Some(1),
    };
    assert_eq!(unknown.kind(), None);
    assert_eq!(BufferKind::Gpu.to_string(), "GPU");
}
