use proptest::prelude::*;
use tensorgate_types::*;

#[test]
fn parse_forms() {
    let s: Shape = "[1, 3, 224, 224]".parse().unwrap();
    assert_eq!(s.to_string(), "(1,3,224,224)");
    let s: Shape = "1:8,-1".parse().unwrap();
    assert_eq!(s[0], Dimension::range(1, 8).unwrap());
    assert!(s[1].is_any());
    assert_eq!(s.to_string(), "(1:8,-1)");
    assert!("()".parse::<Shape>().unwrap().is_empty());
    assert!("(1,x)".parse::<Shape>().is_err());
}

#[test]
fn dimension_constructors() {
    assert!(Dimension::fixed(-2).is_err());
    assert!(Dimension::range(4, 2).is_err());
    assert_eq!(Dimension::range(3, 3).unwrap(), Dimension::fixed(3).unwrap());
    assert!(Dimension::any().matches(0));
    assert!(!Dimension::any().matches(-1));
}

#[test]
fn format_shape_of_observed_values() {
    assert_eq!(format_shape([1i64, 3, 224, 224]), "(1,3,224,224)");
    assert_eq!(format_shape(Vec::<i64>::new()), "()");
}

proptest! {
    #[test]
    fn fixed_matches_only_itself(v in 0i64..10_000, o in -10i64..10_000) {
        let d = Dimension::fixed(v).unwrap();
        prop_assert_eq!(d.matches(o), v == o);
    }

    #[test]
    fn range_matches_inside_bounds(a in 0i64..1000, b in 0i64..1000, o in -10i64..1100) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let d = Dimension::range(min, max).unwrap();
        prop_assert_eq!(d.matches(o), min <= o && o <= max);
    }

    #[test]
    fn display_parse_is_stable(dims in prop::collection::vec((0i64..64, 0i64..64), 0..6)) {
        let shape: Shape = dims
            .iter()
            .map(|&(a, b)| Dimension::range(a.min(b), a.max(b)).unwrap())
            .collect();
        let reparsed: Shape = shape.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, shape);
    }

    #[test]
    fn static_shape_matches_its_values(values in prop::collection::vec(1i64..32, 1..6)) {
        let shape = Shape::from_static(&values).unwrap();
        prop_assert!(shape.matches(&values));
        let mut longer = values.clone();
        longer.push(1);
        prop_assert!(!shape.matches(&longer));
    }
}
