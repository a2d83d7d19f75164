use rstest::rstest;
use tourforge::error::TourForgeError;
use tourforge::instance::{EdgeWeightType, Instance, Node, WeightRounding};

fn pair(kind: EdgeWeightType, a: (f64, f64), b: (f64, f64)) -> Instance {
    Instance::from_nodes(
        "pair",
        kind,
        vec![Node::new(1, a.0, a.1), Node::new(2, b.0, b.1)],
    )
}

fn fixture(name: &str) -> Instance {
    let path = format!("{}/tests/data/{}.tsp", env!("CARGO_MANIFEST_DIR"), name);
    Instance::load_from_file(path).unwrap()
}

#[rstest]
#[case(EdgeWeightType::Euc2d, 5.0)]
#[case(EdgeWeightType::Man2d, 7.0)]
fn test_planar_metrics(#[case] kind: EdgeWeightType, #[case] expected: f64) {
    let inst = pair(kind, (0.0, 0.0), (3.0, 4.0));
    assert_eq!(inst.distance(0, 1).unwrap(), expected);
    assert_eq!(inst.distance(1, 0).unwrap(), expected);
}

#[test]
fn test_att48_first_edge() {
    let inst = pair(EdgeWeightType::Att, (6734.0, 1453.0), (2233.0, 10.0));
    assert_eq!(inst.distance(0, 1).unwrap(), 1495.0);
}

#[test]
fn test_burma14_first_edge() {
    let inst = fixture("burma14");
    assert_eq!(inst.edge_weight_type, EdgeWeightType::Geo);

    let raw = inst.distance(0, 1).unwrap();
    assert!((raw - 153.766_982_920_225_7).abs() < 1e-6, "raw GEO {}", raw);
    assert_eq!(raw.trunc(), 153.0);

    let rounded = inst.with_rounding(WeightRounding::Tsplib);
    assert_eq!(rounded.distance(0, 1).unwrap(), 153.0);
}

#[test]
fn test_berlin52_first_edge() {
    let inst = fixture("berlin52");
    let d = inst.distance(0, 1).unwrap();
    assert!((d - 666.108_099_335_235_6).abs() < 1e-9);

    let rounded = inst.with_rounding(WeightRounding::Tsplib);
    assert_eq!(rounded.distance(0, 1).unwrap(), 666.0);
}

#[test]
fn test_self_distance_is_zero() {
    let inst = fixture("berlin52");
    for i in 0..inst.dimension {
        assert_eq!(inst.distance(i, i).unwrap(), 0.0);
    }
}

#[test]
fn test_out_of_range_query() {
    let inst = pair(EdgeWeightType::Euc2d, (0.0, 0.0), (1.0, 1.0));
    assert!(matches!(
        inst.distance(2, 0),
        Err(TourForgeError::Index { i: 2, j: 0, dimension: 2 })
    ));
}

#[rstest]
#[case(EdgeWeightType::Max2d)]
#[case(EdgeWeightType::Max3d)]
#[case(EdgeWeightType::Ceil2d)]
#[case(EdgeWeightType::Xray2)]
#[case(EdgeWeightType::Special)]
fn test_types_without_formula(#[case] kind: EdgeWeightType) {
    let inst = pair(kind, (0.0, 0.0), (1.0, 1.0));
    assert!(matches!(
        inst.distance(0, 1),
        Err(TourForgeError::NotImplemented(k)) if k == kind
    ));
    // The diagonal never consults the formula.
    assert_eq!(inst.distance(1, 1).unwrap(), 0.0);
}

#[test]
fn test_formula_without_coordinates_is_an_error() {
    let body = "NAME: bare\nDIMENSION: 3\nEDGE_WEIGHT_TYPE: EUC_2D\nEOF\n";
    let inst = Instance::from_reader(body.as_bytes()).unwrap();
    assert!(matches!(
        inst.distance(0, 1),
        Err(TourForgeError::InvalidArgument(_))
    ));
}

#[test]
fn test_tour_cost_of_berlin52_identity() {
    let inst = fixture("berlin52");
    let tour: Vec<usize> = (0..52).collect();
    let expected: f64 = (0..52)
        .map(|k| inst.distance(k, (k + 1) % 52).unwrap())
        .sum();
    assert!((inst.tour_cost(&tour).unwrap() - expected).abs() < 1e-9);
}
