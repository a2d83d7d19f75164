use fastrand::Rng;
use tourforge::instance::Instance;
use tourforge::optimizer::{Neighborhood, Optimizer, Phase, Schedule};

fn berlin52() -> Instance {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/berlin52.tsp");
    Instance::load_from_file(path).unwrap()
}

#[test]
fn test_same_seed_same_run() {
    let inst = berlin52();
    for hood in [Neighborhood::Swap, Neighborhood::Insertion] {
        let opt = Optimizer::new(&inst, hood, Schedule::standard(100.0, 0.9, 200));
        let a = opt.run(Some(1234)).unwrap();
        let b = opt.run(Some(1234)).unwrap();

        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.trace, b.trace);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }
}

#[test]
fn test_same_seed_same_reheating_run() {
    let inst = berlin52();
    let schedule = Schedule::reheating(vec![
        Phase::new(100.0, 10.0, 0.8, 100),
        Phase::new(50.0, 1.0, 0.7, 100),
    ]);
    let opt = Optimizer::new(&inst, Neighborhood::Insertion, schedule);

    let a = opt.run_with_rng(&mut Rng::with_seed(9)).unwrap();
    let b = opt.run_with_rng(&mut Rng::with_seed(9)).unwrap();
    assert_eq!(a.tour, b.tour);
    assert_eq!(a.trace, b.trace);
}

#[test]
fn test_different_seeds_diverge() {
    let inst = berlin52();
    let opt = Optimizer::new(&inst, Neighborhood::Swap, Schedule::standard(100.0, 0.9, 50));
    let a = opt.run(Some(1)).unwrap();
    let b = opt.run(Some(2)).unwrap();
    assert_ne!(a.trace, b.trace);
}
