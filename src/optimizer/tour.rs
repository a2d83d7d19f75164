use fastrand::Rng;

/// A visiting order over node indices `0..N`, read as a cycle.
pub type Tour = Vec<usize>;

/// Uniformly random permutation of `0..dimension`.
pub fn random_tour(rng: &mut Rng, dimension: usize) -> Tour {
    let mut tour: Tour = (0..dimension).collect();
    rng.shuffle(&mut tour);
    tour
}

/// True when `tour` visits every index in `0..dimension` exactly once.
pub fn is_permutation(tour: &[usize], dimension: usize) -> bool {
    if tour.len() != dimension {
        return false;
    }
    let mut seen = vec![false; dimension];
    for &city in tour {
        if city >= dimension || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
