/// Returns the index of the largest value, keeping the earliest index when
/// values tie. NaN values are never selected.
pub fn argmax_first(data: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    data.iter().enumerate().for_each(|(i, v)| {
        if v.is_nan() {
            return;
        }

        match best {
            Some((_, max)) if *v <= max => {}
            _ => best = Some((i, *v)),
        }
    });

    best.map(|(i, _)| i)
}
