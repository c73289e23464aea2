use chrono::naive::NaiveDate;


const XTOL: f64 = 2e-12;
const MAX_ITER: usize = 100;


pub fn day_offsets(dates: &[NaiveDate]) -> Vec<f64> {
    match dates.first() {
	None => vec![],
	Some(first) => dates.iter()
	    .map(|date| (*date - *first).num_days() as f64).collect(),
    }
}


pub fn interp(x: &[f64], y: &[f64], at: f64) -> f64 {

    if at <= x[0] {
	return y[0];
    }

    for i in 1..x.len() {
	if at == x[i] {
	    return y[i];
	}
	if at < x[i] {
	    let f = (at - x[i-1]) / (x[i] - x[i-1]);
	    return y[i-1] + (y[i] - y[i-1]) * f;
	}
    }

    y[y.len()-1]

}


pub fn brent<F>(f: F, a: f64, b: f64) -> Option<f64>
where F: Fn(f64) -> f64 {

    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
	return Some(a);
    }
    if fb == 0.0 {
	return Some(b);
    }
    if (fa > 0.0) == (fb > 0.0) {
	return None;
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = b - a;

    for _ in 0..MAX_ITER {

	if (fb > 0.0) == (fc > 0.0) {
	    c = a;
	    fc = fa;
	    d = b - a;
	    e = d;
	}

	if fc.abs() < fb.abs() {
	    a = b;
	    b = c;
	    c = a;
	    fa = fb;
	    fb = fc;
	    fc = fa;
	}

	let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * XTOL;
	let m = 0.5 * (c - b);

	if m.abs() <= tol || fb == 0.0 {
	    return Some(b);
	}

	if e.abs() < tol || fa.abs() <= fb.abs() {
	    d = m;
	    e = m;
	} else {
	    let s = fb / fa;
	    let (mut p, mut q);
	    if a == c {
		p = 2.0 * m * s;
		q = 1.0 - s;
	    } else {
		let r = fa / fc;
		let t = fb / fc;
		p = s * (2.0 * m * r * (r - t) - (b - a) * (t - 1.0));
		q = (r - 1.0) * (t - 1.0) * (s - 1.0);
	    }
	    if p > 0.0 {
		q = -q;
	    } else {
		p = -p;
	    }
	    if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
		e = d;
		d = p / q;
	    } else {
		d = m;
		e = m;
	    }
	}

	a = b;
	fa = fb;
	b += match d.abs() > tol {
	    true => d,
	    false => match m > 0.0 { true => tol, false => -tol },
	};
	fb = f(b);

    }

    Some(b)

}


pub fn doubling_times(x: &[f64], y: &[f64]) -> Option<Vec<f64>> {

    let n = x.len();
    if n < 2 {
	return None;
    }

    // days whose count has not doubled by the end of the data have no
    // root inside the range; trailing days are dropped until every
    // remaining day can be solved without extrapolating
    let last = x[n-1];
    let mut buffer = 1;

    while buffer < n {

	let mut roots = Vec::with_capacity(n - buffer);

	for i in 0..n - buffer {
	    let target = 2.0 * y[i];
	    match brent(|t| interp(x, y, x[i] + t) - target, 0.0, last - x[i]) {
		Some(root) => roots.push(root),
		None => break,
	    }
	}

	if roots.len() == n - buffer {
	    return Some(roots);
	}

	buffer += 1;

    }

    None

}


#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn day_offsets_count_from_first_date() {
	let dates = vec![NaiveDate::from_ymd(2020, 3, 1),
			 NaiveDate::from_ymd(2020, 3, 2),
			 NaiveDate::from_ymd(2020, 3, 5)];
	assert_eq!(day_offsets(&dates), vec![0.0, 1.0, 4.0]);
	assert!(day_offsets(&[]).is_empty());
    }

    #[test]
    fn interp_is_exact_at_knots() {
	let x = vec![0.0, 1.0, 3.0];
	let y = vec![10.0, 20.0, 40.0];
	assert_eq!(interp(&x, &y, 0.0), 10.0);
	assert_eq!(interp(&x, &y, 1.0), 20.0);
	assert_eq!(interp(&x, &y, 3.0), 40.0);
    }

    #[test]
    fn interp_is_linear_between_knots() {
	let x = vec![0.0, 1.0, 3.0];
	let y = vec![10.0, 20.0, 40.0];
	assert_relative_eq!(interp(&x, &y, 0.5), 15.0);
	assert_relative_eq!(interp(&x, &y, 2.0), 30.0);
    }

    #[test]
    fn interp_clamps_at_the_ends() {
	let x = vec![1.0, 2.0];
	let y = vec![5.0, 7.0];
	assert_eq!(interp(&x, &y, 0.0), 5.0);
	assert_eq!(interp(&x, &y, 9.0), 7.0);
    }

    #[test]
    fn brent_finds_a_bracketed_root() {
	let root = brent(|x| x * x - 2.0, 0.0, 2.0).unwrap();
	assert_relative_eq!(root, 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn brent_rejects_unbracketed_intervals() {
	assert_eq!(brent(|x| x * x + 1.0, 0.0, 1.0), None);
    }

    #[test]
    fn brent_accepts_endpoint_roots() {
	assert_eq!(brent(|x| x, 0.0, 5.0), Some(0.0));
	assert_eq!(brent(|x| x - 5.0, 0.0, 5.0), Some(5.0));
    }

    #[test]
    fn doubling_of_exact_geometric_growth() {
	let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
	let y = vec![1.0, 2.0, 4.0, 8.0, 16.0];
	let roots = doubling_times(&x, &y).unwrap();
	assert_eq!(roots.len(), 4);
	for root in roots {
	    assert_relative_eq!(root, 1.0, epsilon = 1e-9);
	}
    }

    #[test]
    fn doubling_of_stepped_series_solves_the_root_property() {
	let x : Vec<f64> = (0..8).map(|i| i as f64).collect();
	let y = vec![1.0, 1.0, 2.0, 2.0, 4.0, 4.0, 8.0, 8.0];
	let roots = doubling_times(&x, &y).unwrap();
	assert_eq!(roots.len(), 6);
	for (i, root) in roots.iter().enumerate() {
	    assert!(*root > 0.0);
	    assert_relative_eq!(interp(&x, &y, x[i] + root),
				2.0 * y[i], epsilon = 1e-9);
	}
    }

    #[test]
    fn doubling_of_decelerating_series() {
	let x : Vec<f64> = (0..10).map(|i| i as f64).collect();
	let y = vec![10.0, 10.0, 12.0, 15.0, 20.0, 28.0, 40.0, 55.0, 80.0, 81.0];
	let roots = doubling_times(&x, &y).unwrap();
	assert_eq!(roots.len(), 7);
	let expected = [4.0, 3.0, 2.5, 13.0 / 6.0, 2.0, 2.04, 2.0];
	for (root, want) in roots.iter().zip(expected.iter()) {
	    assert_relative_eq!(*root, *want, epsilon = 1e-6);
	}
    }

    #[test]
    fn doubling_of_flat_series_is_unavailable() {
	let x = vec![0.0, 1.0, 2.0, 3.0];
	let y = vec![5.0, 5.0, 5.0, 5.0];
	assert_eq!(doubling_times(&x, &y), None);
    }

    #[test]
    fn doubling_needs_at_least_two_points() {
	assert_eq!(doubling_times(&[0.0], &[1.0]), None);
	assert_eq!(doubling_times(&[], &[]), None);
    }

}
