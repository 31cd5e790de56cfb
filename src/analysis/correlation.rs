use std::fmt;

/// Pearson correlation between two series.
///
/// `Undefined` covers fewer than two usable pairs and zero variance in
/// either series. It is never reported as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    Defined(f64),
    Undefined,
}

impl Correlation {
    pub fn value(self) -> Option<f64> {
        match self {
            Correlation::Defined(r) => Some(r),
            Correlation::Undefined => None,
        }
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Defined(r) => write!(f, "{r:.4}"),
            Correlation::Undefined => f.write_str("undefined"),
        }
    }
}

/// Pearson correlation coefficient over pairs where both values are finite.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Correlation {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2 {
        return Correlation::Undefined;
    }

    // An inexact mean leaves a constant series with a tiny nonzero variance
    let (x0, y0) = pairs[0];
    if pairs.iter().all(|p| p.0 == x0) || pairs.iter().all(|p| p.1 == y0) {
        return Correlation::Undefined;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Correlation::Undefined;
    }

    Correlation::Defined((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
