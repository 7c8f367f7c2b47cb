use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Division by zero: denominator is 0 at index {index}")]
    DivisionByZero { index: usize },
    #[error("Series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Cannot take the maximum of an empty series")]
    EmptySeries,
    #[error("Rounding magnitude 10^{0} does not fit in an i64")]
    MagnitudeOverflow(u32),
}

//day-over-day first difference, one element shorter than the input
pub fn daily_delta(column: &[i64]) -> Vec<i64> {
    column.windows(2).map(|w| w[1] - w[0]).collect()
}

//inverse of daily_delta: running total seeded with the first cumulative value
//the first value itself is not included, so the result matches column[1..]
pub fn cumulative_reconstruction(delta: &[i64], first_value: i64) -> Vec<i64> {
    delta
        .iter()
        .scan(first_value, |running, &d| {
            *running += d;
            Some(*running)
        })
        .collect()
}

//component-wise a - b
pub fn subtract(a: &[i64], b: &[i64]) -> Result<Vec<i64>, SeriesError> {
    check_lengths(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

//component-wise sum of several equally long series
pub fn sum_series(series: &[Vec<i64>]) -> Result<Vec<i64>, SeriesError> {
    let Some(first) = series.first() else {
        return Ok(Vec::new());
    };

    let mut total = vec![0; first.len()];
    for s in series {
        check_lengths(total.len(), s.len())?;
        for (t, v) in total.iter_mut().zip(s) {
            *t += v;
        }
    }
    Ok(total)
}

//elementwise numerator / denominator * 100, rounded to 2 decimals
pub fn ratio_percent(numerator: &[i64], denominator: &[i64]) -> Result<Vec<f64>, SeriesError> {
    check_lengths(numerator.len(), denominator.len())?;

    numerator
        .iter()
        .zip(denominator)
        .enumerate()
        .map(|(index, (&n, &d))| {
            if d == 0 {
                return Err(SeriesError::DivisionByZero { index });
            }
            Ok(round_to_decimals(n as f64 / d as f64 * 100.0, 2))
        })
        .collect()
}

//rounds half to even at the given number of decimal places
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

//rounds to the nearest multiple of 10^magnitude, ties go to the even multiple
pub fn round_to_magnitude(value: i64, magnitude: u32) -> Result<i64, SeriesError> {
    let step = 10i64
        .checked_pow(magnitude)
        .ok_or(SeriesError::MagnitudeOverflow(magnitude))?;

    let quotient = value.div_euclid(step);
    let remainder = value.rem_euclid(step);

    let rounded = match (2 * remainder as i128).cmp(&(step as i128)) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    };

    rounded
        .checked_mul(step)
        .ok_or(SeriesError::MagnitudeOverflow(magnitude))
}

//maximum of a series, an empty series is an error rather than a default
pub fn series_max<T: PartialOrd + Copy>(series: &[T]) -> Result<T, SeriesError> {
    let mut iter = series.iter().copied();
    let first = iter.next().ok_or(SeriesError::EmptySeries)?;
    Ok(iter.fold(first, |max, v| if v > max { v } else { max }))
}

//daily breakdown of a cumulative total into known categories plus a residual
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub total: Vec<i64>,
    //known component deltas followed by the residual
    pub parts: Vec<Vec<i64>>,
}

impl Decomposition {
    pub fn residual(&self) -> &[i64] {
        self.parts.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn days(&self) -> usize {
        self.total.len()
    }

    //per-day difference between the total and the sum of the parts
    pub fn discrepancy(&self) -> Vec<i64> {
        let mut diff = self.total.clone();
        for part in &self.parts {
            for (d, v) in diff.iter_mut().zip(part) {
                *d -= v;
            }
        }
        diff
    }

    pub fn ties_out(&self) -> bool {
        self.discrepancy().iter().all(|&d| d == 0)
    }
}

//splits the daily delta of `total` into the deltas of `known` and whatever is left
pub fn decompose(total: &[i64], known: &[&[i64]]) -> Result<Decomposition, SeriesError> {
    let total_delta = daily_delta(total);

    let mut parts = known
        .iter()
        .map(|series| {
            check_lengths(total.len(), series.len())?;
            Ok(daily_delta(series))
        })
        .collect::<Result<Vec<_>, SeriesError>>()?;

    let known_sum = sum_series(&parts)?;
    let residual = if known_sum.is_empty() {
        total_delta.clone()
    } else {
        subtract(&total_delta, &known_sum)?
    };
    parts.push(residual);

    Ok(Decomposition {
        total: total_delta,
        parts,
    })
}

fn check_lengths(left: usize, right: usize) -> Result<(), SeriesError> {
    if left != right {
        return Err(SeriesError::LengthMismatch { left, right });
    }
    Ok(())
}
