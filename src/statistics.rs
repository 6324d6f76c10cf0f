/// Numeric sample accepted by the summary functions.
pub trait Sample: Copy {
    fn as_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_sample!(i64, i32, u32, f64, f32);

/// Sum of integer samples; `0` for an empty slice.
pub fn total(values: &[i64]) -> i64 {
    values.iter().sum()
}

/// Arithmetic mean. An empty slice yields `0`, the same value a genuine zero
/// mean produces; callers treat it as "no data".
pub fn mean<T: Sample>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| v.as_f64()).sum();
    sum / values.len() as f64
}

/// Median over a fully sorted copy; `0.0` for an empty slice.
pub fn median<T: Sample>(values: &[T]) -> f64 {
    let mut sorted: Vec<f64> = values.iter().map(|v| v.as_f64()).collect();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    let mid = len / 2;
    if len % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean::<i64>(&[]), 0.0);
        assert_eq!(total(&[]), 0);
    }

    #[test]
    fn mean_handles_integers_and_floats() {
        assert_eq!(mean(&[1_i64, 2, 3]), 2.0);
        assert_eq!(mean(&[-1_i64, 1]), 0.0);
        assert_eq!(mean(&[-3_i64, -2, -1]), -2.0);
        assert!((mean(&[1.8_f64, 2.1, 3.7, 4.3]) - 2.975).abs() < 1e-12);
    }

    #[test]
    fn median_picks_middle_or_averages_centre() {
        assert_eq!(median::<i64>(&[]), 0.0);
        assert_eq!(median(&[7_i64]), 7.0);
        assert_eq!(median(&[5_i64, 1, 3]), 3.0);
        assert_eq!(median(&[4_i64, 1, 3, 2]), 2.5);
        assert_eq!(median(&[2_i64, 2, 1, 2]), 2.0);
        assert_eq!(median(&[-10_i64, 10]), 0.0);
    }
}
