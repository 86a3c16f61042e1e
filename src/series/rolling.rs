use crate::error::{Result, TrendError};

/// Trailing moving average. Entry `i` is the mean of `values[i+1-w..=i]`;
/// the first `w-1` entries average over the shorter prefix instead.
pub fn rolling_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(TrendError::InvalidArgument(
            "rolling window must be at least 1".to_string(),
        ));
    }

    let mut averages = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        let span = (i + 1).min(window);
        averages.push(sum / span as f64);
    }

    Ok(averages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn growing_then_fixed_window() {
        let avg = rolling_average(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(avg, vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn single_value_is_itself_for_any_window() {
        for window in [1, 2, 7, 100] {
            assert_eq!(rolling_average(&[5.0], window).unwrap(), vec![5.0]);
        }
    }

    #[test]
    fn output_length_matches_input() {
        let values: Vec<f64> = (0..30).map(|v| (v % 4) as f64).collect();
        for window in 1..10 {
            assert_eq!(rolling_average(&values, window).unwrap().len(), values.len());
        }
    }

    #[test]
    fn window_one_is_identity() {
        let values = vec![3.0, 0.0, 9.0, 2.0];
        assert_eq!(rolling_average(&values, 1).unwrap(), values);
    }

    #[test]
    fn seven_day_window_on_week_of_zeros_after_spike() {
        let mut values = vec![14.0];
        values.extend(std::iter::repeat(0.0).take(7));
        let avg = rolling_average(&values, 7).unwrap();
        assert_eq!(avg[0], 14.0);
        assert_eq!(avg[1], 7.0);
        assert_eq!(avg[6], 2.0);
        assert_eq!(avg[7], 0.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rolling_average(&[], 7).unwrap().is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = rolling_average(&[1.0], 0).unwrap_err();
        assert!(matches!(err, TrendError::InvalidArgument(_)));
    }
}
