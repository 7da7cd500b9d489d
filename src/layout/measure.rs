//! Small statistics over page measurements.

use std::cmp::Ordering;

use crate::model::TextRun;

/// Height assumed when a page reports neither heights nor font sizes.
pub const FALLBACK_HEIGHT: f32 = 10.0;

fn sorted(values: impl IntoIterator<Item = f32>) -> Vec<f32> {
    let mut values: Vec<f32> = values.into_iter().filter(|v| v.is_finite()).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values
}

/// Median of the finite values; the mean of the middle pair for even counts.
pub fn median(values: impl IntoIterator<Item = f32>) -> Option<f32> {
    let values = sorted(values);
    let n = values.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(values[n / 2]),
        _ => Some((values[n / 2 - 1] + values[n / 2]) / 2.0),
    }
}

/// Nearest-rank percentile (`p` in 0..=100) of the finite values.
pub fn percentile(values: impl IntoIterator<Item = f32>, p: f32) -> Option<f32> {
    let values = sorted(values);
    if values.is_empty() {
        return None;
    }
    let rank = ((p.clamp(0.0, 100.0) / 100.0) * values.len() as f32).ceil() as usize;
    Some(values[rank.clamp(1, values.len()) - 1])
}

/// Median font size of visible runs, falling back to 10.
pub fn median_font_size(runs: &[TextRun]) -> f32 {
    median(
        runs.iter()
            .filter(|r| !r.is_blank() && r.font_size > 0.0)
            .map(|r| r.font_size),
    )
    .unwrap_or(FALLBACK_HEIGHT)
}

/// Median of positive run heights, falling back to the median font size.
pub fn median_height(runs: &[TextRun]) -> f32 {
    median(
        runs.iter()
            .filter(|r| !r.is_blank() && r.height > 0.0)
            .map(|r| r.height),
    )
    .unwrap_or_else(|| median_font_size(runs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(Vec::<f32>::new()), None);
        assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median([4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median([f32::NAN, 5.0]), Some(5.0));
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let values = [15.0, 20.0, 35.0, 40.0, 50.0];
        assert_eq!(percentile(values, 10.0), Some(15.0));
        assert_eq!(percentile(values, 30.0), Some(20.0));
        assert_eq!(percentile(values, 90.0), Some(50.0));
        assert_eq!(percentile(values, 0.0), Some(15.0));
        assert_eq!(percentile(Vec::<f32>::new(), 50.0), None);
    }

    #[test]
    fn test_median_height_fallbacks() {
        let runs = vec![
            TextRun::new("a", 0.0, 0.0, 5.0, 12.0).with_height(0.0),
            TextRun::new("b", 0.0, 0.0, 5.0, 14.0).with_height(0.0),
        ];
        assert_eq!(median_height(&runs), 13.0);
        assert_eq!(median_height(&[]), FALLBACK_HEIGHT);
    }
}
