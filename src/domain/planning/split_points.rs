//! Numeric probe derivation for decision-tree splits.
//!
//! The bounds of a numeric column (plus the attribute domain) cut the number
//! line into elementary regions: every bound is a point region and every gap
//! between consecutive bounds is an open segment. Two values in the same
//! region are contained by exactly the same column intervals, so one probe
//! per distinct containment signature is enough to represent every way an
//! answer can match the column.

use super::Interval;

/// Indices of the intervals that contain `value`, ascending.
pub fn signature(intervals: &[Interval], value: f64) -> Vec<usize> {
    intervals
        .iter()
        .enumerate()
        .filter(|(_, interval)| interval.contains(value))
        .map(|(index, _)| index)
        .collect()
}

/// Derives one probe value per non-empty containment signature.
///
/// Open segments are preferred over points when both share a signature, so
/// probes stay away from bounds where possible. Regions contained by no
/// interval (gaps) produce no probe. The result is ascending.
///
/// # Example
///
/// Domain `[0, 100]` with intervals `[0, 30]` and `[50, 100]` yields `[15, 75]`.
pub fn probe_points(intervals: &[Interval], min: f64, max: f64) -> Vec<f64> {
    let mut bounds: Vec<f64> = intervals
        .iter()
        .flat_map(|i| [i.low, i.high])
        .chain([min, max])
        .filter(|b| b.is_finite())
        .collect();
    bounds.sort_by(f64::total_cmp);
    bounds.dedup();

    // (signature, first point, first segment midpoint)
    let mut classes: Vec<(Vec<usize>, Option<f64>, Option<f64>)> = Vec::new();
    let mut record = |value: f64, is_segment: bool| {
        let key = signature(intervals, value);
        if key.is_empty() {
            return;
        }
        let index = match classes.iter().position(|(k, _, _)| *k == key) {
            Some(index) => index,
            None => {
                classes.push((key, None, None));
                classes.len() - 1
            }
        };
        let slot = if is_segment {
            &mut classes[index].2
        } else {
            &mut classes[index].1
        };
        slot.get_or_insert(value);
    };

    for (i, bound) in bounds.iter().enumerate() {
        record(*bound, false);
        if let Some(next) = bounds.get(i + 1) {
            record((bound + next) / 2.0, true);
        }
    }

    let mut probes: Vec<f64> = classes
        .into_iter()
        .filter_map(|(_, point, segment)| segment.or(point))
        .collect();
    probes.sort_by(f64::total_cmp);
    probes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_intervals_with_gap_yield_one_probe_each() {
        let intervals = [Interval::new(0.0, 30.0), Interval::new(50.0, 100.0)];
        assert_eq!(probe_points(&intervals, 0.0, 100.0), [15.0, 75.0]);
    }

    #[test]
    fn overlapping_intervals_yield_probe_for_overlap() {
        let intervals = [Interval::new(0.0, 50.0), Interval::new(30.0, 100.0)];
        assert_eq!(probe_points(&intervals, 0.0, 100.0), [15.0, 40.0, 75.0]);
    }

    #[test]
    fn degenerate_interval_probes_its_point() {
        let intervals = [Interval::point(7.0)];
        assert_eq!(probe_points(&intervals, 0.0, 10.0), [7.0]);
    }

    #[test]
    fn nested_intervals_separate_inner_and_outer() {
        let intervals = [Interval::new(0.0, 100.0), Interval::new(40.0, 60.0)];
        let probes = probe_points(&intervals, 0.0, 100.0);
        assert_eq!(probes, [20.0, 50.0]);
    }

    #[test]
    fn every_interval_contains_a_probe_and_no_probe_is_in_a_gap() {
        let intervals = [
            Interval::new(10.0, 20.0),
            Interval::point(35.0),
            Interval::new(18.0, 40.0),
            Interval::new(70.0, 90.0),
        ];
        let probes = probe_points(&intervals, 0.0, 100.0);

        for interval in &intervals {
            assert!(probes.iter().any(|p| interval.contains(*p)), "{} has no probe", interval);
        }
        for probe in &probes {
            assert!(!signature(&intervals, *probe).is_empty());
        }
    }

    #[test]
    fn signature_lists_containing_intervals() {
        let intervals = [Interval::new(0.0, 50.0), Interval::new(30.0, 100.0)];
        assert_eq!(signature(&intervals, 40.0), [0, 1]);
        assert_eq!(signature(&intervals, 10.0), [0]);
        assert!(signature(&intervals, 150.0).is_empty());
    }
}
