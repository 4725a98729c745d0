//! Segment algebra over half-open time intervals.
//!
//! A segment list is an ordered, non-overlapping sequence of `[start, end)`
//! intervals. Every operation here ignores segments with `end <= start` and is
//! total over its inputs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` of instants.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::Segment;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2025-12-10 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-12-10 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let segment = Segment::new(start, end).unwrap();
/// assert_eq!(segment.duration_seconds(), 3 * 3_600);
/// assert!(Segment::new(end, start).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl Segment {
    /// Creates a segment, or `None` when `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Length in seconds; zero for an empty or inverted segment.
    pub fn duration_seconds(&self) -> i64 {
        if self.end > self.start {
            (self.end - self.start).num_seconds()
        } else {
            0
        }
    }

    /// Returns true when `end <= start`.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Removes `cut` from every overlapping segment.
///
/// Overlapped segments are split into a left and a right remainder as needed.
/// An empty cut leaves the list unchanged. Cuts may be applied one after
/// another in any overlap configuration.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{subtract, total_duration, Segment};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let day = [Segment::new(at("2025-12-10 09:00"), at("2025-12-10 18:00")).unwrap()];
/// let lunch = Segment::new(at("2025-12-10 12:00"), at("2025-12-10 13:00")).unwrap();
///
/// let paid = subtract(&day, lunch);
/// assert_eq!(paid.len(), 2);
/// assert_eq!(total_duration(&paid), 8 * 3_600);
/// ```
pub fn subtract(segments: &[Segment], cut: Segment) -> Vec<Segment> {
    if cut.is_empty() {
        return segments.iter().copied().filter(|s| !s.is_empty()).collect();
    }

    let mut remaining = Vec::with_capacity(segments.len() + 1);
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        // No overlap: keep as is
        if cut.end <= segment.start || segment.end <= cut.start {
            remaining.push(*segment);
            continue;
        }

        if let Some(left) = Segment::new(segment.start, cut.start) {
            remaining.push(left);
        }
        if let Some(right) = Segment::new(cut.end, segment.end) {
            remaining.push(right);
        }
    }
    remaining
}

/// Sum of segment lengths in seconds.
pub fn total_duration(segments: &[Segment]) -> i64 {
    segments.iter().map(Segment::duration_seconds).sum()
}

/// Seconds of segment time strictly before `cutoff`. Zero when `cutoff` is absent.
///
/// Used for lateness: every paid second that elapsed before check-in counts.
pub fn duration_before(cutoff: Option<NaiveDateTime>, segments: &[Segment]) -> i64 {
    let Some(cutoff) = cutoff else {
        return 0;
    };

    segments
        .iter()
        .filter(|s| !s.is_empty() && s.start < cutoff)
        .map(|s| (s.end.min(cutoff) - s.start).num_seconds())
        .sum()
}

/// Seconds of segment time strictly after `cutoff`. Zero when `cutoff` is absent.
///
/// Used for early leave: every paid second remaining after check-out counts.
pub fn duration_after(cutoff: Option<NaiveDateTime>, segments: &[Segment]) -> i64 {
    let Some(cutoff) = cutoff else {
        return 0;
    };

    segments
        .iter()
        .filter(|s| !s.is_empty() && s.end > cutoff)
        .map(|s| (s.end - s.start.max(cutoff)).num_seconds())
        .sum()
}

/// Seconds of overlap between the stay interval `[from, to)` and the segments.
///
/// Zero when either endpoint is absent or `to <= from`.
pub fn intersection_duration(
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
    segments: &[Segment],
) -> i64 {
    let (Some(from), Some(to)) = (from, to) else {
        return 0;
    };
    if to <= from {
        return 0;
    }

    segments
        .iter()
        .map(|s| {
            let start = s.start.max(from);
            let end = s.end.min(to);
            if end > start {
                (end - start).num_seconds()
            } else {
                0
            }
        })
        .sum()
}

/// The latest end among non-empty segments, or `None` for an empty list.
pub fn latest_end(segments: &[Segment]) -> Option<NaiveDateTime> {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.end)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn seg(from: (u32, u32), to: (u32, u32)) -> Segment {
        Segment::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    /// 09:00-12:00, 13:00-18:00
    fn office_day() -> Vec<Segment> {
        vec![seg((9, 0), (12, 0)), seg((13, 0), (18, 0))]
    }

    #[test]
    fn test_subtract_splits_overlapped_segment() {
        let paid = subtract(&[seg((9, 0), (18, 0))], seg((12, 0), (13, 0)));
        assert_eq!(paid, office_day());
    }

    #[test]
    fn test_subtract_outside_cut_is_noop() {
        let paid = subtract(&office_day(), seg((6, 0), (7, 0)));
        assert_eq!(paid, office_day());
    }

    #[test]
    fn test_subtract_adjacent_cut_is_noop() {
        let paid = subtract(&office_day(), seg((18, 0), (19, 0)));
        assert_eq!(paid, office_day());
    }

    #[test]
    fn test_subtract_overlapping_cuts_compose() {
        let first = subtract(&[seg((9, 0), (18, 0))], seg((11, 30), (12, 30)));
        let second = subtract(&first, seg((12, 0), (13, 0)));
        assert_eq!(second, vec![seg((9, 0), (11, 30)), seg((13, 0), (18, 0))]);
        assert_eq!(total_duration(&second), 450 * 60);
    }

    #[test]
    fn test_subtract_covering_cut_removes_segment() {
        let paid = subtract(&office_day(), seg((8, 0), (12, 30)));
        assert_eq!(paid, vec![seg((13, 0), (18, 0))]);
    }

    #[test]
    fn test_subtract_inverted_cut_is_noop() {
        let inverted = Segment {
            start: at(14, 0),
            end: at(10, 0),
        };
        assert_eq!(subtract(&[seg((9, 0), (18, 0))], inverted), vec![seg((9, 0), (18, 0))]);
    }

    #[test]
    fn test_total_duration_ignores_inverted_segments() {
        let segments = vec![
            seg((9, 0), (12, 0)),
            Segment {
                start: at(15, 0),
                end: at(14, 0),
            },
        ];
        assert_eq!(total_duration(&segments), 3 * 3_600);
    }

    #[test]
    fn test_duration_before_after_lunch() {
        // 09-12 (180) + 13-14 (60)
        assert_eq!(duration_before(Some(at(14, 0)), &office_day()), 240 * 60);
    }

    #[test]
    fn test_duration_before_inside_lunch() {
        assert_eq!(duration_before(Some(at(12, 30)), &office_day()), 180 * 60);
    }

    #[test]
    fn test_duration_before_first_start_is_zero() {
        assert_eq!(duration_before(Some(at(9, 0)), &office_day()), 0);
        assert_eq!(duration_before(Some(at(8, 0)), &office_day()), 0);
    }

    #[test]
    fn test_duration_after_simple() {
        assert_eq!(duration_after(Some(at(17, 30)), &office_day()), 30 * 60);
        assert_eq!(duration_after(Some(at(18, 0)), &office_day()), 0);
    }

    #[test]
    fn test_absent_cutoff_is_zero() {
        assert_eq!(duration_before(None, &office_day()), 0);
        assert_eq!(duration_after(None, &office_day()), 0);
    }

    #[test]
    fn test_three_segment_day() {
        let paid = subtract(
            &subtract(&[seg((9, 0), (21, 0))], seg((12, 0), (13, 0))),
            seg((18, 0), (18, 30)),
        );
        assert_eq!(
            paid,
            vec![seg((9, 0), (12, 0)), seg((13, 0), (18, 0)), seg((18, 30), (21, 0))]
        );
        assert_eq!(total_duration(&paid), 630 * 60);
        // 17:30-18:00 (30) + 18:30-21:00 (150)
        assert_eq!(duration_after(Some(at(17, 30)), &paid), 180 * 60);
        assert_eq!(intersection_duration(Some(at(10, 0)), Some(at(19, 0)), &paid), 450 * 60);
    }

    #[test]
    fn test_intersection_duration() {
        // 10-12 (120) + 13-18 (300)
        assert_eq!(
            intersection_duration(Some(at(10, 0)), Some(at(19, 0)), &office_day()),
            420 * 60
        );
    }

    #[test]
    fn test_intersection_requires_positive_stay() {
        assert_eq!(intersection_duration(Some(at(10, 0)), Some(at(10, 0)), &office_day()), 0);
        assert_eq!(intersection_duration(Some(at(11, 0)), Some(at(10, 0)), &office_day()), 0);
        assert_eq!(intersection_duration(None, Some(at(10, 0)), &office_day()), 0);
        assert_eq!(intersection_duration(Some(at(10, 0)), None, &office_day()), 0);
    }

    #[test]
    fn test_latest_end() {
        assert_eq!(latest_end(&office_day()), Some(at(18, 0)));
        assert_eq!(latest_end(&[]), None);
    }

    fn arb_segments() -> impl Strategy<Value = Vec<Segment>> {
        // Sorted, non-overlapping segments built from increasing minute offsets
        prop::collection::vec(0u32..180, 0..8).prop_map(|gaps| {
            let base = at(0, 0);
            let mut cursor = 0i64;
            let mut segments = Vec::new();
            for pair in gaps.chunks(2) {
                let start = cursor + i64::from(pair[0]);
                let end = start + i64::from(pair.get(1).copied().unwrap_or(30)) + 1;
                segments.push(Segment {
                    start: base + chrono::Duration::minutes(start),
                    end: base + chrono::Duration::minutes(end),
                });
                cursor = end;
            }
            segments
        })
    }

    proptest! {
        #[test]
        fn prop_subtract_removes_exactly_the_overlap(
            segments in arb_segments(),
            cut_start in 0i64..1_500,
            cut_len in 1i64..600,
        ) {
            let base = at(0, 0);
            let cut = Segment {
                start: base + chrono::Duration::minutes(cut_start),
                end: base + chrono::Duration::minutes(cut_start + cut_len),
            };

            let remaining = subtract(&segments, cut);
            prop_assert_eq!(
                total_duration(&remaining),
                total_duration(&segments)
                    - intersection_duration(Some(cut.start), Some(cut.end), &segments)
            );
            for pair in remaining.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        #[test]
        fn prop_before_and_after_partition_total(
            segments in arb_segments(),
            cutoff in 0i64..1_500,
        ) {
            let cutoff = at(0, 0) + chrono::Duration::minutes(cutoff);
            prop_assert_eq!(
                duration_before(Some(cutoff), &segments) + duration_after(Some(cutoff), &segments),
                total_duration(&segments)
            );
        }
    }
}
