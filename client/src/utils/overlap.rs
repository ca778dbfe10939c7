use chrono::NaiveDate;

use crate::model::LeaveRequest;

use super::time::parse_iso_date;

/// Inclusive interval-intersection test: `[a_start, a_end]` and
/// `[b_start, b_end]` overlap iff `a_start <= b_end && b_start <= a_end`.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Pre-submission gate: does the candidate range collide with any of the
/// user's existing requests that still block new submissions?
///
/// Rejected/cancelled requests are ignored, as are requests whose dates do
/// not parse. The backend remains the authoritative enforcer; this exists to
/// fail fast in the form.
pub fn has_overlap_with_requests(start: &str, end: &str, requests: &[LeaveRequest]) -> bool {
    let (Some(a_start), Some(a_end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return false;
    };

    requests.iter().any(|request| {
        if !request.status.blocks_overlap() {
            return false;
        }
        let (Some(b_start), Some(b_end)) = (
            parse_iso_date(&request.start_date),
            parse_iso_date(&request.end_date),
        ) else {
            return false;
        };
        ranges_overlap(a_start, a_end, b_start, b_end)
    })
}

/// Export-window filter. Open bounds select everything on that side; an
/// entirely empty window selects all rows. Rows with malformed dates are
/// dropped once a bound is set.
pub fn overlaps_window(
    start: &str,
    end: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return false;
    };
    ranges_overlap(
        start,
        end,
        from.unwrap_or(NaiveDate::MIN),
        to.unwrap_or(NaiveDate::MAX),
    )
}
