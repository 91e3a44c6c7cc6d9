//! Converts the detector's status label and baseline distance into a
//! normalized [`PostureScore`].
//!
//! Label matching is case-insensitive and checks the calibration marker
//! first, so `"CALIBRATE (GOOD POSTURE)"` still scores as uncalibrated.

use posturemon_types::{PostureScore, PostureStatus, ScoreBreakdown};

use crate::metrics::clamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Label fragment emitted while the detector has no baseline.
pub const LABEL_CALIBRATE: &str = "CALIBRATE";

/// Label fragment for upright posture.
pub const LABEL_GOOD: &str = "GOOD POSTURE";

/// Label fragment for slouching.
pub const LABEL_SLOUCHING: &str = "SLOUCHING";

/// Score assigned to labels the detector does not classify.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Alert text for a slouching reading.
pub const ALERT_POOR_POSTURE: &str = "Poor posture detected";

/// Follow-up alert text for a slouching reading.
pub const ALERT_SIT_UP: &str = "Sit up straight";

/// Alert text while calibration is missing.
pub const ALERT_CALIBRATION: &str = "Calibration needed";

/// Classified form of a detector label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    Calibrate,
    Good,
    Slouching,
    Other,
}

fn classify(label: &str) -> LabelKind {
    let upper = label.to_uppercase();
    if upper.contains(LABEL_CALIBRATE) {
        LabelKind::Calibrate
    } else if upper.contains(LABEL_GOOD) {
        LabelKind::Good
    } else if upper.contains(LABEL_SLOUCHING) {
        LabelKind::Slouching
    } else {
        LabelKind::Other
    }
}

/// Distance is meaningful only as a non-negative finite magnitude.
fn sanitize_distance(distance: f64) -> f64 {
    if distance.is_finite() {
        distance.max(0.0)
    } else if distance == f64::INFINITY {
        f64::MAX
    } else {
        0.0
    }
}

/// Score a raw reading.
///
/// | Label            | Overall                     | Status    |
/// |------------------|-----------------------------|-----------|
/// | contains CALIBRATE | 0                         | `Unknown` |
/// | contains GOOD POSTURE | `clamp(100 - 2d, 80, 100)` | `Good` |
/// | contains SLOUCHING | `clamp(50 - d, 0, 50)`    | `Bad`     |
/// | anything else    | 50                          | `Warning` |
///
/// Negative and `NaN` distances are treated as 0.
pub fn score_from_signal(label: &str, distance: f64) -> PostureScore {
    let d = sanitize_distance(distance);
    let (overall, status, confidence) = match classify(label) {
        LabelKind::Calibrate => (0.0, PostureStatus::Unknown, 0.0),
        LabelKind::Good => (
            clamp(2.0f64.mul_add(-d, 100.0), 80.0, 100.0),
            PostureStatus::Good,
            100.0,
        ),
        LabelKind::Slouching => (clamp(50.0 - d, 0.0, 50.0), PostureStatus::Bad, 100.0),
        LabelKind::Other => (NEUTRAL_SCORE, PostureStatus::Warning, 100.0),
    };
    PostureScore {
        overall,
        status,
        breakdown: ScoreBreakdown::uniform(overall),
        confidence,
    }
}

/// Discrete status for a label, without scoring it.
pub fn status_from_label(label: &str) -> PostureStatus {
    match classify(label) {
        LabelKind::Calibrate => PostureStatus::Unknown,
        LabelKind::Good => PostureStatus::Good,
        LabelKind::Slouching => PostureStatus::Bad,
        LabelKind::Other => PostureStatus::Warning,
    }
}

/// User-facing alerts for a label.
pub fn alerts_for_label(label: &str) -> Vec<String> {
    match classify(label) {
        LabelKind::Calibrate => vec![String::from(ALERT_CALIBRATION)],
        LabelKind::Slouching => vec![
            String::from(ALERT_POOR_POSTURE),
            String::from(ALERT_SIT_UP),
        ],
        LabelKind::Good | LabelKind::Other => Vec::new(),
    }
}
