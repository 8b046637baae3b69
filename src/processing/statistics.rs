use thiserror::Error;

use crate::processing::segmentation::Peak;

/// The per-peak summary statistics the tool can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Middle,
    Median,
    Mean,
    Maximum,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Middle,
        StatKind::Median,
        StatKind::Mean,
        StatKind::Maximum,
    ];

    /// Display name, also used in output column headers.
    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Middle => "Middle",
            StatKind::Median => "Median",
            StatKind::Mean => "Mean",
            StatKind::Maximum => "Maximum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("cannot compute {stat} over the empty peak interval ({start}, {end})")]
    EmptyPeak {
        stat: &'static str,
        start: usize,
        end: usize,
    },
}

/// Compute one statistic value per peak, in peak order.
///
/// `Middle` samples the floor-midpoint row and is defined even for an
/// empty interval; the three aggregates are undefined there and fail
/// with [`StatError::EmptyPeak`].
pub fn compute_stat(
    channel: &[f64],
    peaks: &[Peak],
    kind: StatKind,
) -> Result<Vec<f64>, StatError> {
    peaks
        .iter()
        .map(|peak| stat_for_peak(channel, peak, kind))
        .collect()
}

fn stat_for_peak(channel: &[f64], peak: &Peak, kind: StatKind) -> Result<f64, StatError> {
    if kind != StatKind::Middle && peak.is_empty() {
        return Err(StatError::EmptyPeak {
            stat: kind.label(),
            start: peak.start,
            end: peak.end,
        });
    }

    let slice = &channel[peak.start..peak.end];
    let value = match kind {
        StatKind::Middle => channel[(peak.start + peak.end) / 2],
        StatKind::Median => {
            let mut vals = slice.to_vec();
            vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let count = vals.len();
            if count % 2 == 0 {
                (vals[count / 2 - 1] + vals[count / 2]) / 2.0
            } else {
                vals[count / 2]
            }
        }
        StatKind::Mean => slice.iter().sum::<f64>() / slice.len() as f64,
        StatKind::Maximum => slice.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    Ok(value)
}
