use crate::processing::segmentation::{Peak, Segmentation};
use crate::processing::statistics::{compute_stat, StatError, StatKind};

/// One channel's computed series plus its segmentation, ready for
/// statistic extraction.
#[derive(Debug, Clone)]
pub struct ChannelResult {
    pub name: String,
    pub values: Vec<f64>,
    pub segmentation: Segmentation,
}

/// A single result column: one statistic over one channel's peaks.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// The assembled result table. Columns may have differing lengths when
/// channels detected different peak counts; padding to a rectangle is
/// the writer's concern.
#[derive(Debug, Clone, Default)]
pub struct OutputTable {
    pub columns: Vec<OutputColumn>,
}

impl OutputTable {
    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Build one output column per (channel, enabled statistic) pair, in
/// channel-then-statistic order, named `"<channel> <statistic>"`.
///
/// Degenerate peak intervals (`start == end`) are dropped before any
/// statistic runs, so every statistic column of a channel covers the
/// same peaks.
pub fn assemble(
    channels: &[ChannelResult],
    stats: &[StatKind],
) -> Result<OutputTable, StatError> {
    let mut columns = Vec::with_capacity(channels.len() * stats.len());

    for channel in channels {
        let peaks: Vec<Peak> = channel
            .segmentation
            .peaks
            .iter()
            .copied()
            .filter(|p| !p.is_empty())
            .collect();
        let dropped = channel.segmentation.peaks.len() - peaks.len();
        if dropped > 0 {
            tracing::warn!(
                "Dropping {dropped} degenerate peak interval(s) from channel {:?}",
                channel.name
            );
        }

        for &kind in stats {
            let values = compute_stat(&channel.values, &peaks, kind)?;
            columns.push(OutputColumn {
                name: format!("{} {}", channel.name, kind.label()),
                values,
            });
        }
    }

    Ok(OutputTable { columns })
}
