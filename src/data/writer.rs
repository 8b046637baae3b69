use std::path::Path;

use crate::processing::assemble::{ChannelResult, OutputTable};

/// Write the assembled result table as CSV: one header per output
/// column, then one row per peak position. Shorter columns are padded
/// with empty cells so the frame stays rectangular.
pub fn write_results(table: &OutputTable, path: &Path) -> Result<(), String> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| format!("Cannot create output file: {e}"))?;

    for record in result_records(table) {
        writer
            .write_record(&record)
            .map_err(|e| format!("Cannot write output row: {e}"))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Cannot write output file: {e}"))?;

    tracing::info!(
        "Wrote {} column(s) x {} row(s) to {:?}",
        table.columns.len(),
        table.row_count(),
        path
    );
    Ok(())
}

fn result_records(table: &OutputTable) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(table.row_count() + 1);
    records.push(table.columns.iter().map(|c| c.name.clone()).collect());

    for row in 0..table.row_count() {
        records.push(
            table
                .columns
                .iter()
                .map(|c| c.values.get(row).map(|v| v.to_string()).unwrap_or_default())
                .collect(),
        );
    }
    records
}

/// Dump every channel's per-row value and state, for inspecting what
/// the segmentation decided. One `row` column, then a value column and
/// a state column per channel.
pub fn write_label_dump(channels: &[ChannelResult], path: &Path) -> Result<(), String> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| format!("Cannot create dump file: {e}"))?;

    for record in label_records(channels) {
        writer
            .write_record(&record)
            .map_err(|e| format!("Cannot write dump row: {e}"))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Cannot write dump file: {e}"))?;

    tracing::info!("Wrote label dump for {} channel(s) to {:?}", channels.len(), path);
    Ok(())
}

fn label_records(channels: &[ChannelResult]) -> Vec<Vec<String>> {
    let row_count = channels.iter().map(|c| c.values.len()).max().unwrap_or(0);

    let mut header = vec!["row".to_string()];
    for channel in channels {
        header.push(channel.name.clone());
        header.push(format!("{} state", channel.name));
    }

    let mut records = vec![header];
    for row in 0..row_count {
        let mut record = vec![row.to_string()];
        for channel in channels {
            record.push(
                channel
                    .values
                    .get(row)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
            record.push(
                channel
                    .segmentation
                    .labels
                    .get(row)
                    .map(|s| s.label().to_string())
                    .unwrap_or_default(),
            );
        }
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::assemble::OutputColumn;
    use crate::processing::segmentation::{SampleState, Segmentation};

    #[test]
    fn ragged_columns_are_padded_with_empty_cells() {
        let table = OutputTable {
            columns: vec![
                OutputColumn {
                    name: "Front Mean".to_string(),
                    values: vec![1.5, 2.5],
                },
                OutputColumn {
                    name: "Back Mean".to_string(),
                    values: vec![3.5],
                },
            ],
        };
        let records = result_records(&table);
        assert_eq!(records[0], vec!["Front Mean", "Back Mean"]);
        assert_eq!(records[1], vec!["1.5", "3.5"]);
        assert_eq!(records[2], vec!["2.5", ""]);
    }

    #[test]
    fn empty_table_writes_only_the_header() {
        let records = result_records(&OutputTable::default());
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }

    #[test]
    fn label_dump_pairs_values_with_states() {
        let channels = [ChannelResult {
            name: "Front".to_string(),
            values: vec![1.0, 5.0],
            segmentation: Segmentation {
                labels: vec![SampleState::Changing, SampleState::Flat],
                peaks: Vec::new(),
            },
        }];
        let records = label_records(&channels);
        assert_eq!(records[0], vec!["row", "Front", "Front state"]);
        assert_eq!(records[1], vec!["0", "1", "changing"]);
        assert_eq!(records[2], vec!["1", "5", "flat"]);
    }
}
