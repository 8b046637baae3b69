use std::path::{Path, PathBuf};

use anyhow::{bail, Error, Result};

use crate::data::{loader, table::RawTable, writer};
use crate::processing::{assemble, grouping, range, segmentation};
use crate::state::session::Session;
use crate::Cli;

/// Run the full analysis pipeline: load the table, assemble the
/// session, build and segment each channel, extract statistics, write
/// the result CSV.
pub fn run(cli: Cli) -> Result<()> {
    let table = loader::load_file(&cli.input).map_err(Error::msg)?;

    if cli.list_columns {
        print_column_key(&table);
        return Ok(());
    }

    let mut session = match &cli.session {
        Some(path) => {
            let session = Session::load(path).map_err(Error::msg)?;
            session.validate_against(&table)?;
            session
        }
        None => Session::new(),
    };

    for raw in &cli.groups {
        let (spec, name) = match raw.split_once('=') {
            Some((spec, name)) => (spec, Some(name)),
            None => (raw.as_str(), None),
        };
        let group = session.add_group(spec, name, &table)?;
        tracing::info!(
            "Added group {:?} over columns {}",
            group.name,
            range::canonical_spec(&group.indices)
        );
    }

    if let Some(value) = cli.slope_threshold {
        session.params.slope_threshold = value;
    }
    if let Some(value) = cli.zero_threshold {
        session.params.zero_threshold = value;
    }
    if let Some(value) = cli.step {
        session.params.step = value;
    }
    session.params.validate()?;

    for stat in &cli.stats {
        session.stats.enable(stat.kind());
    }

    if let Some(path) = &cli.save_session {
        session.save(path).map_err(Error::msg)?;
    }

    if session.groups.is_empty() {
        bail!("no column groups defined; pass --group (use --list-columns to see the header key)");
    }
    if !session.stats.any() {
        bail!("no statistics selected; pass --stats with any of middle, median, mean, maximum");
    }

    let cleaned = grouping::clean(&table);

    let mut channels = Vec::with_capacity(session.groups.len());
    for (i, group) in session.groups.iter().enumerate() {
        let values = grouping::build_channel(&cleaned, &group.indices)?;
        let segmentation = segmentation::segment(&values, &session.params)?;
        tracing::info!(
            "Group {i} ({:?}): {} peak(s) across {} rows",
            group.name,
            segmentation.peaks.len(),
            values.len()
        );
        channels.push(assemble::ChannelResult {
            name: group.name.clone(),
            values,
            segmentation,
        });
    }

    if let Some(path) = &cli.dump_labels {
        writer::write_label_dump(&channels, path).map_err(Error::msg)?;
    }

    let output = assemble::assemble(&channels, &session.stats.enabled())?;
    let out_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    writer::write_results(&output, &out_path).map_err(Error::msg)?;

    Ok(())
}

/// Print the index/heading key for the loaded table, the reference for
/// writing `--group` range specs.
fn print_column_key(table: &RawTable) {
    println!("Index  Heading");
    for (i, name) in table.columns.iter().enumerate() {
        println!("{i:>5}  {name}");
    }
}

/// Results land next to the input by default: `<stem>_results.csv`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_results.csv"))
}
