use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::table::RawTable;
use crate::processing::range::{self, ParseError};
use crate::processing::segmentation::SegmentationParams;
use crate::processing::statistics::StatKind;

/// One user-defined grouping of table columns. The indices are the
/// fully expanded, duplicate-free result of parsing `spec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub name: String,
    pub spec: String,
    pub indices: Vec<usize>,
}

/// Which statistics to export. Field order matches [`StatKind::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSelection {
    pub middle: bool,
    pub median: bool,
    pub mean: bool,
    pub maximum: bool,
}

impl StatSelection {
    pub fn enable(&mut self, kind: StatKind) {
        match kind {
            StatKind::Middle => self.middle = true,
            StatKind::Median => self.median = true,
            StatKind::Mean => self.mean = true,
            StatKind::Maximum => self.maximum = true,
        }
    }

    /// The enabled kinds in their fixed export order.
    pub fn enabled(&self) -> Vec<StatKind> {
        let flags = [self.middle, self.median, self.mean, self.maximum];
        StatKind::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(kind, on)| on.then_some(kind))
            .collect()
    }

    pub fn any(&self) -> bool {
        self.middle || self.median || self.mean || self.maximum
    }
}

/// Accumulated analysis configuration for one run: the column groups,
/// the segmentation parameters and the statistic selection. Mutated
/// only by explicit add/remove/clear calls; the computation itself is a
/// pure function of a session plus a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub groups: Vec<ColumnGroup>,
    #[serde(default)]
    pub params: SegmentationParams,
    #[serde(default)]
    pub stats: StatSelection,
}

impl Session {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            params: SegmentationParams::default(),
            stats: StatSelection::default(),
        }
    }

    /// Parse `spec` against the table and append the group. Indices
    /// already claimed by earlier groups are rejected as duplicates;
    /// on any error the session is left unchanged.
    ///
    /// An empty or missing name falls back to the column header for a
    /// single-column group, otherwise to `"Avg <spec>"`.
    pub fn add_group(
        &mut self,
        spec: &str,
        name: Option<&str>,
        table: &RawTable,
    ) -> Result<&ColumnGroup, ParseError> {
        let taken: Vec<usize> = self
            .groups
            .iter()
            .flat_map(|g| g.indices.iter().copied())
            .collect();
        let indices = range::parse_with_taken(spec, table.column_count(), &taken)?;

        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => default_group_name(&indices, spec, table),
        };

        self.groups.push(ColumnGroup {
            name,
            spec: spec.to_string(),
            indices,
        });
        Ok(self.groups.last().unwrap())
    }

    pub fn remove_last_group(&mut self) -> Option<ColumnGroup> {
        self.groups.pop()
    }

    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// Check a (possibly restored) session against a concrete table:
    /// every group index must fall inside the table's column range.
    pub fn validate_against(&self, table: &RawTable) -> Result<(), ParseError> {
        let column_count = table.column_count();
        for group in &self.groups {
            if let Some(&index) = group.indices.iter().find(|&&i| i >= column_count) {
                return Err(ParseError::IndexOutOfBounds {
                    index,
                    column_count,
                });
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Cannot serialize session: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Cannot write session file: {e}"))?;
        tracing::info!("Session saved to {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read session file: {e}"))?;
        let session: Session =
            serde_json::from_str(&json).map_err(|e| format!("Invalid session file: {e}"))?;
        tracing::info!(
            "Session loaded from {:?}: {} group(s)",
            path,
            session.groups.len()
        );
        Ok(session)
    }
}

fn default_group_name(indices: &[usize], spec: &str, table: &RawTable) -> String {
    if indices.len() == 1 {
        let header = table.columns[indices[0]].trim();
        if !header.is_empty() {
            return header.to_string();
        }
    }
    format!("Avg {spec}")
}
