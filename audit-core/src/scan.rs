//! Scan orchestration - snapshot extraction plus rule evaluation over one
//! scope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuditError, AuditResult};
use crate::extract::{extract, ExtractedNode};
use crate::rules::{run_all, Finding, Severity};
use crate::tree::NodeTree;

/// Options for a scan invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Name of the page the scope was taken from.
    pub page_name: String,
}

/// Aggregated output of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unique identifier for this scan run.
    pub scan_id: Uuid,
    /// Page the scope was taken from.
    pub page_name: String,
    /// Flat pre-order snapshot of the scanned forest.
    pub records: Vec<ExtractedNode>,
    /// Findings across every node, in walk order.
    pub findings: Vec<Finding>,
}

impl ScanReport {
    /// Number of findings at the given severity.
    #[must_use]
    pub fn count_of(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Serialize the report to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AuditResult<String> {
        serde_json::to_string(self).map_err(AuditError::Serialization)
    }
}

/// Scan a node tree: extract the snapshot and evaluate every rule over
/// every node.
#[must_use]
pub fn scan(tree: &NodeTree, options: &ScanOptions) -> ScanReport {
    let report = ScanReport {
        scan_id: Uuid::new_v4(),
        page_name: options.page_name.clone(),
        records: extract(tree),
        findings: run_all(tree),
    };
    tracing::info!(
        "Scanned page '{}': {} nodes, {} findings ({} errors)",
        report.page_name,
        report.records.len(),
        report.findings.len(),
        report.count_of(Severity::Error)
    );
    report
}
