//! Text and JSON rendering of a store snapshot

use std::fmt::Write;

use serde::Serialize;

use crate::version::record::VersionRecord;
use crate::version::store::{ModVersionEntry, VersionStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportRow<'a> {
    identifier: &'a str,
    #[serde(flatten)]
    entry: &'a ModVersionEntry,
}

fn version_with_date(record: &VersionRecord) -> String {
    if record.release_date.is_empty() {
        record.version.clone()
    } else {
        format!("{} ({})", record.version, record.release_date)
    }
}

/// Short human-readable label for a status
pub fn status_label(status: VersionStatus) -> &'static str {
    match status {
        VersionStatus::Fetching => "checking",
        VersionStatus::Latest => "up to date",
        VersionStatus::Outdated => "update available",
        VersionStatus::NotImplemented => "no version info",
        VersionStatus::Error => "error",
    }
}

/// Detail text for one entry, as a presenter would show in a tooltip
pub fn describe(entry: &ModVersionEntry) -> String {
    let current = format!("Current version: {}", version_with_date(&entry.local));
    match entry.status {
        VersionStatus::Fetching => format!("Fetching latest version...\n{}", current),
        VersionStatus::Latest => format!("Up to date.\n{}", current),
        VersionStatus::Outdated => {
            let latest = entry
                .remote
                .as_ref()
                .map(version_with_date)
                .unwrap_or_default();
            format!("Update available.\nLatest version: {}\n{}", latest, current)
        }
        VersionStatus::NotImplemented => {
            "This mod does not provide version information.".to_string()
        }
        VersionStatus::Error => format!("Error checking version:\n{}", entry.error_text()),
    }
}

/// One block per mod: `identifier: label`, followed by the indented detail
pub fn render_text(snapshot: &[(String, ModVersionEntry)]) -> String {
    let mut out = String::new();
    for (identifier, entry) in snapshot {
        let _ = writeln!(out, "{}: {}", identifier, status_label(entry.status));
        for line in describe(entry).lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}

pub fn render_json(snapshot: &[(String, ModVersionEntry)]) -> Result<String, serde_json::Error> {
    let rows: Vec<ReportRow<'_>> = snapshot
        .iter()
        .map(|(identifier, entry)| ReportRow { identifier, entry })
        .collect();
    serde_json::to_string_pretty(&rows)
}
