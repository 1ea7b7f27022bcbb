//! services/dashboard/src/web/actions.rs
//!
//! Copy and export conveniences on a finished analysis. Every outcome,
//! including a platform failure, is reported as a notification.

use legalvision_core::{
    domain::AnalysisResult,
    ports::{Clipboard, DocumentExporter, Notification, Notifier},
};
use tracing::{error, info};

use crate::web::protocol::ExportFormat;

/// Writes `content` to the clipboard and reports how it went.
pub async fn copy_text(clipboard: &dyn Clipboard, notifier: &dyn Notifier, content: &str) {
    match clipboard.write_text(content).await {
        Ok(()) => {
            info!("Copied {} characters to the clipboard.", content.chars().count());
            notifier.notify(Notification::info("Copied!", "Content copied to clipboard."));
        }
        Err(e) => {
            error!("Clipboard write failed: {}", e);
            notifier.notify(Notification::destructive(
                "Copy failed",
                "Could not write to the clipboard.",
            ));
        }
    }
}

/// Copies the summary of `result`, if the analysis has finished.
pub async fn copy_summary(
    clipboard: &dyn Clipboard,
    notifier: &dyn Notifier,
    result: Option<&AnalysisResult>,
) {
    match result {
        Some(result) => copy_text(clipboard, notifier, &result.summary).await,
        None => notifier.notify(Notification::destructive(
            "Nothing to copy",
            "Analysis has not finished yet.",
        )),
    }
}

/// Exports `result` in the requested format and reports where it went.
pub async fn export_result(
    exporter: &dyn DocumentExporter,
    notifier: &dyn Notifier,
    result: Option<&AnalysisResult>,
    format: ExportFormat,
) {
    let Some(result) = result else {
        notifier.notify(not_ready());
        return;
    };

    let (file_name, contents) = match format {
        ExportFormat::Json => match serde_json::to_vec_pretty(result) {
            Ok(bytes) => ("deed-analysis.json", bytes),
            Err(e) => {
                error!("Could not serialize analysis: {}", e);
                notifier.notify(export_failed());
                return;
            }
        },
        ExportFormat::SummaryText => ("deed-summary.txt", result.summary.clone().into_bytes()),
    };

    match exporter.export(file_name, &contents).await {
        Ok(location) => notifier.notify(Notification::info(
            "Export ready",
            format!("Saved analysis to {}.", location),
        )),
        Err(e) => {
            error!("Export of {} failed: {}", file_name, e);
            notifier.notify(export_failed());
        }
    }
}

fn not_ready() -> Notification {
    Notification::destructive("Nothing to export", "Analysis has not finished yet.")
}

fn export_failed() -> Notification {
    Notification::destructive("Export failed", "The analysis could not be saved.")
}
