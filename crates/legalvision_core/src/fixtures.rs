//! crates/legalvision_core/src/fixtures.rs
//!
//! Static sample data standing in for a real analysis backend.

use crate::domain::{
    AdministrativeDetails, AnalysisResult, Boundaries, DocumentInfo, FileHandle, Parties, Party,
    PropertyDetails,
};

/// Extensions the upload surface advertises as supported.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["pdf", "docx", "png", "jpg", "jpeg"];

/// Advertised maximum upload size (25 MB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

const DEED_SUMMARY: &str = "This is a Sale Transfer Deed executed on March 15, 2024, transferring property located in Colombo District from Kamal Bandara Silva to Nimal Jayawardena Perera for a consideration of LKR 5,500,000.

The property comprises Lots 1 and 2A of Plan No. 1234/2020, with an extent of 0A-2R-15.5P, bounded by Galle Road to the North and Canal reservation to the West.

Key Legal Points:
\u{2022} Transfer complies with Prevention of Frauds Ordinance
\u{2022} Prior deed chain verified (B 5678/2015, C 9012/2010)
\u{2022} No encumbrances noted";

/// The extracted sale-deed analysis shown for every upload.
pub fn sample_deed_analysis() -> AnalysisResult {
    AnalysisResult {
        document_info: DocumentInfo {
            document_type: "Sale Transfer Deed".into(),
            date: "March 15, 2024".into(),
            registry: "Colombo".into(),
            code: "A 1234/2024".into(),
            pages: 8,
            confidence: 94,
        },
        parties: Parties {
            vendor: Party {
                name: "Kamal Bandara Silva".into(),
                nic: "812345678V".into(),
                address: "45, Galle Road, Colombo 03".into(),
            },
            vendee: Party {
                name: "Nimal Jayawardena Perera".into(),
                nic: "901234567V".into(),
                address: "78, Main Street, Nugegoda".into(),
            },
        },
        property: PropertyDetails {
            plan_number: "1234/2020".into(),
            lot_numbers: "1, 2A".into(),
            extent: "0A-2R-15.5P".into(),
            assessment_no: "123/A".into(),
            boundaries: Boundaries {
                north: "Galle Road".into(),
                east: "Lot 3 of Plan 1234/2020".into(),
                south: "Land belonging to Siriwardena".into(),
                west: "Canal reservation".into(),
            },
        },
        administrative: AdministrativeDetails {
            district: "Colombo".into(),
            province: "Western".into(),
            ds_division: "Thimbirigasyaya".into(),
            registry: "Colombo Land Registry".into(),
        },
        consideration: "LKR 5,500,000".into(),
        prior_deeds: vec!["B 5678/2015".into(), "C 9012/2010".into()],
        summary: DEED_SUMMARY.into(),
    }
}

/// Advisory notes for a file the upload surface would normally warn about.
/// These never block the upload.
pub fn upload_advisories(file: &FileHandle) -> Vec<String> {
    let mut notes = Vec::new();
    match file.extension() {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => {}
        Some(ext) => notes.push(format!(
            "'.{ext}' files are not a supported format (PDF, DOCX, PNG, JPG)."
        )),
        None => notes.push("File has no extension; supported formats are PDF, DOCX, PNG, JPG.".into()),
    }
    if file.size > MAX_UPLOAD_BYTES {
        notes.push(format!(
            "File is {} bytes, above the 25MB maximum.",
            file.size
        ));
    }
    notes
}
