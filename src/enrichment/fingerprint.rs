//! Audio fingerprint generation using Chromaprint/fpcalc
//!
//! This module shells out to the `fpcalc` command-line tool (part of Chromaprint)
//! to generate audio fingerprints.
//!
//! Install fpcalc:
//! - Windows: `winget install AcoustID.Chromaprint`
//! - macOS: `brew install chromaprint`
//! - Linux: `apt install libchromaprint-tools` or equivalent

use std::path::Path;
use std::process::Command;

use crate::enrichment::domain::{AudioFingerprint, EnrichmentError};

#[cfg(windows)]
const FPCALC_PATHS: &[&str] = &[
    "fpcalc", // In PATH
    r"C:\Program Files\Chromaprint\fpcalc.exe",
    r"C:\Program Files\MusicBrainz Picard\fpcalc.exe",
];

#[cfg(not(windows))]
const FPCALC_PATHS: &[&str] = &[
    "fpcalc", // In PATH
    "/usr/bin/fpcalc",
    "/usr/local/bin/fpcalc",
    "/opt/homebrew/bin/fpcalc",
];

/// Find the fpcalc executable, checking common installation paths
fn find_fpcalc() -> Option<&'static str> {
    FPCALC_PATHS.iter().copied().find(|path| {
        Command::new(path)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    })
}

/// Generate an audio fingerprint for the given file
///
/// Returns [`EnrichmentError::FingerprintUnavailable`] when fpcalc is not
/// installed and [`EnrichmentError::FingerprintError`] when it is installed
/// but fails on this file.
pub fn generate_fingerprint(path: &Path) -> Result<AudioFingerprint, EnrichmentError> {
    let fpcalc = find_fpcalc().ok_or(EnrichmentError::FingerprintUnavailable)?;

    let output = Command::new(fpcalc)
        .arg("-json")
        .arg(path)
        .output()
        .map_err(|e| EnrichmentError::FingerprintError(format!("Failed to run fpcalc: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EnrichmentError::FingerprintError(format!(
            "fpcalc failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_fpcalc_json(&stdout)
}

/// Parse the JSON output from fpcalc
fn parse_fpcalc_json(json: &str) -> Result<AudioFingerprint, EnrichmentError> {
    let parsed: FpcalcOutput = serde_json::from_str(json).map_err(|e| {
        EnrichmentError::FingerprintError(format!("Failed to parse fpcalc output: {}", e))
    })?;

    Ok(AudioFingerprint {
        fingerprint: parsed.fingerprint,
        duration_secs: parsed.duration.round() as u32,
    })
}

/// fpcalc JSON output structure
#[derive(serde::Deserialize)]
struct FpcalcOutput {
    fingerprint: String,
    duration: f64,
}
