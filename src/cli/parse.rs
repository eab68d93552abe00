//! Value parsers for CLI arguments

use notesweep_core::scan::ScanStrategy;

/// Parse a scan strategy name from the command line
pub fn parse_scan_strategy(s: &str) -> Result<ScanStrategy, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(ScanStrategy::Auto),
        "per-line" => Ok(ScanStrategy::PerLine),
        "external-grep" => Ok(ScanStrategy::ExternalGrep),
        other => Err(format!(
            "unknown scan strategy: {} (expected: auto, per-line, or external-grep)",
            other
        )),
    }
}
