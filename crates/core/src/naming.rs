//! Contract naming convention engine.
//!
//! The remote runner produces one aggregated markdown report per
//! contract, named after the contract's normalized base name. Upload
//! and results routes both derive names through this module so the
//! same source file always maps to the same report.

/// Normalized base name of a contract file.
///
/// The file stem (name without the final extension), whitespace-trimmed
/// and lowercased. The result identifies a contract across re-uploads
/// regardless of how the file name was cased or padded.
///
/// # Examples
///
/// ```
/// use verdict_core::naming::base_name;
///
/// assert_eq!(base_name("MyToken.sol"), "mytoken");
/// assert_eq!(base_name(" Escrow .rs"), "escrow");
/// assert_eq!(base_name("counter"), "counter");
/// ```
pub fn base_name(filename: &str) -> String {
    std::path::Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_lowercase())
        .unwrap_or_default()
}

/// Lowercased extension of a contract file, including the leading dot.
///
/// Returns an empty string when the filename has no extension.
///
/// # Examples
///
/// ```
/// use verdict_core::naming::extension;
///
/// assert_eq!(extension("MyToken.SOL"), ".sol");
/// assert_eq!(extension("Makefile"), "");
/// ```
pub fn extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Derived report filename for a contract: `<base_name>-report.md`.
///
/// # Examples
///
/// ```
/// use verdict_core::naming::report_filename;
///
/// assert_eq!(report_filename("MyToken.sol"), "mytoken-report.md");
/// assert_eq!(report_filename("MyToken.sol"), report_filename("MYTOKEN.SOL"));
/// ```
pub fn report_filename(filename: &str) -> String {
    format!("{}-report.md", base_name(filename))
}

/// On-disk name for an uploaded contract: `<base_name><extension>`.
///
/// Stored names are fully lowercased so every local artifact for a
/// contract shares the base-name prefix the store purges on re-upload.
pub fn stored_filename(filename: &str) -> String {
    format!("{}{}", base_name(filename), extension(filename))
}
