use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::SubtitleError;

// @module: File utilities for subtitle input and bilingual output

/// Suffix inserted between the input file stem and the output extension
pub const OUTPUT_SUFFIX: &str = "_translate";

/// Extension of the generated subtitle file
pub const OUTPUT_EXTENSION: &str = "srt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @reads: Whole file as UTF-8
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|source| {
            SubtitleError::ReadFailed { path: path.to_path_buf(), source }.into()
        })
    }

    // @writes: Whole buffer in one operation, replacing any existing file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, content).map_err(|source| {
            SubtitleError::WriteFailed { path: path.to_path_buf(), source }.into()
        })
    }

    // @generates: `<dir>/<stem>_translate.srt` next to the input file
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(OUTPUT_SUFFIX);
        output_filename.push('.');
        output_filename.push_str(OUTPUT_EXTENSION);

        input_file.with_file_name(output_filename)
    }
}
