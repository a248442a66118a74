use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context};
use log::debug;
use serde::Serialize;

use crate::file_utils::FileManager;

// @module: Subtitle parsing and bilingual serialization

// @const: One or more line breaks with nothing but spaces/tabs between them
static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("blank line regex is valid")
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleEntry {
    // @field: Sequence number, None when the first line has no leading digits
    pub seq_num: Option<usize>,

    // @field: First line of the block, trimmed
    #[serde(skip)]
    pub index_label: String,

    // @field: Time range line, carried through verbatim
    pub time_range: String,

    // @field: Subtitle text, content lines joined with single spaces
    pub text: String,

    // @field: Translation, empty until the translation phase sets it
    pub translated_text: String,

    // @field: Why the translation is missing, if it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_error: Option<String>,
}

impl SubtitleEntry {
    /// Creates a new, untranslated subtitle entry
    pub fn new(seq_num: usize, time_range: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num: Some(seq_num),
            index_label: seq_num.to_string(),
            time_range: time_range.into(),
            text: text.into(),
            translated_text: String::new(),
            translation_error: None,
        }
    }

    /// Parse the sequence number the lenient way: leading digits only
    pub fn parse_seq_num(line: &str) -> Option<usize> {
        let trimmed = line.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits_end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());

        unsigned[..digits_end].parse().ok()
    }

    /// Build an entry from the non-empty lines of one block.
    /// Returns None for blocks with fewer than two lines.
    fn from_block_lines(lines: &[&str]) -> Option<Self> {
        if lines.len() < 2 {
            return None;
        }

        Some(SubtitleEntry {
            seq_num: Self::parse_seq_num(lines[0]),
            index_label: lines[0].trim().to_string(),
            time_range: lines[1].to_string(),
            text: lines[2..].join(" "),
            translated_text: String::new(),
            translation_error: None,
        })
    }

    /// Sequence number as written to the output file
    pub fn seq_label(&self) -> String {
        match self.seq_num {
            Some(n) => n.to_string(),
            None => self.index_label.clone(),
        }
    }

    /// Whether the translation phase failed for this entry
    pub fn translation_failed(&self) -> bool {
        self.translation_error.is_some()
    }
}

// Four lines (number, time range, original, translation) and a blank line
impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_label())?;
        writeln!(f, "{}", self.time_range)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f, "{}", self.translated_text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries, in file order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        Ok(Self::parse_srt_string(&content, path.to_path_buf()))
    }

    /// Parse SRT content. Blocks with fewer than two non-empty lines are skipped.
    pub fn parse_srt_string(content: &str, source_file: PathBuf) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut collection = Self::new(source_file);
        let mut skipped = 0;

        for block in BLANK_LINE_REGEX.split(content) {
            let lines: Vec<&str> = block
                .lines()
                .filter(|line| !line.trim().is_empty())
                .collect();

            if lines.is_empty() {
                continue;
            }

            match SubtitleEntry::from_block_lines(&lines) {
                Some(entry) => collection.entries.push(entry),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed subtitle block(s) in {:?}", skipped, collection.source_file);
        }

        collection
    }

    /// Render the bilingual SRT document
    pub fn to_bilingual_srt(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write the bilingual SRT document in one operation, replacing any existing file
    pub fn write_bilingual_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_bilingual_srt())
    }

    /// Pretty JSON dump of all entries
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize subtitle entries to JSON")
    }

    /// Number of entries whose translation failed
    pub fn failed_translation_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.translation_failed()).count()
    }
}
