use anyhow::{Result, anyhow};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{Config, MissingTranslation};
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest, AnthropicResponse};
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::translation::{TranslationOutcome, TranslationService};

// @module: Application controller for subtitle translation

/// Main application controller: parse, translate each entry, write
pub struct Controller<P = Anthropic> {
    // @field: App configuration
    config: Config,

    // @field: Line translator
    service: TranslationService<P>,

    // @field: Draw a progress bar while translating
    show_progress: bool,
}

impl Controller<Anthropic> {
    // @method: Create a controller talking to the Anthropic Messages API
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config)?;
        Ok(Self::with_service(config, service))
    }
}

impl<P> Controller<P>
where
    P: Provider<Request = AnthropicRequest, Response = AnthropicResponse>,
{
    // @method: Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService<P>) -> Self {
        Self {
            config,
            service,
            show_progress: true,
        }
    }

    /// Disable the progress bar (logs are still written)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService<P> {
        &self.service
    }

    /// Run the whole workflow for one subtitle file and return the output path
    pub async fn run(&self, input_file: &Path) -> Result<PathBuf> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let mut subtitles = SubtitleCollection::from_file(input_file)?;
        info!("Loaded {} subtitle entries from {:?}", subtitles.entries.len(), input_file);

        self.translate_collection(&mut subtitles).await;

        println!("{}", subtitles.to_json()?);

        let output_path = FileManager::generate_output_path(input_file);
        subtitles.write_bilingual_srt(&output_path)?;

        println!("Generated translated SRT file: {}", output_path.display());
        info!("Finished in {}", Self::format_duration(start_time.elapsed()));

        Ok(output_path)
    }

    /// Translate every entry in file order, one request at a time.
    /// Returns the number of entries whose translation failed.
    pub async fn translate_collection(&self, subtitles: &mut SubtitleCollection) -> usize {
        let progress_bar = self.create_progress_bar(subtitles.entries.len() as u64);

        for entry in subtitles.entries.iter_mut() {
            let label = entry.seq_label();
            progress_bar.suspend(|| info!("Translating subtitle {}...", label));
            progress_bar.set_message(format!("#{}", label));

            let outcome = self.service.translate_text(&entry.text).await;
            self.apply_outcome(entry, outcome);

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let failed = subtitles.failed_translation_count();
        if failed > 0 {
            warn!(
                "{} of {} subtitle(s) could not be translated",
                failed,
                subtitles.entries.len()
            );
        }

        failed
    }

    /// Store a translation outcome on its entry, applying the missing-translation policy
    pub fn apply_outcome(&self, entry: &mut SubtitleEntry, outcome: TranslationOutcome) {
        match outcome {
            TranslationOutcome::Translated(text) => {
                entry.translated_text = text;
                entry.translation_error = None;
            }
            TranslationOutcome::Unavailable { reason } => {
                entry.translated_text = match self.config.on_failure {
                    MissingTranslation::Empty => String::new(),
                    MissingTranslation::Original => entry.text.clone(),
                };
                entry.translation_error = Some(reason);
            }
        }
    }

    fn create_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Format a duration as `1m 05s` / `4.2s`
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs >= 60 {
            format!("{}m {:02}s", secs / 60, secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
