/*!
 * Prompt template for single-line subtitle translation.
 */

/// Instruction template sent with every subtitle line.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// English name of the target language
    target_language: String,
    /// Optional description of where the lines come from
    context: Option<String>,
}

impl PromptTemplate {
    /// The instruction body. `{target_language}` and `{text}` are replaced on render.
    pub const SUBTITLE_LINE: &'static str = "Translate the following sentence into {target_language}.\nNo other redundant information.\n'{text}'";

    /// Create a new prompt template.
    pub fn new(target_language: impl Into<String>, context: Option<String>) -> Self {
        Self {
            target_language: target_language.into(),
            context: context.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Render the prompt for one subtitle line.
    pub fn render(&self, text: &str) -> String {
        let body = Self::SUBTITLE_LINE
            .replace("{target_language}", &self.target_language)
            .replace("{text}", text);

        match &self.context {
            Some(context) => format!("This sentence is from {}.\n{}", context.trim(), body),
            None => body,
        }
    }
}
