use crate::{
    error::{GenerationError, Result},
    provider::StyleProvider,
    types::SuggestionQuery,
};

/// Turns a chat completion into suggestion lines
pub trait SuggestionParser: Send + Sync {
    fn parse(&self, completion: &str) -> Vec<String>;
}

/// Default parser: one suggestion per non-blank line
///
/// Numbering and bullets are left in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineParser;

impl SuggestionParser for LineParser {
    fn parse(&self, completion: &str) -> Vec<String> {
        completion
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Instruction sent to the chat model
pub fn instruction(prompt: &str, count: u32, has_reference: bool) -> String {
    let subject = if has_reference {
        "the person in this photo"
    } else {
        "a client"
    };

    format!(
        "You are an expert hair stylist. Suggest {count} distinct, realistic and modern hairstyle or beard \
         styles for {subject}. The client asked for: {prompt}. Write exactly one suggestion per line as a \
         short visual description, without any introduction or closing remarks."
    )
}

/// Prompt sent to the image model for one suggestion
pub fn image_prompt(suggestion: &str) -> String {
    format!(
        "Based on this description: {suggestion}, generate a realistic and modern hairstyle or beard style \
         suggestion. The style should be trendy and suitable for a real person."
    )
}

/// Ask the chat model for suggestions and split the answer
///
/// Any provider failure aborts the request; so does an answer with no
/// usable lines.
pub async fn request_suggestions(
    provider: &dyn StyleProvider,
    parser: &dyn SuggestionParser,
    query: &SuggestionQuery,
) -> Result<Vec<String>> {
    let completion = provider.suggest(query).await.map_err(|e| {
        tracing::error!(provider = provider.name(), error = %e, "suggestion request failed");
        GenerationError::Provider(e)
    })?;

    let suggestions = parser.parse(&completion);
    if suggestions.is_empty() {
        tracing::error!(provider = provider.name(), "chat completion contained no suggestions");
        return Err(GenerationError::NoSuggestions);
    }

    tracing::debug!(count = suggestions.len(), "received style suggestions");

    Ok(suggestions)
}
