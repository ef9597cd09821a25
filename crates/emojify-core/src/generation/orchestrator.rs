//! Runs one generation: image synthesis and combo synthesis side by side.

use tracing::{error, info, warn};

use super::error::GenerationError;
use super::model::{ComboRequest, EmojiModel, ImageRequest, Part, SQUARE_ASPECT_RATIO};
use super::result::{GenerationRequest, GenerationResult, PendingGeneration};
use crate::history::History;

/// Issues the two remote requests for a generation and settles the record.
///
/// Holds no per-generation state, so one orchestrator can serve any number
/// of concurrent generations.
pub struct Orchestrator<M> {
    model: M,
}

impl<M: EmojiModel> Orchestrator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run a submitted generation to completion.
    ///
    /// Both remote calls are awaited before the record settles. An image
    /// failure fails the record whatever happened to the combos; combo
    /// failures only leave the combo list empty.
    pub async fn run(&self, pending: PendingGeneration) -> GenerationResult {
        let request = pending.request();
        info!(
            id = %pending.id(),
            style = %request.style,
            has_source_image = request.source_image.is_some(),
            prompt_chars = request.description().chars().count(),
            "Starting emoji generation"
        );

        let (image, combos) = tokio::join!(
            self.synthesize_image(request),
            self.synthesize_combos(request)
        );

        let result = settle(pending, image, combos);
        match result.failure_reason() {
            Some(reason) => error!(id = %result.id(), "Emoji generation failed: {}", reason),
            None => info!(
                id = %result.id(),
                combos = result.combos().map_or(0, |c| c.len()),
                "Emoji generation complete"
            ),
        }
        result
    }

    /// Submit, run and record a generation in one step.
    pub async fn generate(
        &self,
        request: GenerationRequest,
        history: &mut History,
    ) -> GenerationResult {
        let result = self.run(PendingGeneration::new(request)).await;
        history.record(result.clone());
        result
    }

    async fn synthesize_image(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let parts = self
            .model
            .generate_image(&build_image_request(request))
            .await?;

        first_inline_image(&parts).ok_or(GenerationError::NoImageReturned)
    }

    async fn synthesize_combos(&self, request: &GenerationRequest) -> Vec<String> {
        let combo_request = build_combo_request(request.combo_description());

        match self.model.generate_text(&combo_request).await {
            Ok(Some(text)) => parse_combos(&text).unwrap_or_else(|e| {
                warn!("Discarding unparseable emoji combos: {}", e);
                Vec::new()
            }),
            Ok(None) => {
                warn!("Combo response contained no text");
                Vec::new()
            }
            Err(e) => {
                warn!("Emoji combo request failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Join the two outcomes into the final record.
pub fn settle(
    pending: PendingGeneration,
    image: Result<String, GenerationError>,
    combos: Vec<String>,
) -> GenerationResult {
    match image {
        Ok(image_url) => pending.complete(image_url, combos),
        Err(err) => pending.fail(err.to_string()),
    }
}

/// Build the image-synthesis request for a generation.
///
/// With a source photo the parts are the photo followed by a transform
/// instruction; otherwise a single styled instruction.
pub fn build_image_request(request: &GenerationRequest) -> ImageRequest {
    let description = request.description();
    let parts = match &request.source_image {
        Some(image) => vec![
            Part::InlineData(image.clone()),
            Part::text(request.style.transform_instruction(description)),
        ],
        None => vec![Part::text(request.style.instruction(description))],
    };

    ImageRequest {
        parts,
        aspect_ratio: SQUARE_ASPECT_RATIO.to_string(),
    }
}

pub fn build_combo_request(description: &str) -> ComboRequest {
    ComboRequest {
        prompt: format!(
            "Generate 4 distinct, creative emoji combinations (using standard unicode emojis) \
             that represent the following description: \"{}\". Return JSON array of strings.",
            description
        ),
    }
}

/// The first inline image among the parts, as a data URL.
pub fn first_inline_image(parts: &[Part]) -> Option<String> {
    parts
        .iter()
        .find_map(Part::as_inline_image)
        .map(|image| image.to_data_url())
}

/// Parse a combo payload: a JSON array of strings, optionally wrapped in a
/// Markdown code fence.
pub fn parse_combos(text: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag such as ```json
    let body = body.split_once('\n').map_or(body, |(_, rest)| rest);
    body.trim_end().trim_end_matches("```").trim()
}
