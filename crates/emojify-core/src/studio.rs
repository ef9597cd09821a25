//! Caller-owned application state.
//!
//! [`EmojiStudio`] keeps what the user is working on (prompt, style, photo,
//! open editor, current result and history) and enforces the guards around
//! generation: a request needs a prompt or a photo, and only one generation
//! may be in flight at a time.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EmojifyConfig;
use crate::data_url::{DataUrlError, InlineImage};
use crate::editor::{EditOptions, EditSession, ImageProcessingError};
use crate::generation::{
    EmojiModel, GenerationRequest, GenerationResult, Orchestrator, PendingGeneration,
    ValidationError,
};
use crate::history::History;
use crate::style::EmojiStyle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Image too large. Please upload an image under {limit_mb}MB.")]
    TooLarge { size: usize, limit_mb: usize },

    #[error(transparent)]
    InvalidImage(#[from] DataUrlError),
}

#[derive(Debug)]
pub struct EmojiStudio {
    config: EmojifyConfig,
    prompt: String,
    style: EmojiStyle,
    uploaded_image: Option<InlineImage>,
    edit_session: Option<EditSession>,
    current: Option<GenerationResult>,
    history: History,
    in_flight: Option<Uuid>,
    last_request: Option<GenerationRequest>,
    error_message: Option<String>,
}

impl EmojiStudio {
    pub fn new(config: EmojifyConfig) -> Self {
        Self {
            style: config.default_style,
            history: History::new(config.max_history),
            config,
            prompt: String::new(),
            uploaded_image: None,
            edit_session: None,
            current: None,
            in_flight: None,
            last_request: None,
            error_message: None,
        }
    }

    pub fn config(&self) -> &EmojifyConfig {
        &self.config
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn style(&self) -> EmojiStyle {
        self.style
    }

    pub fn set_style(&mut self, style: EmojiStyle) {
        self.style = style;
    }

    pub fn uploaded_image(&self) -> Option<&InlineImage> {
        self.uploaded_image.as_ref()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit_session.as_ref()
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.edit_session.as_mut()
    }

    pub fn current_result(&self) -> Option<&GenerationResult> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether a generation could start right now.
    pub fn can_generate(&self) -> bool {
        !self.is_generating() && (!self.prompt.trim().is_empty() || self.uploaded_image.is_some())
    }

    // -- Photo upload and editing --

    /// Accept an uploaded photo and open the editor on it.
    ///
    /// Photos over the configured size limit are rejected and leave the
    /// current photo in place.
    pub fn upload_image(&mut self, image: InlineImage) -> Result<(), UploadError> {
        let size = image.approx_byte_len();
        if size > self.config.max_upload_bytes {
            let err = UploadError::TooLarge {
                size,
                limit_mb: self.config.max_upload_bytes / (1024 * 1024),
            };
            warn!(size, limit = self.config.max_upload_bytes, "Rejected upload");
            self.error_message = Some(err.to_string());
            return Err(err);
        }

        debug!(size, mime = %image.mime_type, "Photo uploaded");
        self.edit_session = Some(EditSession::new(image.clone()));
        self.uploaded_image = Some(image);
        self.error_message = None;
        Ok(())
    }

    pub fn upload_data_url(&mut self, data_url: &str) -> Result<(), UploadError> {
        let image = InlineImage::from_data_url(data_url).map_err(|e| {
            self.error_message = Some(e.to_string());
            UploadError::from(e)
        })?;
        self.upload_image(image)
    }

    /// Reopen the editor on the current photo. Returns false without a photo.
    pub fn open_editor(&mut self) -> bool {
        match &self.uploaded_image {
            Some(image) => {
                self.edit_session = Some(EditSession::new(image.clone()));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_session = None;
    }

    /// Render the open edit session and make it the current photo.
    ///
    /// On failure the session stays open so the user can adjust it.
    pub fn save_edit(&mut self) -> Result<(), ImageProcessingError> {
        let Some(session) = &self.edit_session else {
            return Ok(());
        };

        match session.apply(&EditOptions::from(&self.config)) {
            Ok(image) => {
                self.uploaded_image = Some(image);
                self.edit_session = None;
                Ok(())
            }
            Err(err) => {
                warn!("Failed to save edited photo: {}", err);
                self.error_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn clear_image(&mut self) {
        self.uploaded_image = None;
        self.edit_session = None;
    }

    // -- Generation --

    /// Submit the current prompt, style and photo.
    ///
    /// The returned pending generation is shown as the current result until
    /// [`finish_generation`](Self::finish_generation) receives its outcome.
    pub fn start_generation(&mut self) -> Result<PendingGeneration, ValidationError> {
        let request = GenerationRequest {
            prompt: self.prompt.clone(),
            style: self.style,
            source_image: self.uploaded_image.clone(),
        };
        self.submit(request)
    }

    /// Submit the last request again, with a new identifier.
    pub fn retry(&mut self) -> Result<PendingGeneration, ValidationError> {
        match self.last_request.clone() {
            Some(request) => self.submit(request),
            None => self.start_generation(),
        }
    }

    fn submit(&mut self, request: GenerationRequest) -> Result<PendingGeneration, ValidationError> {
        if self.is_generating() {
            return Err(ValidationError::AlreadyGenerating);
        }
        request.validate()?;

        let pending = PendingGeneration::new(request.clone());
        info!(id = %pending.id(), style = %request.style, "Generation submitted");

        self.last_request = Some(request);
        self.in_flight = Some(pending.id());
        self.current = Some(pending.record().clone());
        self.error_message = None;
        Ok(pending)
    }

    /// Apply the outcome of the in-flight generation.
    ///
    /// Returns false, and changes nothing, for a result that is not the one
    /// in flight.
    pub fn finish_generation(&mut self, result: GenerationResult) -> bool {
        if self.in_flight != Some(result.id()) {
            debug!(id = %result.id(), "Ignoring stale generation result");
            return false;
        }
        self.in_flight = None;

        match result.failure_reason() {
            Some(reason) => self.error_message = Some(reason.to_string()),
            None => {
                self.history.record(result.clone());
            }
        }
        self.current = Some(result);
        true
    }

    /// Start, run and finish a generation with `orchestrator`.
    pub async fn generate<M: EmojiModel>(
        &mut self,
        orchestrator: &Orchestrator<M>,
    ) -> Result<&GenerationResult, ValidationError> {
        let pending = self.start_generation()?;
        self.settle_with(orchestrator, pending).await
    }

    /// [`retry`](Self::retry), run to completion.
    pub async fn retry_with<M: EmojiModel>(
        &mut self,
        orchestrator: &Orchestrator<M>,
    ) -> Result<&GenerationResult, ValidationError> {
        let pending = self.retry()?;
        self.settle_with(orchestrator, pending).await
    }

    async fn settle_with<M: EmojiModel>(
        &mut self,
        orchestrator: &Orchestrator<M>,
        pending: PendingGeneration,
    ) -> Result<&GenerationResult, ValidationError> {
        let result = orchestrator.run(pending).await;
        self.finish_generation(result);
        self.current
            .as_ref()
            .ok_or(ValidationError::EmptyRequest)
    }

    /// Show a history entry again and load its prompt and style.
    pub fn restore_from_history(&mut self, id: Uuid) -> bool {
        let Some(item) = self.history.get(id).cloned() else {
            return false;
        };
        self.prompt = item.prompt().to_string();
        self.style = item.style();
        self.current = Some(item);
        self.error_message = None;
        true
    }
}

impl Default for EmojiStudio {
    fn default() -> Self {
        Self::new(EmojifyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::CropRegion;

    fn small_png() -> InlineImage {
        let img = image::RgbImage::from_pixel(8, 6, image::Rgb([10, 120, 200]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        InlineImage::from_bytes("image/png", bytes.get_ref())
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let config = EmojifyConfig {
            default_style: EmojiStyle::Vaporwave,
            max_history: 4,
            ..EmojifyConfig::default()
        };
        let studio = EmojiStudio::new(config);
        assert_eq!(studio.style(), EmojiStyle::Vaporwave);
        assert_eq!(studio.history().capacity(), 4);
        assert!(!studio.is_generating());
        assert!(!studio.can_generate());
    }

    #[test]
    fn test_upload_opens_editor() {
        let mut studio = EmojiStudio::default();
        studio.upload_image(small_png()).unwrap();

        assert!(studio.uploaded_image().is_some());
        assert!(studio.edit_session().is_some());
        assert!(studio.can_generate());
    }

    #[test]
    fn test_upload_too_large() {
        let mut studio = EmojiStudio::new(EmojifyConfig {
            max_upload_bytes: 1024 * 1024,
            ..EmojifyConfig::default()
        });
        let big = InlineImage::from_bytes("image/png", &vec![0u8; 1024 * 1024 + 1]);

        let err = studio.upload_image(big).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Image too large. Please upload an image under 1MB."
        );
        assert_eq!(studio.error_message(), Some(err.to_string().as_str()));
        assert!(studio.uploaded_image().is_none());
        assert!(studio.edit_session().is_none());
    }

    #[test]
    fn test_default_upload_limit_message() {
        let mut studio = EmojiStudio::default();
        let big = InlineImage::from_bytes("image/png", &vec![0u8; 5 * 1024 * 1024 + 1]);
        assert_eq!(
            studio.upload_image(big).unwrap_err().to_string(),
            "Image too large. Please upload an image under 5MB."
        );
    }

    #[test]
    fn test_upload_bad_data_url() {
        let mut studio = EmojiStudio::default();
        assert!(matches!(
            studio.upload_data_url("data:image/png;base64"),
            Err(UploadError::InvalidImage(_))
        ));
        assert!(studio.error_message().is_some());
    }

    #[test]
    fn test_save_edit_replaces_photo() {
        let mut studio = EmojiStudio::default();
        studio.upload_image(small_png()).unwrap();
        studio.edit_session_mut().unwrap().set_rotation(90.0);

        studio.save_edit().unwrap();
        assert!(studio.edit_session().is_none());
        assert_eq!(studio.uploaded_image().unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn test_failed_save_keeps_session_and_photo() {
        let mut studio = EmojiStudio::default();
        let original = small_png();
        studio.upload_image(original.clone()).unwrap();
        studio
            .edit_session_mut()
            .unwrap()
            .set_crop(CropRegion::new(100, 100, 5, 5));

        assert!(studio.save_edit().is_err());
        assert!(studio.edit_session().is_some());
        assert_eq!(studio.uploaded_image(), Some(&original));
        assert!(studio.error_message().is_some());
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut studio = EmojiStudio::default();
        studio.upload_image(small_png()).unwrap();
        studio.cancel_edit();
        assert!(studio.edit_session().is_none());
        assert!(studio.uploaded_image().is_some());

        assert!(studio.open_editor());
        studio.clear_image();
        assert!(studio.uploaded_image().is_none());
        assert!(studio.edit_session().is_none());
        assert!(!studio.open_editor());
    }

    #[test]
    fn test_start_generation_guards() {
        let mut studio = EmojiStudio::default();
        studio.set_prompt("   ");
        assert_eq!(
            studio.start_generation().unwrap_err(),
            ValidationError::EmptyRequest
        );

        studio.set_prompt("rocket");
        let pending = studio.start_generation().unwrap();
        assert!(studio.is_generating());
        assert_eq!(studio.current_result().map(|r| r.id()), Some(pending.id()));
        assert!(studio.current_result().unwrap().is_pending());

        assert_eq!(
            studio.start_generation().unwrap_err(),
            ValidationError::AlreadyGenerating
        );
    }

    #[test]
    fn test_finish_generation_success_and_failure() {
        let mut studio = EmojiStudio::default();
        studio.set_prompt("rocket");

        let pending = studio.start_generation().unwrap();
        let ok = pending.complete("data:image/png;base64,AAAA".into(), vec!["🚀".into()]);
        assert!(studio.finish_generation(ok));
        assert!(!studio.is_generating());
        assert_eq!(studio.history().len(), 1);

        let pending = studio.start_generation().unwrap();
        assert!(studio.finish_generation(pending.fail("Too many requests.")));
        assert_eq!(studio.error_message(), Some("Too many requests."));
        assert_eq!(studio.history().len(), 1);
        assert!(studio.current_result().unwrap().failure_reason().is_some());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut studio = EmojiStudio::default();
        studio.set_prompt("rocket");
        let stale = PendingGeneration::new(GenerationRequest::new("old", EmojiStyle::Flat))
            .complete("data:image/png;base64,AAAA".into(), vec![]);

        let _pending = studio.start_generation().unwrap();
        assert!(!studio.finish_generation(stale));
        assert!(studio.is_generating());
        assert!(studio.history().is_empty());
    }

    #[test]
    fn test_retry_reuses_inputs_with_new_id() {
        let mut studio = EmojiStudio::default();
        studio.set_prompt("rocket");
        studio.set_style(EmojiStyle::Clay);

        let first = studio.start_generation().unwrap();
        let first_id = first.id();
        studio.finish_generation(first.fail("boom"));

        studio.set_prompt("something else");
        let second = studio.retry().unwrap();
        assert_ne!(second.id(), first_id);
        assert_eq!(second.request().prompt, "rocket");
        assert_eq!(second.request().style, EmojiStyle::Clay);
    }

    #[test]
    fn test_restore_from_history() {
        let mut studio = EmojiStudio::default();
        studio.set_prompt("rocket");
        studio.set_style(EmojiStyle::Pixel);
        let pending = studio.start_generation().unwrap();
        let id = pending.id();
        studio.finish_generation(pending.complete("data:image/png;base64,AAAA".into(), vec![]));

        studio.set_prompt("");
        studio.set_style(EmojiStyle::Flat);
        assert!(studio.restore_from_history(id));
        assert_eq!(studio.prompt(), "rocket");
        assert_eq!(studio.style(), EmojiStyle::Pixel);
        assert_eq!(studio.current_result().map(|r| r.id()), Some(id));

        assert!(!studio.restore_from_history(Uuid::new_v4()));
    }
}
