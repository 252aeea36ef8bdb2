//! Single-attempt analysis state
//!
//! Holds the one live image, the preferences, the one live result, the
//! loading flag and the banner error. Every front end goes through this
//! container so the trigger/reset rules are the same everywhere.

use menumaster_types::{AnalysisResult, Error, MenuImage, Preferences, Result};

/// Inputs captured by value when an attempt starts
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: MenuImage,
    pub preferences: Preferences,
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    image: Option<MenuImage>,
    preferences: Preferences,
    result: Option<AnalysisResult>,
    is_loading: bool,
    error: Option<String>,
}

impl AnalysisSession {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Default::default()
        }
    }

    pub fn image(&self) -> Option<&MenuImage> {
        self.image.as_ref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the analyze trigger should be enabled
    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.is_loading
    }

    /// Replace the current image. The previous result and error go with it.
    pub fn set_image(&mut self, image: MenuImage) {
        self.image = Some(image);
        self.result = None;
        self.error = None;
    }

    /// Drop the current image so another photo can be taken.
    /// Ignored while an attempt is pending; preferences are kept.
    pub fn clear_image(&mut self) {
        if self.is_loading {
            return;
        }
        self.image = None;
        self.result = None;
        self.error = None;
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    /// Start an attempt.
    ///
    /// Without an image the attempt is rejected locally and the banner is set;
    /// while another attempt is pending it is refused outright. Otherwise the
    /// previous result and error are cleared before the inputs are handed out.
    pub fn begin_attempt(&mut self) -> Result<AnalysisRequest> {
        if self.is_loading {
            return Err(Error::AnalysisInProgress);
        }

        let Some(image) = self.image.clone() else {
            let err = Error::MissingImage;
            self.error = Some(err.user_message());
            return Err(err);
        };

        self.is_loading = true;
        self.error = None;
        self.result = None;

        Ok(AnalysisRequest {
            image,
            preferences: self.preferences.clone(),
        })
    }

    /// Record the outcome of the pending attempt and leave the loading state
    pub fn finish_attempt(&mut self, outcome: Result<AnalysisResult>) {
        match outcome {
            Ok(result) => self.complete_attempt(result),
            Err(err) => self.fail_attempt(&err),
        }
    }

    pub fn complete_attempt(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.error = None;
        self.is_loading = false;
    }

    pub fn fail_attempt(&mut self, err: &Error) {
        self.result = None;
        self.error = Some(err.user_message());
        self.is_loading = false;
    }

    /// Clear image, result, error and loading together. Preferences are kept.
    pub fn reset(&mut self) {
        self.image = None;
        self.result = None;
        self.error = None;
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menumaster_types::{
        MenuScanResults, Note, MALFORMED_RESPONSE_MESSAGE, MISSING_IMAGE_MESSAGE,
        SERVICE_FAILURE_MESSAGE,
    };

    fn png() -> MenuImage {
        MenuImage::from_bytes(b"\x89PNG\r\n\x1a\n0000".to_vec(), None).unwrap()
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            menu_scan_results: MenuScanResults {
                cuisine_type: "Italian".into(),
                restaurant_style: "Casual".into(),
                language: "Italian".into(),
            },
            dish_decoder: vec![],
            smart_recommendations: vec![],
            dietary_alerts: vec![],
            cultural_insights: Note {
                title: "Aperitivo".into(),
                content: "Drinks before dinner.".into(),
            },
            ordering_strategy: Note {
                title: "Courses".into(),
                content: "Antipasto, primo, secondo.".into(),
            },
        }
    }

    #[test]
    fn test_begin_without_image_sets_banner() {
        let mut session = AnalysisSession::default();
        let err = session.begin_attempt().unwrap_err();
        assert!(matches!(err, Error::MissingImage));
        assert_eq!(session.error(), Some(MISSING_IMAGE_MESSAGE));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let mut session = AnalysisSession::default();
        session.set_image(png());
        session.begin_attempt().unwrap();
        session.finish_attempt(Ok(result()));
        assert!(session.result().is_some());

        session.begin_attempt().unwrap();
        assert!(session.result().is_none());
        assert!(session.is_loading());
        assert!(!session.can_analyze());
    }

    #[test]
    fn test_second_begin_while_loading_is_refused() {
        let mut session = AnalysisSession::default();
        session.set_image(png());
        session.begin_attempt().unwrap();
        assert!(matches!(
            session.begin_attempt(),
            Err(Error::AnalysisInProgress)
        ));
        assert!(session.is_loading());
    }

    #[test]
    fn test_request_captures_preferences_by_value() {
        let mut session = AnalysisSession::default();
        session.set_image(png());
        session.preferences_mut().dislikes = "shellfish".into();
        let request = session.begin_attempt().unwrap();

        session.preferences_mut().dislikes = "nothing".into();
        assert_eq!(request.preferences.dislikes, "shellfish");
    }

    #[test]
    fn test_failures_map_to_banners() {
        let mut session = AnalysisSession::default();
        session.set_image(png());

        session.begin_attempt().unwrap();
        session.finish_attempt(Err(Error::Service("timeout".into())));
        assert_eq!(session.error(), Some(SERVICE_FAILURE_MESSAGE));
        assert!(!session.is_loading());

        session.begin_attempt().unwrap();
        session.finish_attempt(Err(Error::MalformedResponse {
            reason: "EOF".into(),
            raw: "{".into(),
        }));
        assert_eq!(session.error(), Some(MALFORMED_RESPONSE_MESSAGE));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_missing_image_keeps_earlier_result() {
        let mut session = AnalysisSession::default();
        session.set_image(png());
        session.begin_attempt().unwrap();
        session.finish_attempt(Ok(result()));

        session.image = None;
        assert!(session.begin_attempt().is_err());
        assert!(session.result().is_some());
    }

    #[test]
    fn test_reset_clears_everything_but_preferences() {
        let prefs = Preferences::default().with_likes("pasta");
        let mut session = AnalysisSession::new(prefs.clone());
        session.set_image(png());
        session.begin_attempt().unwrap();
        session.finish_attempt(Ok(result()));

        session.reset();
        assert!(session.image().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.preferences(), &prefs);
    }

    #[test]
    fn test_clear_image_disables_trigger() {
        let prefs = Preferences::default().with_dislikes("shellfish");
        let mut session = AnalysisSession::new(prefs.clone());
        session.set_image(png());
        assert!(session.can_analyze());

        session.clear_image();
        assert!(session.image().is_none());
        assert!(!session.can_analyze());
        assert_eq!(session.preferences(), &prefs);

        let err = session.begin_attempt().unwrap_err();
        assert!(matches!(err, Error::MissingImage));
    }

    #[test]
    fn test_clear_image_ignored_while_loading() {
        let mut session = AnalysisSession::default();
        session.set_image(png());
        session.begin_attempt().unwrap();

        session.clear_image();
        assert!(session.image().is_some());
        assert!(session.is_loading());
    }

    #[test]
    fn test_new_image_clears_result_and_error() {
        let mut session = AnalysisSession::default();
        session.begin_attempt().unwrap_err();
        session.set_image(png());
        assert!(session.error().is_none());
        assert!(session.can_analyze());
    }
}
