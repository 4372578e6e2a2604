//! In-memory presentation that remembers everything it was told.

use super::{ChoiceView, Presentation, Sprite};

/// One call made through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    Image { sprite: Sprite, glitch: bool },
    Text(String),
    Status(String),
    Choices(Vec<ChoiceView>),
    Restart,
}

/// Keeps the latest screen contents plus the full call history.
///
/// Useful for headless hosts and for asserting on what a player would have
/// seen.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    events: Vec<PresentationEvent>,
    image: Option<(Sprite, bool)>,
    text: String,
    status: String,
    choices: Vec<ChoiceView>,
    restarts: usize,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, oldest first.
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Current image and glitch flag.
    pub fn image(&self) -> Option<(Sprite, bool)> {
        self.image
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn choices(&self) -> &[ChoiceView] {
        &self.choices
    }

    /// Labels of the current choices.
    pub fn labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// All texts shown so far, oldest first.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            PresentationEvent::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check if any text shown so far contains `needle`.
    pub fn has_shown(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    /// Forget the history but keep the current screen.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Presentation for RecordingPresentation {
    fn display_image(&mut self, sprite: Sprite, glitch: bool) {
        self.image = Some((sprite, glitch));
        self.events.push(PresentationEvent::Image { sprite, glitch });
    }

    fn display_text(&mut self, markup: &str) {
        self.text = markup.to_string();
        self.events.push(PresentationEvent::Text(markup.to_string()));
    }

    fn display_status(&mut self, line: &str) {
        self.status = line.to_string();
        self.events.push(PresentationEvent::Status(line.to_string()));
    }

    fn set_choices(&mut self, choices: &[ChoiceView]) {
        self.choices = choices.to_vec();
        self.events.push(PresentationEvent::Choices(choices.to_vec()));
    }

    fn on_restart(&mut self) {
        self.restarts += 1;
        self.events.push(PresentationEvent::Restart);
    }
}
