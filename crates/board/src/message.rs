//! Shared message area used by both controllers.

use std::time::Duration;

use crate::dom::Element;

pub const MESSAGE_ID: &str = "message";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArea {
    text: String,
    kind: Option<MessageKind>,
    hidden: bool,
    hide_after: Option<Duration>,
    generation: u64,
}

impl Default for MessageArea {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
            hide_after: None,
            generation: 0,
        }
    }
}

impl MessageArea {
    /// Replaces whatever is shown and returns the generation a hide timer must present.
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind, hide_after: Duration) -> u64 {
        self.text = text.into();
        self.kind = Some(kind);
        self.hidden = false;
        self.hide_after = Some(hide_after);
        self.generation += 1;
        self.generation
    }

    /// Hides the area only if it still shows the message from `generation`.
    pub fn hide_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.hidden {
            return false;
        }
        self.hidden = true;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> Option<MessageKind> {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn hide_after(&self) -> Option<Duration> {
        self.hide_after
    }

    pub fn to_element(&self) -> Element {
        let mut classes: Vec<&str> = self.kind.map(MessageKind::class).into_iter().collect();
        if self.hidden {
            classes.push(HIDDEN_CLASS);
        }
        Element::new("div")
            .with_attr("id", MESSAGE_ID)
            .with_class(classes.join(" "))
            .with_text(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_and_empty() {
        let area = MessageArea::default();
        assert!(!area.is_visible());
        assert_eq!(
            area.to_element().to_html(),
            "<div id=\"message\" class=\"hidden\"></div>"
        );
    }

    #[test]
    fn stale_generation_cannot_hide_newer_message() {
        let mut area = MessageArea::default();
        let first = area.show("Signed up!", MessageKind::Success, Duration::from_millis(5000));
        let second = area.show("Already registered", MessageKind::Error, Duration::from_millis(5000));

        assert!(!area.hide_if_current(first));
        assert!(area.is_visible());
        assert!(area.hide_if_current(second));
        assert_eq!(
            area.to_element().to_html(),
            "<div id=\"message\" class=\"error hidden\">Already registered</div>"
        );
    }
}
