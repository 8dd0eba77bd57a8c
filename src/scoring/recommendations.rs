/// Ordered, deterministic recommendation list.
///
/// Each engine pushes its threshold-triggered sentences in a fixed order and
/// finishes with an affirming sentence that is used only when nothing fired.
#[derive(Debug, Default)]
pub struct Recommendations {
    items: Vec<String>,
}

impl Recommendations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_if(&mut self, triggered: bool, message: impl Into<String>) -> &mut Self {
        if triggered {
            self.items.push(message.into());
        }
        self
    }

    pub fn push(&mut self, message: impl Into<String>) -> &mut Self {
        self.items.push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn finish_or(self, affirmation: &str) -> Vec<String> {
        if self.items.is_empty() {
            vec![affirmation.to_string()]
        } else {
            self.items
        }
    }
}
