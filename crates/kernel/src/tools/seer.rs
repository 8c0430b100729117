use catalog::Category;

use crate::tool::Tool;

/// Vision tool: describes or answers questions about attached images.
pub struct Seer;

impl Tool for Seer {
    fn name(&self) -> &'static str {
        "seer"
    }

    fn description(&self) -> &'static str {
        "Describe or answer questions about attached images"
    }

    fn category(&self) -> Category {
        Category::Vision
    }

    fn system_prompt(&self) -> &'static str {
        "You are describing or answering questions about the attached \
         images. Be specific about what is actually visible; do not infer \
         details the image doesn't support."
    }

    fn primary_field_description(&self) -> &'static str {
        "What to look for or ask about the attached image(s)"
    }
}
