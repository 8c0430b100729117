use catalog::Category;

use crate::tool::Tool;

/// General-purpose conversational tool; the `balanced` category default.
pub struct Chat;

impl Tool for Chat {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn description(&self) -> &'static str {
        "General chat and collaborative thinking with an AI model"
    }

    fn category(&self) -> Category {
        Category::Balanced
    }

    fn system_prompt(&self) -> &'static str {
        "You are a senior engineering collaborator. Answer directly, \
         show your reasoning when it adds clarity, and say when you are \
         uncertain rather than guessing."
    }

    fn primary_field_description(&self) -> &'static str {
        "Your question, idea, or topic to discuss"
    }
}
