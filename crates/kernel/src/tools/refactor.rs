use catalog::Category;

use crate::tool::Tool;

pub struct Refactor;

impl Tool for Refactor {
    fn name(&self) -> &'static str {
        "refactor"
    }

    fn description(&self) -> &'static str {
        "Propose a refactor plan for the given code"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are proposing a refactor. Identify the concrete problems with \
         the current structure (duplication, unclear boundaries, leaky \
         abstractions), then propose a stepwise plan that keeps the code \
         working at every step. Do not refactor for its own sake."
    }

    fn primary_field_description(&self) -> &'static str {
        "The code to refactor and what's unsatisfying about its current shape"
    }
}
