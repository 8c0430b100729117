use catalog::Category;

use crate::tool::Tool;

/// Reviews a pending change set before commit: narrower and more mechanical
/// than `codereview`, which can evaluate code out of commit context.
pub struct Precommit;

impl Tool for Precommit {
    fn name(&self) -> &'static str {
        "precommit"
    }

    fn description(&self) -> &'static str {
        "Validate a pending commit's diff against its stated intent"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are validating a change about to be committed. Check that the \
         diff matches its stated intent, flag anything unrelated that \
         snuck in, and call out missing tests for new behavior."
    }

    fn primary_field_description(&self) -> &'static str {
        "The diff to validate, and the commit's intended purpose"
    }
}
