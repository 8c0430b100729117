use catalog::Category;

use crate::tool::Tool;

pub struct CodeReview;

impl Tool for CodeReview {
    fn name(&self) -> &'static str {
        "codereview"
    }

    fn description(&self) -> &'static str {
        "Review code changes for bugs, design issues, and risk"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are reviewing code changes. Identify correctness bugs, risky \
         edge cases, and design problems, ranked by severity. Do not restate \
         what the diff obviously does; focus on what a careful reviewer \
         would flag."
    }

    fn primary_field_description(&self) -> &'static str {
        "The diff or code to review, plus any context the reviewer needs"
    }
}
