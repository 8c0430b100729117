use catalog::Category;

use crate::tool::Tool;

pub struct Planner;

impl Tool for Planner {
    fn name(&self) -> &'static str {
        "planner"
    }

    fn description(&self) -> &'static str {
        "Break a task down into an ordered, concrete implementation plan"
    }

    fn category(&self) -> Category {
        Category::Balanced
    }

    fn system_prompt(&self) -> &'static str {
        "You are planning an implementation. Produce an ordered list of \
         concrete steps, each one independently verifiable, with \
         dependencies between steps made explicit."
    }

    fn primary_field(&self) -> &'static str {
        "step"
    }

    fn primary_field_description(&self) -> &'static str {
        "The task to plan, or the next planning step to work out"
    }
}
