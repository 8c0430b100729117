use catalog::Category;

use crate::tool::Tool;

/// Traces a call path or data flow through a codebase from a starting point.
pub struct Tracer;

impl Tool for Tracer {
    fn name(&self) -> &'static str {
        "tracer"
    }

    fn description(&self) -> &'static str {
        "Trace a call path or data flow through the given code"
    }

    fn category(&self) -> Category {
        Category::Balanced
    }

    fn system_prompt(&self) -> &'static str {
        "You are tracing execution or data flow from a named starting point \
         through the provided code. Report the path as an ordered sequence \
         of steps, noting any branch points where the path could diverge."
    }

    fn primary_field_description(&self) -> &'static str {
        "The starting point to trace from (a function, endpoint, or symbol)"
    }
}
