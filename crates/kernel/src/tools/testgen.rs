use catalog::Category;

use crate::tool::Tool;

pub struct TestGen;

impl Tool for TestGen {
    fn name(&self) -> &'static str {
        "testgen"
    }

    fn description(&self) -> &'static str {
        "Generate test cases for the given code, including edge cases"
    }

    fn category(&self) -> Category {
        Category::Reasoning
    }

    fn system_prompt(&self) -> &'static str {
        "You are writing tests for the given code. Cover the realistic \
         paths first, then the edge cases a careless implementation would \
         miss. If the code's expected behavior under some input is \
         genuinely ambiguous, say so instead of guessing a sample output."
    }

    fn primary_field_description(&self) -> &'static str {
        "The code to generate tests for"
    }
}
