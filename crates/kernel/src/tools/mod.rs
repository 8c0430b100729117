//! The 14 thin tool specializations: chat, deep-think, code-review, debug,
//! analyze, precommit, test-gen, refactor, tracer, consensus, planner,
//! seer, listmodels, and version.

pub mod analyze;
pub mod chat;
pub mod codereview;
pub mod consensus;
pub mod debug;
pub mod listmodels;
pub mod planner;
pub mod precommit;
pub mod refactor;
pub mod seer;
pub mod testgen;
pub mod thinkdeep;
pub mod tracer;
pub mod version;

use crate::tool::Tool;

/// Every tool this server exposes, in the order `tools/list` reports them.
pub fn all() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(chat::Chat),
        Box::new(thinkdeep::ThinkDeep),
        Box::new(consensus::Consensus),
        Box::new(codereview::CodeReview),
        Box::new(debug::Debug),
        Box::new(refactor::Refactor),
        Box::new(precommit::Precommit),
        Box::new(testgen::TestGen),
        Box::new(analyze::Analyze),
        Box::new(planner::Planner),
        Box::new(tracer::Tracer),
        Box::new(seer::Seer),
        Box::new(listmodels::ListModels),
        Box::new(version::Version),
    ]
}
