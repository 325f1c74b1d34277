// Skill Match Engine: fuzzy skill equivalence, unweighted and weighted overlap scoring.
// Pure functions only; handlers live alongside for the /match-skills route.

pub mod calculator;
pub mod handlers;
pub mod predicate;
