// Project matching: the declarative template catalogue and the
// skill-overlap scoring engine that ranks it against profiles.

pub mod catalogue;
pub mod handlers;
pub mod scoring;
