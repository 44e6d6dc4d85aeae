// Resume structuring: text normalisation, field extractors, the section state
// machine, and the document-extraction collaborator feeding it.

pub mod extraction;
pub mod extractors;
pub mod handlers;
pub mod layout;
pub mod normalizer;
pub mod parser;
pub mod skills;
