pub mod prediction;
pub mod rules;
