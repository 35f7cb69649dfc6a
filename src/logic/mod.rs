//! Bracket algorithms: seeding, construction, score merging, propagation.

mod builder;
mod merge;
mod propagate;
mod rebuild;
mod seeding;

pub use builder::{generate_bracket, GRAND_FINAL_ID};
pub use merge::merge_scores;
pub use propagate::process_updates;
pub use rebuild::rebuild_bracket;
pub use seeding::seed_participants;
