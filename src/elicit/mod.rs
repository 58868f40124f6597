//! Interactive elicitation: presenting a query's slate and collecting a reply.
//!
//! This module provides:
//! - [`prompter::Prompter`] -- the blocking line-oriented IO seam, with a
//!   terminal implementation ([`prompter::StdioPrompter`]) and a canned-reply
//!   implementation for tests and non-interactive drivers
//!   ([`prompter::ScriptedPrompter`]).
//! - [`parse`] -- pure reply parsers, one per answer shape. Invalid replies
//!   are rejections, not errors: the loops re-prompt indefinitely, and only a
//!   dead channel (EOF) aborts an elicitation.
//!
//! The retry loops themselves live on the query types in [`crate::query`].

pub mod parse;
pub mod prompter;

use std::io;

use crate::trajectory::TrajectorySet;

// Re-export the most commonly used items at the module level.
pub use parse::{is_integer, parse_choice, parse_comparison, parse_rank, RankReply};
pub use prompter::{Prompter, ScriptedPrompter, StdioPrompter};

/// Announce and play back every trajectory in a slate, in order.
pub(crate) fn present_slate(
    slate: &TrajectorySet,
    prompter: &mut dyn Prompter,
) -> io::Result<()> {
    for (i, trajectory) in slate.iter().enumerate() {
        prompter.say(&format!("Playing trajectory #{i}"))?;
        trajectory.visualize();
    }
    Ok(())
}
