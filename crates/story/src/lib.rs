//! Script and outline boards, and how they are laid out
//!
//! Both boards go through the same layered layout: scripts derive their
//! edges from each node's `next_id` and choice targets and measure nodes from
//! their visible rows, outlines use explicit links and a fixed card size.

pub mod arrange;
pub mod outline;
pub mod script;

pub use arrange::{Arrange, ArrangeSettings, ArrangeSummary, Document};
pub use outline::{
    arrange_outline, OutlineArrangement, OutlineCard, OutlineDocument, OutlineLink, CARD_SIZE,
};
pub use script::{
    arrange_script, Choice, NodeKind, ScriptArrangement, ScriptDocument, ScriptEdge, ScriptMetrics,
    ScriptNode, Side, VisibleFields,
};
