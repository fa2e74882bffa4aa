//! Movement primitives and the agent action protocol.
//!
//! [`movement`] holds the direction type and the step queue; [`command`] and
//! [`interpret`] turn a structured agent reply into a closed [`ActionCommand`].
pub mod command;
pub mod interpret;
pub mod movement;

pub use command::{ActionCommand, MoveStep};
pub use interpret::{MAX_REPEAT, ReplyError, interpret, parse_reply, strip_fences};
pub use movement::{CardinalDirection, MovementQueue, StepOutcome, StepRejection};
