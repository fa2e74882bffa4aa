use std::fmt;

use super::CardinalDirection;

/// One validated entry of a `move` reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveStep {
    pub direction: CardinalDirection,
    pub times: u32,
}

impl MoveStep {
    pub fn new(direction: CardinalDirection, times: u32) -> Self {
        Self { direction, times }
    }
}

/// Closed set of outcomes produced from one structured agent reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionCommand {
    /// Ordered steps to enqueue.
    Move { steps: Vec<MoveStep> },
    /// Dialogue line shown next to the conversational counterpart.
    Talk { content: String },
    /// Text for the single "last error" surface.
    Error { content: String },
}

impl ActionCommand {
    pub fn error(content: impl Into<String>) -> Self {
        ActionCommand::Error {
            content: content.into(),
        }
    }

    pub fn talk(content: impl Into<String>) -> Self {
        ActionCommand::Talk {
            content: content.into(),
        }
    }

    /// Unit directions of a `Move`, expanded in source order.
    ///
    /// Each step is fully repeated before the next one begins. Empty for
    /// `Talk` and `Error`.
    pub fn expand(&self) -> impl Iterator<Item = CardinalDirection> + '_ {
        let steps: &[MoveStep] = match self {
            ActionCommand::Move { steps } => steps,
            _ => &[],
        };
        steps
            .iter()
            .flat_map(|step| std::iter::repeat_n(step.direction, step.times as usize))
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCommand::Move { steps } => {
                write!(f, "move[")?;
                for (index, step) in steps.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}*{}", step.direction, step.times)?;
                }
                write!(f, "]")
            }
            ActionCommand::Talk { content } => write!(f, "talk({content})"),
            ActionCommand::Error { content } => write!(f, "error({content})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_keeps_source_order() {
        let command = ActionCommand::Move {
            steps: vec![
                MoveStep::new(CardinalDirection::North, 2),
                MoveStep::new(CardinalDirection::East, 1),
                MoveStep::new(CardinalDirection::North, 1),
            ],
        };

        let expanded: Vec<_> = command.expand().collect();
        assert_eq!(
            expanded,
            vec![
                CardinalDirection::North,
                CardinalDirection::North,
                CardinalDirection::East,
                CardinalDirection::North,
            ]
        );
    }

    #[test]
    fn non_move_commands_expand_to_nothing() {
        assert_eq!(ActionCommand::talk("hi").expand().count(), 0);
        assert_eq!(ActionCommand::error("boom").expand().count(), 0);
    }

    #[test]
    fn display_is_compact() {
        let command = ActionCommand::Move {
            steps: vec![MoveStep::new(CardinalDirection::West, 3)],
        };
        assert_eq!(command.to_string(), "move[west*3]");
    }
}
