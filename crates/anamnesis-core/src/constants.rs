//! Shared constants for the interview engine.

/// Anamnesis system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard cap on the number of questions asked in one interview session.
/// Once reached, the session must guess regardless of remaining ambiguity.
pub const QUESTION_LIMIT: usize = 25;

/// Maximum number of score tiers a ranked guess may contain.
pub const MAX_GUESS_TIERS: usize = 3;

/// Separator between the action kind and the action id in persisted
/// value-table keys, e.g. `question::fever`.
pub const VALUE_KEY_SEPARATOR: &str = "::";

/// Reserved label for the "no hypothesis fits" target in training and
/// evaluation output. Catalog construction rejects hypotheses carrying
/// this name so the label can never collide with a real guess.
pub const NO_HYPOTHESIS_LABEL: &str = "(no hypothesis)";
