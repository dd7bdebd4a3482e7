// ABOUTME: Outbound capabilities for spellgate: grammar checking and fuzzy spelling correction.
// ABOUTME: Each capability sits behind an async trait so the server can inject real clients or stubs.

pub mod error;
pub mod grammar;
pub mod spelling;
pub mod testing;

pub use error::GatewayError;
pub use grammar::{GrammarChecker, GrammarError, TextGearsClient};
pub use spelling::{Correction, SpellCorrector, SymSpellCorrector};
