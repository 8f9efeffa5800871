//! Calculator state: entry storage, actions and derived views.

mod ids;
mod state;

pub use ids::{IdGenerator, SequentialGenerator, UuidGenerator};
pub use state::CalculatorState;
