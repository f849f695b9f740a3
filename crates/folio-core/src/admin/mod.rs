//! Admin-side domain: the demo password gate, the session state machine,
//! and the error taxonomy surfaced to the admin form.

pub mod error;
pub mod gate;
pub mod state;

pub use error::AdminError;
pub use gate::AdminGate;
pub use state::AdminState;
