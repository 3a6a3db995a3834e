mod session;

pub use session::{Interruption, Session, SessionKind};
