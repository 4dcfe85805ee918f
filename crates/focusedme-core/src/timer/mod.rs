mod log;
mod notifier;
mod round;
mod session;
mod tracker;

pub use log::{Log, RoundSummary};
pub use notifier::{Notifier, SilentNotifier};
pub use round::{create_rounds, Round, SessionLengths, ROUND_TEMPLATE};
pub use session::{Session, SessionStatus, SessionType};
pub use tracker::{Tick, Tracker};
