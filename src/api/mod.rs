pub mod http;
pub mod mock;
pub mod traits;
pub mod types;

pub use http::{HttpCoverageApi, HttpReservationApi};
pub use mock::MockBackend;
pub use traits::{CoverageApi, Notifier, ReservationApi};
pub use types::{ReservationAck, ReservationRequest};
