//! Command-line station locator: geolocation, the session pipeline and a
//! text-mode presentation of its results.

pub mod geolocation;
pub mod presentation;
pub mod session;
pub mod terminal;

pub use geolocation::{
    locate, FixedPosition, GeolocationError, Geolocator, HttpGeolocator, NoPosition,
    PositionOptions, PositionProvider,
};
pub use presentation::Presenter;
pub use session::{Session, SessionError, SessionFailure, SessionState};
pub use terminal::{TerminalMap, TerminalUi};
