//! User interface modules for sonic-studio

pub mod app;
pub mod message;
pub mod mixer;
pub mod overlay;
pub mod remix;
pub mod transport;
pub mod upload;

pub use app::StudioApp;
pub use message::Message;
