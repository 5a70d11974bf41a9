mod login;
mod session;

pub use login::LOGIN_STATE_TTL;
pub use login::LoginStateStore;
pub use session::SessionStore;
