//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod session_sweeper;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use profile::{ProfileUpdateInput, ProfileUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use session_sweeper::{SESSION_SWEEP_INTERVAL, SessionSweeper};
