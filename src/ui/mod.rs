/// UI module exports
pub mod app;
pub mod header;
pub mod interests;
pub mod login;
pub mod register;
pub mod verify;

/// Screens the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Verify,
    Interests,
}
