/// Interest Shell - storefront login and interests picker
/// Built with Rust + WASM + Yew, persisted to browser localStorage

pub mod account;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pagination;
pub mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

pub use account::{Account, AccountRegistry, PendingVerification, Session};
pub use catalog::{Category, CategoryCatalog};
pub use config::ShellConfig;
pub use error::{
    CatalogError, LoginError, PaginationError, RegisterError, StoreError, VerificationError,
};
pub use pagination::{PageControl, Paginator};
pub use storage::{PersistentStore, StorageBackend};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app
#[wasm_bindgen]
pub fn start_app() {
    yew::Renderer::<ui::app::App>::new().render();
}
