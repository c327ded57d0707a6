//! UI layer: screens, the product form modal, and toast notifications.

pub mod app;
pub mod form;
pub mod toast;

pub use app::ProdutosApp;
