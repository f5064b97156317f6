//! Driving port for reading the menu.

use async_trait::async_trait;

use crate::domain::{Error, Menu};

/// Menu read use-case.
#[async_trait]
pub trait MenuQuery: Send + Sync {
    /// Fetch every salad and every custom option.
    ///
    /// Both collections are read or neither is returned.
    async fn fetch_menu(&self) -> Result<Menu, Error>;
}
