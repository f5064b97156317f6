//! Menu read service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MenuQuery, MenuRepository};
use crate::domain::{Error, Menu};

/// Service implementing [`MenuQuery`] over a [`MenuRepository`].
#[derive(Clone)]
pub struct MenuService<M> {
    menu_repo: Arc<M>,
}

impl<M> MenuService<M> {
    /// Create a new service with the given repository.
    pub fn new(menu_repo: Arc<M>) -> Self {
        Self { menu_repo }
    }
}

#[async_trait]
impl<M> MenuQuery for MenuService<M>
where
    M: MenuRepository,
{
    async fn fetch_menu(&self) -> Result<Menu, Error> {
        let (salads, options) = tokio::try_join!(
            self.menu_repo.list_salads(),
            self.menu_repo.list_options()
        )?;
        Ok(Menu { salads, options })
    }
}
