//! One accessor per resource, in the style of `client.todos().list()`.
//!
//! Accessors never swallow errors; callers decide how to present them.

mod account;
mod categories;
mod events;
mod todos;

pub use account::AccountApi;
pub use categories::CategoriesApi;
pub use events::EventsApi;
pub use todos::TodosApi;

use crate::http::ApiClient;
use crate::model::CategoryKind;

impl ApiClient {
    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    pub fn todos(&self) -> TodosApi<'_> {
        TodosApi::new(self)
    }

    pub fn statuses(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self, CategoryKind::Status)
    }

    pub fn priorities(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self, CategoryKind::Priority)
    }

    pub fn events(&self) -> EventsApi<'_> {
        EventsApi::new(self)
    }
}
