//! Client side of the address book: the remote store, the dialogs the UI
//! host answers, and the list controller that ties them together.

pub mod alerts;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod map;
pub mod store;
pub mod view;

pub use alerts::{status_phrase, Alert};
pub use controller::{
    AddressDraft, AddressListController, ControllerConfig, MutationOutcome, DEFAULT_MAX_VISIBLE_PAGES,
    DEFAULT_PAGE_SIZE,
};
pub use dialog::{
    auto_confirm, Dialog, DialogOutcome, DuplicateDialog, DuplicateName, EditDialog, FnDialog,
    RemoveDialog,
};
pub use error::StoreError;
pub use map::{map_url, DEFAULT_MAP_BASE_URL};
pub use store::{AddressStore, HttpAddressStore};
pub use view::{filter_addresses, page_count, page_slice, NameQuery, Pager};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;
