//! The collection only changes after the store has confirmed a call. Remote
//! failures become entries in the alert list.

use std::collections::HashSet;

use shared::domain::{Address, AddressId};
use tracing::{info, warn};
use url::Url;

use crate::{
    alerts::{Alert, AlertList},
    dialog::{DialogOutcome, DuplicateDialog, DuplicateName, EditDialog, RemoveDialog},
    map::{map_url, DEFAULT_MAP_BASE_URL},
    store::AddressStore,
    view::{filter_addresses, page_slice, Pager},
};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

const LOAD_FAILURE: &str = "Failure loading addresses";
const CREATE_FAILURE: &str = "Failure creating address";
const SAVE_FAILURE: &str = "Failure saving address";
const DELETE_FAILURE: &str = "Failure deleting address";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub page_size: usize,
    pub max_visible_pages: usize,
    pub map_base_url: Url,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            map_base_url: Url::parse(DEFAULT_MAP_BASE_URL).expect("default map url is valid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Committed,
    Cancelled,
    Rejected,
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    fields: Address,
}

impl AddressDraft {
    pub fn fields(&self) -> &Address {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Address {
        &mut self.fields
    }

    pub fn to_address(&self) -> Address {
        Address {
            id: None,
            ..self.fields.clone()
        }
    }
}

impl From<Address> for AddressDraft {
    fn from(fields: Address) -> Self {
        Self {
            fields: Address { id: None, ..fields },
        }
    }
}

pub struct AddressListController<S> {
    store: S,
    addresses: Vec<Address>,
    alerts: AlertList,
    draft: AddressDraft,
    query: String,
    pager: Pager,
    map_base_url: Url,
}

impl<S: AddressStore> AddressListController<S> {
    pub fn new(store: S, config: ControllerConfig) -> Self {
        Self {
            store,
            addresses: Vec::new(),
            alerts: AlertList::default(),
            draft: AddressDraft::default(),
            query: String::new(),
            pager: Pager::new(config.page_size, config.max_visible_pages),
            map_base_url: config.map_base_url,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn address(&self, id: &AddressId) -> Option<&Address> {
        self.position_of(id).map(|index| &self.addresses[index])
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.as_slice()
    }

    pub fn draft(&self) -> &AddressDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AddressDraft {
        &mut self.draft
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub async fn load(&mut self) -> bool {
        match self.store.list().await {
            Ok(addresses) => {
                let mut seen = HashSet::new();
                self.addresses = addresses
                    .into_iter()
                    .filter(|a| a.id.as_ref().map_or(true, |id| seen.insert(id.clone())))
                    .collect();
                info!(count = self.addresses.len(), "loaded addresses");
                self.refresh_pagination();
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to load addresses");
                self.alerts.push(Alert::from_store_error(LOAD_FAILURE, &err));
                false
            }
        }
    }

    pub fn filtered(&self) -> Vec<&Address> {
        filter_addresses(&self.addresses, &self.query)
    }

    pub fn current_page_items(&self) -> Vec<&Address> {
        let filtered = self.filtered();
        page_slice(&filtered, self.pager.current_page(), self.pager.page_size()).to_vec()
    }

    /// A changed query starts again from the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.pager.reset();
        }
        self.refresh_pagination();
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.pager.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    /// A repeated first and last name goes through `confirm` first; declining
    /// clears the draft. A store failure leaves the draft as it was.
    pub async fn create<D>(&mut self, confirm: &D) -> MutationOutcome
    where
        D: DuplicateDialog + ?Sized,
    {
        let mut address = self.draft.to_address();

        let duplicate = self
            .addresses
            .iter()
            .any(|a| a.same_name_as(&address.first_name, &address.last_name));
        if duplicate {
            let notice = DuplicateName {
                first_name: address.first_name.clone(),
                last_name: address.last_name.clone(),
            };
            if let DialogOutcome::Cancelled = confirm.open(notice).await {
                info!(name = %address.full_name(), "duplicate address declined");
                self.draft = AddressDraft::default();
                return MutationOutcome::Cancelled;
            }
        }

        match self.store.create(&address).await {
            Ok(id) => {
                info!(address_id = %id, "created address");
                address.id = Some(id.clone());
                match self.position_of(&id) {
                    Some(index) => self.addresses[index] = address,
                    None => self.addresses.push(address),
                }
                self.draft = AddressDraft::default();
                self.refresh_pagination();
                MutationOutcome::Committed
            }
            Err(err) => {
                warn!(error = %err, "failed to create address");
                self.alerts
                    .push(Alert::from_store_error(CREATE_FAILURE, &err));
                MutationOutcome::Rejected
            }
        }
    }

    pub async fn edit<D>(&mut self, id: &AddressId, dialog: &D) -> MutationOutcome
    where
        D: EditDialog + ?Sized,
    {
        let Some(original) = self.address(id).cloned() else {
            return MutationOutcome::Missing;
        };

        match dialog.open(original.clone()).await {
            DialogOutcome::Confirmed(edited) => self.update(edited, &original).await,
            DialogOutcome::Cancelled => MutationOutcome::Cancelled,
        }
    }

    /// The identifier always stays the original's.
    pub async fn update(&mut self, mut edited: Address, original: &Address) -> MutationOutcome {
        let Some(id) = original.id.clone() else {
            return MutationOutcome::Missing;
        };
        if self.position_of(&id).is_none() {
            return MutationOutcome::Missing;
        }
        edited.id = Some(id.clone());

        match self.store.update(&edited).await {
            Ok(()) => {
                let Some(index) = self.position_of(&id) else {
                    return MutationOutcome::Missing;
                };
                info!(address_id = %id, "saved address");
                self.addresses[index] = edited;
                self.refresh_pagination();
                MutationOutcome::Committed
            }
            Err(err) => {
                warn!(address_id = %id, error = %err, "failed to save address");
                self.alerts.push(Alert::from_store_error(SAVE_FAILURE, &err));
                MutationOutcome::Rejected
            }
        }
    }

    pub async fn remove<D>(&mut self, id: &AddressId, dialog: &D) -> MutationOutcome
    where
        D: RemoveDialog + ?Sized,
    {
        let Some(target) = self.address(id).cloned() else {
            return MutationOutcome::Missing;
        };

        if let DialogOutcome::Cancelled = dialog.open(target).await {
            return MutationOutcome::Cancelled;
        }

        match self.store.delete(id).await {
            Ok(()) => {
                let Some(index) = self.position_of(id) else {
                    return MutationOutcome::Missing;
                };
                info!(address_id = %id, "deleted address");
                self.addresses.remove(index);
                self.refresh_pagination();
                MutationOutcome::Committed
            }
            Err(err) => {
                warn!(address_id = %id, error = %err, "failed to delete address");
                self.alerts
                    .push(Alert::from_store_error(DELETE_FAILURE, &err));
                MutationOutcome::Rejected
            }
        }
    }

    pub fn show_map(&self, address: &Address) -> Url {
        map_url(&self.map_base_url, address)
    }

    pub fn add_alert(&mut self, message: impl Into<String>, status: Option<u16>) {
        self.alerts.push(Alert::new(message, status));
    }

    pub fn dismiss_alert(&mut self, index: usize) -> Option<Alert> {
        self.alerts.dismiss(index)
    }

    fn position_of(&self, id: &AddressId) -> Option<usize> {
        self.addresses
            .iter()
            .position(|a| a.id.as_ref() == Some(id))
    }

    fn refresh_pagination(&mut self) {
        let total = self.filtered().len();
        self.pager.recompute(total);
    }
}
