use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::domain::{Address, AddressId};

use crate::{
    auto_confirm, AddressListController, AddressStore, ControllerConfig, DialogOutcome,
    DuplicateName, FnDialog, MutationOutcome, StoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Op {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct TestStoreState {
    records: Vec<Address>,
    next_id: u32,
    fail_with: HashMap<Op, u16>,
    calls: Vec<Op>,
}

#[derive(Clone, Default)]
struct TestStore {
    state: Arc<Mutex<TestStoreState>>,
}

impl TestStore {
    fn with_records(records: Vec<Address>) -> Self {
        let store = Self::default();
        store.state.lock().expect("state").records = records;
        store
    }

    fn fail(&self, op: Op, status: u16) {
        self.state.lock().expect("state").fail_with.insert(op, status);
    }

    fn heal(&self, op: Op) {
        self.state.lock().expect("state").fail_with.remove(&op);
    }

    fn calls(&self) -> Vec<Op> {
        self.state.lock().expect("state").calls.clone()
    }

    fn records(&self) -> Vec<Address> {
        self.state.lock().expect("state").records.clone()
    }

    fn begin(&self, op: Op) -> Result<std::sync::MutexGuard<'_, TestStoreState>, StoreError> {
        let mut state = self.state.lock().expect("state");
        state.calls.push(op);
        if let Some(status) = state.fail_with.get(&op) {
            return Err(StoreError::Status {
                status: *status,
                message: "simulated failure".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl AddressStore for TestStore {
    async fn list(&self) -> Result<Vec<Address>, StoreError> {
        let state = self.begin(Op::List)?;
        Ok(state.records.clone())
    }

    async fn create(&self, address: &Address) -> Result<AddressId, StoreError> {
        let mut state = self.begin(Op::Create)?;
        assert!(address.id.is_none(), "create must not carry an id");
        state.next_id += 1;
        let id = AddressId(format!("srv-{}", state.next_id));
        state.records.push(Address {
            id: Some(id.clone()),
            ..address.clone()
        });
        Ok(id)
    }

    async fn update(&self, address: &Address) -> Result<(), StoreError> {
        let mut state = self.begin(Op::Update)?;
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id == address.id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                message: "missing".to_string(),
            })?;
        *slot = address.clone();
        Ok(())
    }

    async fn delete(&self, id: &AddressId) -> Result<(), StoreError> {
        let mut state = self.begin(Op::Delete)?;
        state.records.retain(|r| r.id.as_ref() != Some(id));
        Ok(())
    }
}

fn stored(id: &str, first_name: &str, last_name: &str) -> Address {
    Address {
        id: Some(AddressId::from(id)),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..Address::default()
    }
}

fn config(page_size: usize) -> ControllerConfig {
    ControllerConfig {
        page_size,
        ..ControllerConfig::default()
    }
}

async fn loaded(records: Vec<Address>) -> AddressListController<TestStore> {
    let mut controller =
        AddressListController::new(TestStore::with_records(records), ControllerConfig::default());
    assert!(controller.load().await);
    controller
}

fn rename_to(first_name: &'static str) -> impl Fn(Address) -> DialogOutcome<Address> + Send + Sync {
    move |address| {
        DialogOutcome::Confirmed(Address {
            first_name: first_name.to_string(),
            ..address
        })
    }
}

fn decline<I: Send + 'static>() -> FnDialog<I, (), fn(I) -> DialogOutcome<()>> {
    fn cancel<I>(_: I) -> DialogOutcome<()> {
        DialogOutcome::Cancelled
    }
    FnDialog::new(cancel::<I> as fn(I) -> DialogOutcome<()>)
}

#[tokio::test]
async fn load_replaces_collection_and_recomputes_pages() {
    let records = (1..=23)
        .map(|n| stored(&n.to_string(), &format!("F{n}"), "L"))
        .collect();
    let mut controller = AddressListController::new(TestStore::with_records(records), config(10));
    assert!(controller.load().await);

    assert_eq!(controller.addresses().len(), 23);
    assert_eq!(controller.pager().total_items(), 23);
    assert_eq!(controller.pager().page_count(), 3);
    assert_eq!(controller.current_page_items().len(), 10);
    assert!(controller.set_page(3));
    assert_eq!(controller.current_page_items().len(), 3);
}

#[tokio::test]
async fn load_failure_raises_alert_and_does_not_retry() {
    let store = TestStore::with_records(vec![stored("1", "A", "B")]);
    store.fail(Op::List, 500);
    let mut controller = AddressListController::new(store.clone(), ControllerConfig::default());

    assert!(!controller.load().await);
    assert!(controller.addresses().is_empty());
    assert_eq!(controller.alerts().len(), 1);
    assert_eq!(
        controller.alerts()[0].text(),
        "Failure loading addresses with status Internal Server Error"
    );
    assert_eq!(store.calls(), vec![Op::List]);
}

#[tokio::test]
async fn load_drops_repeated_identifiers() {
    let controller = loaded(vec![
        stored("1", "A", "B"),
        stored("1", "A", "B"),
        stored("2", "C", "D"),
    ])
    .await;
    assert_eq!(controller.addresses().len(), 2);
}

#[tokio::test]
async fn query_filters_and_repaginates() {
    let mut records: Vec<Address> = (1..=15)
        .map(|n| stored(&n.to_string(), "Smith", &format!("No{n}")))
        .collect();
    records.push(stored("99", "Jane", "Doe"));
    let mut controller = AddressListController::new(TestStore::with_records(records), config(10));
    controller.load().await;
    assert_eq!(controller.pager().page_count(), 2);
    controller.set_page(2);

    controller.set_query("jane");
    assert_eq!(controller.pager().current_page(), 1);
    assert_eq!(controller.pager().total_items(), 1);
    assert_eq!(controller.pager().page_count(), 1);
    let page = controller.current_page_items();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].last_name, "Doe");

    controller.set_query("");
    assert_eq!(controller.filtered().len(), 16);
}

#[tokio::test]
async fn create_assigns_server_id_appends_and_clears_draft() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    {
        let draft = controller.draft_mut().fields_mut();
        draft.first_name = "Grace".to_string();
        draft.last_name = "Hopper".to_string();
        draft.city = "Arlington".to_string();
    }

    let outcome = controller.create(&auto_confirm::<DuplicateName>()).await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(controller.addresses().len(), 2);
    let created = &controller.addresses()[1];
    assert_eq!(created.id, Some(AddressId::from("srv-1")));
    assert_eq!(created.city, "Arlington");
    assert_eq!(created.street_2, "");
    assert_eq!(controller.draft().fields(), &Address::default());
    assert_eq!(controller.pager().total_items(), 2);
}

#[tokio::test]
async fn failed_create_keeps_draft_and_collection() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    controller.store().fail(Op::Create, 400);
    controller.draft_mut().fields_mut().first_name = "New".to_string();

    let outcome = controller.create(&auto_confirm::<DuplicateName>()).await;
    assert_eq!(outcome, MutationOutcome::Rejected);
    assert_eq!(controller.addresses().len(), 1);
    assert_eq!(controller.draft().fields().first_name, "New");
    assert_eq!(
        controller.alerts()[0].text(),
        "Failure creating address with status Bad Request"
    );
}

#[tokio::test]
async fn duplicate_name_declined_clears_draft_without_creating() {
    let mut controller = loaded(vec![stored("1", "Ada", "Lovelace")]).await;
    {
        let draft = controller.draft_mut().fields_mut();
        draft.first_name = "Ada".to_string();
        draft.last_name = "Lovelace".to_string();
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_dialog = seen.clone();
    let dialog = FnDialog::new(move |notice: DuplicateName| {
        seen_by_dialog.lock().expect("seen").push(notice);
        DialogOutcome::<()>::Cancelled
    });

    let outcome = controller.create(&dialog).await;
    assert_eq!(outcome, MutationOutcome::Cancelled);
    assert_eq!(controller.addresses().len(), 1);
    assert_eq!(controller.draft().fields(), &Address::default());
    assert!(!controller.store().calls().contains(&Op::Create));
    assert_eq!(
        seen.lock().expect("seen").as_slice(),
        &[DuplicateName {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }]
    );
}

#[tokio::test]
async fn duplicate_name_confirmed_creates_normally() {
    let mut controller = loaded(vec![stored("1", "Ada", "Lovelace")]).await;
    {
        let draft = controller.draft_mut().fields_mut();
        draft.first_name = "Ada".to_string();
        draft.last_name = "Lovelace".to_string();
    }

    let outcome = controller.create(&auto_confirm::<DuplicateName>()).await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(controller.addresses().len(), 2);
}

#[tokio::test]
async fn distinct_name_skips_duplicate_dialog() {
    let mut controller = loaded(vec![stored("1", "Ada", "Lovelace")]).await;
    controller.draft_mut().fields_mut().first_name = "Ada".to_string();
    controller.draft_mut().fields_mut().last_name = "Byron".to_string();

    let outcome = controller.create(&decline::<DuplicateName>()).await;
    assert_eq!(outcome, MutationOutcome::Committed);
}

#[tokio::test]
async fn successful_update_replaces_exactly_one_slot() {
    let mut controller = loaded(vec![stored("1", "A", "B"), stored("2", "X", "Y")]).await;
    let id = AddressId::from("1");

    let outcome = controller.edit(&id, &FnDialog::new(rename_to("C"))).await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(
        controller.addresses(),
        &[stored("1", "C", "B"), stored("2", "X", "Y")]
    );
    assert_eq!(controller.store().records()[0].first_name, "C");
}

#[tokio::test]
async fn failed_update_leaves_record_unchanged_and_alerts() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    controller.store().fail(Op::Update, 500);
    let before = controller.addresses().to_vec();

    let outcome = controller
        .edit(&AddressId::from("1"), &FnDialog::new(rename_to("C")))
        .await;
    assert_eq!(outcome, MutationOutcome::Rejected);
    assert_eq!(controller.addresses(), before.as_slice());
    assert_eq!(controller.alerts().len(), 1);
    assert!(controller.alerts()[0]
        .text()
        .contains("Failure saving address"));
}

#[tokio::test]
async fn cancelled_edit_sends_nothing() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    let dialog = FnDialog::new(|copy: Address| {
        assert_eq!(copy.first_name, "A");
        DialogOutcome::<Address>::Cancelled
    });

    let outcome = controller.edit(&AddressId::from("1"), &dialog).await;
    assert_eq!(outcome, MutationOutcome::Cancelled);
    assert_eq!(controller.addresses()[0].first_name, "A");
    assert!(!controller.store().calls().contains(&Op::Update));
}

#[tokio::test]
async fn update_keeps_original_identifier() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    let original = controller.addresses()[0].clone();
    let mut edited = original.clone();
    edited.id = Some(AddressId::from("forged"));
    edited.last_name = "Z".to_string();

    let outcome = controller.update(edited, &original).await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(controller.addresses(), &[stored("1", "A", "Z")]);
}

#[tokio::test]
async fn edit_of_unknown_record_is_missing() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    let outcome = controller
        .edit(&AddressId::from("nope"), &FnDialog::new(rename_to("C")))
        .await;
    assert_eq!(outcome, MutationOutcome::Missing);
    assert!(controller.store().calls().iter().all(|op| *op == Op::List));
}

#[tokio::test]
async fn remove_deletes_exactly_the_confirmed_record() {
    let mut controller = loaded(vec![
        stored("1", "A", "B"),
        stored("2", "C", "D"),
        stored("3", "E", "F"),
    ])
    .await;

    let outcome = controller
        .remove(&AddressId::from("2"), &auto_confirm::<Address>())
        .await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(
        controller.addresses(),
        &[stored("1", "A", "B"), stored("3", "E", "F")]
    );
    assert_eq!(controller.pager().total_items(), 2);
}

#[tokio::test]
async fn declined_remove_keeps_collection() {
    let mut controller = loaded(vec![stored("1", "A", "B")]).await;
    let outcome = controller
        .remove(&AddressId::from("1"), &decline::<Address>())
        .await;
    assert_eq!(outcome, MutationOutcome::Cancelled);
    assert_eq!(controller.addresses().len(), 1);
    assert!(!controller.store().calls().contains(&Op::Delete));
}

#[tokio::test]
async fn failed_remove_keeps_length_and_alerts() {
    let mut controller = loaded(vec![stored("1", "A", "B"), stored("2", "C", "D")]).await;
    controller.store().fail(Op::Delete, 503);

    let outcome = controller
        .remove(&AddressId::from("1"), &auto_confirm::<Address>())
        .await;
    assert_eq!(outcome, MutationOutcome::Rejected);
    assert_eq!(controller.addresses().len(), 2);
    assert_eq!(
        controller.alerts()[0].text(),
        "Failure deleting address with status 503"
    );

    controller.store().heal(Op::Delete);
    let outcome = controller
        .remove(&AddressId::from("1"), &auto_confirm::<Address>())
        .await;
    assert_eq!(outcome, MutationOutcome::Committed);
    assert_eq!(controller.addresses().len(), 1);
}

#[tokio::test]
async fn alerts_keep_order_and_dismiss_one_at_a_time() {
    let mut controller = AddressListController::new(TestStore::default(), ControllerConfig::default());
    controller.add_alert("first", Some(400));
    controller.add_alert("second", Some(500));
    controller.add_alert("third", Some(418));

    let dismissed = controller.dismiss_alert(1).expect("dismissed");
    assert_eq!(dismissed.message, "second");
    let remaining: Vec<String> = controller.alerts().iter().map(|a| a.text()).collect();
    assert_eq!(
        remaining,
        vec![
            "first with status Bad Request".to_string(),
            "third with status 418".to_string()
        ]
    );
    assert!(controller.dismiss_alert(5).is_none());
    assert_eq!(controller.alerts().len(), 2);
}

#[tokio::test]
async fn show_map_uses_configured_service() {
    let controller = AddressListController::new(
        TestStore::default(),
        ControllerConfig {
            map_base_url: url::Url::parse("https://maps.example.test/").expect("url"),
            ..ControllerConfig::default()
        },
    );
    let address = Address {
        street_1: "10 Downing St".to_string(),
        city: "London".to_string(),
        ..Address::default()
    };
    let url = controller.show_map(&address);
    assert_eq!(url.as_str(), "https://maps.example.test/?q=10+Downing+St+London");
    assert!(controller.addresses().is_empty());
}
