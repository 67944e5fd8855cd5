//! Request/response interactions the controller hands off to the UI host.

use std::marker::PhantomData;

use async_trait::async_trait;
use shared::domain::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Confirmed(T),
    Cancelled,
}

impl<T> DialogOutcome<T> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DialogOutcome::Confirmed(_))
    }
}

#[async_trait]
pub trait Dialog: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn open(&self, input: Self::Input) -> DialogOutcome<Self::Output>;
}

/// Shown when a new record repeats the first and last name of an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub first_name: String,
    pub last_name: String,
}

/// Edits a detached copy of a record and hands back the edited copy.
pub trait EditDialog: Dialog<Input = Address, Output = Address> {}
impl<T> EditDialog for T where T: Dialog<Input = Address, Output = Address> + ?Sized {}

/// Asks whether the given record should be deleted.
pub trait RemoveDialog: Dialog<Input = Address, Output = ()> {}
impl<T> RemoveDialog for T where T: Dialog<Input = Address, Output = ()> + ?Sized {}

/// Asks whether to go ahead with creating a same-named record.
pub trait DuplicateDialog: Dialog<Input = DuplicateName, Output = ()> {}
impl<T> DuplicateDialog for T where T: Dialog<Input = DuplicateName, Output = ()> + ?Sized {}

/// Dialog answered synchronously by a closure. Useful for headless hosts.
pub struct FnDialog<I, O, F> {
    respond: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O, F> FnDialog<I, O, F>
where
    F: Fn(I) -> DialogOutcome<O>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<I, O, F> Dialog for FnDialog<I, O, F>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> DialogOutcome<O> + Send + Sync,
{
    type Input = I;
    type Output = O;

    async fn open(&self, input: I) -> DialogOutcome<O> {
        (self.respond)(input)
    }
}

/// Confirmation dialog that always says yes.
pub fn auto_confirm<I: Send + 'static>() -> FnDialog<I, (), fn(I) -> DialogOutcome<()>> {
    fn confirm<I>(_: I) -> DialogOutcome<()> {
        DialogOutcome::Confirmed(())
    }
    FnDialog::new(confirm::<I> as fn(I) -> DialogOutcome<()>)
}
