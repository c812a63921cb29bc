mod address_book;
mod permission;
mod provider;

pub use address_book::{AddressBook, AddressBookError, AddressBookRecord};
pub use permission::PermissionGate;
pub use provider::CsvContactsProvider;
