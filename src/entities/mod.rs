pub mod department_account;
pub mod disaster;
pub mod hospital;
pub mod kv_store;
pub mod sos_alert;
pub mod user;

pub use department_account::Entity as DepartmentAccounts;
pub use disaster::Entity as Disasters;
pub use hospital::Entity as Hospitals;
pub use kv_store::Entity as KvStore;
pub use sos_alert::Entity as SosAlerts;
pub use user::Entity as Users;
