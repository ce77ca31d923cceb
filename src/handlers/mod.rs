pub mod auth;
mod dashboard;
mod driver;
mod export;
mod health;
mod load;

pub use auth::{index, login, login_form, logout, register, register_form};
pub use dashboard::dashboard;
pub use driver::{add_driver, add_driver_form, delete_driver, edit_driver, edit_driver_form};
pub use export::export_loads;
pub use health::health;
pub use load::{add_load, add_load_form, delete_load, edit_load, edit_load_form};
