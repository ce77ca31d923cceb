pub mod flash;
pub mod jwt;
pub mod load_ref;

pub use flash::{consume_flash, read_flash, redirect_with_flash, removal_cookie, see_other, Flash};
pub use jwt::{create_token, verify_token, Claims};
pub use load_ref::generate_load_ref;
