pub mod money;
pub mod user;
pub mod product;
pub mod voucher;
pub mod order;

pub use money::*;
pub use user::*;
pub use product::*;
pub use voucher::*;
pub use order::*;
