//! Plain domain data: the price catalog, the order configuration and the
//! registration form. Nothing in here knows about actors; the session types in
//! [`order_actor`](crate::order_actor) and
//! [`registration_actor`](crate::registration_actor) wrap these.

pub mod catalog;
pub mod order;
pub mod registration;

pub use catalog::*;
pub use order::*;
pub use registration::*;
