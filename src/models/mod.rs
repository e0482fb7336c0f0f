pub mod ceremony;
pub mod common;
pub mod history;
pub mod house;
pub mod ledger;
pub mod testimonial;

pub use ceremony::*;
pub use common::*;
pub use history::*;
pub use house::*;
pub use ledger::*;
pub use testimonial::*;
