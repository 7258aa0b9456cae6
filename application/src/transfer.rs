pub use self::{book::*, rent::*, session::*, stats::*, user::*};

mod book;
mod rent;
mod session;
mod stats;
mod user;
