mod book;
mod common;
mod session;
mod user;

pub use self::{book::*, common::*, session::*, user::*};
