pub use crate::error::*;

mod collection;
mod database;
mod entity;
mod error;
mod modify;
mod query;
mod session;
mod sync;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod collection {
        pub use crate::collection::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
        pub use crate::sync::*;
    }
    pub mod session {
        pub use crate::session::*;
    }
}
