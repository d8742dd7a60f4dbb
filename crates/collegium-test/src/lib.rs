//! Collegium academic calendar - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `collegium_test::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use collegium_core::*;
    pub use collegium_service::*;

    pub mod db {
        pub use collegium_db::db::*;
    }

    pub mod model {
        pub use collegium_db::model::*;
    }

    // Config from core plus the depot handler from app
    pub mod config {
        pub use collegium_app::config::ConfigHandler;
        pub use collegium_core::config::*;
    }
}

pub mod app {
    pub use collegium_app::*;

    pub mod api {
        pub use collegium_app::app::api::*;
    }
}
