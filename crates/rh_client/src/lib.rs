pub mod admin;
pub mod api;
pub mod store;
pub mod views;

pub use admin::AdminSession;
pub use api::{HttpHubApi, HubApi};
pub use store::DataStore;
pub use views::{DashboardStats, FrontPage};

pub mod prelude {
    pub use super::{AdminSession, DataStore, HttpHubApi, HubApi};
    pub use rh_core::{Article, Category, Error, Result, SectionName, SectionPatch};
}
