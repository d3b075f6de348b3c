pub mod site;

pub use site::{Endpoints, HttpSettings, NotifyConfig, SiteIdentity};
