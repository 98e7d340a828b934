//! # sponsor-core
//!
//! Platform-independent view-models for the sponsormatch front end.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        sponsor-web                           │
//! │   (binds page regions, renders state, performs browser I/O)  │
//! └──────────────┬───────────────────────────────┬───────────────┘
//!                │                               │
//! ┌──────────────▼──────────────┐  ┌─────────────▼───────────────┐
//! │        sponsor-core         │  │  sponsor-client (reqwest)   │
//! │  pricing · selection ·      │  │  sponsor-payments (flow)    │
//! │  search · tabs · alerts     │  │                             │
//! └─────────────────────────────┘  └─────────────────────────────┘
//! ```
//!
//! Every interactive region of a page owns one of the state objects defined
//! here. The browser layer feeds user input into them and renders what they
//! report; nothing in this crate touches the DOM.

pub mod alert;
pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod navigation;
pub mod pricing;
pub mod routes;
pub mod search;
pub mod selection;
pub mod tabs;

pub use alert::{Alert, AlertLevel, AlertMode, AlertState};
pub use config::ClientConfig;
pub use error::{ClientError, Failure, FailureKind, Result};
pub use money::Amount;
pub use pricing::{OrderSummary, PriceCalculator};
pub use routes::Endpoint;
pub use search::{MemoryQueryStore, PageControl, QueryStore, SearchCache, SearchKind, SearchQuery};
pub use selection::{Package, PackageId, PackageSelection};
pub use tabs::{EventTab, ProfileTab, Tab, TabSet};
