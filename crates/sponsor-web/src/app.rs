//! Start-up and shared page context

use std::rc::Rc;

use sponsor_client::HttpBackend;
use sponsor_core::{ClientConfig, ClientError};
use tracing_wasm::WASMLayerConfigBuilder;

use crate::components::Banner;
use crate::{dom, pages};

/// Script element carrying the JSON configuration
const CONFIG_ELEMENT: &str = "sponsormatch-config";

/// What every page behaviour gets handed
#[derive(Clone)]
pub struct Site {
    pub config: Rc<ClientConfig>,
    pub backend: Rc<HttpBackend>,
    pub banner: Banner,
}

impl Site {
    fn new(config: ClientConfig) -> Self {
        let backend = HttpBackend::new(config.origin.clone());
        Self {
            config: Rc::new(config),
            backend: Rc::new(backend),
            banner: Banner::mount(),
        }
    }

    /// Absolute URL for a site path
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.origin.trim_end_matches('/'))
    }
}

pub fn start() {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };
    let config = config.with_default_origin(dom::origin());

    init_logging(&config.log_level);
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "falling back to default configuration");
    }
    tracing::info!(origin = %config.origin, path = %dom::pathname(), "sponsormatch front end starting");

    let site = Site::new(config);
    pages::attach(&site);
}

fn load_config() -> Result<ClientConfig, ClientError> {
    match dom::by_id(CONFIG_ELEMENT) {
        Some(el) => ClientConfig::from_json(&dom::text(&el)),
        None => Ok(ClientConfig::default()),
    }
}

fn init_logging(level: &str) {
    let max_level = level.parse().unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new().set_max_level(max_level).build(),
    );
}
