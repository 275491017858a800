//! Engine listing (`/engines`).

use crate::client::{Client, UrlOptions};
use crate::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

pub const ENGINES_SUFFIX: &str = "/engines";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnginesList {
    #[serde(default)]
    pub data: Vec<Engine>,
}

impl Client {
    /// `GET /engines`.
    pub async fn list_engines(&self) -> Result<EnginesList> {
        let req = self.new_request(Method::GET, ENGINES_SUFFIX, &UrlOptions::new())?;
        self.send(req).await
    }

    /// `GET /engines/{engine_id}`.
    pub async fn get_engine(&self, engine_id: &str) -> Result<Engine> {
        let suffix = format!("{}/{}", ENGINES_SUFFIX, engine_id);
        let req = self.new_request(Method::GET, &suffix, &UrlOptions::new())?;
        self.send(req).await
    }
}
