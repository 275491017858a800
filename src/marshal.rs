//! Body marshalling between typed values and wire bytes.
//!
//! The [`Marshaller`] trait is the seam the request builder and the client use for
//! every JSON body. It works on [`serde_json::Value`] so it stays object-safe and can
//! be injected as `Arc<dyn Marshaller>`; typed conversion happens in [`encode`] and
//! [`decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl MarshalError {
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        MarshalError::Other(Box::new(err))
    }
}

pub trait Marshaller: Send + Sync {
    fn marshal(&self, value: &Value) -> Result<Vec<u8>, MarshalError>;

    fn unmarshal(&self, data: &[u8]) -> Result<Value, MarshalError>;
}

/// Compact JSON, the default wire encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn marshal(&self, value: &Value) -> Result<Vec<u8>, MarshalError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, MarshalError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Serialize a typed value through `marshaller`.
pub fn encode<T: Serialize + ?Sized>(
    marshaller: &dyn Marshaller,
    value: &T,
) -> Result<Vec<u8>, MarshalError> {
    let value = serde_json::to_value(value)?;
    marshaller.marshal(&value)
}

/// Deserialize `data` into `T` through `marshaller`.
pub fn decode<T: DeserializeOwned>(
    marshaller: &dyn Marshaller,
    data: &[u8],
) -> Result<T, MarshalError> {
    let value = marshaller.unmarshal(data)?;
    Ok(serde_json::from_value(value)?)
}
