use async_trait::async_trait;

use crate::error::Result;
use crate::traits::StringRetriever;

/// Always yields the same value; used when the caller supplies explicit
/// content and discovery is bypassed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRetriever {
    value: String,
}

impl StaticRetriever {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl StringRetriever for StaticRetriever {
    async fn get(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}
