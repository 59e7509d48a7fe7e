//! Target instances for the trip bench, read from a JSON file such as
//! `[{"ip": "10.0.0.5", "port": 8080}]`.

use std::{
    path::Path,
    sync::atomic::{AtomicUsize, Ordering},
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NginxInstance {
    #[serde(alias = "Ip", alias = "IP")]
    pub ip: String,
    #[serde(alias = "Port")]
    pub port: u16,
}

impl NginxInstance {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("failed to read instance file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse instance file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("instance file lists no instances")]
    Empty,
}

pub fn parse_instances(
    json: &str,
) -> Result<Vec<NginxInstance>, InstanceError> {
    let instances: Vec<NginxInstance> = serde_json::from_str(json)?;
    if instances.is_empty() {
        return Err(InstanceError::Empty);
    }
    Ok(instances)
}

pub async fn load_instances(
    path: impl AsRef<Path>,
) -> Result<Vec<NginxInstance>, InstanceError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await.map_err(|source| {
        InstanceError::Io {
            path: path.display().to_string(),
            source,
        }
    })?;
    parse_instances(&json)
}

/// Hands out items in turn, shared across workers.
#[derive(Debug)]
pub struct RoundRobin<T> {
    items: Vec<T>,
    next: AtomicUsize,
}

impl<T> RoundRobin<T> {
    /// `None` when `items` is empty.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items,
            next: AtomicUsize::new(0),
        })
    }

    pub fn next(&self) -> &T {
        let i = self.next.fetch_add(1, Ordering::Relaxed) % self.items.len();
        &self.items[i]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
