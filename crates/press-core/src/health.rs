//! Component health reporting.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A component whose health can be probed, such as the MySQL pool.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Label the component is reported under.
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

/// Result of one probe.
///
/// Variants are ordered from best to worst.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but close to a limit (e.g. no idle connection left).
    Degraded(String),
    Unhealthy(String),
}

impl HealthStatus {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}

/// Statuses of several components and the worst among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub components: BTreeMap<String, HealthStatus>,
}

impl HealthReport {
    /// Probes every check in turn. No checks means healthy.
    pub async fn collect(checks: &[Arc<dyn HealthCheck>]) -> Self {
        let mut components = BTreeMap::new();
        for check in checks {
            components.insert(check.name().to_string(), check.check().await);
        }
        let status = components
            .values()
            .max()
            .cloned()
            .unwrap_or(HealthStatus::Healthy);
        Self { status, components }
    }
}
