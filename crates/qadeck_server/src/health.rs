//! Reachability probing for links in the `Sites` category.
//!
//! Probes fan out fully in parallel (one task per link) with a fixed
//! per-probe timeout, then join; the batch `refreshing` flag clears only
//! after the slowest probe settles, so total wall time is bounded by the
//! timeout regardless of link count. The probe is deliberately opaque: any
//! completed HTTP exchange counts as online, and DNS, TLS, connect, and
//! timeout failures all collapse to offline.

use qadeck_core::constants::SITES_CATEGORY;
use qadeck_core::models::link::LinkRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinSet;

/// Per-link probe status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Checking,
    Online,
    Offline,
}

/// Point-in-time view of the status map. Links without an entry have never
/// been probed (idle).
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub refreshing: bool,
    pub statuses: HashMap<String, HealthStatus>,
}

/// Shared health-probe state and HTTP client.
pub struct HealthMonitor {
    statuses: RwLock<HashMap<String, HealthStatus>>,
    refreshing: AtomicBool,
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl HealthMonitor {
    /// Create a monitor with the given per-probe timeout.
    pub fn new(probe_timeout_ms: u64) -> Self {
        Self {
            statuses: RwLock::new(HashMap::new()),
            refreshing: AtomicBool::new(false),
            client: reqwest::Client::new(),
            probe_timeout: Duration::from_millis(probe_timeout_ms),
        }
    }

    /// Current status map and refreshing flag.
    pub fn snapshot(&self) -> HealthSnapshot {
        let statuses = self
            .statuses
            .read()
            .map(|map| map.clone())
            .unwrap_or_default();
        HealthSnapshot {
            refreshing: self.refreshing.load(Ordering::SeqCst),
            statuses,
        }
    }

    /// Probe every `Sites` link once and wait for the whole batch to settle.
    ///
    /// Returns the resulting snapshot. When a refresh is already in flight,
    /// no second batch is started and the current snapshot is returned with
    /// `refreshing` still set.
    ///
    /// The batch itself runs in a spawned task that owns the `refreshing`
    /// flag. A caller that goes away mid-batch (a dropped handler future on
    /// client disconnect) therefore cannot strand the flag: the batch keeps
    /// running and clears it when the last probe settles.
    pub async fn refresh(self: Arc<Self>, links: &[LinkRecord]) -> HealthSnapshot {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return self.snapshot();
        }

        let targets: Vec<(String, String)> = links
            .iter()
            .filter(|link| link.category == SITES_CATEGORY)
            .map(|link| (link.id.clone(), link.url.clone()))
            .collect();

        // Reset the map to exactly the current probe set; entries for
        // deleted links would otherwise linger forever.
        if let Ok(mut map) = self.statuses.write() {
            map.clear();
            for (id, _) in &targets {
                map.insert(id.clone(), HealthStatus::Checking);
            }
        }

        let monitor = self.clone();
        let batch = tokio::spawn(async move {
            monitor.run_batch(targets).await;
            monitor.refreshing.store(false, Ordering::SeqCst);
            monitor.snapshot()
        });

        match batch.await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!("Health probe batch failed: {}", err);
                self.refreshing.store(false, Ordering::SeqCst);
                self.snapshot()
            }
        }
    }

    async fn run_batch(&self, targets: Vec<(String, String)>) {
        let mut probes = JoinSet::new();
        for (id, url) in targets {
            let client = self.client.clone();
            let timeout = self.probe_timeout;
            probes.spawn(async move {
                let status = match tokio::time::timeout(timeout, client.get(&url).send()).await {
                    // Any completed exchange counts, whatever the status code.
                    Ok(Ok(_response)) => HealthStatus::Online,
                    Ok(Err(_)) | Err(_) => HealthStatus::Offline,
                };
                (id, status)
            });
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((id, status)) => {
                    if let Ok(mut map) = self.statuses.write() {
                        map.insert(id, status);
                    }
                }
                Err(err) => {
                    tracing::error!("Health probe task failed: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_fresh_monitor_is_idle() {
        let monitor = HealthMonitor::new(100);
        let snapshot = monitor.snapshot();
        assert!(!snapshot.refreshing);
        assert!(snapshot.statuses.is_empty());
    }

    #[tokio::test]
    async fn refresh_with_no_sites_links_settles_immediately() {
        let monitor = Arc::new(HealthMonitor::new(100));
        let links = vec![LinkRecord::new(
            "Jira".to_string(),
            "https://jira.example.com".to_string(),
            "Tools".to_string(),
        )];
        let snapshot = monitor.clone().refresh(&links).await;
        assert!(!snapshot.refreshing);
        assert!(snapshot.statuses.is_empty());
    }

    #[tokio::test]
    async fn unreachable_site_is_marked_offline() {
        let monitor = Arc::new(HealthMonitor::new(500));
        // Connection refused on a local port nothing listens on.
        let links = vec![LinkRecord::new(
            "Dead".to_string(),
            "http://127.0.0.1:9".to_string(),
            "Sites".to_string(),
        )];
        let snapshot = monitor.clone().refresh(&links).await;
        assert!(!snapshot.refreshing);
        let status = snapshot.statuses.values().next().copied();
        assert_eq!(status, Some(HealthStatus::Offline));
    }

    #[tokio::test]
    async fn dropped_caller_does_not_strand_the_refreshing_flag() {
        use std::time::Duration;

        // A listener that accepts connections but never responds, so the
        // probe only settles via its timeout.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            }
        });

        let monitor = Arc::new(HealthMonitor::new(500));
        let links = vec![LinkRecord::new(
            "Stall".to_string(),
            format!("http://{}/", addr),
            "Sites".to_string(),
        )];

        // Abandon the caller mid-batch, as axum does when the client
        // disconnects from POST /api/health/refresh.
        let abandoned =
            tokio::time::timeout(Duration::from_millis(100), monitor.clone().refresh(&links))
                .await;
        assert!(abandoned.is_err(), "batch should outlive the caller");

        // The spawned batch must still settle and clear the flag.
        let mut cleared = false;
        for _ in 0..40 {
            if !monitor.snapshot().refreshing {
                cleared = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(cleared, "refreshing flag should clear after the batch settles");

        // And a later refresh runs a real batch again.
        let snapshot = monitor.clone().refresh(&[]).await;
        assert!(!snapshot.refreshing);
        assert!(snapshot.statuses.is_empty());
    }

    #[tokio::test]
    async fn mixed_batch_settles_with_per_link_statuses() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = axum::Router::new().route("/", axum::routing::get(|| async { "ok" }));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let alive = LinkRecord::new(
            "Alive".to_string(),
            format!("http://{}/", addr),
            "Sites".to_string(),
        );
        let dead = LinkRecord::new(
            "Dead".to_string(),
            "http://127.0.0.1:9".to_string(),
            "Sites".to_string(),
        );
        let skipped = LinkRecord::new(
            "Jira".to_string(),
            "https://jira.example.com".to_string(),
            "Tracking".to_string(),
        );

        let monitor = Arc::new(HealthMonitor::new(2000));
        let snapshot = monitor
            .clone()
            .refresh(&[alive.clone(), dead.clone(), skipped.clone()])
            .await;

        assert!(!snapshot.refreshing);
        assert_eq!(snapshot.statuses.len(), 2);
        assert_eq!(snapshot.statuses.get(&alive.id), Some(&HealthStatus::Online));
        assert_eq!(snapshot.statuses.get(&dead.id), Some(&HealthStatus::Offline));
        assert!(!snapshot.statuses.contains_key(&skipped.id));
    }
}
