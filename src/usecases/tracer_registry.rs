//! Tracer Registry - Exactly-Once Tracer and Listener Setup
//!
//! Owns the shared Prometheus registry, at most one client tracer, at
//! most one server tracer, and at most one exposition listener. All
//! setup runs under one async mutex so concurrent first requests
//! register each metric family exactly once and bind exactly once.
//!
//! State only moves forward:
//! - tracer slots: empty -> constructed (never cleared)
//! - listener: idle -> running -> stopped
//!
//! Tracers handed out are `Arc`s; the lock is never held while they
//! are used on the RPC path.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use prometheus::Registry;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::adapters::metrics::exposition::{self, validate_path};
use crate::adapters::metrics::runtime::register_runtime_collector;
use crate::adapters::metrics::{RpcTracer, TrafficSide};
use crate::config::MonitorOptions;
use crate::error::{MonitorError, Result};
use crate::ports::MetricsDiagnostics;

/// Exposition listener lifecycle.
enum ListenerState {
  /// Not started yet; address/path may still change.
  Idle,
  /// Accept loop running in a background task.
  Running {
    local_addr: SocketAddr,
    task: JoinHandle<()>,
  },
  /// Shut down; never restarted.
  Stopped,
}

/// Everything guarded by the registry lock.
struct RegistryState {
  address: String,
  path: String,
  /// Caller-supplied router the scrape route is merged into.
  router: Option<Router>,
  client_tracer: Option<Arc<RpcTracer>>,
  server_tracer: Option<Arc<RpcTracer>>,
  runtime_collector_registered: bool,
  listener: ListenerState,
}

/// Process-wide coordinator for RPC tracers.
///
/// Construct once at startup and share by `Arc`.
pub struct TracerRegistry {
  registry: Registry,
  metric_prefix: String,
  buckets: Vec<f64>,
  enable_runtime_collector: bool,
  disable_server: bool,
  diagnostics: Arc<dyn MetricsDiagnostics>,
  shutdown_tx: broadcast::Sender<()>,
  state: Mutex<RegistryState>,
}

impl TracerRegistry {
  /// Create a registry from options. Nothing is registered or bound
  /// until the first tracer is requested.
  ///
  /// # Errors
  /// Returns `MonitorError::InvalidPath` if the scrape path is not a
  /// route.
  pub fn new(options: MonitorOptions) -> Result<Self> {
    validate_path(&options.path)?;

    let (shutdown_tx, _) = broadcast::channel(1);

    Ok(Self {
      registry: options.registry.unwrap_or_else(Registry::new),
      metric_prefix: options.metric_prefix,
      buckets: options.buckets,
      enable_runtime_collector: options.enable_runtime_collector,
      disable_server: options.disable_server,
      diagnostics: options.diagnostics,
      shutdown_tx,
      state: Mutex::new(RegistryState {
        address: options.address,
        path: options.path,
        router: options.router,
        client_tracer: None,
        server_tracer: None,
        runtime_collector_registered: false,
        listener: ListenerState::Idle,
      }),
    })
  }

  /// Set the scrape listener address and path.
  ///
  /// Only effective before the listener starts. Once it is running (or
  /// stopped) the call changes nothing, logs a warning and returns
  /// `Ok(false)`.
  ///
  /// # Errors
  /// Returns `MonitorError::InvalidPath` if `path` is not a route.
  pub async fn configure_address(
    &self,
    address: impl Into<String>,
    path: impl Into<String>,
  ) -> Result<bool> {
    let address = address.into();
    let path = path.into();
    validate_path(&path)?;

    let mut state = self.state.lock().await;
    if !matches!(state.listener, ListenerState::Idle) {
      warn!(
        address = %address,
        path = %path,
        "Metrics listener already started, address change ignored"
      );
      return Ok(false);
    }

    state.address = address;
    state.path = path;
    Ok(true)
  }

  /// Tracer for calls issued by this process. Same instance on every call.
  ///
  /// # Errors
  /// Listener bind or metric registration failure.
  pub async fn client_tracer(&self) -> Result<Arc<RpcTracer>> {
    self.get_or_create(TrafficSide::Client).await
  }

  /// Tracer for calls handled by this process. Same instance on every call.
  ///
  /// # Errors
  /// Listener bind or metric registration failure.
  pub async fn server_tracer(&self) -> Result<Arc<RpcTracer>> {
    self.get_or_create(TrafficSide::Server).await
  }

  #[instrument(skip(self))]
  async fn get_or_create(&self, side: TrafficSide) -> Result<Arc<RpcTracer>> {
    let mut state = self.state.lock().await;
    self.prepare(&mut state).await?;

    let slot = match side {
      TrafficSide::Client => &mut state.client_tracer,
      TrafficSide::Server => &mut state.server_tracer,
    };
    if let Some(tracer) = slot.as_ref() {
      return Ok(Arc::clone(tracer));
    }

    let tracer = Arc::new(RpcTracer::new(
      side,
      &self.registry,
      &self.metric_prefix,
      &self.buckets,
      Arc::clone(&self.diagnostics),
    )?);
    *slot = Some(Arc::clone(&tracer));

    info!(
      counter = tracer.metrics().counter_name(),
      histogram = tracer.metrics().histogram_name(),
      "RPC tracer registered"
    );
    Ok(tracer)
  }

  /// Shared setup done before any tracer is handed out.
  async fn prepare(&self, state: &mut RegistryState) -> Result<()> {
    if self.enable_runtime_collector && !state.runtime_collector_registered {
      register_runtime_collector(&self.registry)?;
      state.runtime_collector_registered = true;
    }

    if self.disable_server || !matches!(state.listener, ListenerState::Idle) {
      return Ok(());
    }

    let route = exposition::metrics_router(self.registry.clone(), &state.path);

    let listener = TcpListener::bind(&state.address)
      .await
      .map_err(|source| MonitorError::Bind {
        address: state.address.clone(),
        source,
      })?;
    let local_addr = listener
      .local_addr()
      .map_err(|source| MonitorError::Bind {
        address: state.address.clone(),
        source,
      })?;

    let router = match state.router.take() {
      Some(base) => base.merge(route),
      None => route,
    };

    let shutdown_rx = self.shutdown_tx.subscribe();
    let task = tokio::spawn(async move {
      if let Err(e) = exposition::serve(listener, router, shutdown_rx).await {
        error!(error = %e, "Prometheus metrics server failed");
      }
    });

    info!(
      address = %local_addr,
      path = %state.path,
      "Prometheus metrics server started"
    );
    state.listener = ListenerState::Running { local_addr, task };
    Ok(())
  }

  /// The shared Prometheus registry.
  pub const fn registry(&self) -> &Registry {
    &self.registry
  }

  /// Bound address of the running listener.
  pub async fn local_addr(&self) -> Option<SocketAddr> {
    match self.state.lock().await.listener {
      ListenerState::Running { local_addr, .. } => Some(local_addr),
      ListenerState::Idle | ListenerState::Stopped => None,
    }
  }

  /// Whether the exposition listener is running.
  pub async fn is_listening(&self) -> bool {
    matches!(self.state.lock().await.listener, ListenerState::Running { .. })
  }

  /// Scrape route on the configured path, for embedders that disabled
  /// automatic listener startup and serve it themselves.
  pub async fn metrics_router(&self) -> Router {
    let state = self.state.lock().await;
    exposition::metrics_router(self.registry.clone(), &state.path)
  }

  /// Stop the listener and wait for its task. The listener is never
  /// restarted afterwards; tracers keep working.
  #[instrument(skip(self))]
  pub async fn shutdown(&self) {
    let previous = {
      let mut state = self.state.lock().await;
      std::mem::replace(&mut state.listener, ListenerState::Stopped)
    };

    let ListenerState::Running { task, .. } = previous else {
      return;
    };

    let _ = self.shutdown_tx.send(());
    if let Err(e) = task.await {
      warn!(error = %e, "Metrics server task did not join cleanly");
    }
    info!("Prometheus metrics server stopped");
  }
}

impl Drop for TracerRegistry {
  fn drop(&mut self) {
    if let ListenerState::Running { task, .. } = &self.state.get_mut().listener {
      task.abort();
    }
  }
}

impl fmt::Debug for TracerRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TracerRegistry")
      .field("metric_prefix", &self.metric_prefix)
      .field("buckets", &self.buckets)
      .field("disable_server", &self.disable_server)
      .finish_non_exhaustive()
  }
}
