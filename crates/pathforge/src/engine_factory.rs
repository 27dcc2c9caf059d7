//! Engine construction for new sessions.

use std::fmt;
use std::sync::Arc;

use pathforge_config::PlannerConfig;
use pathforge_planner::{build_engine, PlanningEngine};

type EngineBuilder = dyn Fn() -> Box<dyn PlanningEngine> + Send + Sync;

/// Builds a fresh engine every time a session resets.
///
/// # Example
///
/// ```
/// use pathforge::{EngineFactory, Session};
/// use pathforge_config::PlannerConfig;
/// use pathforge_planner::DirectEngine;
///
/// let factory = EngineFactory::custom(|| Box::new(DirectEngine::new()));
/// let session = Session::with_engine_factory(PlannerConfig::default(), factory);
///
/// assert_eq!(session.engine_type_name(), "Direct");
/// ```
#[derive(Clone, Default)]
pub enum EngineFactory {
    /// Engine selected by the session's configuration.
    #[default]
    Configured,
    /// Caller-supplied constructor.
    Custom(Arc<EngineBuilder>),
}

impl EngineFactory {
    pub fn custom<F>(build: F) -> Self
    where
        F: Fn() -> Box<dyn PlanningEngine> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(build))
    }

    pub fn create(&self, config: &PlannerConfig) -> Box<dyn PlanningEngine> {
        match self {
            Self::Configured => build_engine(config),
            Self::Custom(build) => build(),
        }
    }
}

impl fmt::Debug for EngineFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => write!(f, "EngineFactory::Configured"),
            Self::Custom(_) => write!(f, "EngineFactory::Custom(..)"),
        }
    }
}
