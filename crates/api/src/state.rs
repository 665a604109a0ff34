use std::sync::Arc;

use policyscore_core::model::{LinearModel, Model};
use policyscore_core::validation::RuleRegistry;
use policyscore_core::{policy, CoreError, ValidatingPredictor};

use crate::config::ServerConfig;

/// Predictor over whichever model the process loaded.
pub type Predictor = ValidatingPredictor<Box<dyn Model>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup; handlers only read from it. Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rule registry and model, wrapped together.
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(config: ServerConfig, predictor: Predictor) -> Self {
        Self {
            config: Arc::new(config),
            predictor: Arc::new(predictor),
        }
    }

    /// Load the model artifact and rule set named by `config`.
    ///
    /// Without `RULES_PATH` the built-in policy rules are used, with
    /// `current_year` as the upper bound for policy years.
    pub fn load(config: ServerConfig, current_year: i32) -> Result<Self, CoreError> {
        let rules = match &config.rules_path {
            Some(path) => RuleRegistry::from_path(path)?,
            None => policy::default_registry(current_year)?,
        };
        tracing::info!(
            rule_count = rules.len(),
            source = %config
                .rules_path
                .as_deref()
                .map_or("built-in".to_string(), |p| p.display().to_string()),
            "Loaded validation rules"
        );

        let model = LinearModel::from_path(&config.model_path)?;
        check_rule_coverage(&model, &rules)?;
        tracing::info!(
            path = %config.model_path.display(),
            features = model.features().len(),
            "Loaded model artifact"
        );

        let mut predictor = ValidatingPredictor::new(Box::new(model) as Box<dyn Model>, rules);
        if let Some(sentinel) = config.missing_sentinel {
            predictor = predictor.with_missing_sentinel(sentinel);
        }

        Ok(Self::new(config, predictor))
    }
}

/// Every feature the model reads must have a rule, unless validation is
/// switched off with an empty registry.
fn check_rule_coverage(model: &LinearModel, rules: &RuleRegistry) -> Result<(), CoreError> {
    if rules.is_empty() {
        return Ok(());
    }
    match model.features().iter().find(|f| rules.get(f.as_str()).is_none()) {
        Some(feature) => Err(CoreError::Artifact(format!(
            "model feature {feature} has no validation rule"
        ))),
        None => Ok(()),
    }
}
