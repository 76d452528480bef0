//! Declared-order producer pipeline
//!
//! A [`Pipeline`] pairs each domain's [`DomainSpec`] with the producer that
//! builds its fragments. Turning it into tasks resolves every stage first;
//! producers of excluded domains are never invoked.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::compose::{FragmentTask, task};
use crate::fragment::Fragment;
use crate::options::{DomainOptions, DomainSpec, OptionResolver, OptionTree, Resolution};
use crate::result::Result;

/// Builds the fragments of one domain
#[async_trait]
pub trait FragmentProducer: Send + Sync {
    async fn produce(&self, options: DomainOptions) -> Result<Vec<Fragment>>;
}

/// Adapter turning an async closure into a [`FragmentProducer`]
pub struct FnProducer<F>(F);

#[async_trait]
impl<F, Fut> FragmentProducer for FnProducer<F>
where
    F: Fn(DomainOptions) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Fragment>>> + Send + 'static,
{
    async fn produce(&self, options: DomainOptions) -> Result<Vec<Fragment>> {
        (self.0)(options).await
    }
}

pub fn producer_fn<F, Fut>(f: F) -> Arc<dyn FragmentProducer>
where
    F: Fn(DomainOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Fragment>>> + Send + 'static,
{
    Arc::new(FnProducer(f))
}

struct Stage {
    spec: DomainSpec,
    producer: Arc<dyn FragmentProducer>,
}

/// Producers in declaration order
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, spec: DomainSpec, producer: Arc<dyn FragmentProducer>) -> Self {
        self.stages.push(Stage { spec, producer });
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Domain keys in declaration order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.spec.key.as_str())
    }

    /// Resolve every stage and start a task for each included domain
    pub fn into_tasks(self, tree: &OptionTree, resolver: &OptionResolver) -> Vec<FragmentTask> {
        self.stages
            .into_iter()
            .filter_map(|stage| match resolver.resolve(&stage.spec, tree) {
                Resolution::Excluded => {
                    debug!("Skipping producer for '{}'", stage.spec.key);
                    None
                }
                Resolution::Included(options) => {
                    let producer = stage.producer;
                    Some(task(async move { producer.produce(options).await }))
                }
            })
            .collect()
    }
}
