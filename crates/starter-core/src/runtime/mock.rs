//! runtime::mock
//!
//! Recording command runner for deterministic tests.
//!
//! The mock never spawns processes. It records every command it is asked to
//! run, fails the ones matching a configured predicate, and can run a hook
//! to simulate the side effects of a real tool (e.g. a generator writing
//! files into the project).
//!
//! # Example
//!
//! ```
//! use starter_core::runtime::{CommandRunner, CommandSpec, MockRunner};
//!
//! # tokio_test_block_on(async {
//! let runner = MockRunner::new().fail_when(|spec| spec.args.contains(&"generate".to_string()));
//! let ok = CommandSpec::new("npm", "/tmp").arg("install");
//! let bad = CommandSpec::new("npx", "/tmp").args(["prisma", "generate"]);
//!
//! assert!(runner.run(&ok).await.is_ok());
//! assert!(runner.run(&bad).await.is_err());
//! assert_eq!(runner.command_lines(), vec!["npm install", "npx prisma generate"]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use super::runner::{CommandRunner, CommandSpec};
use crate::error::{CommandCause, Result, StarterError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type Predicate = Box<dyn Fn(&CommandSpec) -> bool + Send + Sync>;
type Hook = Box<dyn Fn(&CommandSpec) + Send + Sync>;

/// Mock runner for testing.
///
/// Clones share the same recorded history.
#[derive(Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Default)]
struct MockRunnerInner {
    calls: Vec<CommandSpec>,
    failures: Vec<Predicate>,
    hooks: Vec<Hook>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command matching `predicate` exit with code 1
    pub fn fail_when(self, predicate: impl Fn(&CommandSpec) -> bool + Send + Sync + 'static) -> Self {
        self.lock().failures.push(Box::new(predicate));
        self
    }

    /// Run `hook` for every successful command, before it returns
    pub fn on_run(self, hook: impl Fn(&CommandSpec) + Send + Sync + 'static) -> Self {
        self.lock().hooks.push(Box::new(hook));
        self
    }

    /// Every command requested so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.lock().calls.clone()
    }

    /// Rendered command lines of every command requested so far
    pub fn command_lines(&self) -> Vec<String> {
        self.lock().calls.iter().map(CommandSpec::command_line).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRunnerInner> {
        // A poisoned lock only means another test thread panicked mid-record.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for MockRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRunner")
            .field("calls", &self.lock().calls)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        let inner = &mut *self.lock();
        inner.calls.push(spec.clone());

        if inner.failures.iter().any(|fails| fails(spec)) {
            return Err(StarterError::CommandFailed {
                command: spec.command_line(),
                cause: CommandCause::Exit(1),
            });
        }

        for hook in &inner.hooks {
            hook(spec);
        }
        Ok(())
    }
}
