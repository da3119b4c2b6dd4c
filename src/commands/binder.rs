//! Dispatch binding.
//!
//! Binding captures a module instance and a method body in a uniform
//! [`Invocable`]: positional arguments in, JSON result (or nothing) out.

use super::module::{HandlerOutput, MethodSpec};
use super::types::{ArgValue, Args};
use crate::error::{BuildError, HandlerError, HandlerResult};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use slashsync_proto::OptionType;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

type BoundCall = Arc<dyn Fn(Args) -> BoxFuture<'static, HandlerOutput> + Send + Sync>;

/// A handler bound to its module instance.
#[derive(Clone)]
pub struct Invocable {
    command: Arc<str>,
    kinds: Arc<[OptionType]>,
    call: BoundCall,
}

impl Invocable {
    /// Number of positional arguments expected.
    pub fn arity(&self) -> usize {
        self.kinds.len()
    }

    /// Expected wire kind of each positional argument.
    pub fn parameter_kinds(&self) -> &[OptionType] {
        &self.kinds
    }

    /// Run the handler on its bound instance.
    ///
    /// Arguments are checked against the declared parameter kinds first.
    /// Handler errors and panics are returned, never propagated.
    pub async fn invoke(&self, args: Vec<ArgValue>) -> HandlerResult {
        if args.len() != self.kinds.len() {
            return Err(HandlerError::ArgumentCount {
                command: self.command.to_string(),
                expected: self.kinds.len(),
                got: args.len(),
            });
        }
        for (index, (arg, expected)) in args.iter().zip(self.kinds.iter()).enumerate() {
            if arg.option_type() != *expected {
                return Err(HandlerError::ArgumentType {
                    command: self.command.to_string(),
                    index,
                    expected: *expected,
                    got: arg.option_type(),
                });
            }
        }

        let args = Args::new(args);
        let started = std::panic::catch_unwind(AssertUnwindSafe(|| (self.call)(args)));
        let outcome = match started {
            Ok(future) => AssertUnwindSafe(future).catch_unwind().await,
            Err(panic) => Err(panic),
        };

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(HandlerError::Invocation {
                command: self.command.to_string(),
                source,
            }),
            Err(panic) => Err(HandlerError::Panicked {
                command: self.command.to_string(),
                message: panic_message(panic.as_ref()),
            }),
        }
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocable")
            .field("command", &self.command)
            .field("kinds", &self.kinds)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Bind `method` to `instance`.
///
/// Fails with [`BuildError::Binding`] when the method has no body, repeats a
/// parameter name, or declares a parameter with no wire representation.
pub fn bind<M: Send + Sync + 'static>(
    method: &MethodSpec<M>,
    instance: &Arc<M>,
) -> Result<Invocable, BuildError> {
    let signature = method.signature();
    let fail = |reason| BuildError::Binding {
        method: signature.name.clone(),
        reason,
    };

    let body = Arc::clone(method.body().ok_or_else(|| fail("method has no handler body"))?);

    let mut names = HashSet::new();
    if !signature.params.iter().all(|p| names.insert(p.name())) {
        return Err(fail("parameter names are not unique"));
    }

    let kinds = signature
        .params
        .iter()
        .map(|p| p.param_type().wire_type())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| fail("parameter type has no wire representation"))?;

    let command = match signature.markers.as_slice() {
        [marker] => marker.name.as_str(),
        _ => signature.name.as_str(),
    };

    let instance = Arc::clone(instance);
    let call: BoundCall = Arc::new(move |args| body(Arc::clone(&instance), args));

    Ok(Invocable {
        command: Arc::from(command),
        kinds: Arc::from(kinds),
        call,
    })
}
