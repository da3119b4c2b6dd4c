//! Fixture command modules.

use slashsync::commands::{
    Args, CommandModule, Constructor, HandlerOutput, MethodSpec, ParamSpec, TypeEntry,
    TypeUniverse, Visibility,
};
use serde_json::json;
use slashsync_proto::UserId;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Greeting commands with per-instance state.
#[derive(Default)]
pub struct Greetings {
    greeted: AtomicU64,
}

impl Greetings {
    fn hello(&self, args: &Args) -> HandlerOutput {
        let user = args.user(0)?;
        let times = self.greeted.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Some(json!({ "content": format!("Hello <@{user}>"), "times": times })))
    }

    fn shout(&self, args: &Args) -> HandlerOutput {
        let text = args.string(0)?;
        let loud = args.boolean(1)?;
        let text = if loud { text.to_uppercase() } else { text };
        Ok(Some(json!({ "content": text })))
    }
}

impl CommandModule for Greetings {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![
            MethodSpec::new("hello")
                .command("hello", "Greet a user")
                .param(ParamSpec::new::<UserId>("target").describe("Who to greet"))
                .handler(|m: Arc<Self>, args| async move { m.hello(&args) }),
            MethodSpec::new("shout")
                .command("shout", "Say something")
                .param(ParamSpec::new::<String>("text"))
                .param(ParamSpec::new::<bool>("loud").describe("Upper-case the reply"))
                .handler(|m: Arc<Self>, args| async move { m.shout(&args) }),
        ]
    }
}

async fn fail() -> HandlerOutput {
    Err("backend unavailable".into())
}

async fn explode() -> HandlerOutput {
    panic!("kaboom")
}

/// Commands whose handlers misbehave.
#[derive(Default)]
pub struct Faults;

impl CommandModule for Faults {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![
            MethodSpec::new("fail")
                .command("fail", "Always fails")
                .handler(|_, _| fail()),
            MethodSpec::new("explode")
                .command("explode", "Always panics")
                .handler(|_, _| explode()),
        ]
    }
}

/// Never reaches the table: hidden inside a private scope.
#[derive(Default)]
pub struct Hidden;

impl CommandModule for Hidden {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![MethodSpec::new("secret")
            .command("secret", "Should not be registered")
            .handler(|_, _| async move { HandlerOutput::Ok(None) })]
    }
}

/// Universe with two usable modules, one hidden module, a module that needs
/// constructor arguments and an unrelated type.
pub fn fixture_universe() -> TypeUniverse {
    let mut universe = TypeUniverse::new();
    universe
        .register_module::<Greetings>("fixtures::Greetings")
        .register_module::<Faults>("fixtures::Faults")
        .register(TypeEntry::module::<Hidden>("fixtures::inner::Hidden").nested_in(Visibility::Private))
        .register(
            TypeEntry::module::<Hidden>("fixtures::NeedsConfig").constructor(Constructor::WithArgs(1)),
        )
        .register(TypeEntry::new("fixtures::PlainStruct"));
    universe
}
