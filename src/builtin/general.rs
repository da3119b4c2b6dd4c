use crate::commands::{Args, CommandModule, HandlerOutput, MethodSpec, ParamSpec};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Liveness and echo commands.
pub struct General {
    started: Instant,
}

impl Default for General {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl General {
    fn ping(&self) -> HandlerOutput {
        Ok(Some(json!({
            "content": "Pong!",
            "uptime_secs": self.started.elapsed().as_secs(),
        })))
    }

    fn echo(&self, args: &Args) -> HandlerOutput {
        let text = args.string(0)?;
        Ok(Some(json!({ "content": text })))
    }
}

impl CommandModule for General {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![
            MethodSpec::new("ping")
                .command("ping", "Check that the bot is alive")
                .handler(|general: Arc<Self>, _| async move { general.ping() }),
            MethodSpec::new("echo")
                .command("echo", "Repeat a message back")
                .param(ParamSpec::new::<String>("text").describe("Message to repeat"))
                .handler(|general: Arc<Self>, args| async move { general.echo(&args) }),
        ]
    }
}
