use crate::commands::{Args, CommandModule, HandlerOutput, MethodSpec, ParamSpec};
use serde_json::json;
use slashsync_proto::{ChannelId, RoleId, UserId};
use std::sync::Arc;

/// Mention-based lookups. Replies carry the ids back for the runtime to
/// resolve.
#[derive(Default)]
pub struct Lookup;

impl Lookup {
    fn whois(&self, args: &Args) -> HandlerOutput {
        let user = args.user(0)?;
        Ok(Some(json!({
            "content": format!("<@{user}>"),
            "user_id": user,
        })))
    }

    fn permissions(&self, args: &Args) -> HandlerOutput {
        let role: RoleId = args.role(0)?;
        let channel: ChannelId = args.channel(1)?;
        let verbose = args.boolean(2)?;
        let mut reply = json!({
            "content": format!("Permissions of <@&{role}> in <#{channel}>"),
            "role_id": role,
            "channel_id": channel,
        });
        if verbose {
            reply["ephemeral"] = json!(true);
        }
        Ok(Some(reply))
    }
}

impl CommandModule for Lookup {
    fn methods() -> Vec<MethodSpec<Self>> {
        vec![
            MethodSpec::new("whois")
                .command("whois", "Show who a user is")
                .param(ParamSpec::new::<UserId>("user").describe("User to look up"))
                .handler(|lookup: Arc<Self>, args| async move { lookup.whois(&args) }),
            MethodSpec::new("permissions")
                .command("permissions", "Show a role's permissions in a channel")
                .param(ParamSpec::new::<RoleId>("role"))
                .param(ParamSpec::new::<ChannelId>("channel"))
                .param(ParamSpec::new::<bool>("verbose").describe("Reply only to you"))
                .handler(|lookup: Arc<Self>, args| async move { lookup.permissions(&args) }),
        ]
    }
}
