//! Integration tests for the registration pass: discovery, build and
//! dispatch through the resulting table.

mod common;

use common::fixture_universe;
use serde_json::json;
use common::modules::Greetings;
use slashsync::commands::{ArgValue, Registration, SkipReason, TypeEntry, TypeUniverse};
use slashsync::error::{BuildError, HandlerError};
use slashsync_proto::{OptionType, UserId};

#[test]
fn test_pass_collects_warnings_and_failures() {
    let registration = Registration::run(&fixture_universe()).unwrap();

    assert_eq!(
        registration.table.names().collect::<Vec<_>>(),
        vec!["explode", "fail", "hello", "shout"]
    );

    assert_eq!(registration.warnings.len(), 1);
    let warning = &registration.warnings[0];
    assert_eq!(warning.module, "fixtures::inner::Hidden");
    assert_eq!(warning.reason, SkipReason::HiddenByEnclosing);

    assert_eq!(registration.failures.len(), 1);
    assert!(matches!(
        &registration.failures[0].error,
        BuildError::NoNullaryConstructor { module } if module == "fixtures::NeedsConfig"
    ));
    assert!(!registration.is_clean());
}

#[test]
fn test_repeated_type_names_still_build() {
    let mut universe = TypeUniverse::new();
    universe
        .register_module::<Greetings>("host::Greetings")
        .register(TypeEntry::new("host::Config"))
        .register(TypeEntry::new("host::Config"))
        .register_module::<Greetings>("host::Greetings");

    let registration = Registration::run(&universe).unwrap();
    assert_eq!(
        registration.table.names().collect::<Vec<_>>(),
        vec!["hello", "shout"]
    );
    assert_eq!(registration.modules.len(), 1);
    assert_eq!(registration.warnings.len(), 1);
    assert_eq!(registration.warnings[0].reason, SkipReason::DuplicateName);
    assert!(registration.failures.is_empty());
}

#[tokio::test]
async fn test_unknown_names_share_one_metric_label() {
    slashsync::metrics::init();
    let registration = Registration::run(&fixture_universe()).unwrap();

    for name in ["nope-7f3a", "nope-91c2"] {
        assert!(registration.table.dispatch(name, vec![]).await.is_err());
    }

    let output = slashsync::metrics::gather_metrics();
    assert!(output.contains(r#"command="<unknown>""#));
    assert!(!output.contains("nope-7f3a"));
    assert!(!output.contains("nope-91c2"));
}

#[test]
fn test_payload_matches_declaration() {
    let registration = Registration::run(&fixture_universe()).unwrap();
    let payload = registration.table.get("shout").unwrap().to_payload();
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "shout",
            "description": "Say something",
            "type": 1,
            "options": [
                { "type": 3, "name": "text", "description": "No description provided", "required": true },
                { "type": 5, "name": "loud", "description": "Upper-case the reply", "required": true },
            ],
        })
    );
}

#[tokio::test]
async fn test_dispatch_shares_module_instance() {
    let registration = Registration::run(&fixture_universe()).unwrap();
    let user = ArgValue::User(UserId::new(77));

    registration.table.dispatch("hello", vec![user.clone()]).await.unwrap();
    let reply = registration
        .table
        .dispatch("hello", vec![user])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reply["content"], "Hello <@77>");
    assert_eq!(reply["times"], 2);
    assert_eq!(registration.table.command_stats(), vec![("hello", 2)]);

    let definition = registration.table.get("hello").unwrap();
    assert_eq!(definition.module().unwrap().name(), "fixtures::Greetings");
}

#[tokio::test]
async fn test_dispatch_errors_are_typed() {
    let registration = Registration::run(&fixture_universe()).unwrap();
    let table = &registration.table;

    assert!(matches!(
        table.dispatch("missing", vec![]).await,
        Err(HandlerError::UnknownCommand(name)) if name == "missing"
    ));

    assert!(matches!(
        table.dispatch("shout", vec![ArgValue::String("hi".into())]).await,
        Err(HandlerError::ArgumentCount { expected: 2, got: 1, .. })
    ));

    assert!(matches!(
        table
            .dispatch("shout", vec![ArgValue::Boolean(true), ArgValue::Boolean(true)])
            .await,
        Err(HandlerError::ArgumentType {
            index: 0,
            expected: OptionType::String,
            got: OptionType::Boolean,
            ..
        })
    ));

    match table.dispatch("fail", vec![]).await {
        Err(e @ HandlerError::Invocation { .. }) => {
            let source = std::error::Error::source(&e).map(ToString::to_string);
            assert_eq!(source.as_deref(), Some("backend unavailable"));
        }
        other => panic!("expected invocation error, got {other:?}"),
    }

    match table.dispatch("explode", vec![]).await {
        Err(HandlerError::Panicked { command, message }) => {
            assert_eq!(command, "explode");
            assert!(message.contains("kaboom"));
        }
        other => panic!("expected panic to be caught, got {other:?}"),
    }

    // The table keeps serving after a handler panicked.
    let reply = table
        .dispatch(
            "shout",
            vec![ArgValue::String("hi".into()), ArgValue::Boolean(true)],
        )
        .await
        .unwrap();
    assert_eq!(reply, Some(json!({ "content": "HI" })));
}

#[test]
fn test_dropping_modules_leaves_definitions_readable() {
    let Registration { table, modules, .. } = Registration::run(&fixture_universe()).unwrap();
    drop(modules);

    let definition = table.get("hello").unwrap();
    assert!(definition.module().is_none());
    assert_eq!(definition.module_name(), "fixtures::Greetings");
    assert_eq!(definition.parameters()[0].wire_type, OptionType::User);
}
