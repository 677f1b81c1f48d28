// End-to-end tests for the send/format/clear/get/transition commands
// Run with: cargo test --test send_command_test

use serde_json::json;
use vbcli::commands::{self, Delivery};
use vbcli::{AliasTable, BoardClient, StyleFlags, ValidationError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a client pointed at a single mock server
fn client_for(server: &MockServer) -> BoardClient {
    BoardClient::new("abc123")
        .unwrap()
        .with_board_url(&server.uri())
        .with_compose_url(&server.uri())
}

fn centered() -> StyleFlags {
    StyleFlags {
        model: None,
        align: "center".to_string(),
        justify: "center".to_string(),
    }
}

fn compose_body(template: &str) -> serde_json::Value {
    json!({
        "components": [{
            "template": template,
            "style": {"align": "center", "justify": "center"}
        }]
    })
}

async fn send(
    client: &BoardClient,
    input: &str,
    flags: &StyleFlags,
    delivery: Delivery,
) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = commands::send::send(
        client,
        AliasTable::builtin(),
        input,
        flags,
        None,
        delivery,
        &mut out,
    )
    .await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_alias_message_is_composed_then_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .and(body_json(compose_body("hello {66}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"characters": [[8, 5, 66]]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({"characters": [[8, 5, 66]]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (result, out) = send(&client_for(&server), "hello {green}", &centered(), Delivery::Send).await;
    result.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_escaped_newline_reaches_compose_as_literal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .and(body_json(compose_body("Hello\nworld")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1], [2]])))
        .expect(1)
        .mount(&server)
        .await;

    let (result, out) = send(
        &client_for(&server),
        r"Hello\nworld",
        &centered(),
        Delivery::PrintOnly,
    )
    .await;
    result.unwrap();
    assert_eq!(out, "[[1],[2]]\n");
}

#[tokio::test]
async fn test_expression_tokens_reach_compose_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .and(body_json(compose_body("{63} {{ green }}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[63]])))
        .expect(1)
        .mount(&server)
        .await;

    let (result, _) = send(
        &client_for(&server),
        "{red} {{ green }}",
        &centered(),
        Delivery::PrintOnly,
    )
    .await;
    result.unwrap();
}

#[tokio::test]
async fn test_raw_matrix_bypasses_compose() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({"characters": [[72, 69], [0, 0]]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // Invalid style flags are never looked at for raw input
    let flags = StyleFlags {
        model: Some("bogus".to_string()),
        ..centered()
    };
    let (result, _) = send(&client_for(&server), "[[72,69],[0,0]]", &flags, Delivery::Send).await;
    result.unwrap();
}

#[tokio::test]
async fn test_invalid_model_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let flags = StyleFlags {
        model: Some("mini".to_string()),
        ..centered()
    };
    let (result, _) = send(&client_for(&server), "hello", &flags, Delivery::Send).await;
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());
}

#[tokio::test]
async fn test_note_model_from_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .and(body_json(json!({
            "components": [{
                "template": "hi",
                "style": {"align": "center", "justify": "center"}
            }],
            "style": {"height": 3, "width": 15}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0]])))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::send::send(
        &client_for(&server),
        AliasTable::builtin(),
        "hi",
        &centered(),
        Some("note"),
        Delivery::PrintOnly,
        &mut out,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_send_raw_rejects_empty_matrix() {
    let server = MockServer::start().await;
    let err = commands::send::send_raw(&client_for(&server), "[]")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("empty array"));
}

#[tokio::test]
async fn test_clear_composes_empty_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/compose"))
        .and(body_json(compose_body("")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0, 0]])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(json!({"characters": [[0, 0]]})))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    commands::send::clear(&client_for(&server), &centered(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_layout_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"currentMessage":{"layout":"[[1,2]]"}}"#),
        )
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::get::get(&client_for(&server), true, &mut out)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "[[1,2]]\n");
}

#[tokio::test]
async fn test_transition_commands() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/transition"))
        .and(body_json(json!({"transition": "curtain", "transitionSpeed": "gentle"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transition"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"transition":"curtain","transitionSpeed":"gentle"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    commands::transition::set(&client, " Curtain ", "GENTLE")
        .await
        .unwrap();
    assert!(commands::transition::set(&client, "spin", "fast").await.is_err());

    let mut out = Vec::new();
    commands::transition::get(&client, &mut out).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"transition\": \"curtain\",\n  \"transitionSpeed\": \"gentle\"\n}\n"
    );
}
