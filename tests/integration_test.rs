use std::io::Cursor;

use delegated_auth::web::RequestAdapter;
use delegated_auth::{
    AuthenticationProvider, Configuration, Credentials, DelegatedAuthenticationProvider,
    Directory, Error, ErrorKind, ProviderConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn raw(content_type: &str, body: &[u8]) -> RequestAdapter {
    RequestAdapter::raw()
        .with_content_type(content_type)
        .with_body(Cursor::new(body.to_vec()))
}

#[test]
fn json_request_to_session_context() {
    init_tracing();
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(raw(
        "application/json",
        br#"{"protocol":"vnc","parameters":{"hostname":"h","port":"5900"}}"#,
    ))
    .with_username("alice");

    let session = provider
        .authenticate(&mut credentials)
        .expect("no failure")
        .expect("request claimed");
    assert_eq!(
        session.configuration(),
        &Configuration::builder("vnc")
            .parameter("hostname", "h")
            .parameter("port", "5900")
            .build()
    );

    let context = provider.build_context(&session).unwrap();
    let user = context.self_user();
    assert_eq!(user.username(), "delegated");
    assert!(user.connection_identifiers().contains("default"));
    assert!(user.connection_group_identifiers().contains("ROOT"));

    let root = context.root_connection_group();
    assert_eq!(root.connection_identifiers().len(), 1);
    assert!(root.child_group_identifiers().is_empty());

    let connection = context.connections().get("default").unwrap();
    assert_eq!(connection.parent_identifier(), "ROOT");
    assert_eq!(connection.configuration().parameter("hostname"), Some("h"));
}

#[test]
fn api_request_takes_first_values() {
    init_tracing();
    let provider = DelegatedAuthenticationProvider::default();
    let adapter = RequestAdapter::api()
        .with_param("protocol", "p")
        .with_param("k1", "v1a")
        .with_param("k1", "v1b")
        .with_param("k2", "v2");
    let mut credentials = Credentials::new(adapter);

    let session = provider.authenticate(&mut credentials).unwrap().unwrap();
    let config = session.configuration();
    assert_eq!(config.protocol(), "p");
    assert_eq!(config.parameter("k1"), Some("v1a"));
    assert_eq!(config.parameter("k2"), Some("v2"));
}

#[test]
fn api_request_without_protocol_fails() {
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(RequestAdapter::api().with_param("hostname", "h"));

    let err = provider.authenticate(&mut credentials).unwrap_err();
    assert!(matches!(err, Error::MissingParameter("protocol")));
}

#[test]
fn json_without_parameters_fails_naming_the_field() {
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(raw("application/json", br#"{"protocol":"vnc"}"#));

    let err = provider.authenticate(&mut credentials).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingParameter);
    assert!(err.to_string().contains("parameters"));
}

#[test]
fn form_token_request_is_deferred() {
    init_tracing();
    let provider = DelegatedAuthenticationProvider::default();
    let adapter = raw("application/x-www-form-urlencoded", b"token=abc").with_param("token", "abc");
    let mut credentials = Credentials::new(adapter);

    assert!(provider.authenticate(&mut credentials).unwrap().is_none());
}

#[test]
fn text_plain_is_rejected_with_its_type() {
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(raw("text/plain; charset=utf-8", b"vnc"));

    let err = provider.authenticate(&mut credentials).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedContentType);
    assert!(err.to_string().contains("text/plain"));
    assert!(!err.to_string().contains("charset"));
}

#[test]
fn drained_body_is_deferred_regardless_of_type() {
    let provider = DelegatedAuthenticationProvider::default();
    let adapter = RequestAdapter::raw().with_content_type("text/plain");
    let mut credentials = Credentials::new(adapter);

    assert!(provider.authenticate(&mut credentials).unwrap().is_none());
}

#[test]
fn declared_charset_is_honored() {
    let provider = DelegatedAuthenticationProvider::default();
    let body = b"{\"protocol\":\"ssh\",\"parameters\":{\"username\":\"Jos\xe9\"}}";
    let mut credentials = Credentials::new(raw("application/json; charset=ISO-8859-1", body));

    let session = provider.authenticate(&mut credentials).unwrap().unwrap();
    assert_eq!(session.configuration().parameter("username"), Some("José"));
}

#[test]
fn latin1_control_range_is_not_remapped() {
    let provider = DelegatedAuthenticationProvider::default();
    let body = b"{\"protocol\":\"vnc\",\"parameters\":{\"v\":\"\x80\"}}";
    let mut credentials = Credentials::new(raw("application/json; charset=ISO-8859-1", body));

    let session = provider.authenticate(&mut credentials).unwrap().unwrap();
    assert_eq!(session.configuration().parameter("v"), Some("\u{80}"));
}

#[test]
fn second_provider_pass_cannot_reread_the_body() {
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(raw(
        "application/json",
        br#"{"protocol":"vnc","parameters":{}}"#,
    ));

    assert!(provider.authenticate(&mut credentials).unwrap().is_some());
    let err = provider.authenticate(&mut credentials).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn custom_identity_flows_into_the_context() {
    let provider = DelegatedAuthenticationProvider::new(
        ProviderConfig::default()
            .with_identifier("gateway")
            .with_user_name("operator"),
    );
    let mut credentials = Credentials::new(RequestAdapter::api().with_param("protocol", "rdp"));

    let session = provider.authenticate(&mut credentials).unwrap().unwrap();
    assert_eq!(session.provider_identifier(), "gateway");

    let context = provider.build_context(&session).unwrap();
    assert_eq!(context.provider_identifier(), "gateway");
    assert!(context.users().get("operator").is_some());
    assert!(context.users().get("delegated").is_none());
}

#[test]
fn topology_mutations_are_denied() {
    let provider = DelegatedAuthenticationProvider::default();
    let mut credentials = Credentials::new(RequestAdapter::api().with_param("protocol", "vnc"));
    let session = provider.authenticate(&mut credentials).unwrap().unwrap();
    let mut context = provider.build_context(&session).unwrap();
    let snapshot = context.clone();

    let user = context.self_user().clone();
    let err = context.users_mut().update(user).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(err.to_string(), "permission denied");

    assert!(context.connections_mut().remove("default").is_err());
    assert_eq!(context, snapshot);
}
