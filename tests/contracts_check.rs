use httpmock::prelude::*;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

mod common;
use common::TestEnv;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn contracts_check() {
    let env = TestEnv::new();
    env.mock_catalog();
    env.mock_login("tok123");
    env.mock_whoami("tok123", "alice");
    env.server.mock(|when, then| {
        when.method(GET).path("/user/profile");
        then.status(200).json_body(serde_json::json!({
            "username": "alice",
            "email": "alice@usf.edu",
            "full_name": "Alice A",
            "bio": "",
            "location": "Tampa",
            "created_at": "2024-12-01T00:00:00Z"
        }));
    });

    let browse = env.run_json(&["browse", "--sort", "name"]);
    assert_eq!(browse["ok"], true);
    validate("listing-list.schema.json", &browse["data"]);

    let favorites = env.run_json(&["favorites"]);
    validate("listing-list.schema.json", &favorites["data"]);

    let show = env.run_json(&["show", "1"]);
    validate("listing-detail.schema.json", &show["data"]);

    let login = env.run_json(&["login", "alice", "pw"]);
    validate("session.schema.json", &login["data"]);

    let who = env.run_json(&["whoami"]);
    validate("session.schema.json", &who["data"]);

    let profile = env.run_json(&["profile", "show"]);
    validate("profile.schema.json", &profile["data"]);
}
