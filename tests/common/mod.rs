#![allow(dead_code)]

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub server: MockServer,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let server = MockServer::start();

        Self {
            _tmp: tmp,
            home,
            server,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("quadmart").expect("binary under test");
        cmd.env("HOME", &self.home)
            .env_remove("QUADMART_API")
            .arg("--api")
            .arg(self.server.base_url());
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid error json output")
    }

    pub fn mock_catalog(&self) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(fixture_catalog());
        })
    }

    pub fn mock_login(&self, token: &str) -> Mock<'_> {
        let token = token.to_string();
        self.server.mock(move |when, then| {
            when.method(POST).path("/login");
            then.status(200).json_body(json!({ "access_token": token }));
        })
    }

    pub fn mock_whoami(&self, token: &str, user: &str) -> Mock<'_> {
        let bearer = format!("Bearer {}", token);
        let user = user.to_string();
        self.server.mock(move |when, then| {
            when.method(GET).path("/protected").header("authorization", bearer);
            then.status(200)
                .json_body(json!({ "user": user, "message": "You are authenticated" }));
        })
    }

    pub fn session_file(&self) -> PathBuf {
        self.home.join(".config/quadmart/session.json")
    }
}

pub fn fixture_catalog() -> Value {
    json!([
        {
            "id": "1",
            "title": "Calc textbook",
            "price": "$15",
            "category": "books",
            "description": "lightly used, no highlights",
            "image": "calc.jpg",
            "contact": "email:seller@usf.edu"
        },
        {
            "id": "2",
            "title": "EGN lab kit",
            "price": "Free",
            "category": "books",
            "description": "giving it away",
            "image": "https://example.com/kit.jpg",
            "contact": "instagram:@egnkit"
        },
        {
            "id": "3",
            "title": "Monitor",
            "price": "$60",
            "category": "electronics",
            "description": "24 inch, HDMI",
            "image": "monitor.jpg",
            "contact": "email:mon@usf.edu"
        }
    ])
}
