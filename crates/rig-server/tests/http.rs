//! End-to-end API tests: a real server on an ephemeral port, driven by reqwest.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use rig_config::RigConfig;
use rig_server::AppContext;
use rig_server::http::router;
use serde_json::{Value, json};

struct TestServer {
    base: String,
    client: reqwest::Client,
    dir: tempfile::TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn repos(&self) -> std::path::PathBuf {
        self.dir.path().join("repos")
    }

    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        into_parts(req.send().await.unwrap()).await
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        let mut req = self.client.request(method, self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        into_parts(req.send().await.unwrap()).await
    }

    async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, token, body).await
    }

    async fn register_and_login(&self, username: &str) -> String {
        let (status, _) = self
            .post(
                "/auth/register",
                None,
                &json!({ "username": username, "email": format!("{username}@lab.io"), "password": "s3cret" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self
            .post("/auth/login", None, &json!({ "username": username, "password": "s3cret" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }
}

async fn into_parts(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let text = response.text().await.unwrap();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, body)
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RigConfig::default();
    config.database.path = ":memory:".to_string();
    config.storage.repos_base_path = dir.path().join("repos");
    config.storage.users_base_path = dir.path().join("users");
    config.auth.secret_key = "integration-secret".to_string();
    config.auth.bcrypt_cost = 4;

    let ctx = AppContext::init(config).await.unwrap().shared();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(ctx)).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        dir,
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A plain mirror directory named `lab`; browsing does not need git.
fn seed_mirror(server: &TestServer) {
    let lab = server.repos().join("lab");
    write(
        &lab.join("checks/ping.py"),
        "\"\"\"\nPing every host.\n\nfield Author: ops\n\"\"\"\n",
    );
    write(&lab.join("checks/notes.txt"), "not a script\n");
    write(&lab.join(".git/config"), "[core]\n");
    fs::write(lab.join("blob.py"), [0xff, 0xfe, 0x00]).unwrap();
}

fn git(repo: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test]
async fn root_reports_liveness() {
    let server = spawn_server().await;
    let (status, body) = server.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["msg"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn register_login_and_me() {
    let server = spawn_server().await;
    let token = server.register_and_login("alice").await;

    let (status, me) = server.get("/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");
    assert_eq!(me["role"], "user");
    assert!(me.get("hashed_password").is_none());
}

#[tokio::test]
async fn login_accepts_oauth2_form() {
    let server = spawn_server().await;
    server.register_and_login("bob").await;

    let response = server
        .client
        .post(server.url("/auth/login"))
        .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("grant_type=password&username=bob&password=s3cret")
        .send()
        .await
        .unwrap();
    let (status, body) = into_parts(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = spawn_server().await;
    server.register_and_login("carol").await;

    let (status, body) = server
        .post("/auth/login", None, &json!({ "username": "carol", "password": "nope" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = server
        .post("/auth/login", None, &json!({ "username": "nobody", "password": "s3cret" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_is_validation() {
    let server = spawn_server().await;
    server.register_and_login("dave").await;

    let (status, body) = server
        .post(
            "/auth/register",
            None,
            &json!({ "username": "dave", "email": "other@lab.io", "password": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, _) = server
        .post(
            "/auth/register",
            None,
            &json!({ "username": "dave2", "email": "dave@lab.io", "password": "x" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn usernames_are_trimmed_and_single_segment() {
    let server = spawn_server().await;
    let (status, body) = server
        .post(
            "/auth/register",
            None,
            &json!({ "username": " frank ", "email": "frank@lab.io", "password": "s3cret" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().unwrap().starts_with("usr-"));

    for username in [" frank ", "frank"] {
        let (status, body) = server
            .post("/auth/login", None, &json!({ "username": username, "password": "s3cret" }))
            .await;
        assert_eq!(status, StatusCode::OK, "{username:?}");
        let (_, me) = server
            .get("/auth/me", Some(body["access_token"].as_str().unwrap()))
            .await;
        assert_eq!(me["username"], "frank");
    }

    let (status, body) = server
        .post(
            "/auth/register",
            None,
            &json!({ "username": "qa/team", "email": "qa@lab.io", "password": "s3cret" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");
}

#[tokio::test]
async fn missing_or_tampered_token_is_rejected() {
    let server = spawn_server().await;
    let token = server.register_and_login("erin").await;

    let (status, _) = server.get("/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut signature: Vec<char> = signature.chars().collect();
    signature[5] = if signature[5] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{head}.{}", signature.into_iter().collect::<String>());
    let (status, body) = server.get("/auth/me", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn browsing_hides_dot_entries_and_denies_escapes() {
    let server = spawn_server().await;
    seed_mirror(&server);

    let (status, repos) = server.get("/git/fs/repos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repos, json!(["lab"]));

    let (status, entries) = server.get("/git/fs/list?repo=lab", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["blob.py", "checks"]);

    let (status, body) = server
        .get("/git/fs/file?repo=lab&path=..%2F..%2Fetc%2Fpasswd", None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "access_denied");

    let (status, _) = server.get("/git/fs/file?repo=lab&path=.git%2Fconfig", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server.get("/git/fs/file?repo=lab&path=missing.py", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.get("/git/fs/file?repo=lab&path=blob.py", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "decode");
}

#[tokio::test]
async fn live_metadata_for_file_and_directory() {
    let server = spawn_server().await;
    seed_mirror(&server);

    let (status, meta) = server
        .get("/git/fs/meta?repo=lab&path=checks%2Fping.py", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(meta["description"], "Ping every host.");
    assert_eq!(meta["author"], "ops");

    let (status, metas) = server.get("/git/fs/meta-dir?repo=lab&path=checks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metas.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn suites_are_scoped_by_token() {
    let server = spawn_server().await;
    seed_mirror(&server);
    let token = server.register_and_login("frank").await;
    let files = json!(["checks/ping.py"]);

    for _ in 0..2 {
        let (status, saved) = server
            .post(
                "/git/fs/suites",
                None,
                &json!({ "repo": "lab", "name": "smoke", "files": files }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["scope"], "repository");
    }
    let (status, saved) = server
        .post(
            "/git/fs/suites",
            Some(&token),
            &json!({ "repo": "lab", "name": "mine", "files": files }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["scope"], "user");

    let (_, shared) = server.get("/git/fs/suites?repo=lab", None).await;
    assert_eq!(shared.as_array().unwrap().len(), 1);
    assert_eq!(shared[0]["name"], "smoke");

    let (_, personal) = server.get("/git/fs/suites?repo=lab", Some(&token)).await;
    assert_eq!(personal.as_array().unwrap().len(), 1);
    assert_eq!(personal[0]["name"], "mine");

    let (_, fallback) = server.get("/git/fs/suites?repo=lab", Some("not.a.token")).await;
    assert_eq!(fallback[0]["name"], "smoke");

    let (status, runner) = server
        .get("/git/fs/suite-file?repo=lab&name=smoke", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(runner["content"].as_str().unwrap().contains("Run Process"));

    let (status, _) = server
        .get("/git/fs/suite-file?repo=lab&name=mine", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, entries) = server.get("/git/fs/list?repo=lab", None).await;
    assert!(entries.as_array().unwrap().iter().all(|e| e["name"] != "suites"));
}

#[tokio::test]
async fn bad_suite_requests_are_rejected() {
    let server = spawn_server().await;
    seed_mirror(&server);

    let (status, _) = server
        .post(
            "/git/fs/suites",
            None,
            &json!({ "repo": "lab", "name": "../evil", "files": ["checks/ping.py"] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server
        .post(
            "/git/fs/suites",
            None,
            &json!({ "repo": "lab", "name": "smoke", "files": ["../../etc/passwd"] }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server
        .post("/git/fs/suites", None, &json!({ "repo": "lab", "name": "smoke" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sync_catalogs_scripts_and_serves_content() {
    let server = spawn_server().await;
    let origin = server.dir.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    git(&origin, &["init", "--initial-branch=main"]);
    git(&origin, &["config", "user.email", "test@rig.dev"]);
    git(&origin, &["config", "user.name", "Rig Test"]);
    write(&origin.join("top.py"), "\"\"\"Top level.\"\"\"\n");
    write(&origin.join("checks/ping.py"), "\"\"\"\nPing.\n\nfield Topology: star\n\"\"\"\n");
    git(&origin, &["add", "."]);
    git(&origin, &["commit", "-m", "init"]);

    let (status, synced) = server
        .post(
            "/git/sync",
            None,
            &json!({ "name": "lab", "url": origin.to_string_lossy() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{synced}");
    assert_eq!(synced["action"], "cloned");
    assert_eq!(synced["scripts_count"], 2);
    let repo_id = synced["repo"]["id"].as_str().unwrap().to_string();

    let (_, again) = server
        .post(
            "/git/sync",
            None,
            &json!({ "name": "lab", "url": origin.to_string_lossy() }),
        )
        .await;
    assert_eq!(again["action"], "checked_out");

    let (_, dirs) = server.get(&format!("/git/dirs?repo_id={repo_id}"), None).await;
    assert_eq!(dirs, json!([".", "checks"]));

    let (status, scripts) = server
        .get(&format!("/git/scripts?repo_id={repo_id}&dir=checks"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scripts.as_array().unwrap().len(), 1);
    assert_eq!(scripts[0]["topology"], "star");

    let (status, _) = server.get("/git/scripts?dir=checks", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = scripts[0]["id"].as_str().unwrap();
    let (status, content) = server.get(&format!("/git/scripts/{id}/content"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content["path"], "checks/ping.py");
    assert!(content["content"].as_str().unwrap().contains("Ping."));

    let (status, _) = server
        .post(
            "/git/sync",
            None,
            &json!({ "name": "broken", "url": server.dir.path().join("nowhere").to_string_lossy() }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn inventory_requires_a_token() {
    let server = spawn_server().await;
    let (status, body) = server.get("/inventory/brands", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn inventory_crud_and_network_rules() {
    let server = spawn_server().await;
    let token = server.register_and_login("grace").await;
    let t = Some(token.as_str());

    let (status, brand) = server.post("/inventory/brands", t, &json!({ "name": "Acme" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let brand_id = brand["id"].as_str().unwrap();

    let (status, renamed) = server
        .send(
            reqwest::Method::PATCH,
            &format!("/inventory/brands/{brand_id}"),
            t,
            &json!({ "name": "Acme Corp" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Acme Corp");

    let (status, _) = server
        .send(
            reqwest::Method::PATCH,
            &format!("/inventory/brands/{brand_id}"),
            t,
            &json!({ "colour": "red" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, kind) = server
        .post("/inventory/equipment-types", t, &json!({ "name": "switch", "family": "l2" }))
        .await;
    let (_, location) = server
        .post("/inventory/locations", t, &json!({ "site": "HQ", "rack": "R1" }))
        .await;
    let (_, scope) = server.post("/inventory/scopes", t, &json!({ "description": "lab" })).await;
    let (_, library) = server.post("/inventory/libraries", t, &json!({ "name": "netlib" })).await;
    let (status, network) = server
        .post("/inventory/networks", t, &json!({ "protocol": "ipv4", "ip": "10.0.0.1" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server
        .post("/inventory/networks", t, &json!({ "protocol": "ipv4", "ip": "10.0.0.1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");

    let (status, _) = server
        .post("/inventory/networks", t, &json!({ "protocol": "ipv4", "ip": "10.0.0.300" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let equipment = json!({
        "name": "core-1",
        "type_id": kind["id"],
        "net_id": network["id"],
        "location_id": location["id"],
        "scope_id": scope["id"],
        "lib_id": library["id"],
        "brand_id": brand_id,
    });
    let (status, item) = server.post("/inventory/equipment", t, &equipment).await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["id"].as_str().unwrap();

    let mut second = equipment.clone();
    second["name"] = json!("core-2");
    let (status, body) = server.post("/inventory/equipment", t, &second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("net_id"));

    let (_, ctype) = server
        .post("/inventory/credential-types", t, &json!({ "name": "ssh" }))
        .await;
    let (status, credential) = server
        .post(
            "/inventory/credentials",
            t,
            &json!({ "cred_type_id": ctype["id"], "equipment_id": item_id, "username": "admin", "port": 22 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let credential_id = credential["id"].as_str().unwrap();

    let (_, listed) = server
        .get(&format!("/inventory/credentials?equipment_id={item_id}"), t)
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = server
        .send(reqwest::Method::DELETE, &format!("/inventory/equipment/{item_id}"), t, &json!(null))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = server
        .get(&format!("/inventory/credentials/{credential_id}"), t)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}
