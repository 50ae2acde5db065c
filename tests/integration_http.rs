//! End-to-end: project API (tiny_http) -> compile trigger -> output directory
#![cfg(all(feature = "http", feature = "server"))]

use std::fs;

use sitecompiler::server::COMPILE_ROUTE;
use sitecompiler::{CompileServer, CompilerConfig};
use tiny_http::{Response, Server};

/// Start a project API that answers every request with `body` and `status`.
fn start_project_api(body: String, status: u16) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = Response::from_string(body.clone())
                .with_status_code(status)
                .with_header(
                    "Content-Type: application/json"
                        .parse::<tiny_http::Header>()
                        .unwrap(),
                );
            let _ = request.respond(response);
        }
    });
    format!("http://{}/api/design-tool-manager/get-project-json-data/u1/TestProject", addr)
}

fn trigger(server_addr: String) -> std::thread::JoinHandle<u16> {
    std::thread::spawn(move || {
        let client = reqwest::blocking::Client::new();
        client
            .post(format!("http://{}{}", server_addr, COMPILE_ROUTE))
            .send()
            .map(|r| r.status().as_u16())
            .unwrap_or(0)
    })
}

#[test]
fn test_trigger_compiles_remote_project() {
    let fixture = fs::read_to_string("tests/fixtures/project.json").unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = CompilerConfig {
        source_url: start_project_api(fixture, 200),
        output_dir: out.path().to_path_buf(),
        timeout_ms: 5000,
        ..Default::default()
    };

    let service = sitecompiler::new_service(&config).expect("service");
    let mut server = CompileServer::bind("127.0.0.1:0", service).expect("bind");
    let client = trigger(server.server_addr().to_string());
    server.handle_next().expect("handle");
    assert_eq!(client.join().unwrap(), 200);

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    let css = fs::read_to_string(out.path().join("Page.css")).unwrap();
    assert!(html.contains("<title>Landing</title>"));
    assert!(html.contains("<img class=\"HeroClass\" src=\"assets/hero.png\"/>"));
    assert!(css.contains(".TaglineClass{ \nfont-size: 18px;\n} \n"));
}

#[test]
fn test_trigger_reports_upstream_failure() {
    let out = tempfile::tempdir().unwrap();
    let config = CompilerConfig {
        source_url: start_project_api("{\"error\":true}".to_string(), 500),
        output_dir: out.path().join("site"),
        timeout_ms: 5000,
        ..Default::default()
    };

    let service = sitecompiler::new_service(&config).expect("service");
    let mut server = CompileServer::bind("127.0.0.1:0", service).expect("bind");
    let client = trigger(server.server_addr().to_string());
    server.handle_next().expect("handle");
    assert_eq!(client.join().unwrap(), 500);
    assert!(!out.path().join("site").exists());
}

#[test]
fn test_flagged_payload_is_not_compiled() {
    let out = tempfile::tempdir().unwrap();
    let config = CompilerConfig {
        source_url: start_project_api(
            r#"{"error":true,"projectPages":{"pages":[{"name":"Home"}]}}"#.to_string(),
            200,
        ),
        output_dir: out.path().join("site"),
        timeout_ms: 5000,
        ..Default::default()
    };

    let service = sitecompiler::new_service(&config).expect("service");
    let mut server = CompileServer::bind("127.0.0.1:0", service).expect("bind");
    let client = trigger(server.server_addr().to_string());
    server.handle_next().expect("handle");
    assert_eq!(client.join().unwrap(), 500);
    assert!(!out.path().join("site").exists());
}
