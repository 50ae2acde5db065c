//! HTTP trigger surface for compile requests.
//!
//! A single route, `POST /api/make-website`, runs the compile service and
//! answers with a bare status code: `200` on success, `500` on failure.
//! Requests are handled one at a time, so two compiles never write the same
//! output files concurrently.

use log::{error, info, warn};
use tiny_http::{ListenAddr, Method, Request, Response, Server};

use crate::service::CompileService;
use crate::sink::OutputSink;
use crate::source::PayloadSource;
use crate::{Error, Result};

/// Path of the compile route
pub const COMPILE_ROUTE: &str = "/api/make-website";

pub struct CompileServer<S, K> {
    server: Server,
    service: CompileService<S, K>,
}

impl<S: PayloadSource, K: OutputSink> CompileServer<S, K> {
    /// Bind to `addr` (e.g. `127.0.0.1:8200`; port `0` picks a free port).
    pub fn bind(addr: &str, service: CompileService<S, K>) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| Error::ServerError(format!("Failed to bind {}: {}", addr, e)))?;
        info!("listening on {}", server.server_addr());
        Ok(Self { server, service })
    }

    pub fn server_addr(&self) -> ListenAddr {
        self.server.server_addr()
    }

    pub fn service(&self) -> &CompileService<S, K> {
        &self.service
    }

    /// Block for the next request and answer it.
    pub fn handle_next(&mut self) -> Result<()> {
        let request = self
            .server
            .recv()
            .map_err(|e| Error::ServerError(format!("Failed to receive request: {}", e)))?;
        dispatch(&mut self.service, request);
        Ok(())
    }

    /// Serve requests until the listener shuts down.
    pub fn serve(self) -> Result<()> {
        let Self {
            server,
            mut service,
        } = self;
        for request in server.incoming_requests() {
            dispatch(&mut service, request);
        }
        Ok(())
    }
}

fn dispatch<S: PayloadSource, K: OutputSink>(service: &mut CompileService<S, K>, request: Request) {
    let path = request.url().split('?').next().unwrap_or("").to_string();
    let status = if path != COMPILE_ROUTE {
        404
    } else if *request.method() != Method::Post {
        405
    } else {
        match service.run() {
            Ok(_) => 200,
            Err(e) => {
                error!("compile request failed: {}", e);
                500
            }
        }
    };

    info!("{} {} -> {}", request.method(), path, status);
    if let Err(e) = request.respond(Response::from_string("").with_status_code(status)) {
        warn!("failed to send response: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageEntry, ProjectPayload};
    use crate::sink::MemorySink;

    struct Fixed(ProjectPayload);

    impl PayloadSource for Fixed {
        fn fetch(&self) -> Result<ProjectPayload> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".into()
        }
    }

    fn send(addr: &str, method: &str, path: &str) -> u16 {
        use std::io::{Read, Write};
        let mut stream = std::net::TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "{} {} HTTP/1.1\r\nHost: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            method, path, addr
        )
        .unwrap();
        let mut reply = String::new();
        stream.read_to_string(&mut reply).unwrap();
        reply
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .unwrap_or(0)
    }

    fn server_with(payload: ProjectPayload) -> CompileServer<Fixed, MemorySink> {
        let service = CompileService::new(Fixed(payload), MemorySink::new());
        CompileServer::bind("127.0.0.1:0", service).expect("bind")
    }

    fn request_once(server: &mut CompileServer<Fixed, MemorySink>, method: &str, path: &str) -> u16 {
        let addr = server.server_addr().to_string();
        let method = method.to_string();
        let path = path.to_string();
        let client = std::thread::spawn(move || send(&addr, &method, &path));
        server.handle_next().expect("handle");
        client.join().unwrap()
    }

    #[test]
    fn post_compiles_page() {
        let mut payload = ProjectPayload::default();
        payload.page_listing.pages.push(PageEntry {
            name: "Home".into(),
            ..Default::default()
        });
        let mut server = server_with(payload);

        assert_eq!(request_once(&mut server, "POST", COMPILE_ROUTE), 200);
        assert_eq!(server.service().sink().sites.len(), 1);
    }

    #[test]
    fn compile_failure_is_a_500() {
        let mut server = server_with(ProjectPayload::default());
        assert_eq!(request_once(&mut server, "POST", COMPILE_ROUTE), 500);
        assert!(server.service().sink().sites.is_empty());
    }

    #[test]
    fn wrong_method_and_path_are_rejected() {
        let mut server = server_with(ProjectPayload::default());
        assert_eq!(request_once(&mut server, "GET", COMPILE_ROUTE), 405);
        assert_eq!(request_once(&mut server, "POST", "/api/other"), 404);
    }
}
