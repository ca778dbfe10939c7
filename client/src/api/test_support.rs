#[cfg(test)]
pub mod mock {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use reqwest::Method;
    use serde_json::Value;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;

    /// Minimal HTTP/1.1 stub server for exercising the client against real
    /// sockets. Routes are matched on method + path, last registration wins.
    #[derive(Clone)]
    pub struct MockServer {
        addr: SocketAddr,
        routes: Arc<Mutex<Vec<Route>>>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        status: u16,
        body: String,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind mock listener");
            let addr = listener.local_addr().expect("mock listener addr");
            let routes: Arc<Mutex<Vec<Route>>> = Arc::new(Mutex::new(Vec::new()));

            let accept_routes = Arc::clone(&routes);
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    let routes = Arc::clone(&accept_routes);
                    tokio::spawn(async move {
                        let _ = serve_connection(stream, routes).await;
                    });
                }
            });

            Self { addr, routes }
        }

        pub fn url(&self, path: &str) -> String {
            format!("http://{}{}", self.addr, path)
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let route = Route {
                method: when.method.expect("mock requires method"),
                path: when.path.expect("mock requires path"),
                status: then.status.unwrap_or(200),
                body: then
                    .body
                    .map(|body| body.to_string())
                    .unwrap_or_else(|| "{}".to_string()),
            };
            self.routes.lock().expect("mock lock").push(route);
        }
    }

    async fn serve_connection(
        mut stream: TcpStream,
        routes: Arc<Mutex<Vec<Route>>>,
    ) -> std::io::Result<()> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                return Ok(());
            }
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(pos) = find_header_end(&buffer) {
                break pos;
            }
            if buffer.len() > 64 * 1024 {
                return Ok(());
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();

        // Drain the request body so the client never sees a reset mid-write.
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        let already_read = buffer.len() - (header_end + 4);
        let mut remaining = content_length.saturating_sub(already_read);
        while remaining > 0 {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                break;
            }
            remaining = remaining.saturating_sub(read);
        }

        let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
        let method = request_line.next().unwrap_or("").to_string();
        let path = request_line
            .next()
            .unwrap_or("")
            .split('?')
            .next()
            .unwrap_or("")
            .to_string();

        let route = routes.lock().ok().and_then(|routes| {
            routes
                .iter()
                .rev()
                .find(|route| route.method.as_str() == method && route.path == path)
                .cloned()
        });

        let (status, body) = match route {
            Some(route) => (route.status, route.body),
            None => (
                404,
                format!(
                    "{{\"error\":\"No mock for {} {}\",\"code\":\"NOT_FOUND\"}}",
                    method, path
                ),
            ),
        };

        let reason = if status < 400 { "OK" } else { "ERROR" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;
        Ok(())
    }

    fn find_header_end(buffer: &[u8]) -> Option<usize> {
        buffer.windows(4).position(|window| window == b"\r\n\r\n")
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
