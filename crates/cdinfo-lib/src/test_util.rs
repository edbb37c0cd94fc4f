//! In-process fake servers for exercising the transports over real sockets.

use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Accepts one CDDBP connection, sends `greeting`, then answers each received command with
/// the next entry of `replies`. Keeps reading until the client hangs up and returns every
/// command line received.
pub async fn serve_cddbp(
    greeting: &'static str,
    replies: Vec<&'static str>,
) -> (SocketAddr, JoinHandle<Vec<String>>) {
    spawn_cddbp(greeting, replies, false).await
}

/// Like [`serve_cddbp`] but closes the connection right after the last reply.
pub async fn serve_cddbp_and_hang_up(
    greeting: &'static str,
    replies: Vec<&'static str>,
) -> (SocketAddr, JoinHandle<Vec<String>>) {
    spawn_cddbp(greeting, replies, true).await
}

async fn spawn_cddbp(
    greeting: &'static str,
    replies: Vec<&'static str>,
    hang_up: bool,
) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut received = Vec::new();

        writer
            .write_all(format!("{greeting}\r\n").as_bytes())
            .await
            .unwrap();

        for reply in replies {
            match read_command(&mut reader).await {
                Some(command) => received.push(command),
                None => return received,
            }
            writer.write_all(reply.as_bytes()).await.unwrap();
        }

        if hang_up {
            writer.shutdown().await.ok();
            return received;
        }

        while let Some(command) = read_command(&mut reader).await {
            received.push(command);
        }

        received
    });

    (addr, handle)
}

async fn read_command<R>(reader: &mut R) -> Option<String>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Accepts one HTTP request, answers it with `status` and `body`, and returns the raw
/// request text (head and body).
pub async fn serve_http_once(
    status: &'static str,
    body: String,
) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_http_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        request
    });

    (addr, handle)
}

async fn read_http_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);

        if let Some(head_end) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// HTTP client that ignores proxy settings from the environment.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
