use ecoleta::core::{
    Category, CollectionPoint, ConfiguredLocation, Coordinate, MapRegion, PermissionStatus,
    PointsState, VisitCounter,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one HTTP response on a random local port.
/// Returns the base URL and a handle resolving to the request line received.
pub async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("Failed to read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}"), handle)
}

/// Returns a base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{addr}")
}

pub fn sample_categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            title: "Lâmpadas".to_string(),
            image_url: "http://localhost:3333/uploads/lampadas.svg".to_string(),
        },
        Category {
            id: 2,
            title: "Pilhas".to_string(),
            image_url: "http://localhost:3333/uploads/baterias.svg".to_string(),
        },
    ]
}

pub fn sample_body() -> String {
    r#"[
        {"id": 1, "title": "Lâmpadas", "image_url": "http://localhost:3333/uploads/lampadas.svg"},
        {"id": 2, "title": "Pilhas", "image_url": "http://localhost:3333/uploads/baterias.svg"}
    ]"#
    .to_string()
}

pub fn granted_at(latitude: f64, longitude: f64) -> ConfiguredLocation {
    ConfiguredLocation {
        permission: PermissionStatus::Granted,
        position: Some(Coordinate::new(longitude, latitude)),
    }
}

pub fn denied() -> ConfiguredLocation {
    ConfiguredLocation {
        permission: PermissionStatus::Denied,
        position: None,
    }
}

/// Mounts a points screen for a fresh visit.
pub fn mount(visits: &mut VisitCounter) -> PointsState {
    PointsState::mount(visits.next(), MapRegion::default(), CollectionPoint::default())
}
