//! Provider integration tests
//!
//! Register content through a real provider and fetch it back over HTTP.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{FOO, HELLO, JSON};
    use crate::common::{FixtureTree, client};
    use crate::{assert_err, assert_ok};
    use bgserve::{
        Config, Content, ContentMount, CreateOptions, FileMount, Mount, Provider, ProviderError,
        ResourceKind,
    };
    use std::collections::HashSet;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn content_type(resp: &reqwest::Response) -> String {
        resp.headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn test_serves_text_file() {
        let tree = FixtureTree::new();
        let provider = assert_ok!(Provider::with_defaults());

        let handle = assert_ok!(provider.create(tree.path("hello.txt")));
        assert_eq!(handle.kind(), ResourceKind::SingleFile);
        assert!(handle.id().ends_with(".txt"));

        let resp = client().get(handle.url()).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(content_type(&resp).contains("text/plain"));
        assert_eq!(resp.text().await.unwrap(), HELLO);
    }

    #[tokio::test]
    async fn test_serves_json_file() {
        let tree = FixtureTree::new();
        let provider = Provider::with_defaults().unwrap();

        let handle = provider.create(tree.path("data.json")).unwrap();
        let resp = client().get(handle.url()).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(content_type(&resp).contains("application/json"));

        let body: serde_json::Value = resp.json().await.unwrap();
        let expected: serde_json::Value = serde_json::from_str(JSON).unwrap();
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_serves_raw_text() {
        let provider = Provider::with_defaults().unwrap();

        let handle = provider.create(HELLO).unwrap();
        assert_eq!(handle.kind(), ResourceKind::InMemory);
        assert_eq!(handle.mount_prefix(), "/contents");

        let resp = client().get(handle.url()).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(content_type(&resp).contains("text/plain"));
        assert_eq!(resp.text().await.unwrap(), HELLO);
    }

    #[tokio::test]
    async fn test_serves_csv_with_extension() {
        let provider = Provider::with_defaults().unwrap();
        let csv = "a,b,c,\n1,2,3,\n4,5,6";

        let handle = provider
            .create_with(csv, CreateOptions::new().with_extension(".csv"))
            .unwrap();
        assert!(handle.id().ends_with(".csv"));

        let resp = client().get(handle.url()).send().await.unwrap();
        assert!(content_type(&resp).contains("text/csv"));
        assert_eq!(resp.text().await.unwrap(), csv);
    }

    #[tokio::test]
    async fn test_serves_raw_bytes() {
        let provider = Provider::with_defaults().unwrap();
        let payload: Vec<u8> = (0..=255).collect();

        let handle = provider.create(payload.clone()).unwrap();
        let resp = client().get(handle.url()).send().await.unwrap();
        assert!(content_type(&resp).contains("application/octet-stream"));
        assert_eq!(resp.bytes().await.unwrap().to_vec(), payload);
    }

    #[tokio::test]
    async fn test_serves_directory() {
        let tree = FixtureTree::new();
        let provider = Provider::with_defaults().unwrap();

        let handle = provider.create(tree.root()).unwrap();
        assert_eq!(handle.kind(), ResourceKind::DirectoryTree);
        assert!(!handle.id().contains('.'));

        let http = client();
        let hello = http.get(handle.url_for("hello.txt")).send().await.unwrap();
        assert_eq!(hello.text().await.unwrap(), HELLO);

        let foo = http
            .get(handle.url_for("nested_dir/foo.txt"))
            .send()
            .await
            .unwrap();
        assert_eq!(foo.status(), 200);
        assert_eq!(foo.text().await.unwrap(), FOO);
    }

    #[tokio::test]
    async fn test_unregistered_path_is_404() {
        let provider = Provider::with_defaults().unwrap();
        let base = provider.start().unwrap();

        let http = client();
        for path in ["/", "/nothing", "/files/unknown", "/contents/unknown.txt"] {
            let resp = http.get(format!("{}{}", base, path)).send().await.unwrap();
            assert_eq!(resp.status(), 404, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_identical_content_gets_distinct_urls() {
        let tree = FixtureTree::new();
        let provider = Provider::with_defaults().unwrap();

        let a = provider.create(HELLO).unwrap();
        let b = provider.create(HELLO).unwrap();
        assert_ne!(a.url(), b.url());

        let c = provider.create(tree.path("hello.txt")).unwrap();
        let d = provider.create(tree.path("hello.txt")).unwrap();
        assert_ne!(c.url(), d.url());
    }

    #[test]
    fn test_concurrent_creates_are_unique() {
        let provider = Arc::new(Provider::with_defaults().unwrap());

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| provider.create("same").unwrap().url().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let urls: Vec<String> = threads
            .into_iter()
            .flat_map(|t| t.join().unwrap())
            .collect();
        let unique: HashSet<_> = urls.iter().collect();
        assert_eq!(urls.len(), 200);
        assert_eq!(unique.len(), urls.len());

        let base = provider.url().unwrap();
        assert!(urls.iter().all(|url| url.starts_with(&base)));
    }

    #[test]
    fn test_unhandled_input() {
        let provider = Provider::new(vec![]).unwrap();
        let err = assert_err!(provider.create("anything"));
        assert!(matches!(err, ProviderError::UnhandledInput(_)));

        let tree = FixtureTree::new();
        let files_only = Provider::new(vec![Box::new(FileMount::default())]).unwrap();
        let err = assert_err!(files_only.create(HELLO));
        assert!(matches!(err, ProviderError::UnhandledInput(_)));

        let err = assert_err!(files_only.create(tree.path("missing.txt")));
        assert!(matches!(err, ProviderError::UnhandledInput(_)));
        assert!(!files_only.is_running());
    }

    #[test]
    fn test_first_matching_mount_wins() {
        let mounts: Vec<Box<dyn Mount>> = vec![
            Box::new(ContentMount::new("/a")),
            Box::new(ContentMount::new("/b")),
        ];
        let provider = Provider::new(mounts).unwrap();

        let handle = provider.create(Content::from("x")).unwrap();
        assert_eq!(handle.mount_prefix(), "/a");
        assert!(handle.url().contains("/a/"));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let provider = Provider::with_defaults().unwrap();
        provider.stop();

        provider.create(HELLO).unwrap();
        assert!(provider.is_running());
        provider.stop();
        provider.stop();
        assert!(!provider.is_running());
    }

    #[test]
    fn test_url_requires_running_server() {
        let provider = Provider::with_defaults().unwrap();
        assert!(matches!(provider.url(), Err(ProviderError::NotRunning)));

        let base = provider.start().unwrap();
        assert_eq!(provider.url().unwrap(), base);

        provider.stop();
        assert!(matches!(provider.url(), Err(ProviderError::NotRunning)));
    }

    #[test]
    fn test_stop_lets_in_flight_download_finish() {
        // Larger than loopback socket buffers, so the server cannot finish
        // writing until the client drains the body.
        const SIZE: usize = 32 * 1024 * 1024;

        let tree = FixtureTree::new();
        let payload: Vec<u8> = (0..SIZE).map(|i| (i % 251) as u8).collect();
        let path = tree.write("large.bin", &payload);

        let mut config = Config::default();
        config.server.shutdown_timeout = 60;
        let provider = Arc::new(
            Provider::with_config(config, Provider::default_mounts()).unwrap(),
        );
        let handle = provider.create(path).unwrap();
        let base = provider.url().unwrap();
        let authority = base.trim_start_matches("http://").to_string();
        let target = &handle.url()[base.len()..];

        let mut stream = TcpStream::connect(&authority).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(30)))
            .unwrap();
        write!(
            stream,
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            target, authority
        )
        .unwrap();

        let mut received = vec![0u8; 16 * 1024];
        stream.read_exact(&mut received).unwrap();

        let stopper = {
            let provider = Arc::clone(&provider);
            thread::spawn(move || provider.stop())
        };
        thread::sleep(Duration::from_millis(300));
        assert!(
            !stopper.is_finished(),
            "stop returned while a download was still being sent"
        );

        stream.read_to_end(&mut received).unwrap();
        stopper.join().unwrap();

        let split = received
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .unwrap();
        let head = String::from_utf8_lossy(&received[..split]);
        assert!(head.starts_with("HTTP/1.1 200"), "{}", head);
        let body = &received[split + 4..];
        assert_eq!(body.len(), SIZE);
        assert!(body == payload.as_slice());

        assert!(!provider.is_running());
        assert!(
            TcpStream::connect(&authority).is_err(),
            "listener still accepting after stop"
        );
    }

    #[tokio::test]
    async fn test_stop_then_create_restarts() {
        let provider = Provider::with_defaults().unwrap();

        let first = provider.create(HELLO).unwrap();
        provider.stop();

        let result = client().get(first.url()).send().await;
        assert!(result.is_err(), "server still answering after stop");

        let second = provider.create("again").unwrap();
        let resp = client().get(second.url()).send().await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "again");
    }

    #[tokio::test]
    async fn test_registrations_dropped_on_stop() {
        let provider = Provider::with_defaults().unwrap();

        let first = provider.create(HELLO).unwrap();
        let base = provider.url().unwrap();
        provider.stop();
        provider.start().unwrap();

        let path = first.url().trim_start_matches(base.as_str()).to_string();
        let resp = client()
            .get(format!("{}{}", provider.url().unwrap(), path))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_file_is_read_through() {
        let tree = FixtureTree::new();
        let provider = Provider::with_defaults().unwrap();
        let handle = provider.create(tree.path("hello.txt")).unwrap();

        fs::write(tree.path("hello.txt"), "changed").unwrap();
        let resp = client().get(handle.url()).send().await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "changed");
    }

    #[tokio::test]
    async fn test_deleted_file_is_server_error() {
        let tree = FixtureTree::new();
        let provider = Provider::with_defaults().unwrap();
        let handle = provider.create(tree.path("hello.txt")).unwrap();
        let other = provider.create(HELLO).unwrap();

        fs::remove_file(tree.path("hello.txt")).unwrap();
        let http = client();
        let resp = http.get(handle.url()).send().await.unwrap();
        assert!(resp.status().is_server_error());

        let resp = http.get(other.url()).send().await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_independent_providers() {
        let a = Provider::with_defaults().unwrap();
        let b = Provider::with_defaults().unwrap();

        let ha = a.create("from a").unwrap();
        let hb = b.create("from b").unwrap();
        assert_ne!(a.url().unwrap(), b.url().unwrap());

        a.stop();
        let resp = client().get(hb.url()).send().await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "from b");
        assert!(client().get(ha.url()).send().await.is_err());
    }
}
