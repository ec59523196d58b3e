//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use haul_errors::NetworkError;
    use haul_net::*;
    use httpmock::prelude::*;

    async fn collect(response: TransportResponse) -> Vec<u8> {
        let mut body = response.body;
        let mut out = Vec::new();
        while let Some(chunk) = body.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_fetch_body_and_length() {
        let server = MockServer::start_async().await;
        let content = b"test file content";
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/asset");
                then.status(200).body(content);
            })
            .await;

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/asset")).unwrap();
        let response = client.fetch(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_length, Some(content.len() as u64));
        assert_eq!(collect(response).await, content);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/redirect");
                then.status(302).header("location", "/asset");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/asset");
                then.status(200).body("redirected body");
            })
            .await;

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/redirect")).unwrap();
        let response = client.fetch(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(collect(response).await, b"redirected body");
    }

    #[tokio::test]
    async fn test_redirects_disabled() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/redirect");
                then.status(302).header("location", "/asset");
            })
            .await;

        let client = NetClient::new(NetConfig {
            max_redirects: 0,
            ..NetConfig::default()
        })
        .unwrap();
        let url = parse_url(&server.url("/redirect")).unwrap();
        let response = client.fetch(&url).await.unwrap();

        assert_eq!(response.status, 302);
        assert!(validate_status(response.status).is_err());
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("Not Found");
            })
            .await;

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&server.url("/missing")).unwrap();
        let response = client.fetch(&url).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(matches!(
            validate_status(response.status),
            Err(NetworkError::HttpError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then release a port so nothing is listening on it
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = NetClient::with_defaults().unwrap();
        let url = parse_url(&format!("http://127.0.0.1:{port}/asset")).unwrap();
        let error = client.fetch(&url).await.unwrap_err();

        assert!(matches!(error, NetworkError::ConnectionFailed(_)));
    }
}
