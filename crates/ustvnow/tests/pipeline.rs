use reqwest::Client;
use serde_json::json;
use ustvnow::{
    Error, ManifestFetcher, SessionClient, assemble, group_by_quality, parse_master,
    select_by_bandwidth,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const MASTER: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=5000000,RESOLUTION=1920x1080,CODECS=\"avc1.64001f,mp4a.40.2\"
hi.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=640x360,CODECS=\"avc1.42001e,mp4a.40.2\"
lo.m3u8
";

async fn provider() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gtv/1/live/login"))
        .and(query_param("device", "gtv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-42"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gtv/1/live/listchannels"))
        .and(query_param("token", "tok-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"streamnames": [
                {"sname": "NBC", "img": "images/nbc.png", "scode": "wnbc", "callsign": "WNBC", "t": 1}
            ]}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stream/1/live/view"))
        .and(query_param("token", "tok-42"))
        .and(query_param("scode", "wnbc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stream": format!("{}/live/wnbc/master.m3u8", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/live/wnbc/master.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn login_to_filtered_playlist() {
    let server = provider().await;
    let client = Client::new();
    let session = SessionClient::with_base_url(client.clone(), &server.uri()).unwrap();

    let token = session.authenticate("viewer@example.com", "secret").await.unwrap();
    let channels = session.list_channels(&token).await.unwrap();
    assert_eq!(channels.len(), 1);
    assert!(channels[0].available);

    let url = session
        .resolve_stream_url(&token, &channels[0].code)
        .await
        .unwrap();
    let manifest = ManifestFetcher::new(client).fetch(&url).await.unwrap();

    let groups = group_by_quality(&manifest);
    assert_eq!(groups.len(), 2);

    let group = select_by_bandwidth(&groups, 1_200_000).unwrap();
    let output = manifest.assemble_subset(&group.variants).unwrap();
    assert!(output.contains("#EXT-X-VERSION:3"));

    let filtered = parse_master(&output).unwrap();
    assert_eq!(filtered.variants().len(), 1);
    let variant = &filtered.variants()[0];
    assert_eq!(variant.bandwidth(), 1_200_000);
    assert_eq!(variant.uri(), "lo.m3u8");
    assert_eq!(variant.codecs(), vec!["avc1.42001e", "mp4a.40.2"]);

    assert!(matches!(
        select_by_bandwidth(&groups, 2_000_000),
        Err(Error::Selection { .. })
    ));
    assert!(matches!(assemble(&[]), Err(Error::Assemble(_))));
}

#[tokio::test]
async fn rejected_login_stops_the_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gtv/1/live/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gtv/1/live/listchannels"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = SessionClient::with_base_url(Client::new(), &server.uri()).unwrap();
    let err = session.authenticate("viewer", "nope").await.unwrap_err();

    let exchange = err.exchange().expect("response attached");
    assert_eq!(exchange.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(exchange.body(), "Unauthorized");
    assert!(err.to_string().starts_with("login failed"));
}
