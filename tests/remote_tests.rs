mod common;

use common::{cue, gsi, stl, tti, HI};
use stlparser::{
    extract_cues, probe_remote_detailed, read_remote_header, ContainerFormat, DecoderOptions,
    StlParserError,
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Serve `body` at `/<name>` with HEAD and range GET support.
fn serve_file(rt: &tokio::runtime::Runtime, server: &MockServer, name: &str, body: Vec<u8>) {
    let len_header = body.len().to_string();
    let file_path = format!("/{}", name);
    rt.block_on(async {
        Mock::given(method("HEAD"))
            .and(path(file_path.as_str()))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Content-Length", len_header.as_str()),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(file_path.as_str()))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(body))
            .mount(server)
            .await;
    });
}

#[test]
fn test_remote_cues() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    let body = stl(
        gsi("STL25.01", "00"),
        &[
            cue(1, 5, 7, &HI),
            tti(2, 0xff, 1, [0, 0, 8, 0], [0, 0, 9, 0], b"\x0bskip"),
            cue(3, 30, 32, &[0x0b, b'O', b'K', 0x0a]),
        ],
    );
    serve_file(&rt, &server, "programme.stl", body);

    let url = format!("{}/programme.stl", server.uri());
    let cues = extract_cues(&url, DecoderOptions::default());
    assert!(cues.is_ok(), "remote decode failed: {:?}", cues.err());
    let cues = cues.unwrap();
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "HI");
    assert_eq!(cues[1].text, "OK");
    assert_eq!(cues[1].start, 30.0);
}

#[test]
fn test_remote_header_and_probe() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    serve_file(&rt, &server, "a.stl", stl(gsi("STL30.01", "03"), &[cue(1, 1, 2, &HI)]));
    serve_file(&rt, &server, "b.bin", vec![0u8; 2000]);

    let header = read_remote_header(&format!("{}/a.stl", server.uri())).unwrap();
    assert_eq!(header.frame_rate(), 30);
    assert_eq!(header.code_page_name(), "iso-8859-7");

    let probe = probe_remote_detailed(&format!("{}/a.stl", server.uri())).unwrap();
    assert!(probe.is_valid);
    assert_eq!(probe.format, ContainerFormat::Stl30);
    assert_eq!(probe.size, 1024 + 128);

    let probe = probe_remote_detailed(&format!("{}/b.bin", server.uri())).unwrap();
    assert!(!probe.is_valid);
    assert_eq!(probe.size, 2000);
}

#[test]
fn test_remote_missing_file() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());

    let url = format!("{}/missing.stl", server.uri());
    let err = extract_cues(&url, DecoderOptions::default()).unwrap_err();
    assert!(matches!(err, StlParserError::Stream(_)));
}
