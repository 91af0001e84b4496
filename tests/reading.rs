use std::io::{Read, Seek, Write};

use multipart_body::{AlternativeBuilder, Content, FormDataBuilder, Multipart};
use test_case::test_case;

fn read_all(body: &mut Multipart, chunk_size: usize) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let chunk = body.read_chunk(chunk_size).unwrap();
        if chunk.is_empty() {
            return out;
        }
        out.extend_from_slice(&chunk);
    }
}

const ALTERNATIVE_BODY: &str = "\
    --test-boundary\r\n\
    Content-Type: text/plain\r\n\
    \r\n\
    Hello World\r\n\
    --test-boundary\r\n\
    Content-Type: text/html\r\n\
    \r\n\
    <html>\nHello World\n</html>\r\n\
    --test-boundary--\r\n\
";

fn alternative_body() -> Multipart {
    AlternativeBuilder::with_boundary("test-boundary")
        .part("Hello World", "text/plain", None)
        .unwrap()
        .part("<html>\nHello World\n</html>", "text/html", None)
        .unwrap()
        .finish()
        .unwrap()
}

#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(7)]
#[test_case(20)]
#[test_case(64)]
#[test_case(8192)]
fn output_is_chunk_size_independent(chunk_size: usize) {
    let mut body = alternative_body();

    assert_eq!(read_all(&mut body, chunk_size), ALTERNATIVE_BODY.as_bytes());
}

#[test]
fn content_length_matches_the_output() {
    let body = alternative_body();

    assert_eq!(
        body.content_type(),
        "multipart/alternative; boundary=test-boundary"
    );
    assert_eq!(body.content_length(), Some(ALTERNATIVE_BODY.len() as u64));
}

#[test]
fn empty_body_yields_only_the_terminator() {
    let mut body = FormDataBuilder::with_boundary("test-boundary")
        .finish()
        .unwrap();

    assert_eq!(body.content_length(), Some(19));
    assert_eq!(read_all(&mut body, 20), b"--test-boundary--\r\n");
}

#[test]
fn generated_boundary_is_uuid_shaped() {
    let body = FormDataBuilder::new().finish().unwrap();

    let boundary = body
        .content_type()
        .strip_prefix("multipart/form-data; boundary=")
        .unwrap()
        .to_owned();
    assert_eq!(body.boundary(), boundary);

    let groups: Vec<&str> = boundary.split('-').collect();
    assert_eq!(
        groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
        [8, 4, 4, 4, 12]
    );
    assert!(groups
        .iter()
        .flat_map(|g| g.chars())
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn mixed_content_sources_concatenate_in_order() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"file contents").unwrap();
    file.rewind().unwrap();

    let mut producer_data = b"produced contents".to_vec();
    let producer = move |max: usize| {
        let chunk: Vec<u8> = producer_data
            .drain(..producer_data.len().min(max))
            .collect();
        Ok(chunk)
    };

    let mut body = Multipart::with_boundary("test-boundary", "multipart/test").unwrap();
    body.add_content("literal contents").unwrap();
    body.add_content(Content::from_reader_sized(file, 13)).unwrap();
    body.add_content(Content::from_producer(producer)).unwrap();
    body.add_content("more literal contents").unwrap();
    body.finish().unwrap();

    // The producer did not declare a length.
    assert_eq!(body.content_length(), None);

    let expected = b"literal contentsfile contentsproduced contentsmore literal contents--test-boundary--\r\n";
    assert_eq!(read_all(&mut body, 20), expected.as_slice());
}

#[test]
fn body_drains_through_the_read_trait() {
    let mut body = alternative_body();

    let mut out = String::new();
    body.read_to_string(&mut out).unwrap();

    assert_eq!(out, ALTERNATIVE_BODY);
}

#[test]
fn reading_is_single_pass() {
    let mut body = alternative_body();

    let first = read_all(&mut body, 20);
    assert_eq!(first, ALTERNATIVE_BODY.as_bytes());

    // Everything was consumed; only buffering can replay it.
    assert!(body.read_chunk(20).unwrap().is_empty());
    assert_eq!(body.buffer().unwrap(), ALTERNATIVE_BODY.as_bytes());
    assert_eq!(read_all(&mut body, 20), ALTERNATIVE_BODY.as_bytes());
}
