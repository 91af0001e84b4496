use std::io::{Seek, Write};

use multipart_body::{Content, Multipart};

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

// A body mixing all three content sources, together with the bytes it should
// produce.
fn mixed_body() -> (Multipart, Vec<u8>) {
    let mut body = Multipart::with_boundary("test-boundary", "multipart/test").unwrap();
    let mut expected = Vec::new();

    for i in 0..100 {
        let line = format!("This is test line {}\n", i);
        expected.extend_from_slice(line.as_bytes());
        body.add_content(line).unwrap();
    }

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"file contents").unwrap();
    file.rewind().unwrap();
    expected.extend_from_slice(b"file contents");
    body.add_content(Content::from(file)).unwrap();

    let mut producer_data = b"produced contents".to_vec();
    expected.extend_from_slice(&producer_data);
    body.add_content(Content::from_producer(move |max| {
        let chunk: Vec<u8> = producer_data
            .drain(..producer_data.len().min(max))
            .collect();
        Ok(chunk)
    }))
    .unwrap();

    for i in 0..100 {
        let line = format!("This is test line {}\n", i);
        expected.extend_from_slice(line.as_bytes());
        body.add_content(line).unwrap();
    }

    body.finish().unwrap();
    expected.extend_from_slice(b"--test-boundary--\r\n");

    (body, expected)
}

#[test]
fn buffering_replaces_the_parts_with_one_literal() {
    let (mut body, expected) = mixed_body();
    assert!(!body.is_buffered());
    // The producer part has no declared length.
    assert_eq!(body.content_length(), None);

    let buffered = body.buffer().unwrap().to_vec();
    assert!(body.is_buffered());
    assert_eq!(buffered, expected);
    assert_eq!(body.content_length(), Some(expected.len() as u64));

    // Buffering reset the cursor, so reads replay the body from the start.
    assert_eq!(read_all(&mut body, 20), expected);

    // A second buffer call is a no-op returning the same bytes.
    let again = body.buffer().unwrap().to_vec();
    assert_eq!(again, expected);
    assert_eq!(read_all(&mut body, 20), expected);
}

#[test]
fn buffer_size_does_not_change_the_output() {
    let (mut small, expected) = mixed_body();
    let (mut large, _) = mixed_body();

    assert_eq!(small.buffer_with_size(7).unwrap(), expected);
    assert_eq!(large.buffer_with_size(1 << 20).unwrap(), expected);
}
