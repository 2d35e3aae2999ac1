//! Byte sink behavior: buffering, flush-on-drop, io adapter.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promtext_core::{BufferedSink, ByteSink, IoSink};

#[test]
fn buffered_sink_flushes_full_buffers_and_remainder_on_drop() {
    let mut out: Vec<u8> = Vec::new();
    {
        let mut buffered = BufferedSink::new(&mut out, 4);
        buffered.write_all(b"abcdef").unwrap();
        buffered.write_byte(b'g').unwrap();
        // Only the full 4-byte chunk has been forwarded so far; the rest
        // goes out when the sink leaves scope.
    }
    assert_eq!(out, b"abcdefg");
}

#[test]
fn buffered_sink_explicit_flush() {
    let mut out: Vec<u8> = Vec::new();
    let mut buffered = BufferedSink::new(&mut out, 64);
    buffered.write_all(b"hi").unwrap();
    buffered.flush().unwrap();
    drop(buffered);
    assert_eq!(out, b"hi");
}

#[test]
fn io_sink_forwards_to_writer() {
    let mut sink = IoSink::new(Vec::<u8>::new());
    sink.write_all(b"metric 1\n").unwrap();
    assert_eq!(sink.into_inner(), b"metric 1\n");
}
