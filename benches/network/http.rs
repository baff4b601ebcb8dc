use criterion::{BatchSize, Criterion, Throughput};
use rawhttp::network::application::http::{
    Client, Form, HeaderMap, Method, Options, RawResponse, Request, Response, Target,
};
use rawhttp::network::error::Error;
use rawhttp::network::{Close, Connect, Connection, Read, ReadTimeout, Write};
use std::hint::black_box;
use std::time::Duration;

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
    Date: Mon, 27 Jul 2009 12:28:53 GMT\r\n\
    Server: Apache/2.2.14 (Win32)\r\n\
    Last-Modified: Wed, 22 Jul 2009 19:15:56 GMT\r\n\
    Content-Length: 88\r\n\
    Content-Type: text/html; charset=ISO-8859-1\r\n\
    Connection: Closed\r\n\
    \r\n\
    <html><body><h1>Hello, World!</h1><p>Caf\xe9 cr\xe8me br\xfbl\xe9e</p></body></html>";

/// Serves `RESPONSE` once, then reports the peer closed.
struct ReplayConnection {
    offset: usize,
}

impl Read for ReplayConnection {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let rest = &RESPONSE[self.offset..];
        let len = buf.len().min(rest.len());
        buf[..len].copy_from_slice(&rest[..len]);
        self.offset += len;
        Ok(len)
    }
}

impl Write for ReplayConnection {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl ReadTimeout for ReplayConnection {
    fn set_read_timeout(&mut self, _timeout: Duration) -> Result<(), Error> {
        Ok(())
    }
}

impl Close for ReplayConnection {
    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}

impl Connection for ReplayConnection {}

#[derive(Debug)]
struct ReplayNetwork;

impl Connect for ReplayNetwork {
    type Connection = ReplayConnection;

    fn connect(&mut self, _host: &str, _port: u16) -> Result<Self::Connection, Error> {
        Ok(ReplayConnection { offset: 0 })
    }
}

pub fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_request");
    let target = Target::parse("http://example.test:8080/api/items?page=2").unwrap();
    let form: Form = (0..16)
        .map(|i| (format!("field{i}"), format!("value with spaces & symbols {i}")))
        .collect();

    group.bench_function("get", |b| {
        b.iter(|| {
            let request = Request {
                method: Method::Get,
                target: &target,
                form: None,
            };
            black_box(request.to_bytes())
        })
    });
    group.bench_function("post_form", |b| {
        b.iter(|| {
            let request = Request {
                method: Method::Post,
                target: &target,
                form: Some(&form),
            };
            black_box(request.to_bytes())
        })
    });
    group.finish();
}

pub fn bench_parse_headers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_response");
    group.throughput(Throughput::Bytes(RESPONSE.len() as u64));
    group.bench_function("split_tokenize_decode", |b| {
        b.iter_batched(
            || RESPONSE.to_vec(),
            |data| {
                let raw = RawResponse::split(data).unwrap();
                let headers = HeaderMap::parse(&raw.header_block);
                black_box((headers.status_code(), headers.charset().len()));
                black_box(Response::from_raw(raw).unwrap())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_get_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_round_trip");
    group.throughput(Throughput::Bytes(RESPONSE.len() as u64));
    group.bench_function("replayed", |b| {
        let mut client = Client::new(ReplayNetwork, Options::default());
        b.iter(|| black_box(client.get("http://example.test/index.html").unwrap()))
    });
    group.finish();
}
