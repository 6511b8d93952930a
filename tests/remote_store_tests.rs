// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bridalbooks::models::{EventInput, ServiceCategory};
use bridalbooks::remote::RemoteStore;
use bridalbooks::store::{RecordStore, RequestContext};
use rust_decimal::Decimal;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Answers a single HTTP request with `status` and `body`, handing back the
/// raw request text.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if raw.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&raw).to_string()
    });
    (format!("http://{}", addr), handle)
}

fn store(base: &str) -> RemoteStore {
    let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
    RemoteStore::with_client(base, client)
}

#[test]
fn list_events_sends_bearer_token() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"date":"2025-01-10","eventName":"Wedding","clientName":"Asha","serviceType":"Bridal","amount":5000.0,"notes":""}]"#,
    );
    let events = store(&base)
        .list_events(&RequestContext::with_token("s3cret"))
        .unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("GET /api/events HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer s3cret"));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].amount, Decimal::from(5000));
    assert_eq!(events[0].service_type, ServiceCategory::Bridal);
}

#[test]
fn null_body_is_an_empty_collection() {
    let (base, server) = serve_once("200 OK", "null");
    let expenses = store(&format!("{}/", base))
        .list_expenses(&RequestContext::anonymous())
        .unwrap();
    let request = server.join().unwrap();

    assert!(expenses.is_empty());
    assert!(!request.to_ascii_lowercase().contains("authorization:"));
}

#[test]
fn null_description_does_not_fail_the_listing() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"date":"2025-02-01","expenseName":"Cones","description":null,"serviceType":"Mehandi","amount":120.0,"notes":null},
            {"id":2,"date":"2025-02-03","expenseName":"Kit","description":"refill","serviceType":"Bridal","amount":80,"notes":null}]"#,
    );
    let expenses = store(&base)
        .list_expenses(&RequestContext::with_token("t"))
        .unwrap();
    server.join().unwrap();

    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].description, "");
    assert_eq!(expenses[1].description, "refill");
}

#[test]
fn update_puts_full_record_to_id_path() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"id":9,"date":"2025-03-01","eventName":"Haldi","clientName":"Riya","serviceType":"Mehandi","amount":1500,"notes":null}"#,
    );
    let input = EventInput {
        date: "2025-03-01".into(),
        event_name: "Haldi".into(),
        client_name: "Riya".into(),
        service_type: ServiceCategory::Mehandi,
        amount: Decimal::from(1500),
        notes: None,
    };
    let saved = store(&base)
        .update_event(&RequestContext::with_token("t"), 9, &input)
        .unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("PUT /api/events/9 HTTP/1.1"));
    assert!(request.contains(r#""serviceType":"Mehandi""#));
    assert!(request.contains(r#""eventName":"Haldi""#));
    assert_eq!(saved.id, 9);
}

#[test]
fn rejected_requests_are_errors() {
    let (base, server) = serve_once("403 Forbidden", "");
    let result = store(&base).delete_expense(&RequestContext::anonymous(), 4);
    let request = server.join().unwrap();

    assert!(request.starts_with("DELETE /api/expenses/4 HTTP/1.1"));
    assert!(result.is_err());
}
