//! Integration tests for the mailsearch tools
//!
//! These drive `MailSearch` and `GetMessage` through an in-memory provider,
//! covering the full connect → search → normalize flow.

use std::sync::{Arc, Mutex};

use base64::prelude::*;
use mailsearch::gmail::api::{Header, ListResponse, MessageBody, MessagePayload, RawEmail, RawMessage, RawThread};
use mailsearch::{
    GetMessage, MailProvider, MailSearch, ProviderError, Resource, SearchError, SearchRecord,
};

/// Calls observed by the fake provider
type CallLog = Arc<Mutex<Vec<(Resource, String, u32)>>>;

/// Provider returning canned data
#[derive(Clone, Default)]
struct FakeProvider {
    messages: Vec<RawMessage>,
    threads: Vec<RawThread>,
    raw: Option<RawEmail>,
    search_error: Option<ProviderError>,
    calls: CallLog,
}

impl MailProvider for FakeProvider {
    fn search(
        &self,
        resource: Resource,
        query: &str,
        max_results: u32,
    ) -> Result<ListResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((resource, query.to_string(), max_results));

        if let Some(err) = &self.search_error {
            return Err(err.clone());
        }
        Ok(match resource {
            Resource::Messages => ListResponse::with_messages(self.messages.clone()),
            Resource::Threads => ListResponse::with_threads(self.threads.clone()),
        })
    }

    fn get_raw_message(&self, id: &str) -> Result<RawEmail, ProviderError> {
        self.raw.clone().filter(|r| r.id == id).ok_or(ProviderError::Http {
            status: 404,
            message: "Not Found".to_string(),
        })
    }
}

fn search_tool(provider: FakeProvider) -> MailSearch {
    MailSearch::new(move || Ok(Box::new(provider.clone()) as Box<dyn MailProvider>))
}

fn make_message(id: &str) -> RawMessage {
    RawMessage {
        id: id.to_string(),
        thread_id: id.to_string(),
        snippet: format!("Test message {}", id),
        payload: None,
    }
}

fn make_thread(id: &str) -> RawThread {
    RawThread {
        id: id.to_string(),
        snippet: format!("Test thread {}", id),
        history_id: None,
    }
}

fn encoded_message(id: &str, content_type: &str, data: &str) -> RawMessage {
    RawMessage {
        payload: Some(MessagePayload {
            headers: Some(vec![Header::new("Content-Type", content_type)]),
            body: Some(MessageBody {
                size: Some(24),
                data: Some(data.to_string()),
            }),
            mime_type: Some("text/plain".to_string()),
        }),
        ..make_message(id)
    }
}

#[test]
fn test_run_messages() {
    let provider = FakeProvider {
        messages: vec![make_message("1"), make_message("2")],
        ..Default::default()
    };
    let calls = provider.calls.clone();

    let results = search_tool(provider)
        .run("test", Resource::Messages, 2)
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id(), "1");
    assert_eq!(results[0].thread_id(), Some("1"));
    assert_eq!(results[0].snippet(), "Test message 1");
    assert_eq!(results[1].id(), "2");
    assert_eq!(results[1].thread_id(), Some("2"));
    assert_eq!(results[1].snippet(), "Test message 2");

    assert_eq!(
        calls.lock().unwrap().as_slice(),
        &[(Resource::Messages, "test".to_string(), 2)]
    );
}

#[test]
fn test_run_threads() {
    let provider = FakeProvider {
        threads: vec![make_thread("1"), make_thread("2")],
        ..Default::default()
    };

    let results = search_tool(provider)
        .run("test", Resource::Threads, 2)
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id(), "1");
    assert_eq!(results[0].snippet(), "Test thread 1");
    assert_eq!(results[1].id(), "2");
    assert_eq!(results[1].snippet(), "Test thread 2");
    assert!(results.iter().all(|r| matches!(r, SearchRecord::Thread(_))));
    assert!(results.iter().all(|r| r.body().is_none()));
}

#[test]
fn test_run_invalid_resource() {
    let provider = FakeProvider::default();
    let calls = provider.calls.clone();
    let tool = search_tool(provider);

    for max_results in [0, 2, 500] {
        let err = tool
            .run_named("test", "invalid_resource", max_results)
            .unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedResource(r) if r == "invalid_resource"));
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_run_factory_http_error_propagates_unchanged() {
    let not_found = ProviderError::Http {
        status: 404,
        message: "Not Found".to_string(),
    };
    let expected = not_found.clone();
    let tool = MailSearch::new(move || Err(not_found.clone()));

    let err = tool.run("test", Resource::Messages, 2).unwrap_err();
    match err {
        SearchError::Provider(e) => {
            assert_eq!(e, expected);
            assert_eq!(e.status(), Some(404));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_run_search_error_propagates_unchanged() {
    let provider = FakeProvider {
        search_error: Some(ProviderError::Transport("connection reset".to_string())),
        ..Default::default()
    };

    let err = search_tool(provider)
        .run("test", Resource::Threads, 5)
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Provider(ProviderError::Transport(msg)) if msg == "connection reset"
    ));
}

#[test]
fn test_run_caps_results_at_max() {
    let provider = FakeProvider {
        messages: vec![make_message("1"), make_message("2"), make_message("3")],
        ..Default::default()
    };

    let results = search_tool(provider)
        .run("test", Resource::Messages, 2)
        .unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_run_rejects_zero_max_results() {
    let err = search_tool(FakeProvider::default())
        .run("test", Resource::Messages, 0)
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidArgument(_)));
}

#[test]
fn test_run_empty_response() {
    let provider = FakeProvider::default();
    let results = search_tool(provider)
        .run("nothing matches", Resource::Messages, 10)
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_run_decodes_bodies() {
    let provider = FakeProvider {
        messages: vec![
            encoded_message("1", "text/plain; charset=iso-8859-1", "VGhpcyBpcyBhIHRlc3QgbWVzc2FnZSAx"),
            encoded_message("2", "text/plain; charset=utf-8", "VGhpcyBpcyBhIHRlc3QgbWVzc2FnZSAy"),
            encoded_message("3", "text/plain; charset=invalid_encoding", "VGhpcyBpcyBhIHRlc3QgbWVzc2FnZSAz"),
        ],
        ..Default::default()
    };

    let results = search_tool(provider)
        .run("test", Resource::Messages, 3)
        .unwrap();

    assert_eq!(results[0].body(), Some("This is a test message 1"));
    assert_eq!(results[1].body(), Some("This is a test message 2"));
    assert_eq!(results[2].body(), Some("VGhpcyBpcyBhIHRlc3QgbWVzc2FnZSAz"));
}

#[test]
fn test_call_uses_defaults() {
    let provider = FakeProvider {
        messages: vec![make_message("1")],
        ..Default::default()
    };
    let calls = provider.calls.clone();

    let output = search_tool(provider).call(r#"{"query": "is:unread"}"#).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        value,
        serde_json::json!([
            {"id": "1", "threadId": "1", "snippet": "Test message 1", "body": ""}
        ])
    );
    assert_eq!(
        calls.lock().unwrap().as_slice(),
        &[(Resource::Messages, "is:unread".to_string(), 10)]
    );
}

#[test]
fn test_call_threads_output_has_no_body() {
    let provider = FakeProvider {
        threads: vec![make_thread("7")],
        ..Default::default()
    };
    let tool = search_tool(provider).with_default_max_results(3);

    let output = tool
        .call(r#"{"query": "label:work", "resource": "threads"}"#)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value, serde_json::json!([{"id": "7", "snippet": "Test thread 7"}]));
}

#[test]
fn test_call_invalid_resource() {
    let err = search_tool(FakeProvider::default())
        .call(r#"{"query": "test", "resource": "invalid_resource", "max_results": 2}"#)
        .unwrap_err();
    assert!(matches!(err, SearchError::UnsupportedResource(_)));
}

#[test]
fn test_call_malformed_arguments() {
    let err = search_tool(FakeProvider::default())
        .call(r#"{"resource": "messages"}"#)
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidArgument(_)));
}

#[test]
fn test_get_message_tool() {
    let rfc822 = b"From: Carol <carol@example.com>\r\n\
Subject: Invoice\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Your invoice is attached.\r\n";
    let provider = FakeProvider {
        raw: Some(RawEmail {
            id: "m9".to_string(),
            thread_id: "t9".to_string(),
            snippet: "Your invoice".to_string(),
            raw: BASE64_URL_SAFE.encode(rfc822),
        }),
        ..Default::default()
    };
    let tool = GetMessage::new(move || Ok(Box::new(provider.clone()) as Box<dyn MailProvider>));

    let detail = tool.get_message("m9").unwrap();
    assert_eq!(detail.thread_id, "t9");
    assert_eq!(detail.subject.as_deref(), Some("Invoice"));
    assert_eq!(detail.sender.as_deref(), Some("Carol <carol@example.com>"));
    assert_eq!(detail.body, "Your invoice is attached.");

    let output = tool.call(r#"{"message_id": "m9"}"#).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["threadId"], "t9");
    assert_eq!(value["subject"], "Invoice");

    let err = tool.get_message("missing").unwrap_err();
    assert!(matches!(err, SearchError::Provider(ProviderError::Http { status: 404, .. })));
}

#[test]
fn test_get_message_rejects_blank_id() {
    let tool = GetMessage::new(|| -> Result<Box<dyn MailProvider>, ProviderError> {
        panic!("factory must not be called for a blank id")
    });
    assert!(matches!(
        tool.get_message("   "),
        Err(SearchError::InvalidArgument(_))
    ));
}
