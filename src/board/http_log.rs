//! Verbose HTTP trace output.
//!
//! When enabled, every exchange is written to the sink as:
//!
//! ```text
//! request URL: <url>
//! request payload:
//! <indented JSON or <empty>>
//! response URL: <url>
//! response status: <code>
//! response payload:
//! <indented JSON or <empty>>
//! ```
//!
//! Write failures are ignored; tracing never changes a request's outcome.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use serde::de::IgnoredAny;

/// Marker printed in place of an empty body.
pub const EMPTY_BODY: &str = "<empty>";

/// Optional trace sink shared by all requests of a client.
#[derive(Default)]
pub struct HttpLog {
    sink: Option<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for HttpLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl HttpLog {
    /// A log that writes nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A log that writes to `sink`.
    pub fn to_writer(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Some(Mutex::new(sink)),
        }
    }

    /// Returns `true` if a sink is attached.
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Records an outgoing request.
    pub fn request(&self, url: &str, body: &[u8]) {
        self.write(&format!(
            "request URL: {url}\nrequest payload:\n{}\n",
            pretty_json(body)
        ));
    }

    /// Records a received response.
    pub fn response(&self, url: &str, status: u16, body: &[u8]) {
        self.write(&format!(
            "response URL: {url}\nresponse status: {status}\nresponse payload:\n{}\n",
            pretty_json(body)
        ));
    }

    fn write(&self, text: &str) {
        let Some(sink) = &self.sink else {
            return;
        };
        let Ok(mut sink) = sink.lock() else {
            return;
        };
        if let Err(e) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
            log::debug!("Failed to write HTTP trace: {}", e);
        }
    }
}

/// Indents a JSON body with two spaces, or returns the trimmed body as-is
/// when it is not JSON.
///
/// Only whitespace between tokens changes: numbers, string escapes, key
/// order and duplicate keys are written exactly as received.
pub fn pretty_json(body: &[u8]) -> String {
    let trimmed = body.trim_ascii();
    if trimmed.is_empty() {
        return EMPTY_BODY.to_string();
    }
    match std::str::from_utf8(trimmed) {
        Ok(text) if serde_json::from_str::<IgnoredAny>(text).is_ok() => indent_json(text),
        _ => String::from_utf8_lossy(trimmed).into_owned(),
    }
}

/// Re-indents well-formed JSON text token by token.
fn indent_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                out.push(c);
                while chars.peek().is_some_and(char::is_ascii_whitespace) {
                    chars.next();
                }
                let close = if c == '{' { '}' } else { ']' };
                if chars.peek() == Some(&close) {
                    chars.next();
                    out.push(close);
                } else {
                    depth += 1;
                    newline(&mut out, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(c);
            }
            ',' => {
                out.push(c);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            c if c.is_ascii_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_pretty_json() {
        assert_eq!(pretty_json(br#"{"text":"Hello World"}"#), "{\n  \"text\": \"Hello World\"\n}");
        assert_eq!(pretty_json(b"  \n"), EMPTY_BODY);
        assert_eq!(pretty_json(b" not json "), "not json");
    }

    #[test]
    fn test_pretty_json_keeps_key_order() {
        assert_eq!(pretty_json(br#"{"b":1,"a":2}"#), "{\n  \"b\": 1,\n  \"a\": 2\n}");
    }

    #[test]
    fn test_pretty_json_keeps_body_text() {
        assert_eq!(
            pretty_json(br#"{"n":1.10,"big":123456789012345678901234567890,"k":1,"k":2}"#),
            "{\n  \"n\": 1.10,\n  \"big\": 123456789012345678901234567890,\n  \"k\": 1,\n  \"k\": 2\n}"
        );
        assert_eq!(pretty_json(br#"["a, [b]: {c}", "\"q\""]"#), "[\n  \"a, [b]: {c}\",\n  \"\\\"q\\\"\"\n]");
    }

    #[test]
    fn test_pretty_json_nested_and_empty_containers() {
        assert_eq!(
            pretty_json(b"{ \"a\" : [ [1, 2], [] ], \"b\": {} }"),
            "{\n  \"a\": [\n    [\n      1,\n      2\n    ],\n    []\n  ],\n  \"b\": {}\n}"
        );
    }

    #[test]
    fn test_log_format() {
        let buf = SharedBuf::default();
        let log = HttpLog::to_writer(Box::new(buf.clone()));
        log.request("http://example.test/", br#"{"text":"hi"}"#);
        log.response("http://example.test/", 200, b"");

        assert_eq!(
            buf.contents(),
            "request URL: http://example.test/\n\
             request payload:\n{\n  \"text\": \"hi\"\n}\n\
             response URL: http://example.test/\n\
             response status: 200\n\
             response payload:\n<empty>\n"
        );
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        let log = HttpLog::disabled();
        assert!(!log.is_enabled());
        log.request("http://example.test/", b"{}");
    }
}
