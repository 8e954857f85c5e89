// rpcgate - RPC server performance gating
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! XML-RPC document encoding and decoding.
//!
//! Encoding writes compact documents with `quick_xml::Writer`. Decoding is
//! a recursive descent over `quick_xml::Reader` events: whitespace between
//! elements is ignored, text inside scalar elements is kept verbatim, and
//! a `<value>` with no type element decodes as a string.

use crate::error::{Result, XmlRpcError};
use crate::value::Value;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Maximum nesting of arrays and structs accepted in either direction.
pub const MAX_DEPTH: usize = 64;

/// Decoded `<methodResponse>`.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// `<params>` with its single value, or `Nil` when empty.
    Success(Value),
    /// `<fault>` with its `faultCode` and `faultString`.
    Fault { code: i64, message: String },
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a `<methodCall>` document.
///
/// # Arguments
///
/// * `method` - Method name
/// * `params` - Positional parameters, one `<param>` each
///
/// # Returns
///
/// The UTF-8 document, starting with the XML declaration.
pub fn encode_call(method: &str, params: &[Value]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_decl(&mut writer)?;
    start(&mut writer, "methodCall")?;
    text_element(&mut writer, "methodName", method)?;
    start(&mut writer, "params")?;
    for param in params {
        start(&mut writer, "param")?;
        write_value(&mut writer, param, 0)?;
        end(&mut writer, "param")?;
    }
    end(&mut writer, "params")?;
    end(&mut writer, "methodCall")?;
    Ok(writer.into_inner().into_inner())
}

/// Encodes a successful `<methodResponse>` carrying `value`.
pub fn encode_response(value: &Value) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_decl(&mut writer)?;
    start(&mut writer, "methodResponse")?;
    start(&mut writer, "params")?;
    start(&mut writer, "param")?;
    write_value(&mut writer, value, 0)?;
    end(&mut writer, "param")?;
    end(&mut writer, "params")?;
    end(&mut writer, "methodResponse")?;
    Ok(writer.into_inner().into_inner())
}

/// Encodes a fault `<methodResponse>`.
pub fn encode_fault(code: i64, message: &str) -> Result<Vec<u8>> {
    let fault = Value::structure([
        ("faultCode", Value::Int(code)),
        ("faultString", Value::from(message)),
    ]);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_decl(&mut writer)?;
    start(&mut writer, "methodResponse")?;
    start(&mut writer, "fault")?;
    write_value(&mut writer, &fault, 0)?;
    end(&mut writer, "fault")?;
    end(&mut writer, "methodResponse")?;
    Ok(writer.into_inner().into_inner())
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn write_decl(writer: &mut XmlWriter) -> Result<()> {
    emit(
        writer,
        Event::Decl(BytesDecl::new("1.0", None, None)),
        "XML declaration",
    )
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)), name)
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)), name)
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    start(writer, name)?;
    emit(writer, Event::Text(BytesText::new(text)), name)?;
    end(writer, name)
}

fn emit(writer: &mut XmlWriter, event: Event<'_>, context: &str) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| XmlRpcError::Write {
            context: context.to_string(),
            message: e.to_string(),
        })
}

fn write_value(writer: &mut XmlWriter, value: &Value, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(XmlRpcError::RecursionLimitExceeded { max: MAX_DEPTH });
    }
    start(writer, "value")?;
    match value {
        Value::Int(i) => {
            // <int> is 32-bit on the wire
            let kind = if i32::try_from(*i).is_ok() { "int" } else { "i8" };
            text_element(writer, kind, &i.to_string())?;
        }
        Value::Bool(b) => text_element(writer, "boolean", if *b { "1" } else { "0" })?,
        Value::Double(d) => text_element(writer, "double", &d.to_string())?,
        Value::String(s) => text_element(writer, "string", s)?,
        Value::Base64(s) => text_element(writer, "base64", s)?,
        Value::DateTime(s) => text_element(writer, "dateTime.iso8601", s)?,
        Value::Nil => emit(writer, Event::Empty(BytesStart::new("nil")), "nil")?,
        Value::Array(items) => {
            start(writer, "array")?;
            start(writer, "data")?;
            for item in items {
                write_value(writer, item, depth + 1)?;
            }
            end(writer, "data")?;
            end(writer, "array")?;
        }
        Value::Struct(members) => {
            start(writer, "struct")?;
            for (name, member) in members {
                start(writer, "member")?;
                text_element(writer, "name", name)?;
                write_value(writer, member, depth + 1)?;
                end(writer, "member")?;
            }
            end(writer, "struct")?;
        }
    }
    end(writer, "value")
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a `<methodResponse>` document.
pub fn decode_response(body: &[u8]) -> Result<MethodResponse> {
    let mut parser = Parser::new(utf8(body)?);
    parser.expect_start("methodResponse")?;

    let response = match parser.next_tag()? {
        Event::Start(e) if is(&e, "params") => match parser.next_tag()? {
            Event::Start(e) if is(&e, "param") => {
                let value = parser.expect_value(0)?;
                parser.expect_end("param")?;
                parser.expect_end("params")?;
                MethodResponse::Success(value)
            }
            Event::End(_) => MethodResponse::Success(Value::Nil),
            other => return Err(parser.unexpected(&other, "<param>")),
        },
        Event::Empty(e) if is(&e, "params") => MethodResponse::Success(Value::Nil),
        Event::Start(e) if is(&e, "fault") => {
            let value = parser.expect_value(0)?;
            parser.expect_end("fault")?;
            fault_from_value(value)?
        }
        other => return Err(parser.unexpected(&other, "<params> or <fault>")),
    };

    parser.expect_end("methodResponse")?;
    Ok(response)
}

/// Decodes a `<methodCall>` document into its method name and parameters.
pub fn decode_call(body: &[u8]) -> Result<(String, Vec<Value>)> {
    let mut parser = Parser::new(utf8(body)?);
    parser.expect_start("methodCall")?;
    parser.expect_start("methodName")?;
    let method = parser.read_text("methodName")?.trim().to_string();
    if method.is_empty() {
        return Err(XmlRpcError::Structure("empty <methodName>".to_string()));
    }

    let mut params = Vec::new();
    match parser.next_tag()? {
        Event::Start(e) if is(&e, "params") => loop {
            match parser.next_tag()? {
                Event::Start(e) if is(&e, "param") => {
                    params.push(parser.expect_value(0)?);
                    parser.expect_end("param")?;
                }
                Event::End(_) => break,
                other => return Err(parser.unexpected(&other, "<param>")),
            }
        },
        Event::Empty(e) if is(&e, "params") => {}
        Event::End(_) => return Ok((method, params)),
        other => return Err(parser.unexpected(&other, "<params>")),
    }

    parser.expect_end("methodCall")?;
    Ok((method, params))
}

fn utf8(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body).map_err(|e| XmlRpcError::Parse {
        pos: e.valid_up_to(),
        message: "invalid UTF-8".to_string(),
    })
}

fn is(element: &BytesStart<'_>, name: &str) -> bool {
    element.name().as_ref() == name.as_bytes()
}

fn fault_from_value(value: Value) -> Result<MethodResponse> {
    let code = value
        .member("faultCode")
        .and_then(Value::as_i64)
        .ok_or_else(|| XmlRpcError::Structure("fault without integer faultCode".to_string()))?;
    let message = value
        .member("faultString")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(MethodResponse::Fault { code, message })
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(e) => format!("<{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Empty(e) => format!("<{}/>", String::from_utf8_lossy(e.name().as_ref())),
        Event::End(e) => format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Eof => "end of document".to_string(),
        _ => "character data".to_string(),
    }
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Parser<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    fn error(&self, message: impl Into<String>) -> XmlRpcError {
        XmlRpcError::Parse {
            pos: self.reader.buffer_position(),
            message: message.into(),
        }
    }

    fn unexpected(&self, found: &Event<'_>, expected: &str) -> XmlRpcError {
        self.error(format!("expected {}, found {}", expected, describe(found)))
    }

    fn next(&mut self) -> Result<Event<'a>> {
        match self.reader.read_event() {
            Ok(Event::Eof) => Err(self.error("unexpected end of document")),
            Ok(event) => Ok(event),
            Err(e) => Err(self.error(e.to_string())),
        }
    }

    /// Next element event, skipping the declaration, comments and
    /// whitespace between elements.
    fn next_tag(&mut self) -> Result<Event<'a>> {
        loop {
            match self.next()? {
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => {}
                event @ (Event::Start(_) | Event::Empty(_) | Event::End(_)) => return Ok(event),
                other => return Err(self.unexpected(&other, "an element")),
            }
        }
    }

    fn expect_start(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Event::Start(e) if is(&e, name) => Ok(()),
            other => Err(self.unexpected(&other, &format!("<{}>", name))),
        }
    }

    fn expect_end(&mut self, name: &str) -> Result<()> {
        match self.next_tag()? {
            Event::End(e) if e.name().as_ref() == name.as_bytes() => Ok(()),
            other => Err(self.unexpected(&other, &format!("</{}>", name))),
        }
    }

    fn push_text(&self, out: &mut String, event: &Event<'_>) -> Result<()> {
        match event {
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| self.error(e.to_string()))?;
                out.push_str(&text);
            }
            Event::CData(c) => out.push_str(&String::from_utf8_lossy(c)),
            _ => {}
        }
        Ok(())
    }

    /// Collects character data up to the closing tag of `name`.
    fn read_text(&mut self, name: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next()? {
                event @ (Event::Text(_) | Event::CData(_)) => self.push_text(&mut text, &event)?,
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == name.as_bytes() => return Ok(text),
                other => return Err(self.unexpected(&other, &format!("text of <{}>", name))),
            }
        }
    }

    /// Reads a `<value>` element, either empty or with content.
    fn expect_value(&mut self, depth: usize) -> Result<Value> {
        match self.next_tag()? {
            Event::Start(e) if is(&e, "value") => self.parse_value(depth),
            Event::Empty(e) if is(&e, "value") => Ok(Value::String(String::new())),
            other => Err(self.unexpected(&other, "<value>")),
        }
    }

    /// Parses the content of a `<value>` whose start tag was consumed.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(XmlRpcError::RecursionLimitExceeded { max: MAX_DEPTH });
        }
        let mut untyped = String::new();
        loop {
            match self.next()? {
                event @ (Event::Text(_) | Event::CData(_)) => {
                    self.push_text(&mut untyped, &event)?
                }
                Event::Comment(_) => {}
                Event::Start(e) => {
                    let kind = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let value = self.parse_typed(&kind, depth)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::Empty(e) => {
                    let value = empty_value(e.name().as_ref())
                        .ok_or_else(|| self.unexpected(&Event::Empty(e.clone()), "a value type"))?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                Event::End(_) => return Ok(Value::String(untyped)),
                other => return Err(self.unexpected(&other, "a value")),
            }
        }
    }

    fn parse_typed(&mut self, kind: &str, depth: usize) -> Result<Value> {
        let value = match kind {
            "int" | "i4" | "i8" => {
                let text = self.read_text(kind)?;
                let int = text.trim().parse::<i64>().map_err(|_| XmlRpcError::InvalidValue {
                    kind: "int",
                    text: text.clone(),
                })?;
                Value::Int(int)
            }
            "boolean" => {
                let text = self.read_text(kind)?;
                match text.trim() {
                    "1" | "true" => Value::Bool(true),
                    "0" | "false" => Value::Bool(false),
                    _ => {
                        return Err(XmlRpcError::InvalidValue {
                            kind: "boolean",
                            text: text.clone(),
                        })
                    }
                }
            }
            "double" => {
                let text = self.read_text(kind)?;
                let double = text.trim().parse::<f64>().map_err(|_| XmlRpcError::InvalidValue {
                    kind: "double",
                    text: text.clone(),
                })?;
                Value::Double(double)
            }
            "string" => Value::String(self.read_text(kind)?),
            "base64" => Value::Base64(self.read_text(kind)?.trim().to_string()),
            "dateTime.iso8601" => Value::DateTime(self.read_text(kind)?.trim().to_string()),
            "nil" => {
                self.expect_end("nil")?;
                Value::Nil
            }
            "array" => self.parse_array(depth)?,
            "struct" => self.parse_struct(depth)?,
            other => {
                return Err(XmlRpcError::Structure(format!(
                    "unknown value type <{}>",
                    other
                )))
            }
        };
        Ok(value)
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        let mut items = Vec::new();
        match self.next_tag()? {
            Event::Start(e) if is(&e, "data") => loop {
                match self.next_tag()? {
                    Event::Start(e) if is(&e, "value") => items.push(self.parse_value(depth + 1)?),
                    Event::Empty(e) if is(&e, "value") => items.push(Value::String(String::new())),
                    Event::End(_) => break,
                    other => return Err(self.unexpected(&other, "<value>")),
                }
            },
            Event::Empty(e) if is(&e, "data") => {}
            other => return Err(self.unexpected(&other, "<data>")),
        }
        self.expect_end("array")?;
        Ok(Value::Array(items))
    }

    fn parse_struct(&mut self, depth: usize) -> Result<Value> {
        let mut members = BTreeMap::new();
        loop {
            match self.next_tag()? {
                Event::Start(e) if is(&e, "member") => {
                    let (name, value) = self.parse_member(depth)?;
                    members.insert(name, value);
                }
                Event::End(_) => return Ok(Value::Struct(members)),
                other => return Err(self.unexpected(&other, "<member>")),
            }
        }
    }

    fn parse_member(&mut self, depth: usize) -> Result<(String, Value)> {
        let mut name = None;
        let mut value = None;
        loop {
            match self.next_tag()? {
                Event::Start(e) if is(&e, "name") => name = Some(self.read_text("name")?),
                Event::Empty(e) if is(&e, "name") => name = Some(String::new()),
                Event::Start(e) if is(&e, "value") => value = Some(self.parse_value(depth + 1)?),
                Event::Empty(e) if is(&e, "value") => value = Some(Value::String(String::new())),
                Event::End(_) => break,
                other => return Err(self.unexpected(&other, "<name> or <value>")),
            }
        }
        match (name, value) {
            (Some(name), Some(value)) => Ok((name, value)),
            (None, _) => Err(XmlRpcError::Structure(
                "struct member without <name>".to_string(),
            )),
            (Some(name), None) => Err(XmlRpcError::Structure(format!(
                "struct member '{}' without <value>",
                name
            ))),
        }
    }
}

fn empty_value(kind: &[u8]) -> Option<Value> {
    match kind {
        b"nil" => Some(Value::Nil),
        b"string" => Some(Value::String(String::new())),
        b"base64" => Some(Value::Base64(String::new())),
        b"array" => Some(Value::Array(Vec::new())),
        b"struct" => Some(Value::Struct(BTreeMap::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_value(inner: &str) -> Result<Value> {
        let doc = format!(
            "<?xml version=\"1.0\"?><methodResponse><params><param><value>{}</value></param></params></methodResponse>",
            inner
        );
        match decode_response(doc.as_bytes())? {
            MethodResponse::Success(value) => Ok(value),
            other => panic!("unexpected response {:?}", other),
        }
    }

    // ==================== Encoding ====================

    #[test]
    fn test_encode_echo_call() {
        let body = encode_call("echo", &[Value::from("test")]).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<?xml version=\"1.0\"?><methodCall><methodName>echo</methodName>\
             <params><param><value><string>test</string></value></param></params></methodCall>"
        );
    }

    #[test]
    fn test_encode_escapes_text() {
        let body = encode_call("echo", &[Value::from("a<b & c")]).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("<string>a&lt;b &amp; c</string>"));
    }

    #[test]
    fn test_encode_scalar_types() {
        let body = encode_call(
            "m",
            &[
                Value::Int(7),
                Value::Int(1 << 40),
                Value::Bool(true),
                Value::Double(1.5),
                Value::Nil,
            ],
        )
        .unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("<value><int>7</int></value>"));
        assert!(text.contains("<value><i8>1099511627776</i8></value>"));
        assert!(text.contains("<value><boolean>1</boolean></value>"));
        assert!(text.contains("<value><double>1.5</double></value>"));
        assert!(text.contains("<value><nil/></value>"));
    }

    #[test]
    fn test_encode_rejects_excessive_nesting() {
        let mut value = Value::Nil;
        for _ in 0..=MAX_DEPTH + 1 {
            value = Value::Array(vec![value]);
        }
        assert!(matches!(
            encode_call("m", &[value]),
            Err(XmlRpcError::RecursionLimitExceeded { .. })
        ));
    }

    // ==================== Decoding ====================

    #[test]
    fn test_decode_scalars() {
        assert_eq!(decode_value("<int>42</int>").unwrap(), Value::Int(42));
        assert_eq!(decode_value("<i4>-3</i4>").unwrap(), Value::Int(-3));
        assert_eq!(decode_value("<boolean>0</boolean>").unwrap(), Value::Bool(false));
        assert_eq!(decode_value("<double>2.25</double>").unwrap(), Value::Double(2.25));
        assert_eq!(decode_value("<string>hi</string>").unwrap(), Value::from("hi"));
        assert_eq!(decode_value("<string/>").unwrap(), Value::from(""));
        assert_eq!(decode_value("<nil/>").unwrap(), Value::Nil);
        assert_eq!(
            decode_value("<base64> aGVsbG8= </base64>").unwrap(),
            Value::Base64("aGVsbG8=".to_string())
        );
    }

    #[test]
    fn test_decode_untyped_value_is_string() {
        assert_eq!(decode_value("plain text").unwrap(), Value::from("plain text"));
        assert_eq!(decode_value("").unwrap(), Value::from(""));
    }

    #[test]
    fn test_string_whitespace_preserved() {
        assert_eq!(
            decode_value("<string>  padded  </string>").unwrap(),
            Value::from("  padded  ")
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_value("<string>a&lt;b &amp; &quot;c&quot;</string>").unwrap(),
            Value::from("a<b & \"c\"")
        );
    }

    #[test]
    fn test_decode_pretty_printed_nested() {
        let doc = r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param>
      <value>
        <struct>
          <member>
            <name>Params</name>
            <value><array><data>
              <value><int>87654321</int></value>
              <value>bare</value>
            </data></array></value>
          </member>
          <member><name>Server</name><value><string>SERVER</string></value></member>
        </struct>
      </value>
    </param>
  </params>
</methodResponse>"#;
        let expected = Value::structure([
            (
                "Params",
                Value::Array(vec![Value::Int(87654321), Value::from("bare")]),
            ),
            ("Server", Value::from("SERVER")),
        ]);
        assert_eq!(
            decode_response(doc.as_bytes()).unwrap(),
            MethodResponse::Success(expected)
        );
    }

    #[test]
    fn test_decode_fault() {
        let body = encode_fault(-32601, "method not found").unwrap();
        assert_eq!(
            decode_response(&body).unwrap(),
            MethodResponse::Fault {
                code: -32601,
                message: "method not found".to_string()
            }
        );
    }

    #[test]
    fn test_fault_without_code_is_invalid() {
        let doc = "<methodResponse><fault><value><struct>\
                   <member><name>faultString</name><value>x</value></member>\
                   </struct></value></fault></methodResponse>";
        assert!(matches!(
            decode_response(doc.as_bytes()),
            Err(XmlRpcError::Structure(_))
        ));
    }

    #[test]
    fn test_empty_params_is_nil() {
        assert_eq!(
            decode_response(b"<methodResponse><params/></methodResponse>").unwrap(),
            MethodResponse::Success(Value::Nil)
        );
        assert_eq!(
            decode_response(b"<methodResponse><params></params></methodResponse>").unwrap(),
            MethodResponse::Success(Value::Nil)
        );
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_value("<int>abc</int>"),
            Err(XmlRpcError::InvalidValue { kind: "int", .. })
        ));
        assert!(matches!(
            decode_value("<boolean>yes</boolean>"),
            Err(XmlRpcError::InvalidValue { kind: "boolean", .. })
        ));
        assert!(matches!(
            decode_value("<decimal>1</decimal>"),
            Err(XmlRpcError::Structure(_))
        ));
        assert!(matches!(
            decode_response(b"<methodResponse><params>"),
            Err(XmlRpcError::Parse { .. })
        ));
        assert!(matches!(
            decode_response(b"<html>oops</html>"),
            Err(XmlRpcError::Parse { .. })
        ));
        assert!(matches!(
            decode_response(&[0xff, 0xfe]),
            Err(XmlRpcError::Parse { pos: 0, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_excessive_nesting() {
        let depth = MAX_DEPTH + 5;
        let inner = format!(
            "{}<nil/>{}",
            "<array><data><value>".repeat(depth),
            "</value></data></array>".repeat(depth)
        );
        assert!(matches!(
            decode_value(&inner),
            Err(XmlRpcError::RecursionLimitExceeded { max: MAX_DEPTH })
        ));
    }

    #[test]
    fn test_call_roundtrip() {
        let params = vec![
            Value::structure([
                ("Username", Value::from("user")),
                ("Params", Value::Array(vec![Value::Int(87654321)])),
            ]),
            Value::Bool(false),
            Value::DateTime("20250101T00:00:00".to_string()),
        ];
        let body = encode_call("login", &params).unwrap();
        let (method, decoded) = decode_call(&body).unwrap();
        assert_eq!(method, "login");
        assert_eq!(decoded, params);
    }

    #[test]
    fn test_decode_call_without_params() {
        let (method, params) =
            decode_call(b"<methodCall><methodName>ping</methodName></methodCall>").unwrap();
        assert_eq!(method, "ping");
        assert!(params.is_empty());
        assert!(decode_call(b"<methodCall><methodName> </methodName></methodCall>").is_err());
    }
}
