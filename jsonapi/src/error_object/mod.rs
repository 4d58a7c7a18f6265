// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Conversion of errors into JSON:API error documents.


use jsonapi_model::{ErrorDocument, ErrorObject, ErrorSource, JsonObject};
use jsonapi_utilities::path::{is_truthy, to_js_string};
use serde_json::Value;

use crate::error::ErrorObjectError;

const DEFAULT_TITLE: &str = "Error";

/// An error raised by the application, with an optional HTTP status and error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    title: String,
    detail: String,
    status: Option<String>,
    status_code: Option<String>,
    code: Option<String>,
}

impl NativeError {
    pub fn new(detail: impl Into<String>) -> Self {
        NativeError {
            title: DEFAULT_TITLE.to_string(),
            detail: detail.into(),
            status: None,
            status_code: None,
            code: None,
        }
    }

    /// Describe an existing error. The title is the name of the error type and the detail is
    /// its message. `Box`, `Arc` and `Rc` are looked through. The concrete type of a trait
    /// object is not known so its title is `"Error"`; use [`NativeError::with_title`] to name
    /// it.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        NativeError {
            title: error_type_name::<E>().unwrap_or(DEFAULT_TITLE).to_string(),
            ..NativeError::new(err.to_string())
        }
    }

    pub fn with_status(mut self, status: impl ToString) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// An alternative source for the status, used only if no status is set.
    pub fn with_status_code(mut self, status_code: impl ToString) -> Self {
        self.status_code = Some(status_code.to_string());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn into_error_object(self) -> ErrorObject {
        let NativeError {
            title,
            detail,
            status,
            status_code,
            code,
        } = self;
        ErrorObject {
            status: non_empty(status).or_else(|| non_empty(status_code)),
            code,
            title: Some(title),
            detail: Some(detail),
            ..Default::default()
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

const POINTERS: [&str; 3] = ["alloc::boxed::Box<", "alloc::sync::Arc<", "alloc::rc::Rc<"];

fn error_type_name<E: ?Sized>() -> Option<&'static str> {
    let mut name = std::any::type_name::<E>();
    while let Some(inner) = POINTERS
        .iter()
        .find_map(|p| name.strip_prefix(p).and_then(|n| n.strip_suffix('>')))
    {
        name = inner;
    }
    if name.starts_with("dyn ") {
        return None;
    }
    let path = name.split('<').next().unwrap_or(name);
    path.rsplit("::").next()
}

/// An error to be included in an error document.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInput {
    /// An application error.
    Native(NativeError),
    /// A JSON description of a JSON:API error object (or an array of them). This is
    /// validated and its members converted to strings where required.
    Object(Value),
}

impl From<NativeError> for ErrorInput {
    fn from(err: NativeError) -> Self {
        ErrorInput::Native(err)
    }
}

impl From<Value> for ErrorInput {
    fn from(value: Value) -> Self {
        ErrorInput::Object(value)
    }
}

/// Serialize a single error (or a JSON array of error objects) into an error document.
pub fn serialize_error(error: impl Into<ErrorInput>) -> Result<ErrorDocument, ErrorObjectError> {
    serialize_errors([error])
}

/// Serialize a collection of errors into a single error document. The first invalid error
/// object fails the whole document.
pub fn serialize_errors<I>(errors: I) -> Result<ErrorDocument, ErrorObjectError>
where
    I: IntoIterator,
    I::Item: Into<ErrorInput>,
{
    let mut objects = vec![];
    for error in errors {
        match error.into() {
            ErrorInput::Native(err) => objects.push(err.into_error_object()),
            ErrorInput::Object(Value::Array(items)) => {
                for item in &items {
                    objects.push(validate_error(item)?);
                }
            }
            ErrorInput::Object(value) => objects.push(validate_error(&value)?),
        }
    }
    Ok(ErrorDocument { errors: objects })
}

/// Check that a JSON value has the shape of an error object. Falsy members are dropped and
/// scalar members are converted to strings.
pub fn validate_error(value: &Value) -> Result<ErrorObject, ErrorObjectError> {
    let obj = value.as_object().ok_or(ErrorObjectError::NotAnObject)?;
    let member = |name: &str| obj.get(name).filter(|v| is_truthy(v));
    let text = |name: &str| member(name).map(to_js_string);

    let links = match member("links") {
        Some(links) => Some(validate_links(links)?),
        None => None,
    };
    let source = match member("source") {
        Some(source) => Some(validate_source(source)?),
        None => None,
    };
    let meta = match member("meta") {
        Some(Value::Object(meta)) => Some(meta.clone()),
        Some(_) => return Err(ErrorObjectError::MetaNotAnObject),
        None => None,
    };
    Ok(ErrorObject {
        id: text("id"),
        links,
        status: text("status"),
        code: text("code"),
        title: text("title"),
        detail: text("detail"),
        source,
        meta,
    })
}

fn validate_links(links: &Value) -> Result<JsonObject, ErrorObjectError> {
    let links = links.as_object().ok_or(ErrorObjectError::LinksNotAnObject)?;
    for (key, link) in links {
        match link {
            Value::String(_) => {}
            Value::Object(link) => {
                if link.get("href").is_some_and(|href| is_truthy(href) && !href.is_string()) {
                    return Err(ErrorObjectError::InvalidLinkHref(key.clone()));
                }
                if link.get("meta").is_some_and(|meta| is_truthy(meta) && !meta.is_object()) {
                    return Err(ErrorObjectError::InvalidLinkMeta(key.clone()));
                }
            }
            _ => return Err(ErrorObjectError::InvalidLink(key.clone())),
        }
    }
    Ok(links.clone())
}

fn validate_source(source: &Value) -> Result<ErrorSource, ErrorObjectError> {
    let mut other = source
        .as_object()
        .ok_or(ErrorObjectError::SourceNotAnObject)?
        .clone();
    let pointer = take_string(&mut other, "pointer", ErrorObjectError::InvalidSourcePointer)?;
    let parameter = take_string(
        &mut other,
        "parameter",
        ErrorObjectError::InvalidSourceParameter,
    )?;
    Ok(ErrorSource {
        pointer,
        parameter,
        other,
    })
}

fn take_string(
    obj: &mut JsonObject,
    key: &str,
    err: ErrorObjectError,
) -> Result<Option<String>, ErrorObjectError> {
    match obj.remove(key) {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(v) if is_truthy(&v) => Err(err),
        Some(v) => {
            obj.insert(key.to_string(), v);
            Ok(None)
        }
        None => Ok(None),
    }
}
