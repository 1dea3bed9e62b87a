//! API documentation model and builder.
//!
//! An [`ApiDocumentation`] groups endpoints under tags and carries the
//! service metadata, servers and security schemes around them. Request
//! bodies, response schemas and form-field schemas are field trees derived
//! by the walker and embedded by value.
//!
//! # Example
//!
//! ```rust
//! use apiduck::{ApiDocumentation, Endpoint, Info, Method, QueryParam, Response, Security};
//!
//! let mut docs = ApiDocumentation::new(Info::new("Users", "1.0.0"));
//! docs.add_server("https://api.example.com", "Production", None)
//!     .add_security(Security::bearer("BearerAuth", "JWT access token"));
//!
//! docs.add_tag("Users", "User management")
//!     .add_endpoint(
//!         Endpoint::new(Method::Get, "/users", "List users")
//!             .with_security(["BearerAuth"])
//!             .with_query(QueryParam::new("page", "integer", "Page number").with_min(1))
//!             .with_response(Response::for_status(200)),
//!     );
//!
//! assert_eq!(docs.tags[0].endpoints.len(), 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::field::Field;
use crate::status::status_message;
use crate::traits::ApiSchema;
use crate::walker::{derive, fields_of};

fn non_empty(text: impl Into<String>) -> Option<String> {
    Some(text.into()).filter(|text| !text.is_empty())
}

// =============================================================================
// Enumerations
// =============================================================================

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of authentication a security scheme describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityType {
    #[serde(rename = "apiKey")]
    ApiKey,
    #[serde(rename = "bearer")]
    Bearer,
    #[serde(rename = "basic")]
    Basic,
}

/// Where a credential is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLocation {
    Header,
    Query,
    Cookie,
}

// =============================================================================
// Service metadata
// =============================================================================

/// Service-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub contact: InfoContact,
    #[serde(default)]
    pub license: InfoLicense,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description);
        self
    }

    pub fn with_contact(mut self, contact: InfoContact) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_license(mut self, license: InfoLicense) -> Self {
        self.license = license;
        self
    }

    pub fn with_terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.terms_of_service = non_empty(url);
        self
    }
}

/// Contact details of the service owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InfoContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: non_empty(name),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_empty(email);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_empty(url);
        self
    }
}

/// License the API is published under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoLicense {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InfoLicense {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_empty(url);
        self
    }
}

/// A base URL the API is served from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

// =============================================================================
// Security
// =============================================================================

/// An authentication scheme endpoints can reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    #[serde(rename = "type")]
    pub security_type: SecurityType,
    pub name: String,
    #[serde(default)]
    pub key_name: String,
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<SecurityLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Security {
    /// API key passed in a header, query parameter or cookie named `key_name`.
    pub fn api_key(
        name: impl Into<String>,
        key_name: impl Into<String>,
        description: impl Into<String>,
        location: SecurityLocation,
    ) -> Self {
        Self {
            security_type: SecurityType::ApiKey,
            name: name.into(),
            key_name: key_name.into(),
            location: Some(location),
            scheme: None,
            description: non_empty(description),
        }
    }

    /// Bearer token in the `Authorization` header.
    pub fn bearer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::http(SecurityType::Bearer, "bearer", name, description)
    }

    /// HTTP basic authentication.
    pub fn basic(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::http(SecurityType::Basic, "basic", name, description)
    }

    fn http(
        security_type: SecurityType,
        scheme: &str,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            security_type,
            name: name.into(),
            key_name: String::new(),
            location: Some(SecurityLocation::Header),
            scheme: Some(scheme.to_string()),
            description: non_empty(description),
        }
    }
}

// =============================================================================
// Endpoint parts
// =============================================================================

/// Constraints on a query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamValidation {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// A query-string parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub validation: ParamValidation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
}

impl QueryParam {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: non_empty(description),
            ..Default::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.validation.required = required;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.validation.default = Some(value.into());
        self
    }

    pub fn with_min(mut self, min: i64) -> Self {
        self.validation.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.validation.max = Some(max);
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.validation.min_length = Some(min_length);
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.validation.max_length = Some(max_length);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.validation.pattern = non_empty(pattern);
        self
    }

    pub fn with_example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// A request or response header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Header {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: description.into(),
            required,
            example: None,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = non_empty(example);
        self
    }
}

/// A multipart or url-encoded form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<Field>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl FormField {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            description: non_empty(description),
            required,
            ..Default::default()
        }
    }

    pub fn with_example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// Attach the field tree of a structured form value.
    pub fn with_schema<T: ApiSchema + ?Sized>(mut self) -> Self {
        self.schema = fields_of::<T>();
        self
    }
}

/// A named example payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
}

impl Example {
    pub fn new(
        name: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            summary: non_empty(summary),
            description: non_empty(description),
            value: value.into(),
        }
    }

    /// Build an example from any serializable sample.
    pub fn from_sample<T: Serialize + ?Sized>(name: impl Into<String>, sample: &T) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            summary: None,
            description: None,
            value: serde_json::to_value(sample)?,
        })
    }
}

/// A documented response of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Response {
    pub fn new(status_code: u16, description: impl Into<String>) -> Self {
        Self {
            status_code,
            description: description.into(),
            ..Default::default()
        }
    }

    /// Response described by the standard reason phrase of `status_code`.
    ///
    /// Unregistered codes get an empty description.
    pub fn for_status(status_code: u16) -> Self {
        Self::new(status_code, status_message(status_code).unwrap_or_default())
    }

    /// Attach the field tree of type `T`.
    pub fn with_schema<T: ApiSchema + ?Sized>(mut self) -> Self {
        self.schema = fields_of::<T>();
        self
    }

    /// Attach the field tree of a sample value's type.
    pub fn with_schema_of<T: ApiSchema + ?Sized>(mut self, sample: &T) -> Self {
        self.schema = derive(sample);
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = non_empty(content_type);
        self
    }
}

// =============================================================================
// Endpoint
// =============================================================================

/// One operation on a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub method: Method,
    #[serde(default, rename = "queries", skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, rename = "formdata", skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<Response>,
    /// Names of the security schemes this endpoint accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<String>,
    /// Additional tags the endpoint belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            summary: summary.into(),
            description: None,
            method,
            query: Vec::new(),
            headers: Vec::new(),
            form: Vec::new(),
            body: Vec::new(),
            responses: Vec::new(),
            security: Vec::new(),
            tags: Vec::new(),
            deprecated: false,
            operation_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description);
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = non_empty(operation_id);
        self
    }

    /// Set the request body to the field tree of type `T`.
    pub fn with_body<T: ApiSchema + ?Sized>(mut self) -> Self {
        self.body = fields_of::<T>();
        self
    }

    /// Set the request body to the field tree of a sample value's type.
    pub fn with_body_of<T: ApiSchema + ?Sized>(mut self, sample: &T) -> Self {
        self.body = derive(sample);
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Replace the referenced security schemes.
    pub fn with_security<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.security = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the additional tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_query(mut self, param: QueryParam) -> Self {
        self.query.push(param);
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_form_field(mut self, field: FormField) -> Self {
        self.form.push(field);
        self
    }

    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// Look up a documented response by status code.
    pub fn response(&self, status_code: u16) -> Option<&Response> {
        self.responses.iter().find(|r| r.status_code == status_code)
    }
}

// =============================================================================
// Tags and the document
// =============================================================================

/// A named group of endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: non_empty(description),
            endpoints: Vec::new(),
        }
    }

    /// Append an endpoint and return it for further adjustment.
    pub fn add_endpoint(&mut self, endpoint: Endpoint) -> &mut Endpoint {
        tracing::trace!(
            tag = %self.name,
            method = %endpoint.method,
            path = %endpoint.path,
            "adding endpoint"
        );
        let index = self.endpoints.len();
        self.endpoints.push(endpoint);
        &mut self.endpoints[index]
    }
}

/// Root of a documentation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    pub info: Info,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Security>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    pub created_at: DateTime<Utc>,
}

impl ApiDocumentation {
    /// Create an empty documentation set stamped with the current time.
    pub fn new(info: Info) -> Self {
        Self {
            info,
            tags: Vec::new(),
            security: Vec::new(),
            servers: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn add_server(
        &mut self,
        url: impl Into<String>,
        description: impl Into<String>,
        variables: Option<BTreeMap<String, String>>,
    ) -> &mut Self {
        let server = Server {
            url: url.into(),
            description: description.into(),
            variables: variables.unwrap_or_default(),
        };
        tracing::trace!(url = %server.url, "adding server");
        self.servers.push(server);
        self
    }

    pub fn add_security(&mut self, security: Security) -> &mut Self {
        tracing::trace!(name = %security.name, "adding security scheme");
        self.security.push(security);
        self
    }

    /// Append a new tag and return it.
    ///
    /// Tags are not deduplicated; use [`tag`](Self::tag) to reuse one.
    pub fn add_tag(&mut self, name: impl Into<String>, description: impl Into<String>) -> &mut Tag {
        let tag = Tag::new(name, description);
        tracing::trace!(tag = %tag.name, "adding tag");
        let index = self.tags.len();
        self.tags.push(tag);
        &mut self.tags[index]
    }

    /// Return the first tag called `name`, creating it if absent.
    pub fn tag(&mut self, name: &str) -> &mut Tag {
        match self.tags.iter().position(|tag| tag.name == name) {
            Some(index) => &mut self.tags[index],
            None => self.add_tag(name, ""),
        }
    }

    /// Look up a tag without creating it.
    pub fn find_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Iterate over every endpoint of every tag.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.tags.iter().flat_map(|tag| tag.endpoints.iter())
    }
}
